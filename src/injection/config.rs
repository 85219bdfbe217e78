//! Configuration for error injection.

use serde::{Deserialize, Serialize};

use crate::error::{MistranslateError, Result};

/// Default per-occurrence probability of injecting an error.
pub const DEFAULT_ERROR_PROBABILITY: f64 = 0.15;

/// Configuration for an [`ErrorInjector`](crate::injection::injector::ErrorInjector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorConfig {
    /// Probability (0.0-1.0) that an eligible candidate is modified.
    pub error_probability: f64,
    /// Initial seed for the random source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            error_probability: DEFAULT_ERROR_PROBABILITY,
            seed: None,
        }
    }
}

impl InjectorConfig {
    /// Create a configuration with the given probability and no seed.
    pub fn new(error_probability: f64) -> Self {
        Self {
            error_probability,
            ..Default::default()
        }
    }

    /// Set the initial seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        validate_probability(self.error_probability)
    }
}

/// Reject probabilities outside `[0, 1]` (NaN included).
pub fn validate_probability(probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(MistranslateError::invalid_argument(format!(
            "error_probability must be within [0, 1], got {probability}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injector_config_default() {
        let config = InjectorConfig::default();
        assert_eq!(config.error_probability, 0.15);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = InjectorConfig::new(0.5).with_seed(7);
        assert_eq!(config.error_probability, 0.5);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_probability() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(1.0).is_ok());
        assert!(validate_probability(-0.01).is_err());
        assert!(validate_probability(1.01).is_err());
        assert!(validate_probability(f64::NAN).is_err());
        assert!(InjectorConfig::new(2.0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: InjectorConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.error_probability, DEFAULT_ERROR_PROBABILITY);
        assert_eq!(config.seed, Some(42));
    }
}
