//! Error categories and their scan priority.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MistranslateError;

/// The kind of mistranslation recorded for one edit.
///
/// The declaration order is the overlap priority used by the candidate scan:
/// when two categories match at the same offset, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A medical term swapped for a similar-sounding or opposite one.
    MedicalSubstitution,
    /// A number swapped for a commonly misheard one (fifteen / fifty).
    NumberSubstitution,
    /// A negation or frequency qualifier dropped entirely.
    QualifierOmission,
    /// A temporal or directional term swapped for its counterpart.
    TemporalSubstitution,
}

impl ErrorType {
    /// All categories in scan priority order.
    pub const ALL: [ErrorType; 4] = [
        ErrorType::MedicalSubstitution,
        ErrorType::NumberSubstitution,
        ErrorType::QualifierOmission,
        ErrorType::TemporalSubstitution,
    ];

    /// Lower value wins an overlap tie.
    pub fn priority(self) -> usize {
        self as usize
    }

    /// Whether an applied edit deletes the match instead of replacing it.
    pub fn is_omission(self) -> bool {
        matches!(self, ErrorType::QualifierOmission)
    }

    /// The snake_case tag used in serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::MedicalSubstitution => "medical_substitution",
            ErrorType::NumberSubstitution => "number_substitution",
            ErrorType::QualifierOmission => "qualifier_omission",
            ErrorType::TemporalSubstitution => "temporal_substitution",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorType {
    type Err = MistranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "medical" | "medical_substitution" => Ok(ErrorType::MedicalSubstitution),
            "number" | "number_substitution" => Ok(ErrorType::NumberSubstitution),
            "qualifier" | "qualifier_omission" => Ok(ErrorType::QualifierOmission),
            "temporal" | "temporal_substitution" => Ok(ErrorType::TemporalSubstitution),
            other => Err(MistranslateError::invalid_argument(format!(
                "unknown error type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let priorities: Vec<usize> = ErrorType::ALL.iter().map(|t| t.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3]);
        assert!(ErrorType::MedicalSubstitution < ErrorType::TemporalSubstitution);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&ErrorType::QualifierOmission).unwrap();
        assert_eq!(json, "\"qualifier_omission\"");

        let parsed: ErrorType = serde_json::from_str("\"temporal_substitution\"").unwrap();
        assert_eq!(parsed, ErrorType::TemporalSubstitution);
        assert_eq!(parsed.to_string(), "temporal_substitution");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("medical".parse::<ErrorType>().unwrap(), ErrorType::MedicalSubstitution);
        assert_eq!(" Number ".parse::<ErrorType>().unwrap(), ErrorType::NumberSubstitution);
        assert!("spelling".parse::<ErrorType>().is_err());
    }

    #[test]
    fn test_is_omission() {
        assert!(ErrorType::QualifierOmission.is_omission());
        assert!(!ErrorType::MedicalSubstitution.is_omission());
    }
}
