//! JSON table overrides.
//!
//! An override file adds or replaces entries in any of the four tables:
//!
//! ```json
//! {
//!   "medical": {"angina": ["anemia"], "stent": "stint"},
//!   "number": {"7": "11"},
//!   "qualifiers": ["hardly"],
//!   "temporal": {"daily": ["weekly"]}
//! }
//! ```
//!
//! Every section is optional. A replacement may be a single string or a list.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MistranslateError, Result};
use crate::injection::category::ErrorType;
use crate::injection::table::SubstitutionTables;

/// One replacement or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Replacements {
    One(String),
    Many(Vec<String>),
}

impl Replacements {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Replacements::One(value) => vec![value],
            Replacements::Many(values) => values,
        }
    }
}

/// Additions and overrides for the substitution tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableOverrides {
    pub medical: BTreeMap<String, Replacements>,
    pub number: BTreeMap<String, Replacements>,
    pub qualifiers: Vec<String>,
    pub temporal: BTreeMap<String, Replacements>,
}

impl TableOverrides {
    /// Parse overrides from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            MistranslateError::invalid_argument(format!(
                "Failed to parse table overrides from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Total number of entries across all sections.
    pub fn len(&self) -> usize {
        self.medical.len() + self.number.len() + self.qualifiers.len() + self.temporal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply every section to `tables`.
    ///
    /// Either all entries are applied or, on the first invalid entry, none are.
    pub fn apply_to(self, tables: &mut SubstitutionTables) -> Result<()> {
        let mut staged = tables.clone();

        staged.get_mut(ErrorType::MedicalSubstitution).extend(
            self.medical
                .into_iter()
                .map(|(term, replacements)| (term, replacements.into_vec())),
        )?;
        staged.get_mut(ErrorType::NumberSubstitution).extend(
            self.number
                .into_iter()
                .map(|(term, replacements)| (term, replacements.into_vec())),
        )?;
        staged.get_mut(ErrorType::QualifierOmission).extend(
            self.qualifiers
                .into_iter()
                .map(|term| (term, Vec::<String>::new())),
        )?;
        staged.get_mut(ErrorType::TemporalSubstitution).extend(
            self.temporal
                .into_iter()
                .map(|(term, replacements)| (term, replacements.into_vec())),
        )?;

        *tables = staged;
        Ok(())
    }
}
