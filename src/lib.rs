//! # mistranslate
//!
//! Perturbs medical-dialogue text with plausible interpreter mistranslations
//! and reports every change, for training and testing interpreter-error
//! detection.
//!
//! ## Features
//!
//! - Four error categories: medical terms, numbers, qualifier omission,
//!   temporal/directional terms
//! - Word-boundary aware matching, including multi-word phrases
//! - Reproducible output from an explicit seed
//! - Mutable substitution tables, loadable from JSON
//! - Conversation-level injection with per-turn error records

pub mod cli;
pub mod error;
pub mod injection;

pub mod prelude {
    pub use crate::error::{MistranslateError, Result};
    pub use crate::injection::category::ErrorType;
    pub use crate::injection::config::InjectorConfig;
    pub use crate::injection::conversation::{Conversation, Turn};
    pub use crate::injection::injector::{
        ConversationInjectionResult, ErrorInjector, ErrorRecord, InjectionResult,
    };
    pub use crate::injection::matcher::Candidate;
    pub use crate::injection::overrides::TableOverrides;
    pub use crate::injection::table::{SubstitutionTable, SubstitutionTables};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
