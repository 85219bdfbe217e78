//! Mistranslation injection for medical dialogue.
//!
//! This module holds the whole engine: substitution tables for four error
//! categories, a single-pass candidate scan with word-boundary matching and
//! priority-based overlap resolution, and the [`injector::ErrorInjector`]
//! that gates each candidate with a seeded Bernoulli draw and records every
//! applied edit.
//!
//! # Examples
//!
//! ```
//! use mistranslate::injection::injector::ErrorInjector;
//!
//! let mut injector = ErrorInjector::new(1.0).unwrap();
//! let result = injector.inject_errors("Take fifteen milligrams.", Some(42));
//! assert_eq!(result.text, "Take fifty milligrams.");
//! assert_eq!(result.errors.len(), 1);
//! ```

pub mod category;
pub mod config;
pub mod conversation;
pub mod defaults;
pub mod injector;
pub mod matcher;
pub mod overrides;
pub mod table;
