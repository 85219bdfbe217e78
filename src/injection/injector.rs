//! The error injector.
//!
//! [`ErrorInjector`] owns the four substitution tables, the error probability
//! and a dedicated random source. Injection runs in three steps:
//!
//! 1. a single scan collects non-overlapping candidates with original-text offsets,
//! 2. one Bernoulli draw per candidate (left to right) decides whether it is applied,
//! 3. accepted edits are spliced into a copy of the original text.
//!
//! Reseeding before a call makes the output a pure function of seed, text,
//! probability and table contents.
//!
//! An injector is not meant to be shared: injection takes `&mut self`, so use
//! one instance per thread.

use std::fmt;
use std::ops::Range;
use std::path::Path;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::injection::category::ErrorType;
use crate::injection::config::{InjectorConfig, validate_probability};
use crate::injection::conversation::{Conversation, Turn};
use crate::injection::matcher::{self, Candidate};
use crate::injection::overrides::TableOverrides;
use crate::injection::table::{SubstitutionTable, SubstitutionTables};

/// One applied edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    turn_index: Option<usize>,
    position: usize,
    byte_offset: usize,
    error_type: ErrorType,
    original: String,
    replacement: String,
}

impl ErrorRecord {
    /// Index of the turn that produced this record; `None` in single-text mode.
    pub fn turn_index(&self) -> Option<usize> {
        self.turn_index
    }

    /// Character offset of the match in the original text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte offset of the match in the original text.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// The matched text as it appeared in the input.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The inserted text; empty for omissions.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Character range of the match in the original text.
    pub fn char_range(&self) -> Range<usize> {
        self.position..self.position + self.original.chars().count()
    }

    fn with_turn_index(mut self, turn_index: usize) -> Self {
        self.turn_index = Some(turn_index);
        self
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(turn) = self.turn_index {
            write!(f, "turn {turn}, ")?;
        }
        write!(
            f,
            "position {}: {} '{}' -> '{}'",
            self.position, self.error_type, self.original, self.replacement
        )
    }
}

/// Output of a single-text injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionResult {
    pub text: String,
    pub errors: Vec<ErrorRecord>,
}

/// Output of a conversation injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationInjectionResult {
    pub conversation: Conversation,
    pub errors: Vec<ErrorRecord>,
}

/// A pending splice against original-text byte offsets.
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Injects plausible mistranslations into medical dialogue.
#[derive(Debug, Clone)]
pub struct ErrorInjector {
    error_probability: f64,
    tables: SubstitutionTables,
    rng: StdRng,
}

impl ErrorInjector {
    /// Create an injector with the built-in tables.
    ///
    /// Fails if `error_probability` is outside `[0, 1]`.
    pub fn new(error_probability: f64) -> Result<Self> {
        Self::with_config(InjectorConfig::new(error_probability))
    }

    /// Create an injector from a configuration.
    pub fn with_config(config: InjectorConfig) -> Result<Self> {
        Self::with_tables(config, SubstitutionTables::builtin()?)
    }

    /// Create an injector with caller-supplied tables.
    pub fn with_tables(config: InjectorConfig, tables: SubstitutionTables) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            error_probability: config.error_probability,
            tables,
            rng,
        })
    }

    pub fn error_probability(&self) -> f64 {
        self.error_probability
    }

    /// Change the probability for subsequent calls.
    pub fn set_error_probability(&mut self, error_probability: f64) -> Result<()> {
        validate_probability(error_probability)?;
        self.error_probability = error_probability;
        Ok(())
    }

    /// Reset the random source to a known state.
    pub fn reseed(&mut self, seed: u64) {
        debug!("reseeding injector with {seed}");
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn tables(&self) -> &SubstitutionTables {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut SubstitutionTables {
        &mut self.tables
    }

    pub fn table(&self, category: ErrorType) -> &SubstitutionTable {
        self.tables.get(category)
    }

    pub fn table_mut(&mut self, category: ErrorType) -> &mut SubstitutionTable {
        self.tables.get_mut(category)
    }

    /// Add or override a substitution. For qualifiers pass no replacements.
    pub fn add_substitution<K, R>(
        &mut self,
        category: ErrorType,
        term: K,
        replacements: R,
    ) -> Result<()>
    where
        K: AsRef<str>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        self.tables.get_mut(category).insert(term, replacements)?;
        Ok(())
    }

    /// Add a qualifier to omit.
    pub fn add_qualifier<K: AsRef<str>>(&mut self, term: K) -> Result<()> {
        self.add_substitution(ErrorType::QualifierOmission, term, Vec::<String>::new())
    }

    /// Remove a term. Returns whether it was present.
    pub fn remove_term(&mut self, category: ErrorType, term: &str) -> Result<bool> {
        Ok(self.tables.get_mut(category).remove(term)?.is_some())
    }

    /// Apply a set of table overrides; all or nothing.
    pub fn apply_overrides(&mut self, overrides: TableOverrides) -> Result<()> {
        let count = overrides.len();
        overrides.apply_to(&mut self.tables)?;
        debug!("applied {count} table overrides");
        Ok(())
    }

    /// Load and apply table overrides from a JSON file.
    pub fn load_overrides<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let overrides = TableOverrides::load_from_file(path)?;
        self.apply_overrides(overrides)
    }

    /// Non-overlapping candidates in `text`, before the probability gate.
    pub fn find_candidates(&self, text: &str) -> Vec<Candidate> {
        matcher::find_candidates(&self.tables, text)
    }

    /// Inject errors into a single text.
    ///
    /// With `seed`, the random source is reseeded first so repeated calls give
    /// identical output. Records carry no turn index.
    pub fn inject_errors(&mut self, text: &str, seed: Option<u64>) -> InjectionResult {
        if let Some(seed) = seed {
            self.reseed(seed);
        }
        self.inject(text)
    }

    /// Inject errors into every turn of a conversation.
    ///
    /// The conversation is validated before any turn is processed. With `seed`,
    /// the random source is reseeded once for the whole conversation and turns
    /// consume it in order.
    pub fn inject_errors_in_conversation(
        &mut self,
        conversation: &Conversation,
        seed: Option<u64>,
    ) -> Result<ConversationInjectionResult> {
        conversation.validate()?;

        if let Some(seed) = seed {
            self.reseed(seed);
        }

        let mut turns = Vec::with_capacity(conversation.len());
        let mut errors = Vec::new();

        for (turn_index, turn) in conversation.iter().enumerate() {
            let result = self.inject(&turn.text);
            turns.push(Turn::new(turn.speaker.clone(), result.text));
            errors.extend(
                result
                    .errors
                    .into_iter()
                    .map(|record| record.with_turn_index(turn_index)),
            );
        }

        debug!(
            "injected {} errors across {} turns",
            errors.len(),
            conversation.len()
        );

        Ok(ConversationInjectionResult {
            conversation: Conversation::from(turns),
            errors,
        })
    }

    fn inject(&mut self, text: &str) -> InjectionResult {
        let candidates = matcher::find_candidates(&self.tables, text);
        let total = candidates.len();

        let mut edits: Vec<Edit> = Vec::new();
        let mut errors: Vec<ErrorRecord> = Vec::new();

        // Byte/char cursors for converting match offsets to character positions.
        let mut byte_cursor = 0;
        let mut char_cursor = 0;
        for candidate in candidates {
            let sample: f64 = self.rng.random();
            if sample >= self.error_probability {
                continue;
            }

            // An omission may have consumed separators up to this candidate.
            let claimed = edits.last().map_or(0, |edit| edit.range.end);
            if candidate.start < claimed {
                trace!("'{}' already removed, skipping", candidate.original);
                continue;
            }

            let replacement = match candidate.replacements.as_slice() {
                _ if candidate.category.is_omission() => String::new(),
                [] => String::new(),
                [only] => match_case(&candidate.original, only),
                options => {
                    let chosen = &options[self.rng.random_range(0..options.len())];
                    match_case(&candidate.original, chosen)
                }
            };

            let range = if candidate.category.is_omission() {
                omission_range(text, &candidate, &edits)
            } else {
                candidate.range()
            };

            char_cursor += text[byte_cursor..candidate.start].chars().count();
            byte_cursor = candidate.start;

            trace!(
                "{} at {}: '{}' -> '{}'",
                candidate.category, char_cursor, candidate.original, replacement
            );

            edits.push(Edit {
                range,
                replacement: replacement.clone(),
            });
            errors.push(ErrorRecord {
                turn_index: None,
                position: char_cursor,
                byte_offset: candidate.start,
                error_type: candidate.category,
                original: candidate.original,
                replacement,
            });
        }

        debug!("applied {} of {} candidates", edits.len(), total);

        InjectionResult {
            text: apply_edits(text, &edits),
            errors,
        }
    }
}

/// Byte range to delete for an omitted qualifier.
///
/// A trailing `,` or `;` goes with the token when the text that survives
/// before it already ends in the same separator, so lists of qualifiers
/// collapse to a single separator. One adjacent whitespace character is
/// removed as well, preferring the following one; the preceding one is only
/// taken if no earlier edit already reaches it.
fn omission_range(text: &str, candidate: &Candidate, edits: &[Edit]) -> Range<usize> {
    let claimed = edits.last().map_or(0, |edit| edit.range.end);
    let mut range = candidate.range();

    if let Some(separator) = text[range.end..]
        .chars()
        .next()
        .filter(|c| matches!(c, ',' | ';'))
    {
        if last_surviving_char(text, range.start, edits) == Some(separator) {
            range.end += separator.len_utf8();
        }
    }

    if let Some(next) = text[range.end..].chars().next().filter(|c| c.is_whitespace()) {
        range.end += next.len_utf8();
    } else if let Some(prev) = text[..range.start]
        .chars()
        .next_back()
        .filter(|c| c.is_whitespace())
    {
        let start = range.start - prev.len_utf8();
        if start >= claimed {
            range.start = start;
        }
    }

    range
}

/// Last non-whitespace character of the output before byte offset `before`,
/// taking the already accepted `edits` into account.
fn last_surviving_char(text: &str, before: usize, edits: &[Edit]) -> Option<char> {
    let last_visible = |s: &str| s.chars().rev().find(|c| !c.is_whitespace());
    let mut end = before;

    for edit in edits.iter().rev() {
        let kept = text.get(edit.range.end..end).unwrap_or_default();
        if let Some(c) = last_visible(kept).or_else(|| last_visible(&edit.replacement)) {
            return Some(c);
        }
        end = edit.range.start;
    }

    last_visible(&text[..end])
}

/// Rebuild the text from original offsets. `edits` are sorted and disjoint.
fn apply_edits(text: &str, edits: &[Edit]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for edit in edits {
        output.push_str(&text[last_end..edit.range.start]);
        output.push_str(&edit.replacement);
        last_end = edit.range.end;
    }

    output.push_str(&text[last_end..]);
    output
}

/// Carry the case pattern of `original` over to `replacement`.
///
/// ALL-CAPS (two or more letters) upper-cases the replacement; a capitalized
/// first letter capitalizes it; anything else keeps the table's spelling.
fn match_case(original: &str, replacement: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();

    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }

    match original.chars().next() {
        Some(first) if first.is_uppercase() => capitalize(replacement),
        _ => replacement.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
