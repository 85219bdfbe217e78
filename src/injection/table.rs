//! Substitution tables.
//!
//! A [`SubstitutionTable`] maps canonical (lower-cased) terms of one
//! [`ErrorType`] to their replacement strings and keeps a compiled matcher of
//! its keys in sync with every mutation. [`SubstitutionTables`] groups the four
//! tables an injector owns.

use std::collections::BTreeMap;
use std::ops::Range;

use log::trace;
use regex::{Regex, RegexBuilder};

use crate::error::{MistranslateError, Result};
use crate::injection::category::ErrorType;
use crate::injection::defaults;

/// Mapping from canonical terms to replacements for a single category.
///
/// Lookups are case-insensitive. Qualifier tables store no replacements:
/// a match is deleted instead of replaced.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    category: ErrorType,
    entries: BTreeMap<String, Vec<String>>,
    /// Word-bounded alternation of all keys, longest first, one capture group
    /// per key. `None` when empty.
    pattern: Option<Regex>,
    /// Canonical key for each capture group of `pattern`, in group order.
    keys: Vec<String>,
}

/// One match of a table key in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMatch<'a> {
    /// Byte range of the match.
    pub range: Range<usize>,
    /// The canonical key that matched.
    pub key: &'a str,
    /// Replacements stored under `key`; empty for qualifiers.
    pub replacements: &'a [String],
}

impl SubstitutionTable {
    /// Create an empty table for the given category.
    pub fn new(category: ErrorType) -> Self {
        Self {
            category,
            entries: BTreeMap::new(),
            pattern: None,
            keys: Vec::new(),
        }
    }

    /// Build a table from `(term, replacements)` pairs.
    pub fn from_entries<I, K, R>(category: ErrorType, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, R)>,
        K: AsRef<str>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let mut table = Self::new(category);
        table.extend(entries)?;
        Ok(table)
    }

    /// The category this table feeds.
    pub fn category(&self) -> ErrorType {
        self.category
    }

    /// Insert or override a single entry.
    ///
    /// Returns the replacements previously stored under the term, if any.
    pub fn insert<K, R>(&mut self, term: K, replacements: R) -> Result<Option<Vec<String>>>
    where
        K: AsRef<str>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let (key, values) = self.validate_entry(term.as_ref(), replacements)?;
        let previous = self.entries.insert(key, values);
        self.rebuild_pattern()?;
        Ok(previous)
    }

    /// Insert or override many entries, recompiling the matcher once.
    ///
    /// Nothing is inserted if any entry is invalid.
    pub fn extend<I, K, R>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, R)>,
        K: AsRef<str>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let validated = entries
            .into_iter()
            .map(|(term, replacements)| self.validate_entry(term.as_ref(), replacements))
            .collect::<Result<Vec<_>>>()?;

        if validated.is_empty() {
            return Ok(());
        }

        self.entries.extend(validated);
        self.rebuild_pattern()
    }

    /// Remove a term. Returns its replacements if it was present.
    pub fn remove(&mut self, term: &str) -> Result<Option<Vec<String>>> {
        let removed = self.entries.remove(&normalize_term(term));
        if removed.is_some() {
            self.rebuild_pattern()?;
        }
        Ok(removed)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pattern = None;
        self.keys.clear();
    }

    /// Replacements for a term, looked up case-insensitively.
    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.entries.get(&normalize_term(term)).map(Vec::as_slice)
    }

    /// Check if the table has an entry for the term.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(&normalize_term(term))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(term, replacements)` in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(term, values)| (term.as_str(), values.as_slice()))
    }

    /// The compiled matcher for all keys, if the table is non-empty.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Leftmost match starting at or after byte offset `start`.
    ///
    /// Word boundaries are checked against the whole text, so a match right
    /// after `start` still needs a non-word character before it.
    pub fn find_at(&self, text: &str, start: usize) -> Option<TableMatch<'_>> {
        let captures = self.pattern.as_ref()?.captures_at(text, start)?;
        let range = captures.get(0)?.range();
        let group = captures.iter().skip(1).position(|g| g.is_some())?;
        let key = self.keys.get(group)?;
        let replacements = self.entries.get(key).map_or(&[][..], Vec::as_slice);

        Some(TableMatch {
            range,
            key: key.as_str(),
            replacements,
        })
    }

    fn validate_entry<R>(&self, term: &str, replacements: R) -> Result<(String, Vec<String>)>
    where
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let key = normalize_term(term);
        if key.is_empty() {
            return Err(MistranslateError::invalid_argument(format!(
                "empty term in {} table",
                self.category
            )));
        }

        let values: Vec<String> = replacements.into_iter().map(Into::into).collect();

        if self.category.is_omission() {
            if values.iter().any(|v| !v.is_empty()) {
                return Err(MistranslateError::invalid_argument(format!(
                    "qualifier '{key}' cannot carry a replacement; qualifiers are omitted"
                )));
            }
            return Ok((key, Vec::new()));
        }

        if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
            return Err(MistranslateError::invalid_argument(format!(
                "term '{key}' in {} table needs at least one non-empty replacement",
                self.category
            )));
        }

        Ok((key, values))
    }

    fn rebuild_pattern(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            self.pattern = None;
            self.keys.clear();
            return Ok(());
        }

        // Longest keys first so the alternation prefers "twice a day" over "twice".
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let alternation = keys
            .iter()
            .map(|key| format!("({})", key_pattern(key)))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!("(?:{alternation})"))
            .case_insensitive(true)
            .build()?;

        trace!(
            "rebuilt {} matcher with {} keys",
            self.category,
            self.entries.len()
        );

        self.keys = keys.into_iter().cloned().collect();
        self.pattern = Some(pattern);
        Ok(())
    }
}

/// Canonical form of a table key.
pub(crate) fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Characters that `\b` treats as part of a word.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Regex fragment for one key: words separated by any run of whitespace,
/// bounded by `\b` on every side that starts or ends with a word character.
fn key_pattern(key: &str) -> String {
    let body = key
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let leading = key.chars().next().is_some_and(is_word_char);
    let trailing = key.chars().last().is_some_and(is_word_char);

    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        body,
        if trailing { r"\b" } else { "" }
    )
}

fn expand<'a>(
    entries: &'a [(&'a str, &'a [&'a str])],
) -> impl Iterator<Item = (&'a str, impl Iterator<Item = &'a str>)> {
    entries
        .iter()
        .map(|(term, replacements)| (*term, replacements.iter().copied()))
}

/// The four tables owned by an injector, one per [`ErrorType`].
#[derive(Debug, Clone)]
pub struct SubstitutionTables {
    medical: SubstitutionTable,
    number: SubstitutionTable,
    qualifier: SubstitutionTable,
    temporal: SubstitutionTable,
}

impl SubstitutionTables {
    /// Four empty tables.
    pub fn empty() -> Self {
        Self {
            medical: SubstitutionTable::new(ErrorType::MedicalSubstitution),
            number: SubstitutionTable::new(ErrorType::NumberSubstitution),
            qualifier: SubstitutionTable::new(ErrorType::QualifierOmission),
            temporal: SubstitutionTable::new(ErrorType::TemporalSubstitution),
        }
    }

    /// Tables populated with the built-in defaults.
    pub fn builtin() -> Result<Self> {
        let mut tables = Self::empty();
        tables.medical.extend(expand(defaults::MEDICAL))?;
        tables.number.extend(expand(defaults::NUMBERS))?;
        tables.qualifier.extend(
            defaults::QUALIFIERS
                .iter()
                .map(|term| (*term, std::iter::empty::<String>())),
        )?;
        tables.temporal.extend(expand(defaults::TEMPORAL))?;
        Ok(tables)
    }

    /// The table for a category.
    pub fn get(&self, category: ErrorType) -> &SubstitutionTable {
        match category {
            ErrorType::MedicalSubstitution => &self.medical,
            ErrorType::NumberSubstitution => &self.number,
            ErrorType::QualifierOmission => &self.qualifier,
            ErrorType::TemporalSubstitution => &self.temporal,
        }
    }

    /// Mutable access to the table for a category.
    pub fn get_mut(&mut self, category: ErrorType) -> &mut SubstitutionTable {
        match category {
            ErrorType::MedicalSubstitution => &mut self.medical,
            ErrorType::NumberSubstitution => &mut self.number,
            ErrorType::QualifierOmission => &mut self.qualifier,
            ErrorType::TemporalSubstitution => &mut self.temporal,
        }
    }

    /// Tables in scan priority order.
    pub fn iter(&self) -> impl Iterator<Item = &SubstitutionTable> {
        ErrorType::ALL.into_iter().map(|category| self.get(category))
    }

    /// Total number of entries across all tables.
    pub fn total_entries(&self) -> usize {
        self.iter().map(SubstitutionTable::len).sum()
    }
}
