//! Candidate scan across all substitution tables.
//!
//! The text is walked once from left to right. At each step every table
//! offers its leftmost match at or after the current offset; the leftmost
//! offer wins, and offers starting at the same offset are decided by
//! category priority (medical, number, qualifier, temporal). The walk then
//! resumes after the accepted match, so a table whose offer lost an overlap
//! is searched again from there and later keys are never swallowed.

use std::ops::Range;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::injection::category::ErrorType;
use crate::injection::table::{SubstitutionTable, SubstitutionTables, TableMatch};

/// A detected occurrence of a table key, before the probability gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Byte offset of the match in the original text.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
    /// Table the match came from.
    pub category: ErrorType,
    /// The matched text as it appears in the input.
    pub original: String,
    /// The canonical table key the match stands for.
    pub key: String,
    /// Replacements stored under `key`; empty for qualifiers.
    pub replacements: Vec<String>,
}

impl Candidate {
    fn from_match(category: ErrorType, text: &str, m: &TableMatch<'_>) -> Self {
        Self {
            start: m.range.start,
            end: m.range.end,
            category,
            original: text[m.range.clone()].to_string(),
            key: m.key.to_string(),
            replacements: m.replacements.to_vec(),
        }
    }

    /// Byte range of the match.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Find all eligible, non-overlapping candidates in `text`.
///
/// The result is sorted by start offset. Empty tables contribute nothing,
/// and an empty text yields an empty list.
pub fn find_candidates(tables: &SubstitutionTables, text: &str) -> Vec<Candidate> {
    if text.is_empty() {
        return Vec::new();
    }

    // Tables stay in priority order, so a lower index wins a tie.
    let active: Vec<&SubstitutionTable> = tables.iter().filter(|t| !t.is_empty()).collect();
    let mut offers: Vec<Option<TableMatch<'_>>> =
        active.iter().map(|table| table.find_at(text, 0)).collect();

    let mut accepted = Vec::new();
    let mut cursor = 0;

    loop {
        for (offer, table) in offers.iter_mut().zip(&active) {
            if offer.as_ref().is_some_and(|m| m.range.start < cursor) {
                if let Some(lost) = offer.as_ref() {
                    trace!(
                        "{} match '{}' at {} overlaps an accepted candidate, searching again",
                        table.category(),
                        &text[lost.range.clone()],
                        lost.range.start
                    );
                }
                *offer = table.find_at(text, cursor);
            }
        }

        let winner = offers
            .iter()
            .enumerate()
            .filter_map(|(index, offer)| offer.as_ref().map(|m| (m.range.start, index)))
            .min();

        let Some((_, index)) = winner else {
            break;
        };
        let Some(m) = offers[index].take() else {
            break;
        };

        let table = active[index];
        accepted.push(Candidate::from_match(table.category(), text, &m));
        cursor = m.range.end;
        offers[index] = table.find_at(text, cursor);
    }

    accepted
}
