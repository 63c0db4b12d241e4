use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KEYWORD_COLUMN: &str = "Keyword";
pub const DIFFICULTY_COLUMN: &str = "KD";
pub const VOLUME_COLUMN: &str = "MSV";

/// Inclusive keyword-difficulty window a row must fall into to be offered.
pub const MIN_DIFFICULTY: f64 = 5.0;
pub const MAX_DIFFICULTY: f64 = 40.0;

/// One raw worksheet row, keyed by header name.
pub type SheetRow = BTreeMap<String, Value>;

/// A worksheet as read from the source: the header row plus every data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl SheetTable {
    /// Builds a table from a header row and positional data rows.
    /// Rows shorter than the header leave the trailing cells missing.
    /// Repeated header names collapse to the last column of that name; see
    /// `duplicate_header`, which ranking rejects before reading any row.
    pub fn from_grid(headers: Vec<String>, grid: Vec<Vec<Value>>) -> Self {
        let rows = grid
            .into_iter()
            .map(|cells| {
                headers
                    .iter()
                    .cloned()
                    .zip(cells)
                    .filter(|(header, _)| !header.is_empty())
                    .collect::<SheetRow>()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// First non-empty header name that appears more than once.
    pub fn duplicate_header(&self) -> Option<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .find(|(i, h)| self.headers[..*i].contains(*h))
            .map(|(_, h)| h.as_str())
    }
}

/// A worksheet row that survived numeric coercion and the difficulty filter.
///
/// Equality is structural over all three fields: two rows with the same keyword
/// but different metrics are distinct candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCandidate {
    pub keyword: String,
    pub difficulty: f64,
    pub volume: f64,
}

impl KeywordCandidate {
    pub fn new(keyword: impl Into<String>, difficulty: f64, volume: f64) -> Self {
        Self {
            keyword: keyword.into(),
            difficulty,
            volume,
        }
    }
}

/// Candidates ordered by volume (descending), ties by difficulty (ascending).
///
/// Only `ranking::rank_candidates` builds one from sheet data, so the ordering
/// and the difficulty window always hold. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedCandidateList(Vec<KeywordCandidate>);

impl RankedCandidateList {
    pub(crate) fn from_sorted(candidates: Vec<KeywordCandidate>) -> Self {
        Self(candidates)
    }
}

impl Deref for RankedCandidateList {
    type Target = [KeywordCandidate];

    fn deref(&self) -> &[KeywordCandidate] {
        &self.0
    }
}
