//! Turns a raw worksheet into a `RankedCandidateList`.
//!
//! Cells are coerced to numbers leniently: anything that does not parse to a
//! finite number drops the row instead of failing the load.

use serde_json::Value;
use tracing::debug;

use crate::keywords::models::{
    KeywordCandidate, RankedCandidateList, SheetRow, SheetTable, DIFFICULTY_COLUMN,
    KEYWORD_COLUMN, MAX_DIFFICULTY, MIN_DIFFICULTY, VOLUME_COLUMN,
};
use crate::keywords::source::SheetError;

/// Number of raw rows shown before ranking.
pub const PREVIEW_ROWS: usize = 5;

/// Filters and sorts worksheet rows into ranked candidates.
///
/// Fails when a header name repeats or a required column is absent.
pub fn rank_candidates(table: &SheetTable) -> Result<RankedCandidateList, SheetError> {
    if let Some(header) = table.duplicate_header() {
        return Err(SheetError::DuplicateHeader(header.to_string()));
    }
    for column in [KEYWORD_COLUMN, DIFFICULTY_COLUMN, VOLUME_COLUMN] {
        if !table.has_column(column) {
            return Err(SheetError::MissingColumn(column.to_string()));
        }
    }

    let mut candidates: Vec<KeywordCandidate> = table
        .rows
        .iter()
        .filter_map(candidate_from_row)
        .filter(|c| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&c.difficulty))
        .collect();

    // Stable: rows equal on both keys keep worksheet order.
    candidates.sort_by(|a, b| {
        b.volume
            .total_cmp(&a.volume)
            .then(a.difficulty.total_cmp(&b.difficulty))
    });

    debug!(
        "Ranked {} of {} worksheet rows",
        candidates.len(),
        table.rows.len()
    );

    Ok(RankedCandidateList::from_sorted(candidates))
}

/// First `n` raw rows, untouched.
pub fn preview(table: &SheetTable, n: usize) -> Vec<SheetRow> {
    table.rows.iter().take(n).cloned().collect()
}

fn candidate_from_row(row: &SheetRow) -> Option<KeywordCandidate> {
    let difficulty = row.get(DIFFICULTY_COLUMN).and_then(to_number)?;
    let volume = row.get(VOLUME_COLUMN).and_then(to_number)?;
    let keyword = row.get(KEYWORD_COLUMN).map(cell_text).unwrap_or_default();

    Some(KeywordCandidate::new(keyword, difficulty, volume))
}

fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
