//! Frequency tables over coded answers.

use crate::codebook::Codebook;
use crate::data::Column;
use serde::Serialize;
use std::collections::BTreeMap;

/// A numeric cell as an answer code; fractional values are not codes.
pub fn code_of(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
}

/// Count of each answer code, ordered by code. Missing and unparsable cells
/// are excluded.
pub fn value_counts(column: &Column) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for code in column.numeric().flatten().filter_map(code_of) {
        *counts.entry(code).or_insert(0) += 1;
    }
    counts
}

/// Respondents who answered exactly `code`.
pub fn code_count(column: &Column, code: i64) -> usize {
    column
        .numeric()
        .flatten()
        .filter(|value| code_of(*value) == Some(code))
        .count()
}

/// `part` as a percentage of `whole`, 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Round to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeCount {
    pub code: i64,
    pub label: String,
    pub count: usize,
}

/// Counts of the codebook's known codes, most frequent first. Ties keep
/// code order. Codes outside the codebook are dropped.
pub fn labelled_counts(column: &Column, codebook: &Codebook) -> Vec<CodeCount> {
    let mut counts = labelled_counts_in_order(column, codebook);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Counts of the codebook's known codes in questionnaire order. Codes that
/// nobody answered are omitted.
pub fn labelled_counts_in_order(column: &Column, codebook: &Codebook) -> Vec<CodeCount> {
    let counts = value_counts(column);
    codebook
        .entries()
        .iter()
        .filter_map(|(code, label)| {
            counts.get(code).map(|count| CodeCount {
                code: *code,
                label: (*label).to_string(),
                count: *count,
            })
        })
        .collect()
}
