//! Prevalence of substance use and of security threats.

use super::frequency::{code_count, percent};
use crate::codebook::{ColumnGroup, SECURITY_FACTORS, SUBSTANCES_CURRENT, YES};
use crate::data::{Column, RespondentTable};
use crate::notice::Notice;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prevalence {
    pub column: &'static str,
    pub label: &'static str,
    /// Respondents answering yes.
    pub yes: usize,
    /// Respondents the percentage is taken over.
    pub base: usize,
    pub percent: f64,
    /// False when the column is absent and the row was defaulted to 0%.
    pub present: bool,
}

/// One row per sub-question, highest percentage first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prevalences {
    pub question: &'static str,
    pub rows: Vec<Prevalence>,
}

/// Share of ALL respondents currently using each substance.
pub fn substances(table: &RespondentTable) -> (Prevalences, Vec<Notice>) {
    let rows = table.row_count();
    prevalences(table, &SUBSTANCES_CURRENT, "current substance use", |_| rows)
}

/// Share of respondents who answered each security question that said yes.
pub fn security(table: &RespondentTable) -> (Prevalences, Vec<Notice>) {
    prevalences(table, &SECURITY_FACTORS, "security factors", Column::present_count)
}

fn prevalences(
    table: &RespondentTable,
    group: &ColumnGroup,
    used_for: &str,
    base_of: impl Fn(&Column) -> usize,
) -> (Prevalences, Vec<Notice>) {
    let mut notices = Vec::new();
    let mut data = Prevalences {
        question: group.question,
        rows: Vec::new(),
    };

    if !group.columns().any(|name| table.has_column(name)) {
        notices.push(Notice::missing_group(group.span(), used_for));
        return (data, notices);
    }

    for &(name, label) in group.entries() {
        let row = match table.column(name) {
            Some(column) => {
                let yes = code_count(column, YES);
                let base = base_of(column);
                Prevalence {
                    column: name,
                    label,
                    yes,
                    base,
                    percent: percent(yes, base),
                    present: true,
                }
            }
            None => {
                notices.push(Notice::missing_column(name, used_for));
                Prevalence {
                    column: name,
                    label,
                    yes: 0,
                    base: 0,
                    percent: 0.0,
                    present: false,
                }
            }
        };
        data.rows.push(row);
    }

    // Stable, so equal percentages keep questionnaire order.
    data.rows
        .sort_by(|a, b| b.percent.partial_cmp(&a.percent).unwrap_or(Ordering::Equal));
    (data, notices)
}
