//! Where respondents are and who they are.

use super::frequency::{labelled_counts, value_counts, CodeCount};
use super::stats::{Histogram, NumericSummary};
use crate::codebook::{Codebook, AGE_COLUMN, DEPARTMENT, SEX, SLEEP_LOCATION, SLEEP_MUNICIPALITY};
use crate::data::RespondentTable;
use crate::notice::Notice;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCount {
    /// DANE code, zero-padded to two digits.
    pub code: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geography {
    pub departments: Vec<DepartmentCount>,
}

/// Respondents per department, most surveyed first.
pub fn geography(table: &RespondentTable) -> (Geography, Vec<Notice>) {
    let mut notices = Vec::new();
    let departments = match table.column(DEPARTMENT.column) {
        Some(column) => {
            let mut departments: Vec<_> = value_counts(column)
                .into_iter()
                .map(|(code, count)| DepartmentCount {
                    code: DEPARTMENT.display_code(code),
                    name: DEPARTMENT.label(code).into_owned(),
                    count,
                })
                .collect();
            departments.sort_by(|a, b| b.count.cmp(&a.count));
            departments
        }
        None => {
            notices.push(Notice::missing_column(DEPARTMENT.column, "department code"));
            Vec::new()
        }
    };
    (Geography { departments }, notices)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    pub summary: NumericSummary,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub sex: Vec<CodeCount>,
    pub age: Option<AgeDistribution>,
}

pub fn demographics(table: &RespondentTable, age_max_bins: usize) -> (Demographics, Vec<Notice>) {
    let mut notices = Vec::new();
    let sex = coded_counts(table, &SEX, "sex", &mut notices);

    let age = match table.column(AGE_COLUMN) {
        Some(column) => {
            let values = column.numeric_values();
            let distribution = NumericSummary::from_values(&values).zip(Histogram::nice(
                &values,
                age_max_bins,
            ));
            if distribution.is_none() {
                notices.push(Notice::NoValidValues {
                    column: AGE_COLUMN.to_string(),
                });
            }
            distribution.map(|(summary, histogram)| AgeDistribution { summary, histogram })
        }
        None => {
            notices.push(Notice::missing_column(AGE_COLUMN, "age"));
            None
        }
    };

    (Demographics { sex, age }, notices)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LivingConditions {
    pub municipality: Vec<CodeCount>,
    pub sleep_location: Vec<CodeCount>,
}

pub fn living_conditions(table: &RespondentTable) -> (LivingConditions, Vec<Notice>) {
    let mut notices = Vec::new();
    let municipality = coded_counts(
        table,
        &SLEEP_MUNICIPALITY,
        "municipality where they sleep",
        &mut notices,
    );
    let sleep_location = coded_counts(table, &SLEEP_LOCATION, "sleep location", &mut notices);
    (
        LivingConditions {
            municipality,
            sleep_location,
        },
        notices,
    )
}

/// Known-code counts for a question, or a notice when its column is absent.
pub(crate) fn coded_counts(
    table: &RespondentTable,
    codebook: &Codebook,
    used_for: &str,
    notices: &mut Vec<Notice>,
) -> Vec<CodeCount> {
    match table.column(codebook.column) {
        Some(column) => labelled_counts(column, codebook),
        None => {
            notices.push(Notice::missing_column(codebook.column, used_for));
            Vec::new()
        }
    }
}
