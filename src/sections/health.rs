use super::frequency::{code_count, labelled_counts_in_order, percent, round_to, CodeCount};
use crate::codebook::{Codebook, HEALTH_CONDITIONS, HEARING, NO, SPEAKING, YES};
use crate::data::RespondentTable;
use crate::notice::Notice;
use serde::Serialize;

/// Yes/no answers to one diagnosis question. Percentages are over the
/// respondents answering yes or no, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub column: &'static str,
    pub condition: &'static str,
    pub yes: usize,
    pub no: usize,
    pub yes_percent: f64,
    pub no_percent: f64,
}

impl Diagnosis {
    fn new(column: &'static str, condition: &'static str, yes: usize, no: usize) -> Self {
        Self {
            column,
            condition,
            yes,
            no,
            yes_percent: round_to(percent(yes, yes + no), 2),
            no_percent: round_to(percent(no, yes + no), 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub hearing: Vec<CodeCount>,
    pub speaking: Vec<CodeCount>,
    pub diagnoses: Vec<Diagnosis>,
}

pub fn health(table: &RespondentTable) -> (Health, Vec<Notice>) {
    let mut notices = Vec::new();
    let hearing = capability(table, &HEARING, "hearing", &mut notices);
    let speaking = capability(table, &SPEAKING, "speaking", &mut notices);

    let diagnoses: Vec<_> = HEALTH_CONDITIONS
        .entries()
        .iter()
        .filter_map(|(name, condition)| {
            table.column(name).map(|column| {
                Diagnosis::new(*name, *condition, code_count(column, YES), code_count(column, NO))
            })
        })
        .collect();
    if diagnoses.is_empty() {
        notices.push(Notice::missing_group(
            HEALTH_CONDITIONS.span(),
            "diagnosed conditions",
        ));
    }

    (
        Health {
            hearing,
            speaking,
            diagnoses,
        },
        notices,
    )
}

fn capability(
    table: &RespondentTable,
    codebook: &Codebook,
    used_for: &str,
    notices: &mut Vec<Notice>,
) -> Vec<CodeCount> {
    match table.column(codebook.column) {
        Some(column) => labelled_counts_in_order(column, codebook),
        None => {
            notices.push(Notice::missing_column(codebook.column, used_for));
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;

    #[test]
    fn test_diagnosis_percentages_round_to_two_places() {
        let table = table_from_pairs(&[
            ("p20s1", vec![Some("1"), Some("2"), Some("2"), None, Some("9")]),
            ("p16s1", vec![Some("4"), Some("1"), Some("4"), Some("2"), None]),
            ("p16s2", vec![Some("4"), Some("4"), Some("4"), Some("4"), Some("4")]),
        ])
        .unwrap();
        let (health, notices) = health(&table);
        assert!(notices.is_empty());

        let hypertension = &health.diagnoses[0];
        assert_eq!(hypertension.condition, "Hipertensión");
        assert_eq!((hypertension.yes, hypertension.no), (1, 2));
        assert_eq!(hypertension.yes_percent, 33.33);
        assert_eq!(hypertension.no_percent, 66.67);

        let codes: Vec<_> = health.hearing.iter().map(|c| c.code).collect();
        assert_eq!(codes, vec![1, 2, 4]);
    }

    #[test]
    fn test_diagnosis_without_answers_is_zero_percent() {
        let table = table_from_pairs(&[("p20s3", vec![None, Some("7")])]).unwrap();
        let (health, _) = health(&table);
        assert_eq!(health.diagnoses.len(), 1);
        assert_eq!(health.diagnoses[0].yes_percent, 0.0);
        assert_eq!(health.diagnoses[0].no_percent, 0.0);
    }

    #[test]
    fn test_missing_diagnosis_group_notice() {
        let table = table_from_pairs(&[("p16s1", vec![Some("4")])]).unwrap();
        let (health, notices) = health(&table);
        assert!(health.diagnoses.is_empty());
        assert!(notices.contains(&Notice::missing_group("p20s1-p20s5", "diagnosed conditions")));
        assert!(notices.contains(&Notice::missing_column("p16s2", "speaking")));
    }
}
