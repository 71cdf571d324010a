//! Vulnerability section: indicator prevalences, the score distribution and
//! optional per-respondent rows.

use super::frequency::percent;
use crate::data::RespondentTable;
use crate::indicators::{
    assess, Indicator, IndicatorStatus, ScoreDistribution, VulnerabilityAssessment,
};
use crate::notice::Notice;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub indicator: Indicator,
    pub title: &'static str,
    pub status: IndicatorStatus,
    pub resolved_columns: Vec<&'static str>,
    /// Respondents flagged; `None` when there is no data.
    pub flagged: Option<usize>,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RespondentScore {
    /// Zero-based row in the survey file.
    pub row: usize,
    /// Flags in indicator order.
    pub indicators: [bool; 5],
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilitySummary {
    pub respondents: usize,
    pub available: bool,
    pub indicators: Vec<IndicatorSummary>,
    pub distribution: ScoreDistribution,
    pub mean_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<RespondentScore>>,
}

impl VulnerabilitySummary {
    pub fn from_assessment(assessment: &VulnerabilityAssessment, include_rows: bool) -> Self {
        let respondents = assessment.respondents;
        let indicators = assessment
            .indicators
            .iter()
            .map(|series| {
                let flagged = series.true_count();
                IndicatorSummary {
                    indicator: series.indicator,
                    title: series.indicator.title(),
                    status: series.status,
                    resolved_columns: series.resolved_columns.clone(),
                    flagged,
                    percent: flagged.map(|count| percent(count, respondents)),
                }
            })
            .collect();

        let distribution = assessment.scores.distribution();
        let rows = include_rows.then(|| respondent_scores(assessment));

        Self {
            respondents,
            available: assessment.scores.is_available(),
            indicators,
            mean_score: distribution.mean(),
            distribution,
            rows,
        }
    }
}

fn respondent_scores(assessment: &VulnerabilityAssessment) -> Vec<RespondentScore> {
    let Some(scores) = assessment.scores.scores() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter_map(|(row, &score)| {
            assessment
                .indicators
                .row_flags(row)
                .map(|indicators| RespondentScore {
                    row,
                    indicators,
                    score,
                })
        })
        .collect()
}

pub fn vulnerability(
    table: &RespondentTable,
    include_rows: bool,
) -> (VulnerabilitySummary, Vec<Notice>) {
    let assessment = assess(table);
    let summary = VulnerabilitySummary::from_assessment(&assessment, include_rows);
    (summary, assessment.notices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;

    #[test]
    fn test_summary_counts_and_rows() {
        let table = table_from_pairs(&[
            ("p13", vec![Some("1"), Some("2"), Some("1")]),
            ("p16s1", vec![Some("4"), Some("2"), Some("1")]),
        ])
        .unwrap();
        let (summary, notices) = vulnerability(&table, true);

        assert!(summary.available);
        assert_eq!(summary.distribution.get(1), 2);
        assert_eq!(summary.distribution.get(2), 1);
        let street = summary
            .indicators
            .iter()
            .find(|i| i.indicator == Indicator::SleepsOnStreet)
            .unwrap();
        assert_eq!(street.flagged, Some(2));

        let rows = summary.rows.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].score, 2);
        assert_eq!(rows[2].indicators, [false, true, false, false, true]);

        // Three groups absent: health, substances, security.
        assert_eq!(notices.len(), 3);
    }

    #[test]
    fn test_summary_unavailable_without_indicator_columns() {
        let table = table_from_pairs(&[("p9", vec![Some("1"), Some("2")])]).unwrap();
        let (summary, notices) = vulnerability(&table, false);
        assert!(!summary.available);
        assert!(summary.distribution.is_empty());
        assert_eq!(summary.mean_score, None);
        assert!(summary.rows.is_none());
        assert!(notices.contains(&Notice::ScoreUnavailable));
    }
}
