//! End-to-end indicator and score behavior on hand-built tables.

mod common;

use censusmap::indicators::{assess, derive_indicators, Indicator, IndicatorStatus, MAX_SCORE};
use censusmap::notice::Notice;
use censusmap::RespondentTable;
use common::table;
use pretty_assertions::assert_eq;

fn values(table: &RespondentTable, indicator: Indicator) -> Vec<bool> {
    derive_indicators(table)
        .get(indicator)
        .values()
        .map(<[bool]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn test_only_sleep_location_present() {
    let t = table(&[("p13", vec![Some("1"), Some("2"), Some("1"), Some("3")])]);
    let assessment = assess(&t);

    assert_eq!(values(&t, Indicator::SleepsOnStreet), vec![true, false, true, false]);
    for indicator in [
        Indicator::HasHealthIssue,
        Indicator::HasDisability,
        Indicator::UsesSubstance,
        Indicator::SecurityAffected,
    ] {
        assert_eq!(values(&t, indicator), vec![false; 4], "{:?}", indicator);
        assert_eq!(
            assessment.indicators.get(indicator).status,
            IndicatorStatus::NoSourceColumns
        );
    }

    assert_eq!(assessment.scores.scores(), Some(&[1, 0, 1, 0][..]));
    let distribution: Vec<_> = assessment.scores.distribution().iter().collect();
    assert_eq!(distribution, vec![(0, 2), (1, 2)]);
}

#[test]
fn test_every_indicator_true_scores_five() {
    let t = table(&[
        ("p20s1", vec![Some("1")]),
        ("p16s1", vec![Some("2")]),
        ("p30s3", vec![Some("1")]),
        ("p33s2", vec![Some("1")]),
        ("p13", vec![Some("1")]),
    ]);
    let assessment = assess(&t);

    assert_eq!(assessment.scores.scores(), Some(&[MAX_SCORE][..]));
    assert_eq!(assessment.indicators.row_flags(0), Some([true; 5]));
    assert!(assessment.notices.iter().all(|n| !matches!(n, Notice::ScoreUnavailable)));
}

#[test]
fn test_row_with_all_health_answers_missing_is_not_flagged() {
    let t = table(&[
        ("p20s1", vec![None, Some("1")]),
        ("p20s2", vec![None, Some("2")]),
        ("p20s3", vec![None, None]),
        ("p20s4", vec![None, Some("2")]),
        ("p20s5", vec![None, Some("2")]),
    ]);
    assert_eq!(values(&t, Indicator::HasHealthIssue), vec![false, true]);
}

#[test]
fn test_empty_table_has_no_distribution() {
    let assessment = assess(&RespondentTable::empty());

    assert!(!assessment.scores.is_available());
    assert!(assessment.scores.distribution().is_empty());
    assert_eq!(assessment.scores.distribution().get(0), 0);
    assert_eq!(
        assessment.notices,
        vec![Notice::EmptySourceTable, Notice::ScoreUnavailable]
    );
    for series in assessment.indicators.iter() {
        assert_eq!(series.status, IndicatorStatus::NoData);
        assert_eq!(series.values(), None);
    }
}

#[test]
fn test_no_source_column_anywhere_is_unavailable_not_zero() {
    let t = table(&[("p9", vec![Some("1"), Some("2")])]);
    let assessment = assess(&t);

    assert!(!assessment.scores.is_available());
    assert!(assessment.notices.contains(&Notice::ScoreUnavailable));
    assert_eq!(
        assessment
            .notices
            .iter()
            .filter(|n| matches!(n, Notice::MissingColumnGroup { .. }))
            .count(),
        5
    );
}

#[test]
fn test_unparsable_sensory_values_never_flag_disability() {
    let t = table(&[
        ("p16s1", vec![Some("n/a"), None, Some(""), Some("4")]),
        ("p16s2", vec![Some("?"), Some("four"), None, Some("-")]),
    ]);
    assert_eq!(values(&t, Indicator::HasDisability), vec![false; 4]);
}

#[test]
fn test_code_one_written_as_decimal_counts() {
    let t = table(&[
        ("p30s2", vec![Some("1.0"), Some(" 1 "), Some("1.5"), Some("01")]),
    ]);
    assert_eq!(values(&t, Indicator::UsesSubstance), vec![true, true, false, true]);
}

#[test]
fn test_removing_a_source_group_changes_only_that_indicator() {
    let full = table(&[
        ("p20s2", vec![Some("1"), Some("2"), Some("1")]),
        ("p30s1", vec![Some("2"), Some("1"), Some("1")]),
        ("p13", vec![Some("1"), Some("1"), Some("2")]),
    ]);
    let without_substances = table(&[
        ("p20s2", vec![Some("1"), Some("2"), Some("1")]),
        ("p13", vec![Some("1"), Some("1"), Some("2")]),
    ]);

    assert_eq!(values(&without_substances, Indicator::UsesSubstance), vec![false; 3]);
    for indicator in Indicator::ALL {
        if indicator != Indicator::UsesSubstance {
            assert_eq!(values(&full, indicator), values(&without_substances, indicator));
        }
    }
}

#[test]
fn test_recomputation_is_identical() {
    let t = table(&[
        ("p16s2", vec![Some("3"), Some("4"), None]),
        ("p33s5", vec![Some("1"), None, Some("2")]),
    ]);
    assert_eq!(assess(&t), assess(&t));
}
