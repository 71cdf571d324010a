//! The five vulnerability indicator rules.
//!
//! Every rule has the same shape: a fixed group of source columns and a
//! predicate, and a respondent is flagged when ANY resolved column satisfies
//! the predicate after coercion. An absent column contributes nothing and a
//! missing cell is coerced to a sentinel that cannot satisfy the predicate,
//! so both fold into `false`.

use super::coercion::{coerce_column, NOT_CODE_SENTINEL, NO_DIFFICULTY_SENTINEL};
use super::resolver::resolve_columns;
use crate::codebook::{
    ColumnGroup, HEALTH_CONDITIONS, SECURITY_FACTORS, SENSORY_COLUMNS, SLEEP_LOCATION_COLUMNS,
    SUBSTANCES_CURRENT, YES,
};
use crate::data::RespondentTable;
use crate::notice::Notice;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    HasHealthIssue,
    HasDisability,
    UsesSubstance,
    SecurityAffected,
    SleepsOnStreet,
}

/// Row test applied to a coerced cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Cell equals the answer code.
    EqualsCode(f64),
    /// Cell is strictly below the threshold.
    Below(f64),
}

impl Predicate {
    /// Substitute for missing cells; never satisfies this predicate.
    pub fn sentinel(self) -> f64 {
        match self {
            Self::EqualsCode(_) => NOT_CODE_SENTINEL,
            Self::Below(_) => NO_DIFFICULTY_SENTINEL,
        }
    }

    pub fn holds(self, value: f64) -> bool {
        match self {
            Self::EqualsCode(code) => value == code,
            Self::Below(threshold) => value < threshold,
        }
    }
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::HasHealthIssue,
        Indicator::HasDisability,
        Indicator::UsesSubstance,
        Indicator::SecurityAffected,
        Indicator::SleepsOnStreet,
    ];

    pub fn source_columns(self) -> ColumnGroup {
        match self {
            Self::HasHealthIssue => HEALTH_CONDITIONS,
            Self::HasDisability => SENSORY_COLUMNS,
            Self::UsesSubstance => SUBSTANCES_CURRENT,
            Self::SecurityAffected => SECURITY_FACTORS,
            Self::SleepsOnStreet => SLEEP_LOCATION_COLUMNS,
        }
    }

    pub fn predicate(self) -> Predicate {
        match self {
            // Sensory codes 1-3 are some degree of difficulty, 4 is none.
            Self::HasDisability => Predicate::Below(4.0),
            _ => Predicate::EqualsCode(YES as f64),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::HasHealthIssue => "Diagnosed health condition",
            Self::HasDisability => "Hearing or speaking difficulty",
            Self::UsesSubstance => "Current substance use",
            Self::SecurityAffected => "Security affected on the street",
            Self::SleepsOnStreet => "Sleeps on the street",
        }
    }

    /// Evaluate this rule for every respondent, in row order.
    pub fn evaluate(self, table: &RespondentTable) -> IndicatorSeries {
        let resolved = resolve_columns(table, self.source_columns().columns());
        let predicate = self.predicate();
        let rows = table.row_count();

        let mut values = vec![false; rows];
        for column in resolved.present() {
            let coerced = coerce_column(column, predicate.sentinel());
            for (flag, value) in values.iter_mut().zip(coerced) {
                *flag |= predicate.holds(value);
            }
        }

        let status = if table.is_empty() {
            IndicatorStatus::NoData
        } else if resolved.is_empty() {
            IndicatorStatus::NoSourceColumns
        } else {
            IndicatorStatus::Computed
        };

        IndicatorSeries {
            indicator: self,
            status,
            resolved_columns: resolved.present_names(),
            missing_columns: resolved.absent_names(),
            values,
        }
    }
}

/// How an indicator's values came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    /// At least one source column was present and evaluated.
    Computed,
    /// No source column exists; every respondent is `false`.
    NoSourceColumns,
    /// The table has no respondents; there are no values at all.
    NoData,
}

/// One indicator's per-respondent values plus how they were obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub indicator: Indicator,
    pub status: IndicatorStatus,
    pub resolved_columns: Vec<&'static str>,
    pub missing_columns: Vec<&'static str>,
    #[serde(skip)]
    values: Vec<bool>,
}

impl IndicatorSeries {
    /// Row-aligned values, or `None` when there is no data.
    pub fn values(&self) -> Option<&[bool]> {
        match self.status {
            IndicatorStatus::NoData => None,
            _ => Some(&self.values),
        }
    }

    pub fn is_computed(&self) -> bool {
        self.status == IndicatorStatus::Computed
    }

    pub fn true_count(&self) -> Option<usize> {
        self.values().map(|v| v.iter().filter(|&&flag| flag).count())
    }

    pub fn get(&self, row: usize) -> Option<bool> {
        self.values().and_then(|v| v.get(row).copied())
    }
}

/// All five indicators for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    rows: usize,
    series: Vec<IndicatorSeries>,
}

impl IndicatorSet {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, indicator: Indicator) -> &IndicatorSeries {
        // `series` is built from `Indicator::ALL`, so the position always exists.
        &self.series[indicator as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSeries> + '_ {
        self.series.iter()
    }

    /// At least one rule had a source column to evaluate.
    pub fn any_computed(&self) -> bool {
        self.series.iter().any(IndicatorSeries::is_computed)
    }

    /// Flags of one respondent in `Indicator::ALL` order.
    pub fn row_flags(&self, row: usize) -> Option<[bool; 5]> {
        let mut flags = [false; 5];
        for (slot, series) in flags.iter_mut().zip(&self.series) {
            *slot = series.get(row)?;
        }
        Some(flags)
    }

    /// One notice per indicator that had to be defaulted.
    pub fn notices(&self) -> Vec<Notice> {
        self.series
            .iter()
            .filter(|s| s.status == IndicatorStatus::NoSourceColumns)
            .map(|s| {
                Notice::missing_group(s.indicator.source_columns().span(), s.indicator.title())
            })
            .collect()
    }
}

/// Evaluate every indicator rule over the table.
pub fn derive_indicators(table: &RespondentTable) -> IndicatorSet {
    IndicatorSet {
        rows: table.row_count(),
        series: Indicator::ALL.iter().map(|i| i.evaluate(table)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;

    #[test]
    fn test_health_issue_any_column_equals_one() {
        let table = table_from_pairs(&[
            ("p20s1", vec![Some("2"), Some("2"), None]),
            ("p20s4", vec![Some("1"), Some("2"), None]),
        ])
        .unwrap();
        let series = Indicator::HasHealthIssue.evaluate(&table);
        assert_eq!(series.values(), Some(&[true, false, false][..]));
        assert_eq!(series.resolved_columns, vec!["p20s1", "p20s4"]);
        assert_eq!(series.missing_columns, vec!["p20s2", "p20s3", "p20s5"]);
    }

    #[test]
    fn test_disability_either_column_below_four() {
        let table = table_from_pairs(&[
            ("p16s1", vec![Some("4"), Some("3"), None, Some("x")]),
            ("p16s2", vec![Some("1"), Some("4"), Some("4"), None]),
        ])
        .unwrap();
        let series = Indicator::HasDisability.evaluate(&table);
        assert_eq!(series.values(), Some(&[true, true, false, false][..]));
    }

    #[test]
    fn test_disability_with_one_sensory_column() {
        let table = table_from_pairs(&[("p16s2", vec![Some("2"), Some("4")])]).unwrap();
        let series = Indicator::HasDisability.evaluate(&table);
        assert!(series.is_computed());
        assert_eq!(series.values(), Some(&[true, false][..]));
    }

    #[test]
    fn test_sleeps_on_street_coerces_decimal_codes() {
        let table =
            table_from_pairs(&[("p13", vec![Some("1.0"), Some("2"), Some("calle")])]).unwrap();
        let series = Indicator::SleepsOnStreet.evaluate(&table);
        assert_eq!(series.values(), Some(&[true, false, false][..]));
    }

    #[test]
    fn test_absent_sources_default_to_false() {
        let table = table_from_pairs(&[("p9", vec![Some("1"), Some("2")])]).unwrap();
        let series = Indicator::UsesSubstance.evaluate(&table);
        assert_eq!(series.status, IndicatorStatus::NoSourceColumns);
        assert_eq!(series.values(), Some(&[false, false][..]));
        assert_eq!(series.true_count(), Some(0));
    }

    #[test]
    fn test_empty_table_has_no_values() {
        let table = RespondentTable::empty();
        let series = Indicator::SecurityAffected.evaluate(&table);
        assert_eq!(series.status, IndicatorStatus::NoData);
        assert_eq!(series.values(), None);
        assert_eq!(series.true_count(), None);
    }

    #[test]
    fn test_indicator_set_lookup_and_notices() {
        let table = table_from_pairs(&[("p13", vec![Some("1")])]).unwrap();
        let set = derive_indicators(&table);
        assert_eq!(set.get(Indicator::SleepsOnStreet).indicator, Indicator::SleepsOnStreet);
        assert!(set.any_computed());
        assert_eq!(set.row_flags(0), Some([false, false, false, false, true]));
        assert_eq!(set.row_flags(1), None);
        assert_eq!(set.notices().len(), 4);
    }

    #[test]
    fn test_predicates() {
        assert!(Predicate::EqualsCode(1.0).holds(1.0));
        assert!(!Predicate::EqualsCode(1.0).holds(Predicate::EqualsCode(1.0).sentinel()));
        assert!(Predicate::Below(4.0).holds(3.0));
        assert!(!Predicate::Below(4.0).holds(Predicate::Below(4.0).sentinel()));
    }
}
