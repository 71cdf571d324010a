//! Life on the street: why, for how long, and who helps.

use super::frequency::{percent, value_counts, CodeCount};
use super::stats::{
    distinct_count, filtered_bins, street_time_bins, year_bounds, Histogram, NumericSummary,
};
use super::{CodeFilter, YearRange};
use crate::codebook::{HELP_SOURCE, STREET_REASON, STREET_YEARS_COLUMN};
use crate::data::RespondentTable;
use crate::notice::Notice;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetReasons {
    pub filter: CodeFilter,
    /// Ordered by code.
    pub reasons: Vec<CodeCount>,
}

pub fn street_reasons(
    table: &RespondentTable,
    filter: &CodeFilter,
) -> (StreetReasons, Vec<Notice>) {
    let mut notices = Vec::new();
    let reasons = match table.column(STREET_REASON.column) {
        Some(column) => {
            let counts = value_counts(column);
            let reasons: Vec<_> = counts
                .into_iter()
                .filter(|(code, _)| filter.admits(*code, &STREET_REASON))
                .map(|(code, count)| CodeCount {
                    code,
                    label: STREET_REASON.label(code).into_owned(),
                    count,
                })
                .collect();
            if reasons.is_empty() {
                notices.push(match filter {
                    CodeFilter::Only(_) => Notice::NoMatchingFilter {
                        filter: "street reasons".into(),
                    },
                    _ => Notice::NoValidValues {
                        column: STREET_REASON.column.into(),
                    },
                });
            }
            reasons
        }
        None => {
            notices.push(Notice::missing_column(
                STREET_REASON.column,
                "reason for living on the street",
            ));
            Vec::new()
        }
    };

    let data = StreetReasons {
        filter: filter.clone(),
        reasons,
    };
    (data, notices)
}

/// Whole-year range the data spans, for choosing a `--years` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearBounds {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredYears {
    pub range: YearRange,
    pub count: usize,
    /// Absent when fewer than two distinct values fall in the range.
    pub histogram: Option<Histogram>,
    pub single_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetTime {
    pub summary: Option<NumericSummary>,
    pub histogram: Option<Histogram>,
    pub bounds: Option<YearBounds>,
    pub filtered: Option<FilteredYears>,
}

pub fn street_time(
    table: &RespondentTable,
    years: Option<YearRange>,
    max_bins: usize,
) -> (StreetTime, Vec<Notice>) {
    let mut notices = Vec::new();
    let empty = StreetTime {
        summary: None,
        histogram: None,
        bounds: None,
        filtered: None,
    };

    let Some(column) = table.column(STREET_YEARS_COLUMN) else {
        notices.push(Notice::missing_column(
            STREET_YEARS_COLUMN,
            "years living on the street",
        ));
        return (empty, notices);
    };

    let values = column.numeric_values();
    let Some(summary) = NumericSummary::from_values(&values) else {
        notices.push(Notice::NoValidValues {
            column: STREET_YEARS_COLUMN.to_string(),
        });
        return (empty, notices);
    };

    let histogram = Histogram::equal_width(&values, street_time_bins(summary.max, max_bins));
    let (min, max) = year_bounds(summary.min, summary.max);
    let filtered = years.map(|range| filter_years(&values, range, &mut notices));

    let data = StreetTime {
        summary: Some(summary),
        histogram,
        bounds: Some(YearBounds { min, max }),
        filtered,
    };
    (data, notices)
}

fn filter_years(values: &[f64], range: YearRange, notices: &mut Vec<Notice>) -> FilteredYears {
    let selected: Vec<f64> = values.iter().copied().filter(|v| range.contains(*v)).collect();

    let (histogram, single_value) = match distinct_count(&selected) {
        0 => {
            notices.push(Notice::NoMatchingFilter {
                filter: format!("year range {}", range),
            });
            (None, None)
        }
        1 => {
            let value = selected[0];
            notices.push(Notice::SingleValue {
                column: STREET_YEARS_COLUMN.to_string(),
                value: format!("{} years", value),
            });
            (None, Some(value))
        }
        _ => (
            Histogram::equal_width(&selected, filtered_bins(selected.len())),
            None,
        ),
    };

    FilteredYears {
        range,
        count: selected.len(),
        histogram,
        single_value,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub code: i64,
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpSources {
    /// Known sources by code; shares are over all known answers.
    pub sources: Vec<Share>,
    /// Selected sources with shares renormalized over the selection.
    pub filtered: Option<Vec<Share>>,
}

pub fn help_sources(
    table: &RespondentTable,
    selected: Option<&[i64]>,
) -> (HelpSources, Vec<Notice>) {
    let mut notices = Vec::new();
    let Some(column) = table.column(HELP_SOURCE.column) else {
        notices.push(Notice::missing_column(HELP_SOURCE.column, "main help source"));
        let data = HelpSources {
            sources: Vec::new(),
            filtered: None,
        };
        return (data, notices);
    };

    let known: Vec<(i64, usize)> = value_counts(column)
        .into_iter()
        .filter(|(code, _)| HELP_SOURCE.contains(*code))
        .collect();
    if known.is_empty() {
        notices.push(Notice::NoValidValues {
            column: HELP_SOURCE.column.to_string(),
        });
    }
    let sources = shares(&known);

    let filtered = selected.map(|codes| {
        let subset: Vec<_> = known
            .iter()
            .copied()
            .filter(|(code, _)| codes.contains(code))
            .collect();
        if subset.is_empty() {
            notices.push(Notice::NoMatchingFilter {
                filter: "help sources".into(),
            });
        }
        shares(&subset)
    });

    (HelpSources { sources, filtered }, notices)
}

fn shares(counts: &[(i64, usize)]) -> Vec<Share> {
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .iter()
        .map(|(code, count)| Share {
            code: *code,
            label: HELP_SOURCE.label(*code).into_owned(),
            count: *count,
            percent: percent(*count, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;

    fn reasons_table() -> RespondentTable {
        table_from_pairs(&[(
            "p22",
            vec![Some("7"), Some("1"), Some("7"), Some("42"), None],
        )])
        .unwrap()
    }

    #[test]
    fn test_street_reasons_known_codes_by_default() {
        let (data, notices) = street_reasons(&reasons_table(), &CodeFilter::Known);
        let codes: Vec<_> = data.reasons.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![1, 7]);
        assert_eq!(data.reasons[1].count, 2);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_street_reasons_all_labels_unknown_codes() {
        let (data, _) = street_reasons(&reasons_table(), &CodeFilter::All);
        let last = data.reasons.last().unwrap();
        assert_eq!(last.code, 42);
        assert_eq!(last.label, "Código 42");
    }

    #[test]
    fn test_street_reasons_filter_without_matches() {
        let (data, notices) = street_reasons(&reasons_table(), &CodeFilter::Only(vec![3]));
        assert!(data.reasons.is_empty());
        assert_eq!(
            notices,
            vec![Notice::NoMatchingFilter {
                filter: "street reasons".into()
            }]
        );
    }

    #[test]
    fn test_street_time_drops_unparsable_and_bins_by_max() {
        let table = table_from_pairs(&[(
            "p23s1r",
            vec![Some("2"), Some("x"), Some("10"), Some("2"), None, Some("6")],
        )])
        .unwrap();
        let (data, notices) = street_time(&table, None, 50);
        assert!(notices.is_empty());
        let summary = data.summary.unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mode, 2.0);
        assert_eq!(summary.median, 4.0);
        assert_eq!(data.histogram.unwrap().len(), 10);
        assert_eq!(data.bounds, Some(YearBounds { min: 2, max: 10 }));
    }

    #[test]
    fn test_street_time_single_value_in_range() {
        let table = table_from_pairs(&[(
            "p23s1r",
            vec![Some("3"), Some("3"), Some("20")],
        )])
        .unwrap();
        let range = YearRange::new(0.0, 5.0).unwrap();
        let (data, notices) = street_time(&table, Some(range), 50);
        let filtered = data.filtered.unwrap();
        assert_eq!(filtered.count, 2);
        assert_eq!(filtered.single_value, Some(3.0));
        assert!(filtered.histogram.is_none());
        assert!(matches!(notices[0], Notice::SingleValue { .. }));
    }

    #[test]
    fn test_street_time_filtered_histogram_has_minimum_bins() {
        let table = table_from_pairs(&[(
            "p23s1r",
            vec![Some("1"), Some("2"), Some("3"), Some("30")],
        )])
        .unwrap();
        let range = YearRange::new(1.0, 3.0).unwrap();
        let (data, notices) = street_time(&table, Some(range), 50);
        assert!(notices.is_empty());
        let histogram = data.filtered.unwrap().histogram.unwrap();
        assert_eq!(histogram.len(), 5);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_help_sources_renormalize_selection() {
        let table = table_from_pairs(&[(
            "p26_1",
            vec![Some("1"), Some("1"), Some("3"), Some("5"), Some("8")],
        )])
        .unwrap();
        let (data, notices) = help_sources(&table, Some(&[1, 3][..]));
        assert!(notices.is_empty());
        assert_eq!(data.sources.len(), 3);
        assert_eq!(data.sources[0].percent, 50.0);

        let filtered = data.filtered.unwrap();
        assert_eq!(filtered.len(), 2);
        let total: f64 = filtered.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_help_sources_selection_without_matches() {
        let table = table_from_pairs(&[("p26_1", vec![Some("1")])]).unwrap();
        let (data, notices) = help_sources(&table, Some(&[6][..]));
        assert_eq!(data.filtered, Some(Vec::new()));
        assert_eq!(
            notices,
            vec![Notice::NoMatchingFilter {
                filter: "help sources".into()
            }]
        );
    }
}
