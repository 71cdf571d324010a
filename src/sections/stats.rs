//! Descriptive statistics and histograms over numeric columns.

use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; the smallest one on ties.
    pub mode: f64,
    pub min: f64,
    pub max: f64,
}

impl NumericSummary {
    /// `None` when there are no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted(values);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        Some(Self {
            count,
            mean,
            median,
            mode: mode_of_sorted(&sorted),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = (sorted[0], 0usize);
    let mut run_start = 0;
    for i in 1..=sorted.len() {
        if i == sorted.len() || sorted[i] != sorted[run_start] {
            let run = i - run_start;
            // Strictly greater keeps the smallest value on ties.
            if run > best.1 {
                best = (sorted[run_start], run);
            }
            run_start = i;
        }
    }
    best.0
}

pub fn distinct_count(values: &[f64]) -> usize {
    let sorted = sorted(values);
    let mut distinct = 0;
    let mut last: Option<f64> = None;
    for value in sorted {
        if last != Some(value) {
            distinct += 1;
            last = Some(value);
        }
    }
    distinct
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Counts over contiguous half-open bins; the last bin also includes its
/// upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// `bins` equal-width bins spanning the data. A constant series gets a
    /// unit-wide range centred on its value.
    pub fn equal_width(values: &[f64], bins: usize) -> Option<Self> {
        let (min, max) = bounds(values)?;
        let bins = bins.max(1);
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (hi - lo) / bins as f64;
        Some(Self::fill(values, lo, width, bins))
    }

    /// Bins with a round step (1, 2 or 5 times a power of ten), using no
    /// more than `max_bins` bins.
    pub fn nice(values: &[f64], max_bins: usize) -> Option<Self> {
        let (min, max) = bounds(values)?;
        let max_bins = max_bins.max(1);
        if min == max {
            return Self::equal_width(values, 1);
        }

        let mut step = nice_step((max - min) / max_bins as f64);
        loop {
            let lo = (min / step).floor() * step;
            let mut bins = ((max - lo) / step).ceil().max(1.0) as usize;
            if lo + bins as f64 * step <= max {
                bins += 1;
            }
            if bins <= max_bins {
                return Some(Self::fill(values, lo, step, bins));
            }
            step = nice_step(step * 1.01);
        }
    }

    fn fill(values: &[f64], lo: f64, width: f64, bins: usize) -> Self {
        let mut counts = vec![0usize; bins];
        for value in values {
            let index = ((value - lo) / width).floor();
            let index = if index < 0.0 {
                0
            } else {
                (index as usize).min(bins - 1)
            };
            counts[index] += 1;
        }
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                start: lo + i as f64 * width,
                end: lo + (i + 1) as f64 * width,
                count,
            })
            .collect();
        Self { bins }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;
    Some((min, max))
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Bin count for the full street-time histogram: one bin per year up to
/// `max_bins`, or 10 when the data has no positive maximum.
pub fn street_time_bins(max: f64, max_bins: usize) -> usize {
    if max > 0.0 {
        (max as usize).clamp(1, max_bins.max(1))
    } else {
        10
    }
}

/// Bin count for a filtered subset of `n` values: a tenth of the values
/// when that exceeds 5, otherwise half, never fewer than 5.
pub fn filtered_bins(n: usize) -> usize {
    let tenth = n as f64 / 10.0;
    let candidate = if tenth > 5.0 {
        tenth as usize
    } else if n > 0 {
        n / 2
    } else {
        1
    };
    candidate.max(5)
}

/// Whole-year range offered for filtering, derived from the data extremes.
/// The lower bound is never negative, the range is never inverted, and a
/// single positive year is widened by one.
pub fn year_bounds(min: f64, max: f64) -> (i64, i64) {
    let mut lo = if min >= 0.0 { min as i64 } else { 0 };
    let mut hi = if max >= 0.0 { max as i64 } else { 1 };
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    if lo == hi && hi > 0 {
        hi += 1;
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mode_prefers_smallest_on_tie() {
        let summary = NumericSummary::from_values(&[3.0, 1.0, 3.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.mode, 1.0);
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.mean, 2.0);
    }

    #[test]
    fn test_summary_even_count_median() {
        let summary = NumericSummary::from_values(&[1.0, 2.0, 3.0, 10.0]).unwrap();
        assert_eq!(summary.median, 2.5);
    }

    #[test]
    fn test_summary_empty_is_none() {
        assert!(NumericSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_equal_width_counts_every_value() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let histogram = Histogram::equal_width(&values, 5).unwrap();
        assert_eq!(histogram.len(), 5);
        assert_eq!(histogram.total(), values.len());
        assert_eq!(histogram.bins[4].count, 1);
        assert_eq!(histogram.bins[4].end, 10.0);
    }

    #[test]
    fn test_equal_width_constant_series() {
        let histogram = Histogram::equal_width(&[4.0, 4.0], 3).unwrap();
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.bins[0].start, 3.5);
    }

    #[test]
    fn test_nice_respects_max_bins() {
        let values: Vec<f64> = (18..=85).map(f64::from).collect();
        let histogram = Histogram::nice(&values, 20).unwrap();
        assert!(histogram.len() <= 20);
        assert_eq!(histogram.total(), values.len());
        assert_eq!(histogram.bins[1].end - histogram.bins[1].start, 5.0);
    }

    #[test]
    fn test_street_time_bins() {
        assert_eq!(street_time_bins(12.0, 50), 12);
        assert_eq!(street_time_bins(80.0, 50), 50);
        assert_eq!(street_time_bins(0.0, 50), 10);
        assert_eq!(street_time_bins(0.5, 50), 1);
    }

    #[test]
    fn test_filtered_bins() {
        assert_eq!(filtered_bins(100), 10);
        assert_eq!(filtered_bins(50), 25);
        assert_eq!(filtered_bins(120), 12);
        assert_eq!(filtered_bins(4), 5);
        assert_eq!(filtered_bins(0), 5);
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(year_bounds(0.0, 30.0), (0, 30));
        assert_eq!(year_bounds(-2.0, 5.5), (0, 5));
        assert_eq!(year_bounds(7.0, 7.0), (7, 8));
        assert_eq!(year_bounds(-3.0, -1.0), (0, 1));
        assert_eq!(year_bounds(0.0, 0.0), (0, 0));
    }
}
