//! Vulnerability score aggregation.

use super::rules::IndicatorSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Highest possible score: one point per indicator.
pub const MAX_SCORE: u8 = 5;

/// Respondent count per observed score, ascending by score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreDistribution(BTreeMap<u8, usize>);

impl ScoreDistribution {
    pub fn from_scores(scores: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &score in scores {
            *counts.entry(score).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Count for a score; unobserved scores have no entry and read as 0.
    pub fn get(&self, score: u8) -> usize {
        self.0.get(&score).copied().unwrap_or(0)
    }

    pub fn contains(&self, score: u8) -> bool {
        self.0.contains_key(&score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.0.iter().map(|(&score, &count)| (score, count))
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let sum: usize = self.iter().map(|(score, count)| score as usize * count).sum();
        Some(sum as f64 / total as f64)
    }
}

/// Per-respondent scores, or the explicit absence of any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VulnerabilityScores {
    /// No indicator rule had data to evaluate.
    Unavailable,
    Computed {
        scores: Vec<u8>,
        distribution: ScoreDistribution,
    },
}

impl VulnerabilityScores {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }

    pub fn scores(&self) -> Option<&[u8]> {
        match self {
            Self::Computed { scores, .. } => Some(scores),
            Self::Unavailable => None,
        }
    }

    /// The distribution; empty when unavailable.
    pub fn distribution(&self) -> ScoreDistribution {
        match self {
            Self::Computed { distribution, .. } => distribution.clone(),
            Self::Unavailable => ScoreDistribution::default(),
        }
    }
}

/// Sum the indicators of each respondent and tabulate the result.
///
/// Yields [`VulnerabilityScores::Unavailable`] when no rule evaluated a
/// source column, which is distinct from every respondent scoring 0.
pub fn aggregate(indicators: &IndicatorSet) -> VulnerabilityScores {
    if !indicators.any_computed() {
        return VulnerabilityScores::Unavailable;
    }

    let mut scores = vec![0u8; indicators.rows()];
    for series in indicators.iter() {
        let Some(values) = series.values() else {
            continue;
        };
        for (score, &flag) in scores.iter_mut().zip(values) {
            *score += u8::from(flag);
        }
    }

    let distribution = ScoreDistribution::from_scores(&scores);
    VulnerabilityScores::Computed {
        scores,
        distribution,
    }
}
