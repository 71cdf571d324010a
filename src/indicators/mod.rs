//! Vulnerability indicators and score.
//!
//! The pipeline is: resolve which source columns exist, coerce them to
//! numbers with a sentinel for missing cells, evaluate the five indicator
//! rules row by row, then sum them into a 0-5 score and tabulate it.
//!
//! Everything here is a pure function of the table. Missing columns and
//! unparsable cells are folded into `false` and reported as notices, never
//! as errors.
//!
//! ```
//! use censusmap::data::table_from_pairs;
//! use censusmap::indicators::assess;
//!
//! let table = table_from_pairs(&[("p13", vec![Some("1"), Some("2")])]).unwrap();
//! let assessment = assess(&table);
//! assert_eq!(assessment.scores.scores(), Some(&[1, 0][..]));
//! ```

pub mod coercion;
pub mod resolver;
pub mod rules;
pub mod score;

pub use coercion::{coerce_column, coerce_or_fill, NOT_CODE_SENTINEL, NO_DIFFICULTY_SENTINEL};
pub use resolver::{resolve_columns, ColumnPresence, ResolvedColumns};
pub use rules::{
    derive_indicators, Indicator, IndicatorSeries, IndicatorSet, IndicatorStatus, Predicate,
};
pub use score::{aggregate, ScoreDistribution, VulnerabilityScores, MAX_SCORE};

use crate::data::RespondentTable;
use crate::notice::Notice;
use crate::observability::{set_phase, Phase};
use serde::Serialize;
use tracing::{debug, info_span, warn};

/// Indicators and scores for one table, with the notices explaining any
/// defaulted or missing output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityAssessment {
    pub respondents: usize,
    pub indicators: IndicatorSet,
    pub scores: VulnerabilityScores,
    pub notices: Vec<Notice>,
}

/// Derive every indicator and the score distribution for the table.
pub fn assess(table: &RespondentTable) -> VulnerabilityAssessment {
    let _span = info_span!("vulnerability", rows = table.row_count()).entered();

    let indicators = {
        let _phase = set_phase(Phase::IndicatorDerivation);
        derive_indicators(table)
    };
    for series in indicators.iter() {
        debug!(
            indicator = ?series.indicator,
            status = ?series.status,
            resolved = series.resolved_columns.len(),
            flagged = series.true_count().unwrap_or(0),
            "Indicator evaluated"
        );
    }

    let scores = {
        let _phase = set_phase(Phase::Scoring);
        aggregate(&indicators)
    };

    let mut notices = Vec::new();
    if table.is_empty() {
        notices.push(Notice::EmptySourceTable);
    } else {
        notices.extend(indicators.notices());
    }
    if !scores.is_available() {
        warn!("Vulnerability score components could not be computed");
        notices.push(Notice::ScoreUnavailable);
    }

    VulnerabilityAssessment {
        respondents: table.row_count(),
        indicators,
        scores,
        notices,
    }
}
