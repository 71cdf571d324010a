//! Descriptive report and vulnerability score for homeless census surveys.
//!
//! A survey CSV is loaded into a [`data::RespondentTable`]. Five binary
//! indicators are derived per respondent and summed into a vulnerability
//! score (see [`indicators`]); descriptive [`sections`] summarize the rest
//! of the questionnaire. Absent columns never fail a run, they surface as
//! [`notice::Notice`]s next to the results.

pub mod cli;
pub mod codebook;
pub mod commands;
pub mod config;
pub mod data;
pub mod errors;
pub mod formatting;
pub mod indicators;
pub mod notice;
pub mod observability;
pub mod output;
pub mod sections;

pub use crate::data::{load_table, try_load_table, Column, RespondentTable};
pub use crate::errors::{Error, Result};
pub use crate::indicators::{
    assess, derive_indicators, Indicator, IndicatorSet, IndicatorStatus, VulnerabilityAssessment,
};
pub use crate::notice::{Notice, Severity};
pub use crate::sections::{build_section, build_sections, Section, SectionParams, SectionReport};
