//! Informational conditions surfaced next to computed results.
//!
//! None of these is an error: each one records why a value is absent or was
//! defaulted, so the report can tell "no data" apart from "computed and
//! zero".

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The survey could not be loaded or has no respondents.
    EmptySourceTable,
    /// One expected column is absent; what depends on it was defaulted.
    MissingColumn { column: String, used_for: String },
    /// None of a question's columns is present.
    MissingColumnGroup { columns: String, used_for: String },
    /// A column is present but has no usable value.
    NoValidValues { column: String },
    /// A filter matched nothing.
    NoMatchingFilter { filter: String },
    /// Every filtered value is identical, so no distribution can be drawn.
    SingleValue { column: String, value: String },
    /// The vulnerability score could not be computed at all.
    ScoreUnavailable,
}

impl Notice {
    pub fn missing_column(column: impl Into<String>, used_for: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            used_for: used_for.into(),
        }
    }

    pub fn missing_group(columns: impl Into<String>, used_for: impl Into<String>) -> Self {
        Self::MissingColumnGroup {
            columns: columns.into(),
            used_for: used_for.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptySourceTable
            | Self::MissingColumn { .. }
            | Self::MissingColumnGroup { .. }
            | Self::ScoreUnavailable => Severity::Warning,
            Self::NoValidValues { .. }
            | Self::NoMatchingFilter { .. }
            | Self::SingleValue { .. } => Severity::Info,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySourceTable => {
                write!(f, "The survey table is empty; this section has no data")
            }
            Self::MissingColumn { column, used_for } => {
                write!(f, "Column '{}' ({}) was not found in the survey file", column, used_for)
            }
            Self::MissingColumnGroup { columns, used_for } => write!(
                f,
                "None of the columns {} ({}) were found in the survey file",
                columns, used_for
            ),
            Self::NoValidValues { column } => {
                write!(f, "Column '{}' has no valid values", column)
            }
            Self::NoMatchingFilter { filter } => {
                write!(f, "No data for the selected {}", filter)
            }
            Self::SingleValue { column, value } => write!(
                f,
                "Every selected value of '{}' is {}; no distribution to show",
                column, value
            ),
            Self::ScoreUnavailable => write!(
                f,
                "Vulnerability scores could not be computed; check that the indicator columns \
                 (p20s1-p20s5, p16s1, p16s2, p30s1-p30s9, p33s1-p33s6, p13) exist and hold data"
            ),
        }
    }
}
