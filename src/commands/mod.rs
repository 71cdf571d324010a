//! CLI command implementations.
//!
//! - **report**: render the selected sections of a survey
//! - **score**: the vulnerability section alone, optionally per respondent
//! - **sections**: list the available sections
//! - **init**: write a default `.censusmap.toml`
//!
//! Report options follow a type-state pattern: only validated options can
//! be executed.

pub mod init;
pub mod report;
pub mod score;
pub mod sections;
pub mod state;

pub use init::{init_config, init_config_at, DEFAULT_CONFIG};
pub use report::{build_report, handle_report};
pub use score::{handle_score, ScoreOptions};
pub use sections::{list_sections, sections_table};
pub use state::{ReportConfig, Unvalidated, Validated};
