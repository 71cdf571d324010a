use anyhow::Result;
use std::path::PathBuf;

use super::report;
use super::state::ReportConfig;
use crate::output::OutputFormat;
use crate::sections::{Section, SectionParams};

/// Options for the `score` command.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    pub dataset: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub rows: bool,
    pub plain: bool,
    pub strict: bool,
}

impl ScoreOptions {
    /// The vulnerability section alone, as a report run.
    pub fn into_report_config(self) -> ReportConfig {
        let params = SectionParams {
            include_rows: self.rows,
            ..SectionParams::default()
        };
        let mut config = ReportConfig::new(vec![Section::Vulnerability], params);
        config.dataset = self.dataset;
        config.config_file = self.config_file;
        config.format = self.format;
        config.output = self.output;
        config.plain = self.plain;
        config.strict = self.strict;
        config
    }
}

pub fn handle_score(options: ScoreOptions) -> Result<()> {
    report::handle_report(options.into_report_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CensusConfig;

    #[test]
    fn test_score_ignores_enabled_sections() {
        let settings = crate::config::parse_and_validate_config(
            "[sections]\nenabled = [\"overview\"]\n",
        )
        .unwrap();
        let options = ScoreOptions {
            rows: true,
            ..ScoreOptions::default()
        };
        let validated = options.into_report_config().validate_with(settings).unwrap();
        assert_eq!(validated.sections, vec![Section::Vulnerability]);
        assert!(validated.params.include_rows);

        let defaults = ScoreOptions::default()
            .into_report_config()
            .validate_with(CensusConfig::default())
            .unwrap();
        assert!(!defaults.params.include_rows);
    }
}
