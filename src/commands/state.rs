//! Type-state pattern for report options.
//!
//! Options collected from the command line start `Unvalidated`. Validation
//! merges them with the configuration file, checks the section filters and
//! yields a `Validated` value, the only kind `report::execute` accepts.
//!
//! ```ignore
//! let options: ReportConfig<Unvalidated> = ReportConfig::new(sections, params);
//! let validated = options.validate()?;
//! report::execute(&validated)?;
//! ```

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{load_config, load_config_file, CensusConfig};
use crate::formatting::{ColorMode, FormattingConfig};
use crate::observability::{set_phase, Phase};
use crate::output::OutputFormat;
use crate::sections::{Section, SectionParams};

/// Marker type representing unvalidated state
#[derive(Debug, Clone, Copy)]
pub struct Unvalidated;

/// Marker type representing validated state
#[derive(Debug, Clone, Copy)]
pub struct Validated;

/// Options for one report run.
///
/// `None` fields fall back to the configuration file during validation.
#[derive(Debug, Clone)]
pub struct ReportConfig<State = Unvalidated> {
    pub dataset: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub sections: Vec<Section>,
    pub params: SectionParams,
    pub age_max_bins: Option<usize>,
    pub street_time_max_bins: Option<usize>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
    /// Fail instead of reporting on an empty table when the CSV cannot be read.
    pub strict: bool,

    settings: CensusConfig,
    _state: PhantomData<State>,
}

impl ReportConfig<Unvalidated> {
    pub fn new(sections: Vec<Section>, params: SectionParams) -> Self {
        Self {
            dataset: None,
            config_file: None,
            sections,
            params,
            age_max_bins: None,
            street_time_max_bins: None,
            format: None,
            output: None,
            plain: false,
            strict: false,
            settings: CensusConfig::default(),
            _state: PhantomData,
        }
    }

    /// Merge with the configuration file and check every argument.
    pub fn validate(self) -> Result<ReportConfig<Validated>> {
        let settings = {
            let _phase = set_phase(Phase::ConfigLoading);
            match &self.config_file {
                Some(path) => load_config_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => load_config(),
            }
        };
        self.validate_with(settings)
    }

    /// Validate against an already loaded configuration.
    pub fn validate_with(self, settings: CensusConfig) -> Result<ReportConfig<Validated>> {
        let mut params = self.params;
        params.age_max_bins = self.age_max_bins.unwrap_or_else(|| settings.age_max_bins());
        params.street_time_max_bins = self
            .street_time_max_bins
            .unwrap_or_else(|| settings.street_time_max_bins());
        params.validate()?;

        let sections = if self.sections.is_empty() {
            settings.enabled_sections()
        } else {
            dedup_in_order(self.sections)
        };

        Ok(ReportConfig {
            dataset: Some(self.dataset.unwrap_or_else(|| settings.dataset_path())),
            config_file: self.config_file,
            sections,
            params,
            age_max_bins: self.age_max_bins,
            street_time_max_bins: self.street_time_max_bins,
            format: Some(self.format.unwrap_or_else(|| settings.default_format())),
            output: self.output,
            plain: self.plain,
            strict: self.strict,
            settings,
            _state: PhantomData,
        })
    }
}

impl ReportConfig<Validated> {
    pub fn dataset_path(&self) -> &Path {
        self.dataset.as_deref().unwrap_or_else(|| Path::new(""))
    }

    pub fn delimiter(&self) -> u8 {
        self.settings.delimiter()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// `--plain` beats the configured color mode; the environment beats both.
    pub fn formatting(&self) -> FormattingConfig {
        if self.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env_with(self.settings.color())
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        self.formatting().color
    }
}

fn dedup_in_order(sections: Vec<Section>) -> Vec<Section> {
    let mut seen = Vec::with_capacity(sections.len());
    for section in sections {
        if !seen.contains(&section) {
            seen.push(section);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use crate::sections::CodeFilter;

    #[test]
    fn test_config_fills_unset_options() {
        let settings = parse_and_validate_config(
            r#"
[dataset]
path = "data/census.csv"
delimiter = ";"

[output]
default_format = "markdown"

[sections]
enabled = ["geography", "health"]

[histogram]
max_bins = 8
"#,
        )
        .unwrap();

        let validated = ReportConfig::new(Vec::new(), SectionParams::default())
            .validate_with(settings)
            .unwrap();

        assert_eq!(validated.dataset_path(), Path::new("data/census.csv"));
        assert_eq!(validated.delimiter(), b';');
        assert_eq!(validated.output_format(), OutputFormat::Markdown);
        assert_eq!(validated.sections, vec![Section::Geography, Section::Health]);
        assert_eq!(validated.params.age_max_bins, 8);
        assert_eq!(validated.params.street_time_max_bins, 50);
    }

    #[test]
    fn test_command_line_wins_over_config() {
        let settings = parse_and_validate_config("[output]\ndefault_format = \"json\"\n").unwrap();
        let mut options = ReportConfig::new(
            vec![Section::Health, Section::Overview, Section::Health],
            SectionParams::default(),
        );
        options.format = Some(OutputFormat::Terminal);
        options.dataset = Some(PathBuf::from("other.csv"));
        options.age_max_bins = Some(3);

        let validated = options.validate_with(settings).unwrap();
        assert_eq!(validated.output_format(), OutputFormat::Terminal);
        assert_eq!(validated.dataset_path(), Path::new("other.csv"));
        assert_eq!(validated.sections, vec![Section::Health, Section::Overview]);
        assert_eq!(validated.params.age_max_bins, 3);
    }

    #[test]
    fn test_unknown_reason_code_fails_validation() {
        let params = SectionParams {
            reasons: CodeFilter::Only(vec![1, 42]),
            ..SectionParams::default()
        };
        let result = ReportConfig::new(Vec::new(), params).validate_with(CensusConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_plain_disables_color() {
        let mut options = ReportConfig::new(Vec::new(), SectionParams::default());
        options.plain = true;
        let validated = options.validate_with(CensusConfig::default()).unwrap();
        assert_eq!(validated.color_mode(), ColorMode::Never);
    }
}
