use crate::formatting::ColorMode;
use crate::output::OutputFormat;
use crate::sections::{Section, DEFAULT_AGE_BINS, DEFAULT_STREET_TIME_BINS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = ".censusmap.toml";
pub const DEFAULT_DATASET_PATH: &str = "chc_2021.csv";

/// Root configuration structure for censusmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CensusConfig {
    /// Survey file location and format
    #[serde(default)]
    pub dataset: Option<DatasetConfig>,

    /// Output defaults
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Sections rendered by `report` when none are named
    #[serde(default)]
    pub sections: Option<SectionsConfig>,

    /// Histogram sizing
    #[serde(default)]
    pub histogram: Option<HistogramConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DatasetConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Single ASCII field separator
    #[serde(default)]
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,

    #[serde(default)]
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SectionsConfig {
    #[serde(default)]
    pub enabled: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HistogramConfig {
    /// Upper bound on age histogram bins
    #[serde(default)]
    pub max_bins: Option<usize>,

    /// Upper bound on street-time histogram bins
    #[serde(default)]
    pub street_time_max_bins: Option<usize>,
}

impl CensusConfig {
    pub fn dataset_path(&self) -> PathBuf {
        self.dataset
            .as_ref()
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH))
    }

    pub fn delimiter(&self) -> u8 {
        self.dataset
            .as_ref()
            .and_then(|d| d.delimiter)
            .filter(char::is_ascii)
            .map(|c| c as u8)
            .unwrap_or(b',')
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or_default()
    }

    pub fn color(&self) -> ColorMode {
        self.output
            .as_ref()
            .and_then(|o| o.color)
            .unwrap_or_default()
    }

    /// Enabled sections, or every section when the list is absent or empty.
    pub fn enabled_sections(&self) -> Vec<Section> {
        match &self.sections {
            Some(sections) if !sections.enabled.is_empty() => sections.enabled.clone(),
            _ => Section::ALL.to_vec(),
        }
    }

    pub fn age_max_bins(&self) -> usize {
        self.histogram
            .as_ref()
            .and_then(|h| h.max_bins)
            .unwrap_or(DEFAULT_AGE_BINS)
    }

    pub fn street_time_max_bins(&self) -> usize {
        self.histogram
            .as_ref()
            .and_then(|h| h.street_time_max_bins)
            .unwrap_or(DEFAULT_STREET_TIME_BINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CensusConfig::default();
        assert_eq!(config.dataset_path(), PathBuf::from("chc_2021.csv"));
        assert_eq!(config.delimiter(), b',');
        assert_eq!(config.default_format(), OutputFormat::Terminal);
        assert_eq!(config.color(), ColorMode::Auto);
        assert_eq!(config.enabled_sections().len(), Section::ALL.len());
        assert_eq!(config.age_max_bins(), 20);
        assert_eq!(config.street_time_max_bins(), 50);
    }

    #[test]
    fn test_accessors_read_configured_values() {
        let config: CensusConfig = toml::from_str(
            r#"
[dataset]
path = "data/chc.csv"
delimiter = ";"

[output]
default_format = "markdown"

[sections]
enabled = ["geography", "vulnerability"]
"#,
        )
        .unwrap();
        assert_eq!(config.dataset_path(), PathBuf::from("data/chc.csv"));
        assert_eq!(config.delimiter(), b';');
        assert_eq!(config.default_format(), OutputFormat::Markdown);
        assert_eq!(
            config.enabled_sections(),
            vec![Section::Geography, Section::Vulnerability]
        );
    }
}
