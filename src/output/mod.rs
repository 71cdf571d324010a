pub mod json;
pub mod markdown;
pub mod terminal;
pub mod view;

use crate::data::RespondentTable;
use crate::formatting::FormattingConfig;
use crate::observability::{set_phase, Phase};
use crate::sections::SectionReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Markdown,
    Json,
}

/// Everything one run renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub source: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub respondents: usize,
    pub columns: usize,
    pub sections: Vec<SectionReport>,
}

impl Report {
    pub fn new(
        source: impl Into<PathBuf>,
        table: &RespondentTable,
        sections: Vec<SectionReport>,
    ) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            respondents: table.row_count(),
            columns: table.column_count(),
            sections,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

/// Render a report into memory.
pub fn render_to_string(
    report: &Report,
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Result<String> {
    let mut buffer = Vec::new();
    create_writer(format, &mut buffer, formatting).write_report(report)?;
    String::from_utf8(buffer).context("Report output was not valid UTF-8")
}

/// Write a report to `output_file`, or stdout when none is given. Files
/// never receive color codes.
pub fn output_report(
    report: &Report,
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    let _phase = set_phase(Phase::OutputGeneration);
    match output_file {
        Some(path) => {
            let content = render_to_string(report, format, FormattingConfig::plain())?;
            write_file(path, &content)?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(format, stdout.lock(), formatting).write_report(report)?;
        }
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
