use crate::output;
use crate::sections::{CodeFilter, Section, YearRange};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored tables for a terminal
    Terminal,
    /// Markdown document with pipe tables
    Markdown,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => output::OutputFormat::Terminal,
            OutputFormat::Markdown => output::OutputFormat::Markdown,
            OutputFormat::Json => output::OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "censusmap")]
#[command(
    about = "Descriptive report and vulnerability score for homeless census surveys",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render descriptive sections of a survey
    Report {
        /// Survey CSV (defaults to the configured dataset)
        csv: Option<PathBuf>,

        /// Section to render; repeat for several (default: all enabled)
        #[arg(short, long = "section", value_name = "NAME")]
        sections: Vec<Section>,

        /// Output format (default: from config, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: search for .censusmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Street reasons to show: "known", "all" or codes like 1,5,7
        #[arg(long, value_name = "LIST", default_value = "known")]
        reasons: CodeFilter,

        /// Help sources for the filtered view, e.g. 1,3
        #[arg(long, value_name = "LIST", value_delimiter = ',')]
        sources: Option<Vec<i64>>,

        /// Years-on-the-street range for the filtered histogram
        #[arg(long, value_name = "MIN..MAX")]
        years: Option<YearRange>,

        /// Maximum age histogram bins
        #[arg(long = "age-bins")]
        age_bins: Option<usize>,

        /// Maximum street-time histogram bins
        #[arg(long = "street-time-bins")]
        street_time_bins: Option<usize>,

        /// Fail when the survey cannot be read instead of reporting on no data
        #[arg(long)]
        strict: bool,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// Vulnerability indicators and score
    Score {
        /// Survey CSV (defaults to the configured dataset)
        csv: Option<PathBuf>,

        /// Output format (default: from config, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: search for .censusmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Include the per-respondent indicator and score table
        #[arg(long)]
        rows: bool,

        /// Fail when the survey cannot be read instead of reporting on no data
        #[arg(long)]
        strict: bool,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// List the available sections
    Sections,

    /// Write a default .censusmap.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
