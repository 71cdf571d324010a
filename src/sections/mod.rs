//! Report sections.
//!
//! Each section is a pure function of the respondent table and the filter
//! parameters. It returns serializable data plus the [`Notice`]s explaining
//! anything that was missing or defaulted.

pub mod frequency;
pub mod health;
pub mod overview;
pub mod population;
pub mod risk;
pub mod stats;
pub mod street;
pub mod vulnerability;

use crate::codebook::{Codebook, HELP_SOURCE, STREET_REASON};
use crate::data::RespondentTable;
use crate::errors::{Error, Result};
use crate::notice::Notice;
use crate::observability::{set_phase, set_section, Phase};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, debug_span};

pub use frequency::{code_count, labelled_counts, value_counts, CodeCount};
pub use health::{Diagnosis, Health};
pub use overview::{MissingCount, MissingData, Overview};
pub use population::{AgeDistribution, Demographics, DepartmentCount, Geography, LivingConditions};
pub use risk::{Prevalence, Prevalences};
pub use stats::{Bin, Histogram, NumericSummary};
pub use street::{FilteredYears, HelpSources, Share, StreetReasons, StreetTime, YearBounds};
pub use vulnerability::{IndicatorSummary, RespondentScore, VulnerabilitySummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Overview,
    MissingData,
    Geography,
    Demographics,
    LivingConditions,
    Health,
    StreetReasons,
    StreetTime,
    HelpSources,
    Substances,
    Security,
    Vulnerability,
}

impl Section {
    pub const ALL: [Section; 12] = [
        Section::Overview,
        Section::MissingData,
        Section::Geography,
        Section::Demographics,
        Section::LivingConditions,
        Section::Health,
        Section::StreetReasons,
        Section::StreetTime,
        Section::HelpSources,
        Section::Substances,
        Section::Security,
        Section::Vulnerability,
    ];

    /// Name accepted by `--section` and the config file.
    pub fn name(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::MissingData => "missing-data",
            Self::Geography => "geography",
            Self::Demographics => "demographics",
            Self::LivingConditions => "living-conditions",
            Self::Health => "health",
            Self::StreetReasons => "street-reasons",
            Self::StreetTime => "street-time",
            Self::HelpSources => "help-sources",
            Self::Substances => "substances",
            Self::Security => "security",
            Self::Vulnerability => "vulnerability",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Survey overview",
            Self::MissingData => "Missing data treatment",
            Self::Geography => "Respondents by department",
            Self::Demographics => "Sex and age",
            Self::LivingConditions => "Where respondents sleep",
            Self::Health => "Health and disability",
            Self::StreetReasons => "Main reason for living on the street",
            Self::StreetTime => "Time living on the street",
            Self::HelpSources => "Main source of help",
            Self::Substances => "Current substance use",
            Self::Security => "Security on the street",
            Self::Vulnerability => "Multifactor vulnerability indicator",
        }
    }

    /// Survey questions the section reads.
    pub fn questions(self) -> &'static str {
        match self {
            Self::Overview | Self::MissingData => "all columns",
            Self::Geography => "p1",
            Self::Demographics => "p9, p8r",
            Self::LivingConditions => "p12, p13",
            Self::Health => "p16s1, p16s2, p20s1-p20s5",
            Self::StreetReasons => "p22",
            Self::StreetTime => "p23s1r",
            Self::HelpSources => "p26_1",
            Self::Substances => "p30s1-p30s9",
            Self::Security => "p33s1-p33s6",
            Self::Vulnerability => "p20s*, p16s1, p16s2, p30s*, p33s*, p13",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|section| section.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|s| s.name()).collect();
                Error::invalid_argument(
                    "section",
                    format!("unknown section '{}', expected one of: {}", s, known.join(", ")),
                )
            })
    }
}

/// Which answer codes a coded-answer table shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "codes", rename_all = "snake_case")]
pub enum CodeFilter {
    /// Codes in the codebook only.
    #[default]
    Known,
    /// Every code present in the data, unknown ones with a fallback label.
    All,
    /// Exactly these codes.
    Only(Vec<i64>),
}

impl CodeFilter {
    /// An empty selection shows every code present.
    pub fn only(codes: Vec<i64>) -> Self {
        if codes.is_empty() {
            Self::All
        } else {
            Self::Only(codes)
        }
    }

    pub fn admits(&self, code: i64, codebook: &Codebook) -> bool {
        match self {
            Self::Known => codebook.contains(code),
            Self::All => true,
            Self::Only(codes) => codes.is_empty() || codes.contains(&code),
        }
    }

    /// Reject listed codes the codebook does not define.
    pub fn validate(&self, arg: &str, codebook: &Codebook) -> Result<()> {
        if let Self::Only(codes) = self {
            validate_codes(arg, codes, codebook)?;
        }
        Ok(())
    }
}

impl FromStr for CodeFilter {
    type Err = Error;

    /// `known`, `all`, or a comma-separated list of codes.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "known" => Ok(Self::Known),
            "all" => Ok(Self::All),
            list => parse_code_list("reasons", list).map(Self::only),
        }
    }
}

/// Parse `"1, 5,7"` into codes.
pub fn parse_code_list(arg: &str, list: &str) -> Result<Vec<i64>> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                Error::invalid_argument(arg, format!("'{}' is not an answer code", part))
            })
        })
        .collect()
}

fn validate_codes(arg: &str, codes: &[i64], codebook: &Codebook) -> Result<()> {
    match codes.iter().find(|code| !codebook.contains(**code)) {
        Some(code) => {
            let known: Vec<String> = codebook.codes().map(|c| c.to_string()).collect();
            Err(Error::invalid_argument(
                arg,
                format!("unknown code {}, expected one of: {}", code, known.join(", ")),
            ))
        }
        None => Ok(()),
    }
}

/// Inclusive range of years on the street.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRange {
    pub min: f64,
    pub max: f64,
}

impl YearRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(Error::invalid_argument("years", "bounds must be finite numbers"));
        }
        if min > max {
            return Err(Error::invalid_argument(
                "years",
                format!("lower bound {} is above upper bound {}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl FromStr for YearRange {
    type Err = Error;

    /// `MIN..MAX`, both bounds inclusive.
    fn from_str(s: &str) -> Result<Self> {
        let (min, max) = s
            .split_once("..")
            .ok_or_else(|| Error::invalid_argument("years", "expected MIN..MAX"))?;
        let parse = |bound: &str| {
            bound.trim().parse::<f64>().map_err(|_| {
                Error::invalid_argument("years", format!("'{}' is not a number", bound.trim()))
            })
        };
        Self::new(parse(min)?, parse(max)?)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

pub const DEFAULT_AGE_BINS: usize = 20;
pub const DEFAULT_STREET_TIME_BINS: usize = 50;
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Filters and sizing shared by every section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionParams {
    pub reasons: CodeFilter,
    /// Help sources for the filtered view; `None` shows no filtered view.
    pub sources: Option<Vec<i64>>,
    pub years: Option<YearRange>,
    pub age_max_bins: usize,
    pub street_time_max_bins: usize,
    /// Include the per-respondent score table in the vulnerability section.
    pub include_rows: bool,
}

impl Default for SectionParams {
    fn default() -> Self {
        Self {
            reasons: CodeFilter::Known,
            sources: None,
            years: None,
            age_max_bins: DEFAULT_AGE_BINS,
            street_time_max_bins: DEFAULT_STREET_TIME_BINS,
            include_rows: false,
        }
    }
}

impl SectionParams {
    pub fn validate(&self) -> Result<()> {
        self.reasons.validate("reasons", &STREET_REASON)?;
        if let Some(sources) = &self.sources {
            validate_codes("sources", sources, &HELP_SOURCE)?;
        }
        if self.age_max_bins == 0 || self.street_time_max_bins == 0 {
            return Err(Error::Configuration(
                "histogram bin limits must be at least 1".into(),
            ));
        }
        for (arg, bins) in [
            ("age-bins", self.age_max_bins),
            ("street-time-bins", self.street_time_max_bins),
        ] {
            if bins > MAX_HISTOGRAM_BINS {
                return Err(Error::invalid_argument(
                    arg,
                    format!("{} bins exceeds the limit of {}", bins, MAX_HISTOGRAM_BINS),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    Overview(Overview),
    MissingData(MissingData),
    Geography(Geography),
    Demographics(Demographics),
    LivingConditions(LivingConditions),
    Health(Health),
    StreetReasons(StreetReasons),
    StreetTime(StreetTime),
    HelpSources(HelpSources),
    Substances(Prevalences),
    Security(Prevalences),
    Vulnerability(VulnerabilitySummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub section: Section,
    pub title: &'static str,
    pub data: SectionData,
    pub notices: Vec<Notice>,
}

/// Build one section.
pub fn build_section(
    section: Section,
    table: &RespondentTable,
    params: &SectionParams,
) -> SectionReport {
    let _span = debug_span!("section", name = %section).entered();
    let _phase = set_phase(Phase::SectionBuilding);
    let _section = set_section(section.name());

    let (data, mut notices) = match section {
        Section::Overview => wrap(overview::overview(table), SectionData::Overview),
        Section::MissingData => wrap(overview::missing_data(table), SectionData::MissingData),
        Section::Geography => wrap(population::geography(table), SectionData::Geography),
        Section::Demographics => wrap(
            population::demographics(table, params.age_max_bins),
            SectionData::Demographics,
        ),
        Section::LivingConditions => wrap(
            population::living_conditions(table),
            SectionData::LivingConditions,
        ),
        Section::Health => wrap(health::health(table), SectionData::Health),
        Section::StreetReasons => wrap(
            street::street_reasons(table, &params.reasons),
            SectionData::StreetReasons,
        ),
        Section::StreetTime => wrap(
            street::street_time(table, params.years, params.street_time_max_bins),
            SectionData::StreetTime,
        ),
        Section::HelpSources => wrap(
            street::help_sources(table, params.sources.as_deref()),
            SectionData::HelpSources,
        ),
        Section::Substances => wrap(risk::substances(table), SectionData::Substances),
        Section::Security => wrap(risk::security(table), SectionData::Security),
        Section::Vulnerability => wrap(
            vulnerability::vulnerability(table, params.include_rows),
            SectionData::Vulnerability,
        ),
    };

    // An empty table explains every absence at once.
    if table.is_empty() && !notices.contains(&Notice::EmptySourceTable) {
        notices = vec![Notice::EmptySourceTable];
    }

    debug!(notices = notices.len(), "Section built");
    SectionReport {
        section,
        title: section.title(),
        data,
        notices,
    }
}

/// Build the given sections in order.
pub fn build_sections(
    sections: &[Section],
    table: &RespondentTable,
    params: &SectionParams,
) -> Vec<SectionReport> {
    sections
        .iter()
        .map(|section| build_section(*section, table, params))
        .collect()
}

fn wrap<T>(built: (T, Vec<Notice>), variant: fn(T) -> SectionData) -> (SectionData, Vec<Notice>) {
    (variant(built.0), built.1)
}
