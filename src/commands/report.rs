use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use super::state::{ReportConfig, Validated};
use crate::data::{try_load_table, RespondentTable, TableCache};
use crate::observability::{set_phase, set_source, Phase};
use crate::output::{output_report, Report};
use crate::sections::build_sections;

/// Validate the options, then build and write the report.
pub fn handle_report(options: ReportConfig) -> Result<()> {
    let config = options.validate()?;
    execute(&config)
}

pub fn execute(config: &ReportConfig<Validated>) -> Result<()> {
    let report = build_report(config)?;
    output_report(
        &report,
        config.output_format(),
        config.output.as_deref(),
        config.formatting(),
    )
}

/// Load the survey and build every selected section.
pub fn build_report(config: &ReportConfig<Validated>) -> Result<Report> {
    let path = config.dataset_path();
    let _source = set_source(path);
    let mut cache = TableCache::new(config.delimiter());
    let table = load(config, &mut cache)?;

    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        sections = config.sections.len(),
        "Building report"
    );
    let sections = build_sections(&config.sections, &table, &config.params);
    Ok(Report::new(path, &table, sections))
}

/// Strict loads bypass the cache so read errors always surface.
fn load(config: &ReportConfig<Validated>, cache: &mut TableCache) -> Result<Arc<RespondentTable>> {
    let _phase = set_phase(Phase::Loading);
    let path = config.dataset_path();
    if config.strict {
        let table = try_load_table(path, config.delimiter())
            .with_context(|| format!("Failed to load survey {}", path.display()))?;
        return Ok(Arc::new(table));
    }
    let table = cache.get_or_load(path);
    let stats = cache.stats();
    debug!(hits = stats.hits, misses = stats.misses, "Table cache");
    Ok(table)
}
