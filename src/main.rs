use anyhow::Result;
use censusmap::cli::{Cli, Commands};
use censusmap::commands::{self, ReportConfig, ScoreOptions};
use censusmap::observability::{init_tracing, install_panic_hook};
use censusmap::sections::SectionParams;
use clap::Parser;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        command @ Commands::Report { .. } => handle_report_command(command),
        Commands::Score {
            csv,
            format,
            output,
            config,
            rows,
            strict,
            plain,
        } => commands::handle_score(ScoreOptions {
            dataset: csv,
            config_file: config,
            format: format.map(Into::into),
            output,
            rows,
            plain,
            strict,
        }),
        Commands::Sections => commands::list_sections(std::io::stdout().lock()),
        Commands::Init { force } => commands::init_config(force),
    }
}

fn handle_report_command(command: Commands) -> Result<()> {
    let Commands::Report {
        csv,
        sections,
        format,
        output,
        config,
        reasons,
        sources,
        years,
        age_bins,
        street_time_bins,
        strict,
        plain,
    } = command
    else {
        unreachable!("handle_report_command called with a non-report command");
    };

    let params = SectionParams {
        reasons,
        sources,
        years,
        ..SectionParams::default()
    };
    let mut options = ReportConfig::new(sections, params);
    options.dataset = csv;
    options.config_file = config;
    options.format = format.map(Into::into);
    options.output = output;
    options.age_max_bins = age_bins;
    options.street_time_max_bins = street_time_bins;
    options.strict = strict;
    options.plain = plain;

    commands::handle_report(options)
}
