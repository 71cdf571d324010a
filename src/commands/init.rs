use crate::config::CONFIG_FILE_NAME;
use crate::output::write_file;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# censusmap configuration

[dataset]
# Survey CSV used when no path is given on the command line
path = "chc_2021.csv"
delimiter = ","

[output]
# terminal, markdown or json
default_format = "terminal"
# auto, always or never
color = "auto"

[sections]
# Sections rendered by `censusmap report` without --section (empty = all)
enabled = []

[histogram]
max_bins = 20
street_time_max_bins = 50
"#;

/// Write the default configuration to `.censusmap.toml` in the current directory.
pub fn init_config(force: bool) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    init_config_at(&path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    write_file(path, DEFAULT_CONFIG)
}
