use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{CensusConfig, CONFIG_FILE_NAME};
use crate::errors::{Error, Result};
use crate::sections::MAX_HISTOGRAM_BINS;

/// Maximum directories searched upward for a config file
pub const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CensusConfig> {
    let config = toml::from_str::<CensusConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &CensusConfig) -> Result<()> {
    if let Some(delimiter) = config.dataset.as_ref().and_then(|d| d.delimiter) {
        if !delimiter.is_ascii() {
            return Err(Error::Configuration(format!(
                "dataset.delimiter must be a single ASCII character, got '{}'",
                delimiter
            )));
        }
    }

    if let Some(histogram) = &config.histogram {
        let limits = [
            ("histogram.max_bins", histogram.max_bins),
            ("histogram.street_time_max_bins", histogram.street_time_max_bins),
        ];
        for (key, value) in limits {
            match value {
                Some(0) => {
                    return Err(Error::Configuration(format!("{} must be at least 1", key)));
                }
                Some(bins) if bins > MAX_HISTOGRAM_BINS => {
                    return Err(Error::Configuration(format!(
                        "{} must be at most {}, got {}",
                        key, MAX_HISTOGRAM_BINS, bins
                    )));
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Try loading config from a specific path; `None` when absent or invalid
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CensusConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Log read failures other than "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors up to a depth limit, starting with `start`
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.censusmap.toml`
pub fn load_config_from(start: PathBuf) -> CensusConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CensusConfig::default()
        })
}

/// Load configuration from the current directory upward
pub fn load_config() -> CensusConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CensusConfig::default()
        }
    }
}

/// Load an explicitly requested config file. Unlike discovery, any failure
/// is an error.
pub fn load_config_file(path: &Path) -> Result<CensusConfig> {
    let contents = read_config_file(path).map_err(|e| Error::file_system(path, e))?;
    parse_and_validate_config(&contents)
}
