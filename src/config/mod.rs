//! Configuration: the optional `.censusmap.toml` file.
//!
//! Discovery walks up from the current directory and falls back to
//! defaults on any problem. A file named with `--config` must load.

mod core;
mod loader;

pub use self::core::{
    CensusConfig, DatasetConfig, HistogramConfig, OutputConfig, SectionsConfig, CONFIG_FILE_NAME,
    DEFAULT_DATASET_PATH,
};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, MAX_TRAVERSAL_DEPTH,
};
