// Shared fixtures for censusmap integration tests
#![allow(dead_code)]

use censusmap::data::{table_from_pairs, RespondentTable};
use std::fs;
use std::path::{Path, PathBuf};

/// Build a table from `(column, cells)` pairs; `None` is a missing answer.
pub fn table(pairs: &[(&str, Vec<Option<&str>>)]) -> RespondentTable {
    table_from_pairs(pairs).expect("fixture columns must have equal length")
}

/// Write a CSV fixture into `dir` and return its path.
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write CSV fixture");
    path
}

/// A small survey touching every section.
pub const SAMPLE_SURVEY: &str = "\
P1,P8R,P9,P12,P13,P16S1,P16S2,P20S1,P20S2,P22,P23S1R,P26_1,P30S1,P30S3,P33S1,P33S3
5,34,1,1,1,4,4,2,2,1,3,1,1,2,2,1
11,52,1,2,1,2,4,1,2,5,10,2,2,2,1,
5,27,2,1,2,4,4,2,2,1,1,1,2,2,,2
76,,1,1,3,4,1,2,1,7,x,3,1,1,2,2
";
