//! CSV ingestion for survey files.
//!
//! Headers are normalized once here (spaces and periods become `_`, then
//! lower-case) so every later lookup is an exact match. Empty cells are
//! stored as missing answers.

use super::table::RespondentTable;
use crate::errors::{Error, Result};
use std::fs::File;
use std::path::Path;
use tracing::{debug, error, warn};

/// Normalize a raw header the way every column lookup expects it.
pub fn normalize_column_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == ' ' || c == '.' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

fn to_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a survey file, surfacing every failure.
pub fn try_load_table(path: &Path, delimiter: u8) -> Result<RespondentTable> {
    let file = File::open(path).map_err(|e| Error::file_system(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::csv(path, e))?
        .iter()
        .map(normalize_column_name)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::csv(path, e))?;
        records.push(record.iter().map(to_cell).collect());
    }

    let table = RespondentTable::from_records(headers, records);
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded survey table"
    );
    Ok(table)
}

/// Read a survey file, falling back to an empty table on any failure.
///
/// Downstream code treats an empty table as "no data", so a missing or
/// unreadable file degrades every section instead of aborting the run.
pub fn load_table(path: &Path, delimiter: u8) -> RespondentTable {
    match try_load_table(path, delimiter) {
        Ok(table) => table,
        Err(e) if e.is_not_found() => {
            warn!(
                "Survey file '{}' was not found. Make sure it is in the expected location.",
                path.display()
            );
            RespondentTable::empty()
        }
        Err(e) => {
            error!("Failed to load survey file: {}", e);
            RespondentTable::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("P20S1"), "p20s1");
        assert_eq!(normalize_column_name("P26 1"), "p26_1");
        assert_eq!(normalize_column_name("P23S1.R"), "p23s1_r");
        assert_eq!(normalize_column_name("p13"), "p13");
    }

    #[test]
    fn test_load_normalizes_headers_and_blank_cells() {
        let file = write_csv("P13,P26 1\n1,\n2,3\n");
        let table = try_load_table(file.path(), b',').unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(table.has_column("p26_1"));
        assert_eq!(table.column("p26_1").unwrap().get(0), None);
        assert_eq!(table.column("p13").unwrap().get(1), Some("2"));
    }

    #[test]
    fn test_load_respects_delimiter() {
        let file = write_csv("p13;p9\n1;2\n");
        let table = try_load_table(file.path(), b';').unwrap();
        assert_eq!(table.column("p9").unwrap().get(0), Some("2"));
    }

    #[test]
    fn test_missing_file_yields_empty_table() {
        let table = load_table(Path::new("/definitely/not/here/chc_2021.csv"), b',');
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_try_load_reports_missing_file() {
        let err = try_load_table(Path::new("/definitely/not/here.csv"), b',').unwrap_err();
        assert!(err.is_not_found());
    }
}
