//! In-memory respondent table.
//!
//! The table is column-major: every [`Column`] holds one optional cell per
//! respondent, in file order. A `None` cell is a missing answer. The table is
//! never mutated after it has been built.

use crate::errors::{Error, Result};
use std::collections::HashMap;

/// Parse a raw cell as a number.
///
/// Missing cells, text that is not a number, `NaN` and infinities all
/// yield `None`.
pub fn parse_numeric(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// One named survey column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell text for a row, `None` when missing or out of range.
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|cell| cell.as_deref())
    }

    pub fn cells(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.cells.iter().map(|cell| cell.as_deref())
    }

    /// Cells parsed as numbers; unparsable and missing cells are `None`.
    pub fn numeric(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.cells().map(parse_numeric)
    }

    /// Only the cells that parse as numbers, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.numeric().flatten().collect()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }
}

/// The loaded survey: ordered columns over an ordered set of respondents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RespondentTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl RespondentTable {
    /// A table with no columns and no rows (what an unreadable source yields).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a header row and row-major records.
    ///
    /// Short records are padded with missing cells; extra trailing cells are
    /// dropped. Duplicate header names get a numeric suffix (`p1`, `p1_1`).
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<Option<String>>>) -> Self {
        let rows = records.len();
        let mut columns: Vec<Vec<Option<String>>> =
            headers.iter().map(|_| Vec::with_capacity(rows)).collect();

        for record in records {
            let mut cells = record.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().flatten());
            }
        }

        let names = dedupe_names(headers);
        let columns = names
            .into_iter()
            .zip(columns)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();
        Self::assemble(columns, rows)
    }

    /// Build from whole columns, all of which must have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(Error::MalformedTable(format!(
                "column `{}` has {} cells, expected {}",
                bad.name(),
                bad.len(),
                rows
            )));
        }
        let mut seen = HashMap::new();
        for column in &columns {
            if seen.insert(column.name().to_string(), ()).is_some() {
                return Err(Error::MalformedTable(format!(
                    "duplicate column `{}`",
                    column.name()
                )));
            }
        }
        Ok(Self::assemble(columns, rows))
    }

    fn assemble(columns: Vec<Column>, rows: usize) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();
        Self {
            columns,
            index,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// No respondents. A header-only file is empty too.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The first `n` rows as raw cells, in column order.
    pub fn head(&self, n: usize) -> Vec<Vec<Option<&str>>> {
        (0..self.rows.min(n))
            .map(|row| self.columns.iter().map(|c| c.get(row)).collect())
            .collect()
    }
}

fn dedupe_names(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name.clone()
            } else {
                format!("{}_{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// Test and bench helper: build a table from `(name, cells)` pairs where
/// `None` is a missing answer.
pub fn table_from_pairs(pairs: &[(&str, Vec<Option<&str>>)]) -> Result<RespondentTable> {
    let columns = pairs
        .iter()
        .map(|(name, cells)| {
            Column::new(
                *name,
                cells.iter().map(|c| c.map(str::to_string)).collect(),
            )
        })
        .collect();
    RespondentTable::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_parse_numeric_handles_text_and_nan() {
        assert_eq!(parse_numeric(Some("1")), Some(1.0));
        assert_eq!(parse_numeric(Some(" 2.0 ")), Some(2.0));
        assert_eq!(parse_numeric(Some("abc")), None);
        assert_eq!(parse_numeric(Some("NaN")), None);
        assert_eq!(parse_numeric(Some("inf")), None);
        assert_eq!(parse_numeric(None), None);
    }

    #[test]
    fn test_from_records_pads_short_rows() {
        let table = RespondentTable::from_records(
            vec!["p13".into(), "p9".into()],
            vec![vec![s("1"), s("2")], vec![s("3")]],
        );
        assert_eq!(table.row_count(), 2);
        let p9 = table.column("p9").unwrap();
        assert_eq!(p9.get(0), Some("2"));
        assert_eq!(p9.get(1), None);
    }

    #[test]
    fn test_from_records_dedupes_header_names() {
        let table = RespondentTable::from_records(
            vec!["p1".into(), "p1".into(), "p1".into()],
            vec![vec![s("5"), s("8"), s("11")]],
        );
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["p1", "p1_1", "p1_2"]);
        assert_eq!(table.column("p1_1").unwrap().get(0), Some("8"));
    }

    #[test]
    fn test_from_columns_rejects_ragged_columns() {
        let result = RespondentTable::from_columns(vec![
            Column::new("a", vec![s("1"), s("2")]),
            Column::new("b", vec![s("1")]),
        ]);
        assert!(matches!(result, Err(Error::MalformedTable(_))));
    }

    #[test]
    fn test_from_columns_rejects_duplicates() {
        let result = RespondentTable::from_columns(vec![
            Column::new("a", vec![s("1")]),
            Column::new("a", vec![s("2")]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_header_only_table_is_empty_but_has_columns() {
        let table = RespondentTable::from_records(vec!["p13".into()], vec![]);
        assert!(table.is_empty());
        assert!(table.has_column("p13"));
    }

    #[test]
    fn test_missing_and_present_counts() {
        let column = Column::new("p13", vec![s("1"), None, s("x"), None]);
        assert_eq!(column.missing_count(), 2);
        assert_eq!(column.present_count(), 2);
        assert_eq!(column.numeric_values(), vec![1.0]);
    }

    #[test]
    fn test_head_limits_rows() {
        let table = table_from_pairs(&[("a", vec![Some("1"), Some("2"), None])]).unwrap();
        let head = table.head(2);
        assert_eq!(head, vec![vec![Some("1")], vec![Some("2")]]);
        assert_eq!(table.head(10).len(), 3);
    }
}
