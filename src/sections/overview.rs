use super::frequency::percent;
use crate::data::RespondentTable;
use crate::notice::Notice;
use serde::Serialize;

/// Rows shown in the overview preview.
pub const HEAD_ROWS: usize = 5;

/// How each analysis treats missing and unparsable answers.
pub const MISSING_DATA_POLICY: [&str; 4] = [
    "Counts and percentages exclude missing answers; shares are computed over \
     the valid answers to each question, not over every respondent.",
    "Numeric questions (age, years on the street) drop cells that are missing \
     or not numbers before computing averages, medians and histograms.",
    "The vulnerability indicator treats a missing answer as the condition not \
     being reported; a missing column contributes nothing for every respondent.",
    "Outliers are kept: long stays on the street are part of the population's \
     reality. Use `--years MIN..MAX` to focus the street-time histogram.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub head: Vec<Vec<Option<String>>>,
}

pub fn overview(table: &RespondentTable) -> (Overview, Vec<Notice>) {
    let head = table
        .head(HEAD_ROWS)
        .into_iter()
        .map(|row| row.into_iter().map(|c| c.map(str::to_string)).collect())
        .collect();

    let overview = Overview {
        rows: table.row_count(),
        columns: table.column_count(),
        column_names: table.column_names().map(str::to_string).collect(),
        head,
    };
    (overview, Vec::new())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingData {
    pub columns: Vec<MissingCount>,
    pub policy: Vec<&'static str>,
}

pub fn missing_data(table: &RespondentTable) -> (MissingData, Vec<Notice>) {
    let rows = table.row_count();
    let columns = table
        .columns()
        .iter()
        .map(|column| MissingCount {
            column: column.name().to_string(),
            missing: column.missing_count(),
            percent: percent(column.missing_count(), rows),
        })
        .collect();

    let data = MissingData {
        columns,
        policy: MISSING_DATA_POLICY.to_vec(),
    };
    (data, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;

    #[test]
    fn test_overview_limits_head() {
        let cells: Vec<Option<&str>> = (0..8).map(|_| Some("1")).collect();
        let table = table_from_pairs(&[("p9", cells.clone()), ("p13", cells)]).unwrap();
        let (overview, notices) = overview(&table);
        assert_eq!(overview.rows, 8);
        assert_eq!(overview.columns, 2);
        assert_eq!(overview.head.len(), HEAD_ROWS);
        assert_eq!(overview.column_names, vec!["p9", "p13"]);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_missing_data_percentages() {
        let table =
            table_from_pairs(&[("p9", vec![Some("1"), None, None, Some("2")])]).unwrap();
        let (data, _) = missing_data(&table);
        assert_eq!(data.columns[0].missing, 2);
        assert_eq!(data.columns[0].percent, 50.0);
        assert_eq!(data.policy.len(), MISSING_DATA_POLICY.len());
    }
}
