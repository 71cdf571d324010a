//! Column presence queries.

use crate::data::{Column, RespondentTable};

/// One candidate column and whether the table has it.
#[derive(Debug, Clone, Copy)]
pub struct ColumnPresence<'a> {
    pub name: &'static str,
    pub column: Option<&'a Column>,
}

impl ColumnPresence<'_> {
    pub fn is_present(&self) -> bool {
        self.column.is_some()
    }
}

/// Presence of every candidate, in candidate order.
#[derive(Debug, Clone)]
pub struct ResolvedColumns<'a> {
    candidates: Vec<ColumnPresence<'a>>,
}

impl<'a> ResolvedColumns<'a> {
    /// Columns that exist, in candidate order.
    pub fn present(&self) -> impl Iterator<Item = &'a Column> + '_ {
        self.candidates.iter().filter_map(|c| c.column)
    }

    pub fn present_names(&self) -> Vec<&'static str> {
        self.candidates
            .iter()
            .filter(|c| c.is_present())
            .map(|c| c.name)
            .collect()
    }

    pub fn absent_names(&self) -> Vec<&'static str> {
        self.candidates
            .iter()
            .filter(|c| !c.is_present())
            .map(|c| c.name)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&'a Column> {
        self.candidates
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.column)
    }

    pub fn candidates(&self) -> &[ColumnPresence<'a>] {
        &self.candidates
    }

    /// No candidate exists: whatever depends on these columns is unavailable.
    pub fn is_empty(&self) -> bool {
        self.candidates.iter().all(|c| !c.is_present())
    }
}

/// Resolve candidate names against the table. Matching is exact; header
/// normalization already happened at load time.
pub fn resolve_columns<'a, I>(table: &'a RespondentTable, candidates: I) -> ResolvedColumns<'a>
where
    I: IntoIterator<Item = &'static str>,
{
    ResolvedColumns {
        candidates: candidates
            .into_iter()
            .map(|name| ColumnPresence {
                name,
                column: table.column(name),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;

    #[test]
    fn test_preserves_candidate_order() {
        let table = table_from_pairs(&[
            ("p20s3", vec![Some("1")]),
            ("p20s1", vec![Some("2")]),
        ])
        .unwrap();
        let resolved = resolve_columns(&table, ["p20s1", "p20s2", "p20s3"]);
        assert_eq!(resolved.present_names(), vec!["p20s1", "p20s3"]);
        assert_eq!(resolved.absent_names(), vec!["p20s2"]);
        let names: Vec<_> = resolved.present().map(|c| c.name()).collect();
        assert_eq!(names, vec!["p20s1", "p20s3"]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let table = table_from_pairs(&[("p9", vec![Some("1")])]).unwrap();
        let resolved = resolve_columns(&table, ["p13"]);
        assert!(resolved.is_empty());
        assert!(resolved.get("p13").is_none());
    }

    #[test]
    fn test_matching_is_exact() {
        let table = table_from_pairs(&[("P13", vec![Some("1")])]).unwrap();
        assert!(resolve_columns(&table, ["p13"]).is_empty());
    }
}
