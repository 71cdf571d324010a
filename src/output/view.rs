//! Format-neutral layout of a section: key facts, tables and prose.
//!
//! Terminal and markdown writers both render from this layout so the two
//! formats always show the same numbers.

use crate::sections::{
    CodeCount, CodeFilter, Histogram, NumericSummary, Prevalences, SectionData, SectionReport,
    Share,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    fn new(caption: Option<String>, headers: &[&str]) -> Self {
        Self {
            caption,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Facts(Vec<(String, String)>),
    Table(TableView),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub blocks: Vec<Block>,
}

pub fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn pct2(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn fact(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

pub fn section_view(report: &SectionReport) -> SectionView {
    let blocks = match &report.data {
        SectionData::Overview(data) => {
            let mut blocks = vec![Block::Facts(vec![
                fact("Respondents", data.rows),
                fact("Columns", data.columns),
            ])];
            if !data.head.is_empty() {
                let headers: Vec<&str> = data.column_names.iter().map(String::as_str).collect();
                let mut table = TableView::new(Some("First rows".to_string()), &headers);
                for row in &data.head {
                    table.row(row.iter().map(|c| c.clone().unwrap_or_default()).collect());
                }
                blocks.push(Block::Table(table));
            }
            blocks
        }
        SectionData::MissingData(data) => {
            let mut table = TableView::new(None, &["Column", "Missing", "Missing %"]);
            for column in data.columns.iter().filter(|c| c.missing > 0) {
                table.row(vec![
                    column.column.clone(),
                    column.missing.to_string(),
                    pct(column.percent),
                ]);
            }
            let mut blocks = Vec::new();
            if table.rows.is_empty() {
                blocks.push(Block::Text("No column has missing answers.".into()));
            } else {
                blocks.push(Block::Table(table));
            }
            blocks.extend(data.policy.iter().map(|p| Block::Text(p.to_string())));
            blocks
        }
        SectionData::Geography(data) => {
            let mut table = TableView::new(None, &["Code", "Department", "Respondents"]);
            for d in &data.departments {
                table.row(vec![d.code.clone(), d.name.clone(), d.count.to_string()]);
            }
            non_empty(table)
        }
        SectionData::Demographics(data) => {
            let mut blocks = non_empty(counts_table("Sex", "Sex", &data.sex));
            if let Some(age) = &data.age {
                blocks.push(summary_facts(&age.summary, "years"));
                blocks.push(histogram_table("Age", &age.histogram));
            }
            blocks
        }
        SectionData::LivingConditions(data) => {
            let mut blocks = non_empty(counts_table(
                "Municipality where they usually sleep",
                "Place",
                &data.municipality,
            ));
            blocks.extend(non_empty(counts_table(
                "Type of place where they usually sleep",
                "Place",
                &data.sleep_location,
            )));
            blocks
        }
        SectionData::Health(data) => {
            let hearing = counts_table("Can hear voices or sounds", "Capability", &data.hearing);
            let speaking = counts_table("Can speak or talk", "Capability", &data.speaking);
            let mut blocks = non_empty(hearing);
            blocks.extend(non_empty(speaking));
            let mut table = TableView::new(
                Some("Diagnosed conditions".to_string()),
                &["Condition", "Yes", "No", "Yes %", "No %"],
            );
            for d in &data.diagnoses {
                table.row(vec![
                    d.condition.to_string(),
                    d.yes.to_string(),
                    d.no.to_string(),
                    pct2(d.yes_percent),
                    pct2(d.no_percent),
                ]);
            }
            blocks.extend(non_empty(table));
            blocks
        }
        SectionData::StreetReasons(data) => {
            let caption = match &data.filter {
                CodeFilter::Known => "All known reasons".to_string(),
                CodeFilter::All => "All reported codes".to_string(),
                CodeFilter::Only(codes) => format!(
                    "Selected reasons: {}",
                    codes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
                ),
            };
            let mut table = TableView::new(Some(caption), &["Code", "Reason", "Respondents"]);
            for r in &data.reasons {
                table.row(vec![r.code.to_string(), r.label.clone(), r.count.to_string()]);
            }
            non_empty(table)
        }
        SectionData::StreetTime(data) => {
            let mut blocks = Vec::new();
            if let Some(summary) = &data.summary {
                blocks.push(summary_facts(summary, "years"));
            }
            if let Some(histogram) = &data.histogram {
                blocks.push(histogram_table("Years on the street", histogram));
            }
            if let Some(bounds) = &data.bounds {
                blocks.push(Block::Text(format!(
                    "Filter with --years {}..{} or any narrower range.",
                    bounds.min, bounds.max
                )));
            }
            if let Some(filtered) = &data.filtered {
                if let Some(histogram) = &filtered.histogram {
                    blocks.push(histogram_table(
                        &format!("Years on the street ({})", filtered.range),
                        histogram,
                    ));
                }
            }
            blocks
        }
        SectionData::HelpSources(data) => {
            let mut blocks = non_empty(shares_table("All known sources", &data.sources));
            if let Some(filtered) = &data.filtered {
                blocks.extend(non_empty(shares_table("Selected sources", filtered)));
            }
            blocks
        }
        SectionData::Substances(data) | SectionData::Security(data) => prevalence_blocks(data),
        SectionData::Vulnerability(data) => {
            let mut blocks = Vec::new();
            let mut indicators = TableView::new(
                Some("Indicators".to_string()),
                &["Indicator", "Columns used", "Flagged", "Flagged %"],
            );
            for i in &data.indicators {
                let (flagged, share) = match (i.flagged, i.percent) {
                    (Some(count), Some(share)) => (count.to_string(), pct(share)),
                    _ => ("unavailable".to_string(), "-".to_string()),
                };
                let columns = if i.resolved_columns.is_empty() {
                    "none".to_string()
                } else {
                    i.resolved_columns.join(", ")
                };
                indicators.row(vec![i.title.to_string(), columns, flagged, share]);
            }
            blocks.push(Block::Table(indicators));

            if data.available {
                let mut distribution = TableView::new(
                    Some("Score distribution".to_string()),
                    &["Score", "Respondents"],
                );
                for (score, count) in data.distribution.iter() {
                    distribution.row(vec![score.to_string(), count.to_string()]);
                }
                blocks.push(Block::Table(distribution));
                if let Some(mean) = data.mean_score {
                    blocks.push(Block::Facts(vec![fact("Mean score", format!("{:.2}", mean))]));
                }
            }

            if let Some(rows) = &data.rows {
                let mut table = TableView::new(
                    Some("Per respondent".to_string()),
                    &["Row", "Health", "Disability", "Substances", "Security", "Street", "Score"],
                );
                for r in rows {
                    let mut cells = vec![r.row.to_string()];
                    let flags = r.indicators.iter().map(|f| if *f { "1" } else { "0" });
                    cells.extend(flags.map(str::to_string));
                    cells.push(r.score.to_string());
                    table.row(cells);
                }
                blocks.push(Block::Table(table));
            }
            blocks
        }
    };

    SectionView {
        title: report.title.to_string(),
        blocks,
    }
}

fn non_empty(table: TableView) -> Vec<Block> {
    if table.rows.is_empty() {
        Vec::new()
    } else {
        vec![Block::Table(table)]
    }
}

fn counts_table(caption: &str, label: &str, counts: &[CodeCount]) -> TableView {
    let mut table = TableView::new(Some(caption.to_string()), &["Code", label, "Respondents"]);
    for c in counts {
        table.row(vec![c.code.to_string(), c.label.clone(), c.count.to_string()]);
    }
    table
}

fn shares_table(caption: &str, shares: &[Share]) -> TableView {
    let mut table = TableView::new(
        Some(caption.to_string()),
        &["Code", "Source", "Respondents", "Share"],
    );
    for s in shares {
        table.row(vec![s.code.to_string(), s.label.clone(), s.count.to_string(), pct(s.percent)]);
    }
    table
}

fn prevalence_blocks(data: &Prevalences) -> Vec<Block> {
    let mut table = TableView::new(
        Some(data.question.to_string()),
        &["Column", "Item", "Yes", "Percent"],
    );
    for row in &data.rows {
        let yes = if row.present { row.yes.to_string() } else { "-".to_string() };
        table.row(vec![row.column.to_string(), row.label.to_string(), yes, pct(row.percent)]);
    }
    non_empty(table)
}

fn summary_facts(summary: &NumericSummary, unit: &str) -> Block {
    Block::Facts(vec![
        fact("Valid answers", summary.count),
        fact("Mean", format!("{:.1} {}", summary.mean, unit)),
        fact("Median", format!("{:.1} {}", summary.median, unit)),
        fact("Mode", format!("{} {}", number(summary.mode), unit)),
        fact("Min", format!("{} {}", number(summary.min), unit)),
        fact("Max", format!("{} {}", number(summary.max), unit)),
    ])
}

fn histogram_table(caption: &str, histogram: &Histogram) -> Block {
    let mut table = TableView::new(Some(caption.to_string()), &["Range", "Respondents"]);
    let last = histogram.len().saturating_sub(1);
    for (i, bin) in histogram.bins.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        table.row(vec![
            format!("[{}, {}{}", number(bin.start), number(bin.end), close),
            bin.count.to_string(),
        ]);
    }
    Block::Table(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;
    use crate::sections::{build_section, Section, SectionParams};

    #[test]
    fn test_vulnerability_view_marks_unavailable_indicators() {
        let table = table_from_pairs(&[("p13", vec![Some("1"), Some("2")])]).unwrap();
        let report = build_section(Section::Vulnerability, &table, &SectionParams::default());
        let view = section_view(&report);

        let Block::Table(indicators) = &view.blocks[0] else {
            panic!("expected indicator table");
        };
        let street = indicators.rows.last().unwrap();
        assert_eq!(street[1], "p13");
        assert_eq!(street[2], "1");
        assert_eq!(street[3], "50.0%");
        assert_eq!(indicators.rows[0][1], "none");
    }

    #[test]
    fn test_histogram_labels_close_last_bin() {
        let histogram = Histogram::equal_width(&[0.0, 10.0], 2).unwrap();
        let Block::Table(table) = histogram_table("x", &histogram) else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0][0], "[0, 5)");
        assert_eq!(table.rows[1][0], "[5, 10]");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(3.0), "3");
        assert_eq!(number(2.4), "2.4");
        assert_eq!(pct(12.34), "12.3%");
    }
}
