use super::view::{section_view, Block, TableView};
use super::{OutputWriter, Report};
use crate::notice::Severity;
use anyhow::Result;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_table(&mut self, table: &TableView) -> Result<()> {
        if let Some(caption) = &table.caption {
            writeln!(self.writer, "**{}**", caption)?;
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "| {} |", escape_row(&table.headers).join(" | "))?;
        writeln!(
            self.writer,
            "|{}|",
            table.headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        )?;
        for row in &table.rows {
            writeln!(self.writer, "| {} |", escape_row(row).join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn escape_row(cells: &[String]) -> Vec<String> {
    cells.iter().map(|c| c.replace('|', "\\|")).collect()
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        writeln!(self.writer, "# Census report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Source: `{}`", report.source.display())?;
        writeln!(
            self.writer,
            "Respondents: {} | Columns: {}",
            report.respondents, report.columns
        )?;

        for section in &report.sections {
            let view = section_view(section);
            writeln!(self.writer)?;
            writeln!(self.writer, "## {}", view.title)?;
            writeln!(self.writer)?;

            for notice in &section.notices {
                let label = match notice.severity() {
                    Severity::Warning => "Warning",
                    Severity::Info => "Note",
                };
                writeln!(self.writer, "> **{}:** {}", label, notice)?;
                writeln!(self.writer)?;
            }

            for block in &view.blocks {
                match block {
                    Block::Facts(facts) => {
                        for (key, value) in facts {
                            writeln!(self.writer, "- **{}:** {}", key, value)?;
                        }
                        writeln!(self.writer)?;
                    }
                    Block::Table(table) => self.write_table(table)?,
                    Block::Text(text) => {
                        writeln!(self.writer, "{}", text)?;
                        writeln!(self.writer)?;
                    }
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;
    use crate::sections::{build_sections, Section, SectionParams};

    #[test]
    fn test_markdown_sections_and_tables() {
        let table = table_from_pairs(&[
            ("p13", vec![Some("1"), Some("2")]),
            ("p9", vec![Some("1"), Some("1")]),
        ])
        .unwrap();
        let sections = build_sections(
            &[Section::Demographics, Section::Vulnerability],
            &table,
            &SectionParams::default(),
        );
        let report = Report::new("chc.csv", &table, sections);

        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer).write_report(&report).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("# Census report"));
        assert!(output.contains("Source: `chc.csv`"));
        assert!(output.contains("| Code | Sex | Respondents |"));
        assert!(output.contains("| 1 | Hombre | 2 |"));
        assert!(output.contains("> **Warning:**"));
    }

    #[test]
    fn test_pipes_are_escaped() {
        assert_eq!(escape_row(&["a|b".to_string()]), vec!["a\\|b".to_string()]);
    }
}
