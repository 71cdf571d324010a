use super::view::{section_view, Block, TableView};
use super::{OutputWriter, Report};
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::notice::{Notice, Severity};
use anyhow::Result;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::Table;
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    unicode: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        let unicode = formatting.color.should_use_color();
        Self {
            writer,
            formatter: formatter_for(formatting),
            unicode,
        }
    }

    fn write_header(&mut self, report: &Report) -> Result<()> {
        let divider = "=".repeat(60);
        writeln!(self.writer, "{}", self.formatter.header(&divider))?;
        writeln!(self.writer, "{}", self.formatter.header("CENSUS REPORT"))?;
        writeln!(self.writer, "{}", self.formatter.header(&divider))?;
        writeln!(
            self.writer,
            "{} {}",
            self.formatter.dim("Source:"),
            report.source.display()
        )?;
        writeln!(
            self.writer,
            "{} {} respondents, {} columns",
            self.formatter.dim("Size:"),
            report.respondents,
            report.columns
        )?;
        writeln!(
            self.writer,
            "{} {}",
            self.formatter.dim("Generated:"),
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn write_table(&mut self, view: &TableView) -> Result<()> {
        if let Some(caption) = &view.caption {
            writeln!(self.writer, "{}", self.formatter.bold(caption))?;
        }
        let mut table = Table::new();
        table
            .load_preset(if self.unicode { UTF8_FULL } else { ASCII_FULL })
            .set_header(view.headers.clone());
        for row in &view.rows {
            table.add_row(row.clone());
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_notice(&mut self, notice: &Notice) -> Result<()> {
        let line = match notice.severity() {
            Severity::Warning => self.formatter.warning(&format!("warning: {notice}")),
            Severity::Info => self.formatter.info(&format!("note: {notice}")),
        };
        writeln!(self.writer, "  {line}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        self.write_header(report)?;

        for section in &report.sections {
            let view = section_view(section);
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", self.formatter.header(&view.title.to_uppercase()))?;
            writeln!(self.writer, "{}", "-".repeat(view.title.chars().count()))?;

            for notice in &section.notices {
                self.write_notice(notice)?;
            }

            for block in &view.blocks {
                match block {
                    Block::Facts(facts) => {
                        let width = facts.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
                        for (key, value) in facts {
                            writeln!(
                                self.writer,
                                "  {:<width$}  {}",
                                format!("{key}:"),
                                value,
                                width = width + 1
                            )?;
                        }
                    }
                    Block::Table(table) => self.write_table(table)?,
                    Block::Text(text) => writeln!(self.writer, "{}", self.formatter.dim(text))?,
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
