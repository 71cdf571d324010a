use super::{OutputWriter, Report};
use anyhow::Result;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table_from_pairs;
    use crate::sections::{build_sections, Section, SectionParams};

    #[test]
    fn test_json_shape() {
        let table = table_from_pairs(&[("p9", vec![Some("1")])]).unwrap();
        let sections = build_sections(
            &[Section::Vulnerability, Section::StreetTime],
            &table,
            &SectionParams::default(),
        );
        let report = Report::new("chc.csv", &table, sections);

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        let vulnerability = &value["sections"][0];
        assert_eq!(vulnerability["section"], "vulnerability");
        assert_eq!(vulnerability["data"]["available"], false);
        let kinds: Vec<_> = vulnerability["notices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["kind"].as_str().unwrap().to_string())
            .collect();
        assert!(kinds.contains(&"score_unavailable".to_string()));

        let street_time = &value["sections"][1];
        assert_eq!(street_time["notices"][0]["kind"], "missing_column");
        assert_eq!(street_time["notices"][0]["column"], "p23s1r");
    }
}
