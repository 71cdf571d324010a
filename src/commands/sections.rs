use anyhow::Result;
use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::Table;
use std::io::Write;

use crate::sections::Section;

/// Table of every section name, title and the questions it reads.
pub fn sections_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_header(vec!["Name", "Title", "Questions"]);
    for section in Section::ALL {
        table.add_row(vec![section.name(), section.title(), section.questions()]);
    }
    table
}

pub fn list_sections<W: Write>(mut writer: W) -> Result<()> {
    writeln!(writer, "{}", sections_table())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_section() {
        let mut buffer = Vec::new();
        list_sections(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        for section in Section::ALL {
            assert!(output.contains(section.name()), "{} missing", section);
        }
    }
}
