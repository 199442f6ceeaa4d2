//! Rendering of the final table as C initializer lines.

use std::io::{self, Write};

use crate::model::{IdentifierGroup, Table};

/// Stands in for an absent description.
pub const NO_VALUE: &str = "0";

/// Closes the table; same shape as the canonical terminator.
pub const TERMINATOR_LINE: &str = "{0,0,0}";

/// One `{<id>,"<names>",<desc>},` line, without the newline.
pub fn render_entry(id: i64, group: &IdentifierGroup) -> String {
    let name = format!("\"{}\"", group.joined_name());
    let description = match group.joined_description() {
        Some(desc) => format!("\"{desc}\""),
        None => NO_VALUE.to_string(),
    };
    format!("{{{id:5},{name},{description}}},")
}

/// Write every entry in ascending identifier order, then the terminator.
pub fn write_table<W: Write>(table: &Table, out: &mut W) -> io::Result<()> {
    for (id, group) in table.iter() {
        writeln!(out, "{}", render_entry(id, group))?;
    }
    writeln!(out, "{TERMINATOR_LINE}")
}

/// Same text as [`write_table`], built in memory.
pub fn render_table(table: &Table) -> String {
    let mut out = String::new();
    for (id, group) in table.iter() {
        out.push_str(&render_entry(id, group));
        out.push('\n');
    }
    out.push_str(TERMINATOR_LINE);
    out.push('\n');
    out
}
