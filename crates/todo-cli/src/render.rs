//! Plain-text and JSON rendering of the list.

use std::io::{self, Write};

use todo_core::Item;

/// Write one `<index>: [ ] text` line per item.
pub fn write_items<W: Write>(out: &mut W, items: &[Item]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "(no items)");
    }
    for (index, item) in items.iter().enumerate() {
        writeln!(out, "{index}: {item}")?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, items: &[Item]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(items)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(out, "{json}")
}
