//! Line codec for the task file.
//!
//! # Format
//!
//! One item per line, `<flag>|<text>`:
//!
//! ```text
//! 1|Task A
//! 0|Task B | with a pipe
//! ```
//!
//! The flag is `1` for done and `0` for open. Everything after the first
//! `|` is the text, verbatim. Newlines inside the text are written as
//! spaces so one item always occupies exactly one line.

use thiserror::Error;

use crate::item::Item;

pub const DELIMITER: char = '|';

const DONE_FLAG: &str = "1";
const OPEN_FLAG: &str = "0";

/// Why a stored line could not be turned into an item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing '|' delimiter")]
    MissingDelimiter,

    #[error("empty item text")]
    EmptyText,
}

/// Encode an item as a single line, without the trailing newline.
pub fn encode_line(item: &Item) -> String {
    let flag = if item.done { DONE_FLAG } else { OPEN_FLAG };
    let text = item.text.replace(['\r', '\n'], " ");
    format!("{flag}{DELIMITER}{text}")
}

/// Decode one line (without its line terminator) into an item.
///
/// Only a literal `1` flag means done; any other flag reads as open.
pub fn decode_line(line: &str) -> Result<Item, RecordError> {
    let (flag, text) = line
        .split_once(DELIMITER)
        .ok_or(RecordError::MissingDelimiter)?;

    if text.is_empty() {
        return Err(RecordError::EmptyText);
    }

    Ok(Item::with_done(text, flag == DONE_FLAG))
}

/// Encode a whole list, one newline-terminated line per item.
pub fn encode_all(items: &[Item]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&encode_line(item));
        out.push('\n');
    }
    out
}
