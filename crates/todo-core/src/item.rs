//! A single task record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One task: its text and whether it has been completed.
///
/// Items created through [`ItemStore::add`](crate::store::ItemStore::add) are
/// always trimmed and non-empty. Items reconstructed from disk keep the stored
/// text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    pub done: bool,
}

impl Item {
    /// Create a new, not-yet-completed item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    /// Create an item with an explicit completion flag.
    pub fn with_done(text: impl Into<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            done,
        }
    }

    /// Flip the completion flag in place.
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }
}

/// Renders as a checkbox followed by the text, e.g. `[✓] buy milk`.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { "[✓]" } else { "[ ]" };
        write!(f, "{mark} {}", self.text)
    }
}
