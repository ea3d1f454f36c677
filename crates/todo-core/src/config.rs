//! Configuration for a task list instance.

use std::path::PathBuf;

/// File name used when no store path is given.
pub const DEFAULT_STORE_FILE: &str = "todos.txt";

/// Settings passed explicitly into the core at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Where the list is saved to and loaded from.
    pub store_path: PathBuf,
}

impl TodoConfig {
    pub fn with_store_path(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
        }
    }
}

impl Default for TodoConfig {
    /// `todos.txt`, relative to the working directory.
    fn default() -> Self {
        Self::with_store_path(DEFAULT_STORE_FILE)
    }
}
