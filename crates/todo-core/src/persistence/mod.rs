//! Persistence layer for the task list.
//!
//! # Overview
//!
//! - **format** - the `<flag>|<text>` line codec
//! - **file** - whole-file save and load at a configured path
//!
//! # Usage
//!
//! ```ignore
//! use todo_core::persistence::FilePersistence;
//!
//! let file = FilePersistence::new("todos.txt");
//! let items = file.load()?;       // empty if the file doesn't exist
//! file.save(&items)?;
//! ```

pub mod file;
pub mod format;

pub use file::{FilePersistence, PersistenceError};
pub use format::{decode_line, encode_all, encode_line, RecordError};
