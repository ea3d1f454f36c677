//! Whole-file save and load of the task list.
//!
//! # Atomic Write Strategy
//!
//! 1. Write the full list to `{file}.tmp` next to the destination
//! 2. Rename over `{file}`
//!
//! Readers see either the complete old file or the complete new one.
//! Missing parent directories are not created; saving into one fails.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::{decode_line, encode_all};
use crate::config::TodoConfig;
use crate::item::Item;

/// Error type for task file I/O.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    /// The file the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            PersistenceError::Write { path, .. } | PersistenceError::Read { path, .. } => path,
        }
    }
}

/// Saves and loads the list at one fixed path.
///
/// Holds no item state; each call works on what it is handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &TodoConfig) -> Self {
        Self::new(config.store_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Overwrite the file with `items`, one line each, in order.
    pub fn save(&self, items: &[Item]) -> Result<(), PersistenceError> {
        let temp_path = self.temp_path()?;
        let contents = encode_all(items);

        if let Err(source) = fs::write(&temp_path, contents) {
            return Err(self.write_error(source));
        }

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_error(source));
        }

        log::debug!("Wrote {} item(s) to {}", items.len(), self.path.display());
        Ok(())
    }

    /// Read the file into a fresh list.
    ///
    /// A missing file yields an empty list. Lines that cannot be decoded are
    /// skipped with a warning; only real read failures are errors.
    pub fn load(&self) -> Result<Vec<Item>, PersistenceError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.read_error(source)),
        };

        let reader = BufReader::new(file);
        let mut items = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| self.read_error(source))?;
            match decode_line(&line) {
                Ok(item) => items.push(item),
                Err(reason) => log::warn!(
                    "Skipping line {} of {}: {}",
                    number + 1,
                    self.path.display(),
                    reason
                ),
            }
        }

        log::debug!("Read {} item(s) from {}", items.len(), self.path.display());
        Ok(items)
    }

    fn temp_path(&self) -> Result<PathBuf, PersistenceError> {
        let Some(name) = self.path.file_name() else {
            return Err(self.write_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path has no file name",
            )));
        };

        let mut temp_name = name.to_os_string();
        temp_name.push(".tmp");
        Ok(self.path.with_file_name(temp_name))
    }

    fn write_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn read_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Item> {
        vec![
            Item::with_done("Task A", true),
            Item::new("Task B | with pipe"),
            Item::new("Task C"),
        ]
    }

    // ------------------------------------------------------------------------
    // Save
    // ------------------------------------------------------------------------

    #[test]
    fn save_writes_one_line_per_item() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::new(dir.path().join("todos.txt"));

        store.save(&sample()).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "1|Task A\n0|Task B | with pipe\n0|Task C\n");
        assert!(!dir.path().join("todos.txt.tmp").exists());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::new(dir.path().join("todos.txt"));

        store.save(&sample()).unwrap();
        store.save(&[Item::new("only")]).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "0|only\n");
    }

    #[test]
    fn save_empty_list_writes_empty_file() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::new(dir.path().join("todos.txt"));

        store.save(&[]).unwrap();

        assert!(store.exists());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("todos.txt");
        let store = FilePersistence::new(&path);

        let err = store.save(&sample()).unwrap_err();

        assert!(matches!(err, PersistenceError::Write { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("todos.txt"));
        assert!(!path.exists());
    }

    #[test]
    fn save_without_file_name_fails() {
        let store = FilePersistence::new("");
        assert!(store.save(&sample()).is_err());
    }

    // ------------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------------

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::new(dir.path().join("nope.txt"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_empty_file_returns_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.txt");
        fs::write(&path, "").unwrap();

        assert!(FilePersistence::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn load_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.txt");
        fs::write(&path, "1|Task A\ngarbage-no-delimiter\n0|Task B\n").unwrap();

        let items = FilePersistence::new(path).load().unwrap();

        assert_eq!(
            items,
            vec![Item::with_done("Task A", true), Item::new("Task B")]
        );
    }

    #[test]
    fn load_accepts_crlf_and_missing_final_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.txt");
        fs::write(&path, "0|one\r\n\r\n1|two").unwrap();

        let items = FilePersistence::new(path).load().unwrap();

        assert_eq!(items, vec![Item::new("one"), Item::with_done("two", true)]);
    }

    #[test]
    fn load_fails_on_unreadable_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.txt");
        fs::write(&path, [b'0', b'|', 0xff, 0xfe, b'\n']).unwrap();

        let err = FilePersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Read { .. }));
    }

    #[test]
    fn load_directory_fails() {
        let dir = tempdir().unwrap();
        assert!(FilePersistence::new(dir.path()).load().is_err());
    }

    // ------------------------------------------------------------------------
    // Round trip
    // ------------------------------------------------------------------------

    #[test]
    fn save_then_load_preserves_items() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::new(dir.path().join("todos.txt"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn newlines_come_back_as_spaces() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::new(dir.path().join("todos.txt"));

        store.save(&[Item::new("two\nlines")]).unwrap();

        assert_eq!(store.load().unwrap(), vec![Item::new("two lines")]);
    }

    #[test]
    fn from_config_uses_store_path() {
        let config = TodoConfig::with_store_path("/tmp/elsewhere.txt");
        let store = FilePersistence::from_config(&config);
        assert_eq!(store.path(), Path::new("/tmp/elsewhere.txt"));
    }
}
