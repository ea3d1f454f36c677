//! TodoList - the controller-facing pairing of a store and its file.
//!
//! Front ends hold one `TodoList`, call the mutators in response to user
//! actions, and call [`save`](TodoList::save) / [`load`](TodoList::load) when
//! asked to. Load replaces the in-memory list only after the whole file has
//! been read; a failed load leaves it as it was.

use std::path::Path;

use thiserror::Error;

use crate::config::TodoConfig;
use crate::event_bus::EventReceiver;
use crate::item::Item;
use crate::persistence::{FilePersistence, PersistenceError};
use crate::store::{ItemStore, StoreError};

#[derive(Error, Debug)]
pub enum TodoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug)]
pub struct TodoList {
    store: ItemStore,
    file: FilePersistence,
}

impl TodoList {
    pub fn new(config: &TodoConfig) -> Self {
        Self {
            store: ItemStore::new(),
            file: FilePersistence::from_config(config),
        }
    }

    /// Build a list and immediately load it from the configured file.
    pub fn open(config: &TodoConfig) -> Result<Self, TodoError> {
        let mut list = Self::new(config);
        list.load()?;
        Ok(list)
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.store.get(index)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.store.subscribe()
    }

    pub fn add(&mut self, raw_text: Option<&str>) -> bool {
        self.store.add(raw_text)
    }

    pub fn delete_indices(&mut self, indices: &[usize]) -> Result<Vec<Item>, TodoError> {
        Ok(self.store.delete_indices(indices)?)
    }

    pub fn toggle(&mut self, indices: &[usize]) -> Result<(), TodoError> {
        Ok(self.store.toggle(indices)?)
    }

    pub fn clear_completed(&mut self) -> usize {
        self.store.clear_completed()
    }

    /// Write the current list to the configured file.
    pub fn save(&self) -> Result<(), TodoError> {
        self.file.save(self.store.items())?;
        log::info!(
            "Saved {} item(s) to {}",
            self.store.len(),
            self.file.path().display()
        );
        Ok(())
    }

    /// Replace the current list with the file's contents.
    pub fn load(&mut self) -> Result<(), TodoError> {
        let items = self.file.load()?;
        log::info!(
            "Loaded {} item(s) from {}",
            items.len(),
            self.file.path().display()
        );
        self.store.replace_all(items);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
