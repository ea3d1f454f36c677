//! ItemStore - the authoritative, ordered list of items.
//!
//! Every mutation goes through one of the methods here. Each one validates
//! its input completely before touching the list, so a call either applies
//! in full or fails with the list unchanged. Successful mutations publish a
//! [`LIST_CHANGED`](crate::event_bus::LIST_CHANGED) event; no-ops do not.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::event_bus::{ChangeEvent, ChangeKind, EventBus, EventReceiver};
use crate::item::Item;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Owns the item list and publishes change events.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    events: EventBus,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Read-only snapshot of the list, in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Append a new item built from `raw_text`.
    ///
    /// Surrounding whitespace is trimmed. Absent or blank text is ignored.
    /// Returns whether an item was added.
    pub fn add(&mut self, raw_text: Option<&str>) -> bool {
        let Some(text) = raw_text.map(str::trim).filter(|t| !t.is_empty()) else {
            return false;
        };

        self.items.push(Item::new(text));
        log::debug!("Added item {} ({:?})", self.items.len() - 1, text);
        self.notify(ChangeKind::Added);
        true
    }

    /// Shorthand for `add(Some(text))`.
    pub fn add_text(&mut self, text: &str) -> bool {
        self.add(Some(text))
    }

    /// Remove the items at `indices`.
    ///
    /// Indices are treated as a set: order does not matter and duplicates
    /// collapse. Every index is checked before anything is removed.
    /// Returns the removed items in their original order.
    pub fn delete_indices(&mut self, indices: &[usize]) -> Result<Vec<Item>, StoreError> {
        let targets = self.validate(indices)?;
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        // Highest first so earlier removals don't shift pending targets.
        let mut removed: Vec<Item> = targets
            .iter()
            .rev()
            .map(|&index| self.items.remove(index))
            .collect();
        removed.reverse();

        log::debug!("Deleted {} item(s) at {:?}", removed.len(), targets);
        self.notify(ChangeKind::Deleted);
        Ok(removed)
    }

    /// Flip the completion flag of the items at `indices`.
    ///
    /// Indices are treated as a set: each distinct index is flipped exactly
    /// once per call, so a repeated index does not cancel itself out.
    pub fn toggle(&mut self, indices: &[usize]) -> Result<(), StoreError> {
        let targets = self.validate(indices)?;
        if targets.is_empty() {
            return Ok(());
        }

        for &index in &targets {
            self.items[index].toggle();
        }

        log::debug!("Toggled item(s) at {:?}", targets);
        self.notify(ChangeKind::Toggled);
        Ok(())
    }

    /// Remove every completed item, keeping the survivors in order.
    ///
    /// Returns the number of items removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.done);
        let removed = before - self.items.len();

        if removed > 0 {
            log::debug!("Cleared {} completed item(s)", removed);
            self.notify(ChangeKind::Cleared);
        }
        removed
    }

    /// Replace the whole list, e.g. with the result of a load.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = items;
        self.notify(ChangeKind::Loaded);
    }

    fn validate(&self, indices: &[usize]) -> Result<BTreeSet<usize>, StoreError> {
        let len = self.items.len();
        indices
            .iter()
            .map(|&index| {
                if index < len {
                    Ok(index)
                } else {
                    Err(StoreError::IndexOutOfRange { index, len })
                }
            })
            .collect()
    }

    fn notify(&self, kind: ChangeKind) {
        self.events.emit_change(&ChangeEvent {
            kind,
            len: self.items.len(),
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================
