//! # todo-core
//!
//! State and persistence for a single-user task list.
//!
//! This crate is framework-agnostic: a front end (GUI, terminal, CLI) drives
//! it through [`TodoList`] and redraws when it receives a change event.
//!
//! ## Key Concepts
//!
//! - **Item**: one task, its text plus a completion flag
//! - **ItemStore**: the ordered list and its validated mutations
//! - **FilePersistence**: whole-file save/load in the `<flag>|<text>` format
//! - **EventBus**: change notifications for subscribers

pub mod config;
pub mod event_bus;
pub mod item;
pub mod persistence;
pub mod store;
pub mod todo_list;

// Re-export commonly used types
pub use config::TodoConfig;
pub use event_bus::{BroadcastEvent, ChangeEvent, ChangeKind, EventBus};
pub use item::Item;
pub use persistence::{FilePersistence, PersistenceError};
pub use store::{ItemStore, StoreError};
pub use todo_list::{TodoError, TodoList};
