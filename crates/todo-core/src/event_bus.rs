//! Change notification for the task list.
//!
//! The store publishes a [`BroadcastEvent`] after every mutation that changed
//! the list. Front ends subscribe and redraw; the store never knows who is
//! listening.
//!
//! # Example
//!
//! ```rust
//! use todo_core::event_bus::{ChangeEvent, ChangeKind, EventBus, LIST_CHANGED};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.emit_change(&ChangeEvent { kind: ChangeKind::Added, len: 1 });
//!
//! let event = rx.try_recv().unwrap();
//! assert_eq!(event.event_type, LIST_CHANGED);
//! assert_eq!(event.payload["kind"], "added");
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default channel capacity for the event bus.
/// Subscribers that fall further behind than this miss events (lag).
const DEFAULT_CAPACITY: usize = 256;

pub use broadcast::error::TryRecvError;

/// Receiving end handed out by [`EventBus::subscribe`].
pub type EventReceiver = broadcast::Receiver<BroadcastEvent>;

/// Event type emitted whenever the item list changes.
pub const LIST_CHANGED: &str = "list:changed";

/// What kind of mutation produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Deleted,
    Toggled,
    Cleared,
    Loaded,
}

/// Payload of a [`LIST_CHANGED`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Number of items after the change.
    pub len: usize,
}

/// A broadcast event containing an event type and JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastEvent {
    /// Event type identifier (e.g., "list:changed").
    pub event_type: String,

    /// JSON payload for the event.
    pub payload: serde_json::Value,
}

impl BroadcastEvent {
    /// Create a new broadcast event.
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }

    /// Decode the payload as a [`ChangeEvent`], if this is a list change.
    pub fn as_change(&self) -> Option<ChangeEvent> {
        if self.event_type != LIST_CHANGED {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}

/// Publish-subscribe bus backed by a tokio broadcast channel.
///
/// Sending and `try_recv` are synchronous, so the bus works without a
/// running runtime.
pub struct EventBus {
    sender: broadcast::Sender<BroadcastEvent>,
}

impl EventBus {
    /// Create a new EventBus with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new EventBus with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event.
    /// With no subscribers the event is dropped and 0 is returned.
    pub fn emit<T: Serialize>(&self, event_type: &str, payload: &T) -> usize {
        let json_payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Failed to serialize event payload: {}", e);
                return 0;
            }
        };

        self.sender
            .send(BroadcastEvent::new(event_type, json_payload))
            .unwrap_or(0)
    }

    /// Emit a [`LIST_CHANGED`] event.
    pub fn emit_change(&self, change: &ChangeEvent) -> usize {
        self.emit(LIST_CHANGED, change)
    }

    /// Subscribe to all future events on this bus.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Get the current number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
