//! Layout event system
//!
//! Provides:
//! - Event types for document and editor state changes
//! - Event dispatcher for publishing events to subscribers

use serde::Serialize;
use tokio::sync::broadcast;

/// Layout event types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LayoutEvent {
    /// An entity was placed in the layout
    EntityAdded { id: u64 },
    /// An entity's geometry or fields were committed
    EntityUpdated { id: u64 },
    /// An entity was removed from the layout
    EntityRemoved { id: u64 },
    /// The selection changed
    SelectionChanged { id: Option<u64> },
    /// The interaction mode changed
    ModeChanged { mode: String },
    /// An operation was refused with a user-facing message
    ValidationFailed { message: String },
}

impl std::fmt::Display for LayoutEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutEvent::EntityAdded { id } => write!(f, "Entity {} added", id),
            LayoutEvent::EntityUpdated { id } => write!(f, "Entity {} updated", id),
            LayoutEvent::EntityRemoved { id } => write!(f, "Entity {} removed", id),
            LayoutEvent::SelectionChanged { id: Some(id) } => write!(f, "Selected {}", id),
            LayoutEvent::SelectionChanged { id: None } => write!(f, "Selection cleared"),
            LayoutEvent::ModeChanged { mode } => write!(f, "Mode: {}", mode),
            LayoutEvent::ValidationFailed { message } => write!(f, "Refused: {}", message),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: broadcast::Sender<LayoutEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size.max(1));
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<LayoutEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers that received it; publishing
    /// with nobody listening is not an error for the editor.
    pub fn publish(&self, event: LayoutEvent) -> usize {
        tracing::trace!("layout event: {}", event);
        self.tx.send(event).unwrap_or(0)
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(256)
    }
}
