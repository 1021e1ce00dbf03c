// ============================================================================
// Outbox - where recorded domain events wait for asynchronous dispatch
// ============================================================================
//
// The core only appends. Publishing the pending entries belongs to a relay
// outside this crate.
//
// ============================================================================

mod in_memory;

use async_trait::async_trait;

use super::core::{DomainEvent, EventEnvelope};

pub use in_memory::{InMemoryOutbox, OutboxMessage};

#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("Failed to serialize event {event_type}: {source}")]
    Serialization {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Sink for events produced by aggregate operations
#[async_trait]
pub trait EventSink<E: DomainEvent>: Send + Sync {
    async fn append(&self, events: Vec<EventEnvelope<E>>) -> Result<(), OutboxError>;
}
