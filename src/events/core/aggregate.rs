use uuid::Uuid;

use super::event::{DomainEvent, EventEnvelope};

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// Key Principles:
// 1. State lives in the aggregate and is persisted as a whole
// 2. Commands mutate the aggregate or are rejected without side effects
// 3. Every significant change is recorded as a pending domain event
// 4. Aggregates enforce their own invariants
// 5. `version` counts committed events and drives optimistic concurrency
//
// ============================================================================

/// Generic aggregate root trait
///
/// Type Parameters:
/// - `Event`: The domain event type recorded by this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait AggregateRoot: Sized + Send + Sync {
    type Event: DomainEvent;
    type Command;
    type Error;

    /// Get aggregate ID
    fn aggregate_id(&self) -> Uuid;

    /// Number of events committed so far
    fn version(&self) -> i64;

    fn set_version(&mut self, version: i64);

    /// Apply one command to the in-memory aggregate
    fn handle_command(&mut self, command: Self::Command) -> Result<(), Self::Error>;

    /// Drain the events recorded since the last call
    fn take_events(&mut self) -> Vec<Self::Event>;

    /// Drain pending events wrapped in envelopes numbered after `version()`
    fn take_envelopes(&mut self, correlation_id: Uuid) -> Vec<EventEnvelope<Self::Event>>
    where
        Self::Event: EventName,
    {
        let aggregate_id = self.aggregate_id();
        let base = self.version();

        self.take_events()
            .into_iter()
            .zip(1..)
            .map(|(event, offset)| {
                let event_type = event.event_name().to_string();
                EventEnvelope::new(aggregate_id, base + offset, event_type, event, correlation_id)
            })
            .collect()
    }
}

/// Per-variant name of an event union
pub trait EventName {
    fn event_name(&self) -> &'static str;
}
