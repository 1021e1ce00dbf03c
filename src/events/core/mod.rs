// ============================================================================
// Event Core - Generic Aggregate and Event Abstractions
// ============================================================================
//
// No domain-specific code here (no Volunteer, Pet, ...); everything is
// generic over the aggregate and event types.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::{AggregateRoot, EventName};
pub use event::{deserialize_event, serialize_event, DomainEvent, EventEnvelope};
