// ============================================================================
// Event Infrastructure
// ============================================================================
//
// Generic, reusable aggregate/event plumbing.
// Domain-specific code is in src/domain/
//
// ============================================================================

pub mod core;
pub mod outbox;

pub use self::core::*;
pub use outbox::{EventSink, InMemoryOutbox, OutboxError, OutboxMessage};
