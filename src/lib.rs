// ============================================================================
// Volunteer Registry - ordered pet collections inside the Volunteer aggregate
// ============================================================================
//
// Layers:
// - domain: Volunteer aggregate, Pet entity, value objects, command handler
// - events: aggregate/event plumbing and the outbox sink
// - repository: aggregate persistence with optimistic concurrency
// - sweeper: background purge of expired soft-deleted pets
// - config, telemetry, metrics, utils: ambient services
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod repository;
pub mod sweeper;
pub mod telemetry;
pub mod utils;
