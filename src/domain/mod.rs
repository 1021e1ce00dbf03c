// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - shared: typed ids, errors and value objects used by every aggregate
// - pet: the Pet entity and its Position, owned by a Volunteer
// - volunteer: the aggregate root and its command handler
//
// Persistence and event delivery live outside this layer.
//
// ============================================================================

pub mod shared;
pub mod pet;
pub mod volunteer;
