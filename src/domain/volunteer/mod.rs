// ============================================================================
// Volunteer Domain - aggregate root owning the ordered pet collection
// ============================================================================
//
// - Value objects (FullName, Email, WorkExperience, ...)
// - Events (PetAdded, PetMoved, PetSoftDeleted, ...)
// - Commands (AddPet, MovePet, RestorePet, ...)
// - Aggregate (Volunteer with the position bookkeeping)
// - Command Handler (VolunteerCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod aggregate;
pub mod command_handler;

pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use aggregate::*;
pub use command_handler::*;
