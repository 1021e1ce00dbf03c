// ============================================================================
// Pet Domain - child entity owned by a Volunteer
// ============================================================================
//
// - Position value object (1-based slot in the owner's ordering)
// - Pet value objects (Name, PetDetails, Address, ...)
// - Pet entity with its position/delete/restore primitives
//
// ============================================================================

pub mod entity;
pub mod position;
pub mod value_objects;

pub use entity::*;
pub use position::*;
pub use value_objects::*;
