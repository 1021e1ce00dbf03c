// ============================================================================
// Shared Kernel - identifiers, errors and limits used by every aggregate
// ============================================================================

pub mod constraints;
pub mod errors;
pub mod ids;
pub mod value_objects;

pub use errors::*;
pub use ids::*;
pub use value_objects::*;

/// Trims `value` and checks it against the required / max-length rules
pub(crate) fn validated_text(value: &str, name: &str, max_len: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::required(name));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::invalid(name));
    }
    Ok(trimmed.to_string())
}
