use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Domain Validation Errors
// ============================================================================
//
// Expected domain conditions are returned as values, never panics.
// Every variant carries a stable code so callers can map it to a response
// or aggregate several failures in an `ErrorList`.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    #[error("record not found{}", .id.map(|id| format!(" for id {id}")).unwrap_or_default())]
    NotFound { id: Option<Uuid> },

    #[error("{0} is invalid")]
    ValueIsInvalid(String),

    #[error("{0} is required")]
    ValueIsRequired(String),

    #[error("pet position is out of range")]
    PetPositionOutOfRange,
}

impl DomainError {
    pub fn not_found(id: impl Into<Uuid>) -> Self {
        Self::NotFound { id: Some(id.into()) }
    }

    pub fn invalid(name: impl Into<String>) -> Self {
        Self::ValueIsInvalid(name.into())
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self::ValueIsRequired(name.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "record.not.found",
            DomainError::ValueIsInvalid(_) => "value.is.invalid",
            DomainError::ValueIsRequired(_) => "value.is.required",
            DomainError::PetPositionOutOfRange => "pet.position.out.of.range",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Several validation failures collected from one composite input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorList(Vec<DomainError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: DomainError) {
        self.0.push(error);
    }

    /// Keep the value on success, remember the error on failure
    pub fn collect<T>(&mut self, result: DomainResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[DomainError] {
        &self.0
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.0.iter().map(DomainError::code).collect()
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), ErrorList> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<DomainError> for ErrorList {
    fn from(error: DomainError) -> Self {
        Self(vec![error])
    }
}

impl std::fmt::Display for ErrorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.code(), e))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ErrorList {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::NotFound { id: None }.code(), "record.not.found");
        assert_eq!(DomainError::invalid("value").code(), "value.is.invalid");
        assert_eq!(DomainError::required("id").code(), "value.is.required");
        assert_eq!(DomainError::PetPositionOutOfRange.code(), "pet.position.out.of.range");
    }

    #[test]
    fn test_not_found_message_includes_id() {
        let id = Uuid::new_v4();
        let message = DomainError::not_found(id).to_string();
        assert!(message.contains(&id.to_string()));
        assert_eq!(DomainError::NotFound { id: None }.to_string(), "record not found");
    }

    #[test]
    fn test_error_list_collects_failures() {
        let mut errors = ErrorList::new();
        let kept = errors.collect::<u32>(Ok(7));
        let dropped = errors.collect::<u32>(Err(DomainError::required("email")));
        errors.push(DomainError::invalid("phone"));

        assert_eq!(kept, Some(7));
        assert_eq!(dropped, None);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.codes(), vec!["value.is.required", "value.is.invalid"]);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_error_list_is_ok() {
        assert!(ErrorList::new().into_result().is_ok());
    }
}
