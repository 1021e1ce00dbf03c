// ============================================================================
// Volunteer Repository - load / save of the whole aggregate
// ============================================================================
//
// One repository per aggregate root. The aggregate is always loaded with all
// of its pets, active and soft-deleted, and saved as one atomic unit.
// `save` enforces optimistic concurrency on the aggregate version.
//
// ============================================================================

mod in_memory;

use async_trait::async_trait;

use crate::domain::shared::VolunteerId;
use crate::domain::volunteer::Volunteer;
use crate::utils::IsTransient;

pub use in_memory::InMemoryVolunteerRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Volunteer not found: {0}")]
    NotFound(VolunteerId),

    #[error("Volunteer already exists: {0}")]
    AlreadyExists(VolunteerId),

    #[error("Concurrency conflict on {id}: expected version {expected}, but current is {actual}")]
    ConcurrencyConflict {
        id: VolunteerId,
        expected: i64,
        actual: i64,
    },
}

impl IsTransient for RepositoryError {
    fn is_transient(&self) -> bool {
        matches!(self, RepositoryError::ConcurrencyConflict { .. })
    }
}

#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Store a new aggregate
    async fn add(&self, volunteer: &Volunteer) -> Result<(), RepositoryError>;

    /// Load the full aggregate
    async fn find_by_id(&self, id: VolunteerId) -> Result<Option<Volunteer>, RepositoryError>;

    /// Persist the mutated aggregate if the stored version is still `expected_version`
    async fn save(&self, volunteer: &Volunteer, expected_version: i64) -> Result<(), RepositoryError>;

    async fn list_ids(&self) -> Result<Vec<VolunteerId>, RepositoryError>;
}
