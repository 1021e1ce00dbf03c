use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::shared::VolunteerId;
use crate::domain::volunteer::Volunteer;
use crate::events::core::AggregateRoot;
use super::{RepositoryError, VolunteerRepository};

/// In-memory storage for development and tests
#[derive(Debug, Default)]
pub struct InMemoryVolunteerRepository {
    volunteers: RwLock<HashMap<VolunteerId, Volunteer>>,
}

impl InMemoryVolunteerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VolunteerRepository for InMemoryVolunteerRepository {
    async fn add(&self, volunteer: &Volunteer) -> Result<(), RepositoryError> {
        let mut volunteers = self.volunteers.write().await;
        let id = volunteer.id();
        if volunteers.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists(id));
        }

        let mut stored = volunteer.clone();
        // pending events never reach storage
        stored.take_events();
        volunteers.insert(id, stored);

        tracing::debug!(volunteer_id = %id, "Volunteer added to repository");
        Ok(())
    }

    async fn find_by_id(&self, id: VolunteerId) -> Result<Option<Volunteer>, RepositoryError> {
        Ok(self.volunteers.read().await.get(&id).cloned())
    }

    async fn save(&self, volunteer: &Volunteer, expected_version: i64) -> Result<(), RepositoryError> {
        let mut volunteers = self.volunteers.write().await;
        let id = volunteer.id();

        let current = volunteers
            .get(&id)
            .map(|v| v.version())
            .ok_or(RepositoryError::NotFound(id))?;

        if current != expected_version {
            return Err(RepositoryError::ConcurrencyConflict {
                id,
                expected: expected_version,
                actual: current,
            });
        }

        let mut stored = volunteer.clone();
        stored.take_events();
        volunteers.insert(id, stored);

        tracing::debug!(
            volunteer_id = %id,
            new_version = volunteer.version(),
            "Volunteer saved"
        );
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<VolunteerId>, RepositoryError> {
        let mut ids: Vec<VolunteerId> = self.volunteers.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
