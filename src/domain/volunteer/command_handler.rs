use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::domain::shared::{DomainError, DomainResult, VolunteerId};
use crate::events::core::AggregateRoot;
use crate::events::outbox::{EventSink, OutboxError};
use crate::metrics::Metrics;
use crate::repository::{RepositoryError, VolunteerRepository};
use crate::utils::{retry_on_transient, IsTransient, RetryConfig};

use super::aggregate::Volunteer;
use super::commands::VolunteerCommand;
use super::events::VolunteerEvent;

// ============================================================================
// Volunteer Command Handler
// ============================================================================
//
// Orchestrates: Load → Command → Aggregate → Save → Outbox
//
// The save is conditional on the version that was loaded. On a conflict the
// whole cycle is repeated against a fresh copy, so a retried command is
// always re-validated against current state.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Outbox(#[from] OutboxError),
}

impl HandlerError {
    /// Stable code for callers and metrics
    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::Domain(e) => e.code(),
            HandlerError::Repository(RepositoryError::NotFound(_)) => "record.not.found",
            HandlerError::Repository(RepositoryError::AlreadyExists(_)) => "record.already.exists",
            HandlerError::Repository(RepositoryError::ConcurrencyConflict { .. }) => "concurrency.conflict",
            HandlerError::Outbox(_) => "outbox.failure",
        }
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            HandlerError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl IsTransient for HandlerError {
    fn is_transient(&self) -> bool {
        match self {
            HandlerError::Repository(e) => e.is_transient(),
            _ => false,
        }
    }
}

pub struct VolunteerCommandHandler {
    repository: Arc<dyn VolunteerRepository>,
    sink: Arc<dyn EventSink<VolunteerEvent>>,
    metrics: Arc<Metrics>,
    retry: RetryConfig,
}

impl VolunteerCommandHandler {
    pub fn new(
        repository: Arc<dyn VolunteerRepository>,
        sink: Arc<dyn EventSink<VolunteerEvent>>,
        metrics: Arc<Metrics>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            repository,
            sink,
            metrics,
            retry,
        }
    }

    /// Store a freshly created volunteer
    pub async fn register(&self, volunteer: Volunteer) -> Result<VolunteerId, HandlerError> {
        let id = volunteer.id();
        self.repository.add(&volunteer).await?;
        tracing::info!(volunteer_id = %id, "Volunteer registered");
        Ok(id)
    }

    /// Handle a command and persist the result, returning the new version
    pub async fn handle(
        &self,
        volunteer_id: VolunteerId,
        command: VolunteerCommand,
        correlation_id: Uuid,
    ) -> Result<i64, HandlerError> {
        let label = command.name();
        let (version, ()) = self
            .execute(volunteer_id, label, correlation_id, |volunteer| {
                volunteer.handle_command(command.clone())
            })
            .await?;
        Ok(version)
    }

    /// Purge this volunteer's soft-deleted pets older than `retention`.
    /// Returns how many were removed.
    pub async fn delete_expired_pets(
        &self,
        volunteer_id: VolunteerId,
        retention: Duration,
        now: DateTime<Utc>,
        correlation_id: Uuid,
    ) -> Result<usize, HandlerError> {
        let (_, purged) = self
            .execute(volunteer_id, "delete_expired_pets", correlation_id, |volunteer| {
                Ok(volunteer.delete_expired_pets(retention, now).len())
            })
            .await?;
        Ok(purged)
    }

    pub async fn load(&self, volunteer_id: VolunteerId) -> Result<Volunteer, HandlerError> {
        self.repository
            .find_by_id(volunteer_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(volunteer_id).into())
    }

    pub async fn volunteer_ids(&self) -> Result<Vec<VolunteerId>, HandlerError> {
        Ok(self.repository.list_ids().await?)
    }

    async fn execute<T, F>(
        &self,
        volunteer_id: VolunteerId,
        label: &'static str,
        correlation_id: Uuid,
        operation: F,
    ) -> Result<(i64, T), HandlerError>
    where
        F: Fn(&mut Volunteer) -> DomainResult<T> + Sync,
        T: Send,
    {
        let started = Instant::now();
        let operation = &operation;
        // causation id shared by every event of this execution
        let command_id = Uuid::now_v7();

        let result = retry_on_transient(&self.retry, |_attempt| async move {
            self.apply_once(volunteer_id, label, command_id, correlation_id, operation).await
        })
        .await
        .into_result();

        let elapsed = started.elapsed().as_secs_f64();
        match &result {
            Ok((version, _)) => {
                self.metrics.record_command(label, elapsed, None);
                tracing::info!(
                    volunteer_id = %volunteer_id,
                    command = label,
                    version = version,
                    %command_id,
                    %correlation_id,
                    "Command handled"
                );
            }
            Err(error) => {
                self.metrics.record_command(label, elapsed, Some(error.code()));
                tracing::warn!(
                    volunteer_id = %volunteer_id,
                    command = label,
                    code = error.code(),
                    error = %error,
                    %correlation_id,
                    "Command rejected"
                );
            }
        }

        result
    }

    async fn apply_once<T, F>(
        &self,
        volunteer_id: VolunteerId,
        label: &'static str,
        command_id: Uuid,
        correlation_id: Uuid,
        operation: &F,
    ) -> Result<(i64, T), HandlerError>
    where
        F: Fn(&mut Volunteer) -> DomainResult<T> + Sync,
        T: Send,
    {
        let mut volunteer = self.load(volunteer_id).await?;
        let expected_version = volunteer.version();

        let output = operation(&mut volunteer)?;

        let envelopes: Vec<_> = volunteer
            .take_envelopes(correlation_id)
            .into_iter()
            .map(|envelope| {
                envelope
                    .with_causation(command_id)
                    .with_metadata("command".to_string(), label.to_string())
            })
            .collect();
        if envelopes.is_empty() {
            // nothing changed, nothing to persist
            return Ok((expected_version, output));
        }

        let new_version = expected_version + envelopes.len() as i64;
        volunteer.set_version(new_version);

        if let Err(error) = self.repository.save(&volunteer, expected_version).await {
            if error.is_transient() {
                self.metrics.record_conflict(label);
            }
            return Err(error.into());
        }

        self.sink.append(envelopes).await?;

        Ok((new_version, output))
    }
}
