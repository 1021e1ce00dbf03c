use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::SweepConfig;
use crate::domain::volunteer::{HandlerError, VolunteerCommandHandler};
use crate::metrics::Metrics;

// ============================================================================
// Expired Pets Sweeper
// ============================================================================
//
// Periodically purges soft-deleted pets whose retention period has elapsed,
// one volunteer at a time through the command handler. A failure on one
// volunteer is logged and the sweep moves on to the next.
//
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub volunteers_scanned: usize,
    pub pets_purged: usize,
    pub failures: usize,
}

pub struct ExpiredPetsSweeper {
    handler: Arc<VolunteerCommandHandler>,
    metrics: Arc<Metrics>,
    retention: chrono::Duration,
    interval: Duration,
}

impl ExpiredPetsSweeper {
    pub fn new(handler: Arc<VolunteerCommandHandler>, metrics: Arc<Metrics>, config: &SweepConfig) -> Self {
        Self {
            handler,
            metrics,
            retention: config.retention(),
            interval: config.interval(),
        }
    }

    /// One pass over every stored volunteer
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<SweepReport, HandlerError> {
        let correlation_id = Uuid::new_v4();
        let ids = self.handler.volunteer_ids().await?;
        let mut report = SweepReport {
            volunteers_scanned: ids.len(),
            ..SweepReport::default()
        };

        for volunteer_id in ids {
            match self
                .handler
                .delete_expired_pets(volunteer_id, self.retention, now, correlation_id)
                .await
            {
                Ok(purged) => report.pets_purged += purged,
                Err(error) => {
                    report.failures += 1;
                    tracing::error!(
                        volunteer_id = %volunteer_id,
                        error = %error,
                        "Failed to purge expired pets"
                    );
                }
            }
        }

        self.metrics.record_sweep(report.pets_purged);
        tracing::info!(
            volunteers = report.volunteers_scanned,
            purged = report.pets_purged,
            failures = report.failures,
            %correlation_id,
            "Expired pets sweep finished"
        );

        Ok(report)
    }

    /// Sweep on every tick until `shutdown` flips to true
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            retention_days = self.retention.num_days(),
            "Expired pets sweeper started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(error) = self.run_once(Utc::now()).await {
                        tracing::error!(error = %error, "Expired pets sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Expired pets sweeper stopped");
    }
}
