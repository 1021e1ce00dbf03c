use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Covers:
// - Volunteer commands (throughput, failures by error code, latency)
// - Optimistic concurrency retries
// - Expired pet purges
//
// Exposition is left to the embedding service; `render` produces the text
// format for whatever endpoint it mounts.
// ============================================================================

/// Central metrics registry for the registry core
pub struct Metrics {
    registry: Registry,

    // Command Metrics
    pub commands_handled: IntCounterVec,
    pub commands_failed: IntCounterVec,
    pub command_duration: HistogramVec,

    // Retry Metrics
    pub concurrency_conflicts: IntCounterVec,

    // Sweep Metrics
    pub pets_purged: IntCounter,
    pub sweeps_total: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Command Metrics
        let commands_handled = IntCounterVec::new(
            Opts::new("volunteer_commands_handled_total", "Total volunteer commands applied"),
            &["command"],
        )?;
        registry.register(Box::new(commands_handled.clone()))?;

        let commands_failed = IntCounterVec::new(
            Opts::new("volunteer_commands_failed_total", "Total volunteer commands rejected or failed"),
            &["command", "code"],
        )?;
        registry.register(Box::new(commands_failed.clone()))?;

        let command_duration = HistogramVec::new(
            HistogramOpts::new("volunteer_command_duration_seconds", "Volunteer command handling duration")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
            &["command"],
        )?;
        registry.register(Box::new(command_duration.clone()))?;

        // Retry Metrics
        let concurrency_conflicts = IntCounterVec::new(
            Opts::new("volunteer_concurrency_conflicts_total", "Saves rejected by a stale version"),
            &["command"],
        )?;
        registry.register(Box::new(concurrency_conflicts.clone()))?;

        // Sweep Metrics
        let pets_purged = IntCounter::new(
            "pets_purged_total",
            "Soft-deleted pets removed after the retention period",
        )?;
        registry.register(Box::new(pets_purged.clone()))?;

        let sweeps_total = IntCounter::new("expired_pet_sweeps_total", "Completed expiry sweeps")?;
        registry.register(Box::new(sweeps_total.clone()))?;

        Ok(Self {
            registry,
            commands_handled,
            commands_failed,
            command_duration,
            concurrency_conflicts,
            pets_purged,
            sweeps_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record the outcome of one command
    pub fn record_command(&self, command: &str, duration_secs: f64, failure_code: Option<&str>) {
        match failure_code {
            None => self.commands_handled.with_label_values(&[command]).inc(),
            Some(code) => self.commands_failed.with_label_values(&[command, code]).inc(),
        }
        self.command_duration.with_label_values(&[command]).observe(duration_secs);
    }

    pub fn record_conflict(&self, command: &str) {
        self.concurrency_conflicts.with_label_values(&[command]).inc();
    }

    pub fn record_sweep(&self, purged: usize) {
        self.sweeps_total.inc();
        self.pets_purged.inc_by(purged as u64);
    }

    /// Prometheus text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
