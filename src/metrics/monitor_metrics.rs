//! Change monitor metrics tracking using OpenTelemetry.

use opentelemetry::metrics::{Counter, Histogram, Meter};
use std::time::Instant;

/// Metrics collector for change monitor operations.
///
/// Tracks how often the cheap gate lets a call through, how many expensive
/// checks actually run, detected changes, listener failures and notification
/// latency.
///
/// # Examples
///
/// ```rust,no_run
/// use config_monitor::metrics::MonitorMetrics;
/// use opentelemetry::global;
///
/// let meter = global::meter("config-monitor");
/// let metrics = MonitorMetrics::new(meter);
///
/// metrics.record_change();
/// let timer = metrics.start_notify();
/// // ... notify listeners ...
/// metrics.record_notify(timer);
/// ```
#[derive(Clone)]
pub struct MonitorMetrics {
    gate_passes: Counter<u64>,
    checks: Counter<u64>,
    changes: Counter<u64>,
    listener_failures: Counter<u64>,
    notify_duration: Histogram<f64>,
}

impl MonitorMetrics {
    /// Create a new metrics collector with the provided meter.
    pub fn new(meter: Meter) -> Self {
        let gate_passes = meter
            .u64_counter("config_monitor.gate.passes")
            .with_description("Calls that passed the invocation counter gate")
            .build();

        let checks = meter
            .u64_counter("config_monitor.checks")
            .with_description("Expensive checks that read the resource timestamp")
            .build();

        let changes = meter
            .u64_counter("config_monitor.changes")
            .with_description("Detected resource modifications")
            .build();

        let listener_failures = meter
            .u64_counter("config_monitor.listener.failures")
            .with_description("Listener notifications that returned an error")
            .build();

        let notify_duration = meter
            .f64_histogram("config_monitor.notify.duration")
            .with_description("Time spent notifying listeners of a change in seconds")
            .with_unit("s")
            .build();

        Self {
            gate_passes,
            checks,
            changes,
            listener_failures,
            notify_duration,
        }
    }

    /// Record a call that passed the counter gate.
    pub fn record_gate_pass(&self) {
        self.gate_passes.add(1, &[]);
    }

    /// Record an expensive check that read the resource.
    pub fn record_check(&self) {
        self.checks.add(1, &[]);
    }

    /// Record a detected resource modification.
    pub fn record_change(&self) {
        self.changes.add(1, &[]);
    }

    /// Start timing a listener notification batch.
    ///
    /// Pass the returned `Instant` to [`record_notify`](Self::record_notify).
    pub fn start_notify(&self) -> Instant {
        Instant::now()
    }

    /// Record the end of a listener notification batch.
    pub fn record_notify(&self, start: Instant) {
        self.notify_duration
            .record(start.elapsed().as_secs_f64(), &[]);
    }

    /// Record a listener failure.
    pub fn record_listener_failure(&self) {
        self.listener_failures.add(1, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::global;

    #[test]
    fn test_metrics_creation() {
        let meter = global::meter("test");
        let metrics = MonitorMetrics::new(meter);

        // Test basic operations don't panic
        metrics.record_gate_pass();
        metrics.record_check();
        metrics.record_change();
        let timer = metrics.start_notify();
        metrics.record_notify(timer);
        metrics.record_listener_failure();
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = MonitorMetrics::new(global::meter("test"));
        let metrics2 = metrics.clone();

        let timer1 = metrics.start_notify();
        let timer2 = metrics2.start_notify();

        metrics.record_notify(timer1);
        metrics2.record_notify(timer2);
    }

    #[test]
    fn test_start_notify_only_times() {
        let metrics = MonitorMetrics::new(global::meter("test"));

        let before = Instant::now();
        let timer = metrics.start_notify();
        assert!(timer >= before);
        metrics.record_notify(timer);

        // A change can be recorded without a notification batch
        metrics.record_change();
    }
}
