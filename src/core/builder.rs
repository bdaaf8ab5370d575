//! Builder for constructing ChangeMonitor instances.

use crate::core::{ChangeMonitor, Clock, DEFAULT_INTERVAL_SECS, SystemClock};
use crate::error::{MonitorError, Result};
use crate::notify::ConfigurationListener;
use crate::settings::MonitorSettings;
use crate::sources::ModificationSource;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::MonitorMetrics;

/// Builder for constructing a `ChangeMonitor`.
///
/// Provides a fluent interface for wiring the target, the watched resource and
/// the listeners together.
///
/// # Examples
///
/// ```rust,no_run
/// use config_monitor::prelude::*;
/// use std::sync::Arc;
///
/// struct LoggerContext;
///
/// # fn example() -> Result<()> {
/// let settings = MonitorSettings::load("config/monitor.yaml")?;
///
/// let monitor = ChangeMonitor::builder()
///     .target(Arc::new(LoggerContext))
///     .source(FileSource::new("config/log.yaml"))
///     .listener(|_ctx: &Arc<LoggerContext>| -> std::result::Result<(), ListenerError> {
///         // rebuild the logging configuration
///         Ok(())
///     })
///     .settings(&settings)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ChangeMonitorBuilder<T: ?Sized, S> {
    target: Option<Arc<T>>,
    source: Option<S>,
    listeners: Vec<Arc<dyn ConfigurationListener<T>>>,
    interval_secs: u32,
    clock: Option<Arc<dyn Clock>>,
    #[cfg(feature = "metrics")]
    metrics: Option<MonitorMetrics>,
}

impl<T: ?Sized, S: ModificationSource> ChangeMonitorBuilder<T, S> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            target: None,
            source: None,
            listeners: Vec::new(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            clock: None,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Set the reconfigurable target passed to listeners on change.
    pub fn target(mut self, target: Arc<T>) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the watched resource.
    pub fn source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    /// Register a listener. Listeners are notified in registration order.
    pub fn listener<L>(mut self, listener: L) -> Self
    where
        L: ConfigurationListener<T> + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Register several shared listeners, keeping their order.
    pub fn listeners<I>(mut self, listeners: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ConfigurationListener<T>>>,
    {
        self.listeners.extend(listeners);
        self
    }

    /// Set the check interval in seconds.
    ///
    /// Values below [`MIN_INTERVAL_SECS`](crate::core::MIN_INTERVAL_SECS) are
    /// raised to the minimum when the monitor is built.
    pub fn interval_secs(mut self, interval_secs: u32) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    /// Take the check interval from loaded settings.
    pub fn settings(mut self, settings: &MonitorSettings) -> Self {
        self.interval_secs = settings.monitor_interval;
        self
    }

    /// Use a custom clock instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Record OpenTelemetry metrics for this monitor.
    #[cfg(feature = "metrics")]
    pub fn metrics(mut self, metrics: MonitorMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the monitor.
    ///
    /// This reads the resource's current modification time as the baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if no target or no source was set.
    pub fn build(self) -> Result<ChangeMonitor<T, S>> {
        let target = self.target.ok_or(MonitorError::MissingTarget)?;
        let source = self.source.ok_or(MonitorError::MissingSource)?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        let monitor = ChangeMonitor::with_clock(
            target,
            source,
            self.listeners.into(),
            self.interval_secs,
            clock,
        );

        #[cfg(feature = "metrics")]
        let monitor = match self.metrics {
            Some(metrics) => monitor.with_metrics(metrics),
            None => monitor,
        };

        Ok(monitor)
    }
}

impl<T: ?Sized, S: ModificationSource> Default for ChangeMonitorBuilder<T, S> {
    fn default() -> Self {
        Self::new()
    }
}
