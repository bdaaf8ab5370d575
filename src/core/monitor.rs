//! Counter- and time-gated change detection.

use crate::core::{Clock, ChangeMonitorBuilder, SystemClock};
use crate::error::{MonitorError, Result};
use crate::notify::Listeners;
use crate::sources::ModificationSource;
use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[cfg(feature = "metrics")]
use crate::metrics::MonitorMetrics;

/// Smallest accepted check interval, in seconds.
pub const MIN_INTERVAL_SECS: u32 = 5;

/// Interval used when none is configured, in seconds.
pub const DEFAULT_INTERVAL_SECS: u32 = MIN_INTERVAL_SECS;

/// Only calls whose counter value has these bits clear may run a check.
const MASK: u32 = 0x0f;

const MILLIS_PER_SECOND: u64 = 1000;

/// Clamp an interval in seconds and convert it to milliseconds.
pub(crate) fn interval_millis(interval_secs: u32) -> u64 {
    u64::from(interval_secs.max(MIN_INTERVAL_SECS)) * MILLIS_PER_SECOND
}

/// What a single call to [`ChangeMonitor::check_for_change`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The invocation counter gate did not open; nothing was read.
    Skipped,
    /// The counter gate opened but the next check deadline has not been reached.
    NotDue,
    /// The resource was queried and has not been modified since the last change.
    Unchanged,
    /// The resource changed and every listener was notified.
    Changed {
        /// Number of listeners notified
        notified: usize,
    },
}

impl CheckOutcome {
    /// Whether this call detected a change.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Bookkeeping mutated only on the expensive path.
///
/// Held in cells behind a reentrant lock so that a listener checking the same
/// monitor from inside a notification sees the advanced deadline instead of
/// deadlocking.
#[derive(Debug)]
struct CheckState {
    last_modified: Cell<u64>,
    next_check: Cell<u64>,
}

/// Watches a resource for modification and notifies listeners with a
/// reconfigurable target.
///
/// `check_for_change` is meant to be called on a hot path, once per event. Most
/// calls cost a single atomic increment: only every 16th call takes the check
/// lock, and of those only calls made after the check deadline read the
/// resource timestamp.
///
/// # Examples
///
/// ```rust
/// use config_monitor::prelude::*;
/// use config_monitor::sources::ManualSource;
/// use std::sync::Arc;
///
/// # fn example() -> Result<()> {
/// let source = Arc::new(ManualSource::new(1_000));
/// let monitor = ChangeMonitor::builder()
///     .target(Arc::new(String::from("logger-context")))
///     .source(Arc::clone(&source))
///     .listener(|ctx: &Arc<String>| -> std::result::Result<(), ListenerError> {
///         println!("reconfiguring {ctx}");
///         Ok(())
///     })
///     .interval_secs(30)
///     .build()?;
///
/// for _ in 0..16 {
///     monitor.check_for_change()?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChangeMonitor<T: ?Sized, S> {
    /// The component handed to listeners when a change is detected
    target: Arc<T>,
    /// The watched resource
    source: S,
    /// Listeners notified in order on each change
    listeners: Listeners<T>,
    /// Minimum spacing between expensive checks
    interval_millis: u64,
    /// Calls to `check_for_change`, used only for its low bits
    counter: AtomicU32,
    /// Timestamp and deadline, guarded by the check lock
    state: ReentrantMutex<CheckState>,
    clock: Arc<dyn Clock>,
    #[cfg(feature = "metrics")]
    metrics: Option<MonitorMetrics>,
}

impl<T: ?Sized, S: ModificationSource> ChangeMonitor<T, S> {
    /// Create a monitor using the system clock.
    ///
    /// `interval_secs` is raised to [`MIN_INTERVAL_SECS`] if smaller. The
    /// source is queried once to record a baseline; no listener is notified.
    pub fn new(target: Arc<T>, source: S, listeners: Listeners<T>, interval_secs: u32) -> Self {
        Self::with_clock(target, source, listeners, interval_secs, Arc::new(SystemClock))
    }

    /// Create a monitor driven by an explicit clock.
    pub fn with_clock(
        target: Arc<T>,
        source: S,
        listeners: Listeners<T>,
        interval_secs: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let interval_millis = interval_millis(interval_secs);
        let last_modified = source.last_modified_millis();
        let next_check = clock.now_millis().saturating_add(interval_millis);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = %source.name(),
            interval_ms = interval_millis,
            baseline = last_modified,
            listeners = listeners.len(),
            "Created configuration change monitor"
        );

        Self {
            target,
            source,
            listeners,
            interval_millis,
            counter: AtomicU32::new(0),
            state: ReentrantMutex::new(CheckState {
                last_modified: Cell::new(last_modified),
                next_check: Cell::new(next_check),
            }),
            clock,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Create a new builder for constructing a change monitor.
    pub fn builder() -> ChangeMonitorBuilder<T, S> {
        ChangeMonitorBuilder::new()
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn with_metrics(mut self, metrics: MonitorMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Check whether the resource changed, notifying listeners if it did.
    ///
    /// Safe to call concurrently from any number of threads, and from a
    /// listener of this monitor: a nested call on the notifying thread finds
    /// the deadline already advanced and returns [`CheckOutcome::NotDue`].
    /// Resource read failures count as "unchanged" and never produce an error.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Listener`] if a listener fails. Listeners after
    /// the failing one are not notified for this change, and the change is
    /// still considered handled: it will not be signalled again.
    pub fn check_for_change(&self) -> Result<CheckOutcome> {
        let count = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        if count & MASK != 0 {
            return Ok(CheckOutcome::Skipped);
        }

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_gate_pass();
        }

        let state = self.state.lock();
        let now = self.clock.now_millis();
        if now < state.next_check.get() {
            return Ok(CheckOutcome::NotDue);
        }
        state.next_check.set(now.saturating_add(self.interval_millis));

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_check();
        }

        let modified = self.source.last_modified_millis();
        let previous = state.last_modified.get();
        if modified <= previous {
            #[cfg(feature = "tracing")]
            tracing::trace!(source = %self.source.name(), "Configuration unchanged");
            return Ok(CheckOutcome::Unchanged);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = %self.source.name(),
            previous,
            current = modified,
            listeners = self.listeners.len(),
            "Configuration change detected"
        );
        state.last_modified.set(modified);

        // Listeners run under the check lock so a change is signalled once.
        let notified = self.notify_listeners()?;
        drop(state);

        Ok(CheckOutcome::Changed { notified })
    }

    fn notify_listeners(&self) -> Result<usize> {
        #[cfg(feature = "metrics")]
        let timer = self.metrics.as_ref().map(|m| {
            m.record_change();
            m.start_notify()
        });

        for (index, listener) in self.listeners.iter().enumerate() {
            if let Err(source) = listener.on_change(&self.target) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    source = %self.source.name(),
                    listener = index,
                    error = %source,
                    "Configuration listener failed, skipping remaining listeners"
                );
                #[cfg(feature = "metrics")]
                if let Some(metrics) = &self.metrics {
                    metrics.record_listener_failure();
                }
                return Err(MonitorError::Listener { index, source });
            }
        }

        #[cfg(feature = "metrics")]
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_notify(timer);
        }

        Ok(self.listeners.len())
    }

    /// The reconfigurable target handed to listeners.
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }

    /// The watched resource.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Effective minimum spacing between expensive checks.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis)
    }

    /// Effective minimum spacing between expensive checks, in milliseconds.
    pub fn interval_millis(&self) -> u64 {
        self.interval_millis
    }

    /// Last modification timestamp observed, in milliseconds since the epoch.
    pub fn last_modified(&self) -> u64 {
        self.state.lock().last_modified.get()
    }

    /// Time at or after which the next expensive check may run, in milliseconds since the epoch.
    pub fn next_check(&self) -> u64 {
        self.state.lock().next_check.get()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of calls to `check_for_change` so far (wrapping).
    pub fn invocations(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }
}
