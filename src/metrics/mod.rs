//! Built-in metrics for change monitors.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Counter gate passes
//! - Expensive checks performed
//! - Detected changes
//! - Listener failures
//! - Notification duration
//!
//! # Examples
//!
//! ```rust,no_run
//! use config_monitor::prelude::*;
//! use config_monitor::metrics::MonitorMetrics;
//! use opentelemetry::global;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<()> {
//! let meter = global::meter("my-app");
//!
//! let monitor = ChangeMonitor::builder()
//!     .target(Arc::new("logger-context"))
//!     .source(FileSource::new("log.yaml"))
//!     .metrics(MonitorMetrics::new(meter))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod monitor_metrics;

pub use monitor_metrics::MonitorMetrics;
