//! # config-monitor
//!
//! Hot-path configuration change detection with counter and time gated staleness checks.
//!
//! ## Overview
//!
//! `config-monitor` answers one question, cheaply and often: has the
//! configuration resource changed since the last time we looked? It combines:
//! - A lock-free invocation counter so most calls cost one atomic increment
//! - A time gate so the resource is read at most once per check interval
//! - Synchronous, ordered listener notification exactly once per change
//!
//! The monitor never parses or applies configuration and runs no background
//! thread. Call it from the code path that already runs on every event.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use config_monitor::prelude::*;
//! use std::sync::Arc;
//!
//! struct LoggerContext;
//!
//! impl LoggerContext {
//!     fn reconfigure(&self) {}
//! }
//!
//! # fn example() -> Result<()> {
//! let monitor = ChangeMonitor::builder()
//!     .target(Arc::new(LoggerContext))
//!     .source(FileSource::new("config/log.yaml"))
//!     .listener(|ctx: &Arc<LoggerContext>| -> std::result::Result<(), ListenerError> {
//!         ctx.reconfigure();
//!         Ok(())
//!     })
//!     .interval_secs(30)
//!     .build()?;
//!
//! // On every log event:
//! monitor.check_for_change()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing` (default): emit `tracing` events on construction, on detected
//!   changes and on listener failures
//! - `metrics`: OpenTelemetry counters for gate passes, checks and changes

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod notify;
pub mod settings;
pub mod sources;

#[cfg(feature = "metrics")]
pub mod metrics;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ChangeMonitor, ChangeMonitorBuilder, CheckOutcome, ConfigurationMonitor, NullMonitor,
    };
    pub use crate::error::{ListenerError, MonitorError, Result};
    pub use crate::notify::{ConfigurationListener, Listeners};
    pub use crate::settings::MonitorSettings;
    pub use crate::sources::{FileSource, ModificationSource};
}
