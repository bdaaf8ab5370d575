//! Core change monitoring types.

mod builder;
mod clock;
mod configuration_monitor;
mod monitor;

pub use builder::ChangeMonitorBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use configuration_monitor::{ConfigurationMonitor, NullMonitor};
pub use monitor::{ChangeMonitor, CheckOutcome, DEFAULT_INTERVAL_SECS, MIN_INTERVAL_SECS};
pub(crate) use monitor::interval_millis;
