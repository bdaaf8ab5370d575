//! Object-safe monitor interface.

use crate::core::{ChangeMonitor, CheckOutcome};
use crate::error::Result;
use crate::sources::ModificationSource;

/// Something a configuration can poll on every event to learn whether it is stale.
///
/// A configuration without a monitored resource holds a [`NullMonitor`] so that
/// callers never need to branch on whether monitoring is enabled.
///
/// # Examples
///
/// ```rust
/// use config_monitor::core::{CheckOutcome, ConfigurationMonitor, NullMonitor};
///
/// let monitor: Box<dyn ConfigurationMonitor> = Box::new(NullMonitor);
/// assert_eq!(monitor.check_configuration().unwrap(), CheckOutcome::Skipped);
/// ```
pub trait ConfigurationMonitor: Send + Sync {
    /// Check for a change and notify listeners if one is found.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener fails while handling a detected change.
    fn check_configuration(&self) -> Result<CheckOutcome>;
}

impl<T, S> ConfigurationMonitor for ChangeMonitor<T, S>
where
    T: ?Sized + Send + Sync,
    S: ModificationSource,
{
    fn check_configuration(&self) -> Result<CheckOutcome> {
        self.check_for_change()
    }
}

/// A monitor that never detects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMonitor;

impl ConfigurationMonitor for NullMonitor {
    fn check_configuration(&self) -> Result<CheckOutcome> {
        Ok(CheckOutcome::Skipped)
    }
}
