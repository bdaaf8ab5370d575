//! Listeners notified when a monitored resource changes.

use crate::error::ListenerError;
use std::sync::Arc;

/// Capability invoked once per detected change.
///
/// The listener receives the reconfigurable target the monitor was built with.
/// It is called synchronously on the thread that ran the check, while the
/// monitor's check lock is held. Checking the same monitor from inside the
/// listener is allowed; such a nested check never runs the expensive path.
///
/// Closures of the form `Fn(&Arc<T>) -> Result<(), ListenerError>` implement
/// this trait directly.
///
/// # Examples
///
/// ```rust
/// use config_monitor::error::ListenerError;
/// use config_monitor::notify::ConfigurationListener;
/// use std::sync::Arc;
///
/// struct Reloader;
///
/// impl ConfigurationListener<String> for Reloader {
///     fn on_change(&self, target: &Arc<String>) -> Result<(), ListenerError> {
///         println!("reloading {target}");
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigurationListener<T: ?Sized>: Send + Sync {
    /// Called after the monitored resource was observed to change.
    ///
    /// # Errors
    ///
    /// A returned error stops notification of the listeners registered after
    /// this one and is surfaced by the check that detected the change.
    fn on_change(&self, target: &Arc<T>) -> Result<(), ListenerError>;
}

impl<T, F> ConfigurationListener<T> for F
where
    T: ?Sized,
    F: Fn(&Arc<T>) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_change(&self, target: &Arc<T>) -> Result<(), ListenerError> {
        self(target)
    }
}

/// Shared, immutable, ordered listener list handed to a monitor.
pub type Listeners<T> = Arc<[Arc<dyn ConfigurationListener<T>>]>;

/// Build a shared listener list preserving iteration order.
///
/// # Examples
///
/// ```rust
/// use config_monitor::error::ListenerError;
/// use config_monitor::notify::{listeners, ConfigurationListener};
/// use std::sync::Arc;
///
/// let first: Arc<dyn ConfigurationListener<u32>> =
///     Arc::new(|_: &Arc<u32>| -> Result<(), ListenerError> { Ok(()) });
/// let list = listeners([first]);
/// assert_eq!(list.len(), 1);
/// ```
pub fn listeners<T, I>(iter: I) -> Listeners<T>
where
    T: ?Sized,
    I: IntoIterator<Item = Arc<dyn ConfigurationListener<T>>>,
{
    iter.into_iter().collect()
}

/// An empty listener list.
pub fn no_listeners<T: ?Sized>() -> Listeners<T> {
    listeners(std::iter::empty())
}
