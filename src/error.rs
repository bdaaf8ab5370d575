//! Error types for config-monitor.

use std::fmt;

/// Result type alias for config-monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors that can occur when building or running a change monitor.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Failed to load monitor settings from a source.
    #[error("Failed to load monitor settings: {0}")]
    LoadError(String),

    /// Failed to deserialize monitor settings.
    #[error("Failed to deserialize monitor settings: {0}")]
    DeserializationError(String),

    /// The builder was not given a reconfigurable target.
    #[error("Change monitor requires a reconfigurable target")]
    MissingTarget,

    /// The builder was not given a modification source.
    #[error("Change monitor requires a modification source")]
    MissingSource,

    /// A listener failed while being notified of a change.
    ///
    /// Listeners registered after `index` were not notified for this change.
    #[error("Listener {index} failed to handle configuration change: {source}")]
    Listener {
        /// Position of the failing listener in registration order
        index: usize,
        /// The error returned by the listener
        source: ListenerError,
    },
}

/// Error returned by a [`ConfigurationListener`](crate::notify::ConfigurationListener).
pub struct ListenerError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl ListenerError {
    /// Wrap any error type.
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    /// Create a listener error from a message.
    pub fn msg(msg: impl Into<String>) -> Self {
        Self(msg.into().into())
    }

    /// Borrow the underlying error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Debug for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerError").field(&self.0).finish()
    }
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<String> for ListenerError {
    fn from(msg: String) -> Self {
        Self::msg(msg)
    }
}

impl From<&str> for ListenerError {
    fn from(msg: &str) -> Self {
        Self::msg(msg)
    }
}
