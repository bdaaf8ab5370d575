//! Modification source trait.

use std::sync::Arc;

/// A watched resource that can report when it was last modified.
///
/// Implement this trait to monitor something other than a file (a database row
/// version, a remote ETag converted to a timestamp, etc).
///
/// Implementations must never fail: when the timestamp cannot be read they
/// return `0`, which a monitor treats as "unchanged".
pub trait ModificationSource: Send + Sync {
    /// Last modification time in milliseconds since the Unix epoch, or `0` if unavailable.
    fn last_modified_millis(&self) -> u64;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}

impl<S: ModificationSource + ?Sized> ModificationSource for Arc<S> {
    fn last_modified_millis(&self) -> u64 {
        (**self).last_modified_millis()
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

impl<S: ModificationSource + ?Sized> ModificationSource for Box<S> {
    fn last_modified_millis(&self) -> u64 {
        (**self).last_modified_millis()
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
