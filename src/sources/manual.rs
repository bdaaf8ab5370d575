//! In-memory modification source.

use super::ModificationSource;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// A modification source whose timestamp is set programmatically.
///
/// Useful when the watched resource is not a file, or for driving a monitor in
/// tests. Every query is counted so callers can see how often the monitor took
/// the expensive path.
///
/// # Examples
///
/// ```rust
/// use config_monitor::sources::{ManualSource, ModificationSource};
///
/// let source = ManualSource::new(1_000);
/// source.set(2_000);
/// assert_eq!(source.last_modified_millis(), 2_000);
/// assert_eq!(source.queries(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ManualSource {
    modified: AtomicU64,
    queries: AtomicUsize,
}

impl ManualSource {
    /// Create a source reporting the given timestamp.
    pub fn new(modified_millis: u64) -> Self {
        Self {
            modified: AtomicU64::new(modified_millis),
            queries: AtomicUsize::new(0),
        }
    }

    /// Set the reported modification time.
    pub fn set(&self, modified_millis: u64) {
        self.modified.store(modified_millis, Ordering::SeqCst);
    }

    /// Advance the reported modification time by `millis`.
    pub fn touch(&self, millis: u64) {
        self.modified.fetch_add(millis, Ordering::SeqCst);
    }

    /// Number of times the timestamp has been queried.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ModificationSource for ManualSource {
    fn last_modified_millis(&self) -> u64 {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.modified.load(Ordering::SeqCst)
    }

    fn name(&self) -> String {
        "manual".to_string()
    }
}
