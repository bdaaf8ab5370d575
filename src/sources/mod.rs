//! Modification source implementations.

mod file;
mod manual;
mod modification_source;

pub use file::FileSource;
pub use manual::ManualSource;
pub use modification_source::ModificationSource;
