//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects beyond
//! `canonicalize()` lookups.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`)
//! - [`relative`]: Root-relative references (`relative_to`, `to_slash`)

pub mod fs;
pub mod relative;

pub use fs::{normalize_path, resolve_path};
pub use relative::{relative_to, to_slash};
