//! Configuration section definitions.
//!
//! | Module      | TOML Section     | Purpose                              |
//! |-------------|------------------|--------------------------------------|
//! | `hash`      | `[hash]`         | Digest, placeholder, stale pruning   |
//! | `externals` | `[[externals]]`  | Assets merged into the manifest      |

pub mod externals;
pub mod hash;

pub use externals::{normalize_externals, validate_externals};
pub use hash::HashConfig;
