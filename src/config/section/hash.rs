//! `[hash]` section configuration.
//!
//! Controls content hashing of placeholder-bearing asset names.
//!
//! # Example
//!
//! ```toml
//! [hash]
//! algorithm = "md5"       # md5 (32 hex) | sha256 (64 hex) | blake3 (64 hex)
//! placeholder = "[hash]"  # token replaced in file names
//! source_map = true       # restore the entry's sourceMappingURL line before hashing
//! prune = false           # delete hashed files left over from earlier builds
//! ```

use serde::{Deserialize, Serialize};

use crate::asset::HashAlgorithm;
use crate::config::ConfigDiagnostics;

/// Default hash placeholder token.
pub const DEFAULT_PLACEHOLDER: &str = "[hash]";

/// Hashing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Digest used for hashed names.
    pub algorithm: HashAlgorithm,

    /// Token in file names that is replaced by the digest.
    pub placeholder: String,

    /// Append `//# sourceMappingURL=<name>.map` to the entry code when missing.
    pub source_map: bool,

    /// Remove stale `name.<digest>.ext` siblings of placeholder files.
    /// - `false` (default): earlier hashed files accumulate
    /// - `true`: only the current build's hashed file survives
    pub prune: bool,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            source_map: true,
            prune: false,
        }
    }
}

impl HashConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.placeholder.is_empty() {
            diag.error_with_hint(
                "hash.placeholder",
                "placeholder must not be empty",
                format!("use the default \"{DEFAULT_PLACEHOLDER}\""),
            );
        } else if self.placeholder.contains(['/', '\\']) {
            diag.error("hash.placeholder", "placeholder must not contain path separators");
        }
    }
}
