//! Asset discovery, merging and content hashing.

mod collect;
pub mod hash;
mod kind;
mod merge;
mod url;

// Types
pub use kind::{AssetDescriptor, AssetKind, InjectLocation, Manifest, Position};

// Discovery and ordering (read-only)
pub use collect::collect_assets;
pub use merge::merge_manifest;
pub use url::is_external_url;

// Hashing (side effects)
pub use hash::{EntrySource, HashAlgorithm, Renamed, hash_and_rename, needs_hash, prune_stale};
