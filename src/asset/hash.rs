//! Content hashing for cache-busting file names.
//!
//! A file whose name contains the placeholder (`main.[hash].js`) is renamed to
//! embed the digest of its content (`main.8f14e45fceea167a5a36dedd4bea2543.js`).
//!
//! The new file is written before the placeholder file is deleted, so a failed
//! write never loses the original.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::config::HashConfig;
use crate::error::{RenameOp, SealError};
use crate::pipeline::BuildOutput;
use crate::utils::path::to_slash;

use super::AssetDescriptor;

// ============================================================================
// Digest
// ============================================================================

/// Black-box digest: bytes in, lowercase hex out.
pub trait ContentDigest {
    fn hex_digest(&self, content: &[u8]) -> String;
}

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 128-bit, 32 hex chars.
    #[default]
    Md5,
    /// 256-bit, 64 hex chars.
    Sha256,
    /// 256-bit, 64 hex chars.
    Blake3,
}

impl HashAlgorithm {
    /// Length of the hex digest this algorithm produces.
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 | Self::Blake3 => 64,
        }
    }
}

impl ContentDigest for HashAlgorithm {
    fn hex_digest(&self, content: &[u8]) -> String {
        match self {
            Self::Md5 => hex::encode(md5::Md5::digest(content)),
            Self::Sha256 => hex::encode(sha2::Sha256::digest(content)),
            Self::Blake3 => blake3::hash(content).to_hex().to_string(),
        }
    }
}

// ============================================================================
// Content sources
// ============================================================================

/// Where the bytes of an asset come from at hashing time.
pub trait ContentSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads files verbatim from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSource;

impl ContentSource for DiskSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Serves the bundler's finalized code for the entry file, disk otherwise.
///
/// Bundlers hand over the entry code without its trailing
/// `//# sourceMappingURL=` line; with `source_map` enabled it is restored
/// before hashing so the hashed file matches what the bundler would write.
/// The comment is concatenated as-is, no newline is inserted.
pub struct EntrySource<'a> {
    build: &'a BuildOutput,
    source_map: bool,
}

impl<'a> EntrySource<'a> {
    pub fn new(build: &'a BuildOutput, source_map: bool) -> Self {
        Self { build, source_map }
    }
}

impl ContentSource for EntrySource<'_> {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if path != self.build.finalized_file_path {
            return DiskSource.read(path);
        }

        let mut code = self.build.finalized_code.clone();
        if self.source_map && !has_source_map_comment(&code) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            code.push_str(&format!("//# sourceMappingURL={name}.map"));
        }
        Ok(code.into_bytes())
    }
}

/// Check if the last non-blank line is a source map reference.
fn has_source_map_comment(code: &str) -> bool {
    code.lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| {
            let line = line.trim_start();
            line.starts_with("//# sourceMappingURL=") || line.starts_with("//@ sourceMappingURL=")
        })
}

// ============================================================================
// Rename
// ============================================================================

/// Result of hashing one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Check if the file name of `path` carries the placeholder.
///
/// Directory components are not considered.
pub fn needs_hash(path: &str, placeholder: &str) -> bool {
    Path::new(path)
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains(placeholder))
}

/// Replace every placeholder in the file name of `path` with `digest`.
pub fn hashed_path(path: &Path, placeholder: &str, digest: &str) -> PathBuf {
    match path.file_name() {
        Some(name) => path.with_file_name(name.to_string_lossy().replace(placeholder, digest)),
        None => path.to_path_buf(),
    }
}

/// Hash an asset's content and move it to its digest-bearing name.
///
/// Updates `asset.path` in place. Order: read, write new, delete old.
pub fn hash_and_rename(
    asset: &mut AssetDescriptor,
    source: &dyn ContentSource,
    digest: &dyn ContentDigest,
    options: &HashConfig,
) -> Result<Renamed, SealError> {
    let from = PathBuf::from(&asset.path);

    let content = source
        .read(&from)
        .map_err(|e| SealError::hash_rename(&from, RenameOp::Read, e))?;

    let hex = digest.hex_digest(&content);
    let to = hashed_path(&from, &options.placeholder, &hex);

    fs::write(&to, &content).map_err(|e| SealError::hash_rename(&to, RenameOp::Write, e))?;
    fs::remove_file(&from).map_err(|e| SealError::hash_rename(&from, RenameOp::Delete, e))?;

    asset.path = to_slash(&to);
    Ok(Renamed { from, to })
}

// ============================================================================
// Stale file pruning
// ============================================================================

/// Delete hashed outputs of earlier runs and drop them from `collected`.
///
/// For every collected placeholder file, siblings whose name matches the
/// placeholder pattern with a `hex_len` digest are removed. Runs before
/// merging so deleted files never reach the manifest.
pub fn prune_stale(
    collected: &mut Vec<AssetDescriptor>,
    placeholder: &str,
    hex_len: usize,
) -> Result<Vec<PathBuf>, SealError> {
    let mut pruned = Vec::new();

    for asset in collected.iter().filter(|a| needs_hash(&a.path, placeholder)) {
        let path = Path::new(&asset.path);
        let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
            continue;
        };
        let pattern = stale_pattern(&name.to_string_lossy(), placeholder, hex_len);

        let entries = fs::read_dir(dir).map_err(|e| SealError::hash_rename(dir, RenameOp::Prune, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SealError::hash_rename(dir, RenameOp::Prune, e))?;
            let candidate = entry.path();
            if !candidate.is_file() || !pattern.is_match(&entry.file_name().to_string_lossy()) {
                continue;
            }
            fs::remove_file(&candidate)
                .map_err(|e| SealError::hash_rename(&candidate, RenameOp::Prune, e))?;
            pruned.push(candidate);
        }
    }

    if !pruned.is_empty() {
        collected.retain(|a| !pruned.iter().any(|p| Path::new(&a.path) == p));
    }
    Ok(pruned)
}

/// Build `^prefix[0-9a-f]{N}suffix$` from a placeholder file name.
fn stale_pattern(name: &str, placeholder: &str, hex_len: usize) -> Regex {
    let hex = format!("[0-9a-f]{{{hex_len}}}");
    let body = name
        .split(placeholder)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(&hex);
    Regex::new(&format!("^{body}$")).expect("escaped file name is a valid pattern")
}
