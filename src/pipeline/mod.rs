//! Build finalization pipeline.
//!
//! ```text
//! template ──load──┐
//!                  │
//! output root ─collect─prune?─merge─hash─┴─inject─serialize─write
//! ```
//!
//! - `run()`: full pipeline for `htmlseal build`
//! - `plan()`: collect and merge only, for `htmlseal manifest`
//!
//! Every step aborts the run on failure. Files renamed before a failure
//! stay renamed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::{
    EntrySource, Manifest, Renamed, collect_assets, hash_and_rename, is_external_url,
    merge_manifest, needs_hash, prune_stale,
};
use crate::config::SealConfig;
use crate::error::SealError;
use crate::html::{Document, TemplateDocument, inject_manifest};
use crate::utils::path::{normalize_path, to_slash};
use crate::utils::plural::plural_count;
use crate::{debug, log};

// =============================================================================
// Types
// =============================================================================

/// What the bundler reports once it has written the entry file.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Path of the entry file, possibly still carrying the placeholder.
    pub finalized_file_path: PathBuf,
    /// Code the bundler produced for that file.
    pub finalized_code: String,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunReport {
    /// Final manifest, paths already hashed.
    pub manifest: Manifest,
    pub renamed: Vec<Renamed>,
    /// Stale hashed files removed (`hash.prune`).
    pub pruned: Vec<PathBuf>,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Seal one build: hash, inject and write the HTML document.
pub fn run(config: &SealConfig, build: &BuildOutput) -> Result<RunReport, SealError> {
    let mut doc = load_template(&config.template)?;

    let output_root = output_root(config, &build.finalized_file_path);
    let (mut manifest, pruned) = build_manifest(config, &output_root, config.hash.prune, false)?;

    let renamed = hash_manifest(config, &mut manifest, build)?;

    inject_manifest(&mut doc, &manifest, &output_root, &config.tag_defaults());
    let html = doc.serialize();

    let output_file = output_root.join(config.output_file_name());
    fs::write(&output_file, html).map_err(|source| SealError::OutputWrite {
        path: output_file.clone(),
        source,
    })?;
    log!("write"; "{}", relative_display(&output_file, config.get_root()));

    Ok(RunReport {
        manifest,
        renamed,
        pruned,
    })
}

/// Collect and merge without side effects.
///
/// Logs nothing so the caller can print the manifest to stdout.
pub fn plan(config: &SealConfig, entry: &Path) -> Result<Manifest, SealError> {
    let output_root = output_root(config, entry);
    build_manifest(config, &output_root, false, true).map(|(manifest, _)| manifest)
}

/// Directory holding the build's assets.
///
/// `output_dir` when configured. Otherwise the first directory of the entry
/// path below the project root (`dist/js/main.js` gives `<root>/dist`). An
/// entry directly in the root gives the root; one outside it gives its parent.
pub fn output_root(config: &SealConfig, entry: &Path) -> PathBuf {
    if let Some(dir) = &config.output_dir {
        return dir.clone();
    }

    let root = config.get_root();
    let entry = normalize_path(entry);

    match entry.strip_prefix(root) {
        Ok(relative) => {
            let mut components = relative.components();
            match (components.next(), components.next()) {
                (Some(first), Some(_)) => root.join(first),
                _ => root.to_path_buf(),
            }
        }
        Err(_) => entry
            .parent()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
    }
}

// =============================================================================
// Steps
// =============================================================================

fn load_template(path: &Path) -> Result<TemplateDocument, SealError> {
    let source = fs::read_to_string(path).map_err(|source| SealError::TemplateLoad {
        path: path.to_path_buf(),
        source,
    })?;

    TemplateDocument::parse(source).map_err(|message| SealError::TemplateParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Collect, optionally prune, then merge externals.
fn build_manifest(
    config: &SealConfig,
    output_root: &Path,
    prune: bool,
    quiet: bool,
) -> Result<(Manifest, Vec<PathBuf>), SealError> {
    let mut collected = collect_assets(output_root)?;
    if !quiet {
        log!(
            "collect";
            "{} in {}",
            plural_count(collected.len(), "asset"),
            relative_display(output_root, config.get_root())
        );
    }

    let pruned = if prune {
        let pruned = prune_stale(
            &mut collected,
            &config.hash.placeholder,
            config.hash.algorithm.hex_len(),
        )?;
        for path in &pruned {
            log!("prune"; "{}", relative_display(path, config.get_root()));
        }
        pruned
    } else {
        Vec::new()
    };

    let manifest = merge_manifest(collected, &config.externals);
    debug!("merge"; "{} entries after externals", manifest.len());
    Ok((manifest, pruned))
}

/// Hash-rename every local manifest entry that carries the placeholder.
fn hash_manifest(
    config: &SealConfig,
    manifest: &mut Manifest,
    build: &BuildOutput,
) -> Result<Vec<Renamed>, SealError> {
    let source = EntrySource::new(build, config.hash.source_map);
    let placeholder = config.hash.placeholder.as_str();
    let mut renamed = Vec::new();

    for asset in manifest
        .entries_mut()
        .iter_mut()
        .filter(|a| !is_external_url(&a.path) && needs_hash(&a.path, placeholder))
    {
        let result = hash_and_rename(asset, &source, &config.hash.algorithm, &config.hash)?;
        log!(
            "hash";
            "{} -> {}",
            relative_display(&result.from, config.get_root()),
            relative_display(&result.to, config.get_root())
        );
        renamed.push(result);
    }

    Ok(renamed)
}

/// Root-relative path for log lines, absolute when outside the root.
fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map_or_else(|_| to_slash(path), to_slash)
}
