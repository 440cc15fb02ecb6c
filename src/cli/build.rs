//! `htmlseal build`: run the full pipeline and summarize it.

use anyhow::Result;

use super::BuildArgs;
use super::common::load_build_output;
use crate::config::SealConfig;
use crate::pipeline::{self, RunReport};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Execute build command
pub fn build(args: &BuildArgs, config: &SealConfig) -> Result<RunReport> {
    let build = load_build_output(&args.entry, args.code.as_deref())?;
    debug!("build"; "entry {}", build.finalized_file_path.display());

    let report = pipeline::run(config, &build)?;
    log!("build"; "{}", summary(&report));
    Ok(report)
}

/// One-line summary such as `3 assets, 1 hashed, 2 pruned`.
fn summary(report: &RunReport) -> String {
    let mut parts = vec![plural_count(report.manifest.len(), "asset")];
    if !report.renamed.is_empty() {
        parts.push(format!("{} hashed", report.renamed.len()));
    }
    if !report.pruned.is_empty() {
        parts.push(format!("{} pruned", report.pruned.len()));
    }
    parts.join(", ")
}
