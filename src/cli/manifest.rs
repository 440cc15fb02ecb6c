//! `htmlseal manifest`: print the merged manifest as JSON.
//!
//! Read-only: nothing is hashed, renamed or written.

use std::io::{self, Write};

use anyhow::Result;

use super::ManifestArgs;
use super::common::resolve_cli_path;
use crate::asset::Manifest;
use crate::config::SealConfig;
use crate::debug;
use crate::pipeline;
use crate::utils::plural::plural_count;

/// Execute manifest command
pub fn print_manifest(args: &ManifestArgs, config: &SealConfig) -> Result<()> {
    let entry = resolve_cli_path(&args.entry)?;
    let manifest = pipeline::plan(config, &entry)?;

    debug!("manifest"; "{}", plural_count(manifest.len(), "asset"));

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", format_manifest(&manifest, args.pretty)?)?;
    Ok(())
}

fn format_manifest(manifest: &Manifest, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(manifest)
    } else {
        serde_json::to_string(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetDescriptor, Position};

    #[test]
    fn test_format_manifest() {
        let manifest = Manifest::new(vec![
            AssetDescriptor::script("https://cdn.example.com/lib.js").with_position(Position::Before),
            AssetDescriptor::stylesheet("/out/site.css"),
        ]);

        assert_eq!(
            format_manifest(&manifest, false).unwrap(),
            r#"[{"kind":"script","path":"https://cdn.example.com/lib.js","position":"before"},{"kind":"stylesheet","path":"/out/site.css"}]"#
        );
        assert!(format_manifest(&manifest, true).unwrap().contains("\n  {"));
    }
}
