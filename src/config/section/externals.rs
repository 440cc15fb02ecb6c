//! `[[externals]]` configuration.
//!
//! Assets that are not produced under the output directory, such as CDN
//! libraries or files from a vendor folder.
//!
//! # Example
//!
//! ```toml
//! [[externals]]
//! kind = "script"                          # script | stylesheet (js | css also accepted)
//! path = "https://cdn.example.com/vue.js"  # URL, or path relative to htmlseal.toml
//! position = "before"                      # before | after (default: after)
//! inject = "head"                          # head | body (scripts only)
//! mode = "module"                          # script `type` attribute
//! ```

use std::path::Path;

use crate::asset::{AssetDescriptor, AssetKind, is_external_url};
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::{resolve_path, to_slash};

/// Anchor local external paths at `root`. URLs are left untouched.
pub fn normalize_externals(externals: &mut [AssetDescriptor], root: &Path) {
    for external in externals.iter_mut() {
        if external.path.is_empty() || is_external_url(&external.path) {
            continue;
        }
        external.path = to_slash(&resolve_path(Path::new(&external.path), root));
    }
}

pub fn validate_externals(externals: &[AssetDescriptor], diag: &mut ConfigDiagnostics) {
    for (idx, external) in externals.iter().enumerate() {
        if external.path.trim().is_empty() {
            diag.error(FieldPath::indexed("externals", idx, "path"), "path must not be empty");
        }

        if external.mode.as_deref().is_some_and(|m| m.trim().is_empty()) {
            diag.error(FieldPath::indexed("externals", idx, "mode"), "mode must not be empty");
        }

        if external.kind == AssetKind::Stylesheet && external.inject.is_some() {
            diag.error_with_hint(
                FieldPath::indexed("externals", idx, "inject"),
                "stylesheets are always injected into <head>",
                "remove `inject` from this entry",
            );
        }
    }
}
