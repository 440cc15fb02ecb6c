//! Reference tag injection.
//!
//! Appends one tag per manifest entry, in manifest order:
//!
//! | Kind       | Tag                                             | Location                          |
//! |------------|-------------------------------------------------|-----------------------------------|
//! | Script     | `<script src="…" type="…"></script>`            | asset → config default → `<body>` |
//! | Stylesheet | `<link rel="stylesheet" href="…">`              | always `<head>`                   |
//!
//! Template content is never removed or deduplicated.

use std::path::Path;

use crate::asset::{AssetDescriptor, AssetKind, InjectLocation, Manifest, is_external_url};
use crate::utils::path::relative_to;

use super::Document;

/// Configuration-level fallbacks for tag rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDefaults<'a> {
    /// Location for scripts that do not set one.
    pub inject: Option<InjectLocation>,
    /// Script `type` for scripts that do not set one.
    pub mode: Option<&'a str>,
}

/// Append a tag for every manifest entry to `doc`.
pub fn inject_manifest<D: Document + ?Sized>(
    doc: &mut D,
    manifest: &Manifest,
    output_root: &Path,
    defaults: &TagDefaults<'_>,
) {
    for asset in manifest {
        let (location, tag) = render_tag(asset, output_root, defaults);
        doc.append(location, &tag);
    }
}

/// Effective reference for an asset: URLs verbatim, files root-relative.
fn asset_src(path: &str, output_root: &Path) -> String {
    if is_external_url(path) {
        path.to_string()
    } else {
        relative_to(Path::new(path), output_root)
    }
}

/// Build the tag for one asset and pick where it goes.
fn render_tag(
    asset: &AssetDescriptor,
    output_root: &Path,
    defaults: &TagDefaults<'_>,
) -> (InjectLocation, String) {
    let src = asset_src(&asset.path, output_root);

    match asset.kind {
        AssetKind::Script => {
            let mut attrs = vec![("src", src.as_str())];
            if let Some(mode) = asset.mode.as_deref().or(defaults.mode) {
                attrs.push(("type", mode));
            }
            let attrs = attrs
                .iter()
                .map(|(key, value)| format!("{key}=\"{value}\""))
                .collect::<Vec<_>>()
                .join(" ");

            let location = asset
                .inject
                .or(defaults.inject)
                .unwrap_or(InjectLocation::Body);
            (location, format!("<script {attrs}></script>\n"))
        }
        // Stylesheets ignore inject overrides
        AssetKind::Stylesheet => (
            InjectLocation::Head,
            format!("<link rel=\"stylesheet\" href=\"{src}\">\n"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::TemplateDocument;

    const ROOT: &str = "/out";

    fn render(asset: AssetDescriptor, defaults: TagDefaults<'_>) -> (InjectLocation, String) {
        render_tag(&asset, Path::new(ROOT), &defaults)
    }

    #[test]
    fn test_script_defaults_to_body() {
        let (location, tag) = render(AssetDescriptor::script("/out/app.js"), TagDefaults::default());
        assert_eq!(location, InjectLocation::Body);
        assert_eq!(tag, "<script src=\"app.js\"></script>\n");
    }

    #[test]
    fn test_script_inject_head() {
        let asset = AssetDescriptor::script("/out/app.js").with_inject(InjectLocation::Head);
        let (location, _) = render(asset, TagDefaults::default());
        assert_eq!(location, InjectLocation::Head);
    }

    #[test]
    fn test_script_config_default_location() {
        let defaults = TagDefaults {
            inject: Some(InjectLocation::Head),
            mode: None,
        };
        let (location, _) = render(AssetDescriptor::script("/out/app.js"), defaults);
        assert_eq!(location, InjectLocation::Head);

        // Asset-level setting wins
        let asset = AssetDescriptor::script("/out/app.js").with_inject(InjectLocation::Body);
        let (location, _) = render(asset, defaults);
        assert_eq!(location, InjectLocation::Body);
    }

    #[test]
    fn test_script_mode_attribute_order() {
        let defaults = TagDefaults {
            inject: None,
            mode: Some("text/javascript"),
        };
        let (_, tag) = render(AssetDescriptor::script("/out/app.js"), defaults);
        assert_eq!(tag, "<script src=\"app.js\" type=\"text/javascript\"></script>\n");

        let asset = AssetDescriptor::script("/out/app.js").with_mode("module");
        let (_, tag) = render(asset, defaults);
        assert_eq!(tag, "<script src=\"app.js\" type=\"module\"></script>\n");
    }

    #[test]
    fn test_stylesheet_always_head() {
        let asset = AssetDescriptor::stylesheet("/out/css/site.css").with_inject(InjectLocation::Body);
        let defaults = TagDefaults {
            inject: Some(InjectLocation::Body),
            mode: Some("module"),
        };
        let (location, tag) = render(asset, defaults);
        assert_eq!(location, InjectLocation::Head);
        assert_eq!(tag, "<link rel=\"stylesheet\" href=\"css/site.css\">\n");
    }

    #[test]
    fn test_external_url_is_verbatim() {
        let asset = AssetDescriptor::script("https://cdn.example.com/lib.js");
        let (_, tag) = render(asset, TagDefaults::default());
        assert_eq!(tag, "<script src=\"https://cdn.example.com/lib.js\"></script>\n");
    }

    #[test]
    fn test_local_path_outside_root() {
        assert_eq!(asset_src("/vendor/lib.js", Path::new(ROOT)), "../vendor/lib.js");
    }

    #[test]
    fn test_inject_manifest_keeps_order() {
        let mut doc = TemplateDocument::parse("<html><head></head><body></body></html>").unwrap();
        let manifest = Manifest::new(vec![
            AssetDescriptor::script("https://cdn.example.com/a.js"),
            AssetDescriptor::stylesheet("/out/a.css"),
            AssetDescriptor::script("/out/b.js").with_inject(InjectLocation::Head),
            AssetDescriptor::script("/out/c.js"),
            AssetDescriptor::stylesheet("/out/b.css"),
        ]);

        inject_manifest(&mut doc, &manifest, Path::new(ROOT), &TagDefaults::default());

        assert_eq!(
            doc.serialize(),
            concat!(
                "<html><head>",
                "<link rel=\"stylesheet\" href=\"a.css\">\n",
                "<script src=\"b.js\"></script>\n",
                "<link rel=\"stylesheet\" href=\"b.css\">\n",
                "</head><body>",
                "<script src=\"https://cdn.example.com/a.js\"></script>\n",
                "<script src=\"c.js\"></script>\n",
                "</body></html>"
            )
        );
    }
}
