//! Asset descriptor and manifest types.

use serde::{Deserialize, Serialize};

/// Kind of generated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// `.js` file, referenced by `<script>`.
    #[serde(alias = "js")]
    Script,
    /// `.css` file, referenced by `<link rel="stylesheet">`.
    #[serde(alias = "css")]
    Stylesheet,
}

impl AssetKind {
    /// Classify a file name by extension (case-sensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".js") {
            Some(Self::Script)
        } else if name.ends_with(".css") {
            Some(Self::Stylesheet)
        } else {
            None
        }
    }
}

/// Where an external asset is merged relative to collected assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

/// Document region a tag is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InjectLocation {
    Head,
    Body,
}

/// A script or stylesheet to reference from the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub kind: AssetKind,
    /// File path or absolute URL. May contain the hash placeholder.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Overrides the configured default location (scripts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<InjectLocation>,
    /// Value of the script `type` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl AssetDescriptor {
    pub fn new(kind: AssetKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            position: None,
            inject: None,
            mode: None,
        }
    }

    pub fn script(path: impl Into<String>) -> Self {
        Self::new(AssetKind::Script, path)
    }

    pub fn stylesheet(path: impl Into<String>) -> Self {
        Self::new(AssetKind::Stylesheet, path)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_inject(mut self, inject: InjectLocation) -> Self {
        self.inject = Some(inject);
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

/// Ordered list of assets to inject. Order equals tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest(Vec<AssetDescriptor>);

impl Manifest {
    pub fn new(entries: Vec<AssetDescriptor>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetDescriptor> {
        self.0.iter()
    }

    /// Mutable access for in-place path rewrites. Entries cannot be
    /// added, removed or reordered through this.
    pub fn entries_mut(&mut self) -> &mut [AssetDescriptor] {
        &mut self.0
    }

    /// Paths in manifest order.
    pub fn paths(&self) -> Vec<&str> {
        self.0.iter().map(|a| a.path.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a AssetDescriptor;
    type IntoIter = std::slice::Iter<'a, AssetDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
