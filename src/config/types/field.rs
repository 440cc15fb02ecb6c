//! Config field path used to point diagnostics at a TOML key.

/// Dotted path of a config field, e.g. `hash.placeholder` or `externals[2].path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path of one element of an array-of-tables field.
    #[inline]
    pub fn indexed(array: &str, idx: usize, field: &str) -> Self {
        Self(format!("{array}[{idx}].{field}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
