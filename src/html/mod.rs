//! Template loading and tag injection.

mod document;
mod inject;

pub use document::{Document, TemplateDocument};
pub use inject::{TagDefaults, inject_manifest};
