//! Configuration management for `htmlseal.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── hash       # [hash]
//! │   └── externals  # [[externals]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SealConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! template   = "src/index.html"  # required for `build`
//! output     = "index.html"      # default: template file name
//! output_dir = "dist"            # default: derived from --entry
//! inject     = "body"            # default location for scripts
//! mode       = "module"          # default script `type`
//! ```
//!
//! Relative paths in the file are anchored at the directory holding it.
//! Paths given on the command line are anchored at the working directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::HashConfig;

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use section::{normalize_externals, validate_externals};

use crate::{
    asset::{AssetDescriptor, InjectLocation},
    cli::{BuildArgs, Cli, Commands, ManifestArgs},
    html::TagDefaults,
    log,
    utils::path::{normalize_path, resolve_path},
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name used when neither `output` nor a template name is available.
const FALLBACK_OUTPUT: &str = "index.html";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing htmlseal.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SealConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root: parent of the config file, or the working directory
    /// when running without one (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// HTML template the tags are injected into
    pub template: PathBuf,

    /// Output file name, written inside the output directory
    pub output: Option<String>,

    /// Output directory override
    pub output_dir: Option<PathBuf>,

    /// Default location for scripts without their own `inject`
    pub inject: Option<InjectLocation>,

    /// Default `type` attribute for scripts without their own `mode`
    pub mode: Option<String>,

    /// Hashing settings
    pub hash: HashConfig,

    /// Extra assets merged around the collected ones
    pub externals: Vec<AssetDescriptor>,
}

impl SealConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The file may be absent
    /// when the command line supplies everything a run needs.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(normalize_path(&path));
                config
            }
            None if cli.can_run_without_config() => Self::default(),
            None => bail!(ConfigError::Validation(format!(
                "config file `{}` not found (create one or pass --template)",
                cli.config.display()
            ))),
        };

        let root = config
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.clone(), Path::to_path_buf);
        config.set_root(&root);
        config.normalize_paths();
        config.apply_command_options(cli, &cwd);

        config.validate(cli)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = normalize_path(path);
    }

    /// File name of the rendered document: `output`, else the template's name.
    pub fn output_file_name(&self) -> PathBuf {
        match &self.output {
            Some(name) => PathBuf::from(name),
            None => self
                .template
                .file_name()
                .map_or_else(|| PathBuf::from(FALLBACK_OUTPUT), PathBuf::from),
        }
    }

    /// Config-level fallbacks for tag rendering.
    pub fn tag_defaults(&self) -> TagDefaults<'_> {
        TagDefaults {
            inject: self.inject,
            mode: self.mode.as_deref(),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli, cwd: &Path) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args, cwd),
            Commands::Manifest { args } => self.apply_manifest_args(args, cwd),
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs, cwd: &Path) {
        // Set verbose mode globally
        crate::logger::set_verbose(args.verbose);

        if let Some(template) = &args.template {
            self.template = resolve_path(template, cwd);
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = Some(resolve_path(dir, cwd));
        }
        if args.output.is_some() {
            self.output = args.output.clone();
        }
        if args.inject.is_some() {
            self.inject = args.inject;
        }
        if args.mode.is_some() {
            self.mode = args.mode.clone();
        }

        Self::update_option(&mut self.hash.algorithm, args.algorithm.as_ref());
        Self::update_option(&mut self.hash.prune, args.prune.as_ref());
    }

    /// Apply manifest arguments from CLI.
    fn apply_manifest_args(&mut self, args: &ManifestArgs, cwd: &Path) {
        if let Some(dir) = &args.output_dir {
            self.output_dir = Some(resolve_path(dir, cwd));
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Anchor every configured path at the project root.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();

        if !self.template.as_os_str().is_empty() {
            self.template = resolve_path(&self.template, &root);
        }
        if let Some(dir) = self.output_dir.take() {
            self.output_dir = Some(resolve_path(&dir, &root));
        }
        normalize_externals(&mut self.externals, &root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if cli.is_build() {
            self.validate_build(&mut diag);
        }
        self.hash.validate(&mut diag);
        validate_externals(&self.externals, &mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Fields only `build` depends on.
    fn validate_build(&self, diag: &mut ConfigDiagnostics) {
        if self.template.as_os_str().is_empty() {
            diag.error_with_hint(
                "template",
                "no template configured",
                "set `template` in htmlseal.toml or pass --template",
            );
        } else if !self.template.is_file() {
            diag.error(
                "template",
                format!("template `{}` does not exist", self.template.display()),
            );
        }

        if let Some(output) = &self.output
            && (output.trim().is_empty() || output.contains(['/', '\\']))
        {
            diag.error_with_hint(
                "output",
                format!("invalid output file name `{output}`"),
                "use a plain file name; set `output_dir` for the directory",
            );
        }

        if self.mode.as_deref().is_some_and(|m| m.trim().is_empty()) {
            diag.error("mode", "mode must not be empty");
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SealConfig {
    let (parsed, ignored) = SealConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("htmlseal").chain(args.iter().copied()))
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SealConfig::parse_with_ignored("template = [\"unclosed\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_config_default() {
        let config = SealConfig::default();
        assert!(config.config_path.is_none());
        assert_eq!(config.template, PathBuf::new());
        assert!(config.output.is_none());
        assert!(config.externals.is_empty());
        assert_eq!(config.hash.placeholder, "[hash]");
    }

    #[test]
    fn test_parse_full_config() {
        let config = test_parse_config(
            r#"template = "src/index.html"
output = "app.html"
output_dir = "dist"
inject = "head"
mode = "module"

[hash]
algorithm = "sha256"

[[externals]]
kind = "stylesheet"
path = "https://cdn.example.com/a.css""#,
        );
        assert_eq!(config.template, PathBuf::from("src/index.html"));
        assert_eq!(config.output.as_deref(), Some("app.html"));
        assert_eq!(config.output_dir, Some(PathBuf::from("dist")));
        assert_eq!(config.inject, Some(InjectLocation::Head));
        assert_eq!(config.mode.as_deref(), Some("module"));
        assert_eq!(config.externals.len(), 1);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "template = \"index.html\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SealConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.template, PathBuf::from("index.html"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_output_file_name() {
        let mut config = SealConfig {
            template: PathBuf::from("/site/src/page.html"),
            ..SealConfig::default()
        };
        assert_eq!(config.output_file_name(), PathBuf::from("page.html"));

        config.output = Some("index.html".into());
        assert_eq!(config.output_file_name(), PathBuf::from("index.html"));
    }

    #[test]
    fn test_normalize_paths_against_root() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(
            "template = \"src/index.html\"\noutput_dir = \"dist\"\n[[externals]]\nkind = \"js\"\npath = \"vendor/a.js\"",
        );
        config.set_root(dir.path());
        config.normalize_paths();

        let root = config.get_root().to_path_buf();
        assert_eq!(config.template, root.join("src/index.html"));
        assert_eq!(config.output_dir, Some(root.join("dist")));
        assert!(config.externals[0].path.ends_with("/vendor/a.js"));
        assert!(Path::new(&config.externals[0].path).is_absolute());
    }

    #[test]
    fn test_build_args_override() {
        let dir = TempDir::new().unwrap();
        let cli = cli(&[
            "build",
            "--entry",
            "dist/main.js",
            "-o",
            "out.html",
            "--inject",
            "head",
            "--algorithm",
            "blake3",
            "--prune",
        ]);

        let mut config = test_parse_config("output = \"index.html\"\n[hash]\nprune = false");
        config.apply_command_options(&cli, dir.path());

        assert_eq!(config.output.as_deref(), Some("out.html"));
        assert_eq!(config.inject, Some(InjectLocation::Head));
        assert_eq!(config.hash.algorithm, crate::asset::HashAlgorithm::Blake3);
        assert!(config.hash.prune);
    }

    #[test]
    fn test_validate_build_requires_template() {
        let cli = cli(&["build", "--entry", "dist/main.js"]);
        let err = SealConfig::default().validate(&cli).unwrap_err();
        let err = err.downcast::<ConfigError>().unwrap();
        let ConfigError::Diagnostics(diag) = err else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.errors()[0].field.as_str(), "template");
    }

    #[test]
    fn test_validate_manifest_without_template() {
        let cli = cli(&["manifest", "--entry", "dist/main.js"]);
        assert!(SealConfig::default().validate(&cli).is_ok());
    }

    #[test]
    fn test_validate_output_name() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("index.html");
        fs::write(&template, "<html></html>").unwrap();

        let cli = cli(&["build", "--entry", "dist/main.js"]);
        let config = SealConfig {
            template,
            output: Some("nested/index.html".into()),
            ..SealConfig::default()
        };
        assert!(config.validate(&cli).is_err());
    }
}
