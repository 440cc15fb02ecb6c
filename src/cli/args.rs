//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::asset::{HashAlgorithm, InjectLocation};

/// Finalize a bundler's output: hash asset names and write the HTML entry
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: htmlseal.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "htmlseal.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Hash placeholder assets, inject tags and write the HTML document
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the merged asset manifest as JSON without touching any file
    #[command(visible_alias = "m")]
    Manifest {
        #[command(flatten)]
        args: ManifestArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Entry file the bundler just wrote (e.g. dist/main.[hash].js)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub entry: PathBuf,

    /// File holding the bundler's finalized entry code (default: the entry itself).
    /// Use `-` to read it from stdin.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub code: Option<PathBuf>,

    /// HTML template (overrides `template`)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub template: Option<PathBuf>,

    /// Output file name (overrides `output`)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output directory (overrides `output_dir`)
    #[arg(short = 'd', long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Default location for script tags
    #[arg(short, long, value_enum)]
    pub inject: Option<InjectLocation>,

    /// Default script `type` attribute (e.g. module)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Digest used for hashed file names
    #[arg(short, long, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Delete hashed files left over from earlier builds
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub prune: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Manifest command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Entry file the bundler just wrote
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub entry: PathBuf,

    /// Output directory (overrides `output_dir`)
    #[arg(short = 'd', long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }

    /// Commands that still have everything they need without a config file.
    pub fn can_run_without_config(&self) -> bool {
        match &self.command {
            Commands::Build { build_args } => build_args.template.is_some(),
            Commands::Manifest { .. } => true,
        }
    }
}
