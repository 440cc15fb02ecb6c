//! htmlseal - finalize a bundler's output into a hashed, linked HTML entry.

mod asset;
mod cli;
mod config;
mod error;
mod html;
mod logger;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SealConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SealConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { build_args } => cli::build::build(build_args, &config).map(|_| ()),
        Commands::Manifest { args } => cli::manifest::print_manifest(args, &config),
    }
}
