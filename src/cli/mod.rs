//! CLI command definitions for usagi
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod generate;
pub mod init;

use clap::{Parser, Subcommand};
use generate::GenerateArgs;
use init::InitArgs;

/// Flat-config generator for `.coderabbit.yaml`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration source (overrides USAGI_CONFIG_PATH and discovery)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the configuration and write it as YAML
    Generate(GenerateArgs),

    /// Resolve the configuration and report whether it is valid
    Validate,

    /// Write a starter configuration source
    Init(InitArgs),

    /// List built-in presets, or print one as YAML
    Presets {
        /// Preset to print
        name: Option<String>,
    },
}
