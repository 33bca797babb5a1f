//! usagi command-line tool
//!
//! Loads a flat-config source, resolves it against the process environment
//! and writes `.coderabbit.yaml`.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::Write;
use tracing::info;
use usagi::cli::generate::{GenerateArgs, OUTPUT_ENV};
use usagi::cli::init::{InitArgs, run_init};
use usagi::cli::{Cli, Command};
use usagi::config::{ConfigLoader, ConfigPaths, resolve_with_process_env};
use usagi::logging::{self, LogSink};
use usagi::{presets, to_yaml};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogSink::parse(&cli.log), cli.verbose)?;

    match cli.command {
        Command::Generate(args) => run_generate(cli.config.as_deref(), &args),
        Command::Validate => run_validate(cli.config.as_deref()),
        Command::Init(args) => init(&args),
        Command::Presets { name } => run_presets(name.as_deref()),
    }
}

/// Load the configuration source. `--config` beats `USAGI_CONFIG_PATH` and discovery.
fn load(config: Option<&str>) -> Result<ConfigLoader> {
    let mut paths = ConfigPaths::discover();
    if let Some(path) = config {
        paths = paths.with_explicit(path);
    }
    ConfigLoader::load_with_paths(paths).context("Failed to load configuration")
}

fn run_generate(config: Option<&str>, args: &GenerateArgs) -> Result<()> {
    let loader = load(config)?;
    let resolved = resolve_with_process_env(loader.item()).with_context(|| {
        format!(
            "Failed to resolve configuration from {}",
            loader.config_path().display()
        )
    })?;
    let yaml = to_yaml(&resolved)?;

    if args.stdout {
        std::io::stdout().write_all(yaml.as_bytes())?;
        return Ok(());
    }

    let output = args.output_path(std::env::var(OUTPUT_ENV).ok());
    std::fs::write(&output, yaml)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), "Wrote configuration");
    println!("Generated {}", output.display());
    Ok(())
}

fn run_validate(config: Option<&str>) -> Result<()> {
    let loader = load(config)?;
    resolve_with_process_env(loader.item()).with_context(|| {
        format!(
            "Invalid configuration in {}",
            loader.config_path().display()
        )
    })?;
    println!("Configuration is valid");
    Ok(())
}

fn init(args: &InitArgs) -> Result<()> {
    let path = run_init(args)?;
    println!("Created {}", path.display());
    Ok(())
}

fn run_presets(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        for name in presets::names() {
            println!("{}", name);
        }
        return Ok(());
    };

    let Some(preset) = presets::by_name(name) else {
        bail!(
            "Unknown preset '{}'. Available: {}",
            name,
            presets::names().join(", ")
        );
    };
    print!("{}", to_yaml(&preset)?);
    Ok(())
}
