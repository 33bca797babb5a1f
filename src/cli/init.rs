//! Init command: writes a starter configuration source.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Starter configuration written by `usagi init`.
pub const TEMPLATE: &str = include_str!("../../defaults/usagi.config.yaml");

/// File name of the starter configuration.
pub const TEMPLATE_FILE: &str = "usagi.config.yaml";

/// Arguments for the init command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing configuration source.
    #[arg(long)]
    pub force: bool,
}

/// Run the init command, returning the path written.
pub fn run_init(args: &InitArgs) -> Result<PathBuf> {
    write_template(&args.dir, args.force)
}

fn write_template(dir: &Path, force: bool) -> Result<PathBuf> {
    let target = dir.join(TEMPLATE_FILE);
    if target.exists() && !force {
        bail!(
            "'{}' already exists. Use --force to overwrite.",
            target.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    fs::write(&target, TEMPLATE)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, load_config_file, resolve};
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_template() {
        let temp = TempDir::new().unwrap();
        let args = InitArgs {
            dir: temp.path().join("project"),
            force: false,
        };

        let path = run_init(&args).unwrap();
        assert_eq!(path, temp.path().join("project").join(TEMPLATE_FILE));
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join(TEMPLATE_FILE);
        fs::write(&target, "language: de-DE\n").unwrap();

        let args = InitArgs {
            dir: temp.path().to_path_buf(),
            force: false,
        };
        assert!(run_init(&args).is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "language: de-DE\n");

        let forced = InitArgs {
            dir: temp.path().to_path_buf(),
            force: true,
        };
        run_init(&forced).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_template_resolves() {
        let temp = TempDir::new().unwrap();
        let path = write_template(temp.path(), false).unwrap();
        let item = load_config_file(&path).unwrap();
        let config = resolve(&item, &Environment::new()).unwrap();

        assert_eq!(config["language"], "en-US");
        assert!(config.get("instruction_sets").is_none());
        assert!(config.get("rule_collections").is_none());
        assert!(config["reviews"]["path_instructions"].is_array());
        assert_eq!(
            config["reviews"]["tools"]["ast-grep"]["packages"][0],
            "@usagi/typescript-rules"
        );
    }
}
