//! Generate subcommand for usagi
//!
//! Resolves the loaded configuration against the process environment and
//! writes the result as YAML.

use clap::Args;
use std::path::PathBuf;

/// Environment variable overriding the default output path.
pub const OUTPUT_ENV: &str = "USAGI_OUTPUT";

/// Output path used when neither `--output` nor `USAGI_OUTPUT` is set.
pub const DEFAULT_OUTPUT: &str = ".coderabbit.yaml";

/// Arguments for the generate subcommand
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output file path (default: $USAGI_OUTPUT or .coderabbit.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

impl GenerateArgs {
    /// Pick the output path: `--output`, then `env_output`, then the default.
    pub fn output_path(&self, env_output: Option<String>) -> PathBuf {
        self.output
            .clone()
            .or_else(|| env_output.filter(|p| !p.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            output: output.map(PathBuf::from),
            stdout: false,
        }
    }

    #[test]
    fn test_output_path_precedence() {
        assert_eq!(
            args(Some("cli.yaml")).output_path(Some("env.yaml".into())),
            PathBuf::from("cli.yaml")
        );
        assert_eq!(
            args(None).output_path(Some("env.yaml".into())),
            PathBuf::from("env.yaml")
        );
        assert_eq!(args(None).output_path(None), PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_empty_env_output_ignored() {
        assert_eq!(
            args(None).output_path(Some(String::new())),
            PathBuf::from(DEFAULT_OUTPUT)
        );
    }
}
