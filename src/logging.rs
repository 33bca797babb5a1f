//! Logging setup for the command-line tool.
//!
//! The library only emits `tracing` events; this module installs the
//! subscriber that decides where they go.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Off,
    Stdout,
    Stderr,
    /// Append to a file, without ANSI colors.
    File(PathBuf),
}

impl LogSink {
    /// Parse the `--log` option: `0`/`off`, `1`/`stdout`, `2`/`stderr`, or a file name.
    pub fn parse(value: &str) -> Self {
        match value {
            "0" | "off" => LogSink::Off,
            "1" | "stdout" => LogSink::Stdout,
            "2" | "stderr" => LogSink::Stderr,
            filename => LogSink::File(PathBuf::from(filename)),
        }
    }
}

/// Default level for the given verbosity.
pub fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

/// Build the event filter. `RUST_LOG` wins over the verbosity flag.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level(verbose)).into())
        .from_env_lossy()
}

/// Install the global subscriber.
pub fn init(sink: &LogSink, verbose: bool) -> Result<()> {
    match sink {
        LogSink::Off => {
            // No logging
        }
        LogSink::Stdout => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter(verbose))
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogSink::Stderr => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter(verbose))
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter(verbose))
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sinks() {
        assert_eq!(LogSink::parse("0"), LogSink::Off);
        assert_eq!(LogSink::parse("off"), LogSink::Off);
        assert_eq!(LogSink::parse("1"), LogSink::Stdout);
        assert_eq!(LogSink::parse("stdout"), LogSink::Stdout);
        assert_eq!(LogSink::parse("2"), LogSink::Stderr);
        assert_eq!(LogSink::parse("stderr"), LogSink::Stderr);
        assert_eq!(
            LogSink::parse("usagi.log"),
            LogSink::File(PathBuf::from("usagi.log"))
        );
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), Level::DEBUG);
        assert_eq!(default_level(false), Level::INFO);
    }
}
