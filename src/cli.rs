// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `buildwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buildwatch",
    version,
    about = "Build, watch and live-reload a front-end project.",
    long_about = None
)]
pub struct CliArgs {
    /// Build mode, selecting source-map and verification behaviour.
    #[arg(value_enum, value_name = "MODE", default_value = "full")]
    pub mode: Mode,

    /// Path to the config file (TOML).
    ///
    /// Default: `Buildwatch.toml` in the current working directory. A missing
    /// file is not an error; every setting has a documented default.
    #[arg(long, value_name = "PATH", default_value = "Buildwatch.toml")]
    pub config: String,

    /// Run the initial build once and exit, without watching.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BUILDWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Build mode as exposed on the CLI.
///
/// Each mode is a row in a fixed table of two feature flags, see
/// [`ModeFlags::for_mode`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Full,
    Bundle,
    Transpile,
    Lean,
}

/// Feature flags derived from the selected mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeFlags {
    /// Emit source maps from the style compiler and bundler.
    pub source_maps: bool,
    /// After each fast rebuild, schedule a slow full-program type check.
    pub verify: bool,
}

impl ModeFlags {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Full => ModeFlags { source_maps: true, verify: true },
            Mode::Bundle => ModeFlags { source_maps: true, verify: false },
            Mode::Transpile => ModeFlags { source_maps: false, verify: true },
            Mode::Lean => ModeFlags { source_maps: false, verify: false },
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
