//! Command-line interface for `dpend`.
//!
//! # Examples
//!
//! ```bash
//! # Ten seconds at 60 FPS from the canonical start, one JSON object per frame
//! dpend run
//!
//! # A run file with scripted drags, overriding the second mass
//! dpend run --config swing.toml --m2 2.5 --format table
//!
//! # Only the end-of-run summary
//! dpend run --frames 6000 --format summary
//!
//! # Show what a run file resolves to
//! dpend config --config swing.toml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Headless double pendulum.
///
/// Drives the pendulum physics core frame by frame, the way an animation
/// loop would, and writes the resulting states.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dpend",
    author,
    version,
    about = "Headless double pendulum frame driver",
    long_about = "Steps an interactive double pendulum frame by frame without a window. \
                  Parameter edits, resets, pauses and drags can be scripted from a run file."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Ignored when `RUST_LOG` is set
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        value_enum,
        default_value_t = LogFormat::Text,
        global = true,
        env = "DPEND_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Subcommand (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Simulate and write the frames
    Run(RunArgs),

    /// Print the effective run configuration as TOML
    Config(SettingsArgs),
}

/// Settings shared by every subcommand. Each flag overrides the run file.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// TOML run file
    #[arg(long, short = 'c', env = "DPEND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mass of the first bob
    #[arg(long)]
    pub m1: Option<f64>,

    /// Mass of the second bob
    #[arg(long)]
    pub m2: Option<f64>,

    /// Length of the first rod
    #[arg(long)]
    pub l1: Option<f64>,

    /// Length of the second rod
    #[arg(long)]
    pub l2: Option<f64>,

    /// Gravitational acceleration
    #[arg(long, allow_negative_numbers = true)]
    pub g: Option<f64>,

    /// Initial angle of rod 1, radians from straight down
    #[arg(long, allow_negative_numbers = true)]
    pub a1: Option<f64>,

    /// Initial angular velocity of rod 1
    #[arg(long, allow_negative_numbers = true)]
    pub da1: Option<f64>,

    /// Initial angle of rod 2, radians from straight down
    #[arg(long, allow_negative_numbers = true)]
    pub a2: Option<f64>,

    /// Initial angular velocity of rod 2
    #[arg(long, allow_negative_numbers = true)]
    pub da2: Option<f64>,

    /// Number of frames to simulate
    #[arg(long, short = 'n')]
    pub frames: Option<u64>,

    /// Frame rate of the simulated animation loop
    ///
    /// Below 20 FPS every frame is capped at 0.05 s of simulated time
    #[arg(long)]
    pub fps: Option<u32>,

    /// Trail length for the second bob (0 disables the trail)
    #[arg(long)]
    pub trail: Option<usize>,

    /// Include phase-portrait coordinates in the output
    #[arg(long)]
    pub phase: bool,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Emit every Nth frame only
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            settings: SettingsArgs::default(),
            format: OutputFormat::Jsonl,
            output: None,
            every: 1,
        }
    }
}

/// Frame output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per frame
    #[default]
    Jsonl,
    /// Fixed-width text columns
    Table,
    /// A single JSON summary after the last frame
    Summary,
}

/// Log output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// The subcommand to execute, `run` with defaults if none was given.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Run(RunArgs::default()))
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
