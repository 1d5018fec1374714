#![forbid(unsafe_code)]

//! # dpend
//!
//! Headless host for the [`pendulum`] physics core.
//!
//! The core owns no loop and no clock. This crate supplies both the way a
//! browser animation loop would: one timestamp per frame, scripted user
//! interaction in between, and a bounded trail of the second bob. Frames are
//! written as JSON lines, a text table, or a single summary.
//!
//! ## Usage
//!
//! ```bash
//! dpend run --frames 600 --format table
//! dpend run --config swing.toml --phase > frames.jsonl
//! dpend config --config swing.toml
//! ```

pub mod cli;
pub mod config;
pub mod driver;
pub mod logging;
pub mod output;
pub mod phase;
pub mod script;
pub mod trail;

pub use cli::{Cli, Command, LogFormat, LogLevel, OutputFormat, RunArgs, SettingsArgs};
pub use config::{Config, ConfigError, RunSettings};
pub use driver::{Driver, FrameError, FrameRecord, Summary};
pub use output::FrameWriter;
pub use phase::{PhasePoint, PhasePortrait};
pub use script::{Action, Event, Script};
pub use trail::{MAX_TRAIL, Trail};
