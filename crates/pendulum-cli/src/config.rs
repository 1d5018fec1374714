//! Run configuration for `dpend`.
//!
//! A [`Config`] is resolved in three layers: built-in defaults, then an
//! optional TOML run file, then command-line flags. The result is validated
//! once, up front, so the frame loop never sees a rejected value.
//!
//! # Run file
//!
//! ```toml
//! [parameters]
//! m2 = 2.0
//! g = 9.8
//!
//! [initial]
//! a1 = 1.2
//! a2 = -0.4
//!
//! [run]
//! frames = 1200
//! fps = 60
//! trail_length = 200
//! phase = true
//!
//! [[events]]
//! frame = 300
//! action = "set"
//! parameter = "l2"
//! value = 0.8
//!
//! [[events]]
//! frame = 600
//! action = "reset"
//! ```
//!
//! Every section and every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use pendulum::{Parameters, PendulumError, State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cli::SettingsArgs;
use crate::script::Event;
use crate::trail::MAX_TRAIL;

/// Fully resolved run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Physical constants at the first frame.
    pub parameters: Parameters,

    /// Angles and angular velocities at the first frame.
    pub initial: State,

    /// Loop settings.
    pub run: RunSettings,

    /// Scripted interaction, applied at the start of the given frames.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

/// Settings of the simulated animation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// Number of frames to simulate.
    pub frames: u64,

    /// Frame rate the host timestamps are generated at.
    pub fps: u32,

    /// Trail length for the second bob. Zero disables the trail.
    pub trail_length: usize,

    /// Whether frame records carry phase-portrait coordinates.
    pub phase: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60,
            trail_length: MAX_TRAIL,
            phase: false,
        }
    }
}

impl Config {
    /// Load a run file. Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid run file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Create config from CLI arguments: defaults, then the run file named
    /// by `--config` if any, then individual flags. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the run file cannot be loaded or the resolved
    /// configuration is invalid.
    pub fn from_cli(args: &SettingsArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite fields with any values given on the command line.
    pub fn apply_overrides(&mut self, args: &SettingsArgs) {
        let p = &mut self.parameters;
        override_with(&mut p.m1, args.m1);
        override_with(&mut p.m2, args.m2);
        override_with(&mut p.l1, args.l1);
        override_with(&mut p.l2, args.l2);
        override_with(&mut p.g, args.g);

        let s = &mut self.initial;
        override_with(&mut s.a1, args.a1);
        override_with(&mut s.da1, args.da1);
        override_with(&mut s.a2, args.a2);
        override_with(&mut s.da2, args.da2);

        override_with(&mut self.run.frames, args.frames);
        override_with(&mut self.run.fps, args.fps);
        override_with(&mut self.run.trail_length, args.trail);
        if args.phase {
            self.run.phase = true;
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found. Events scheduled past the last
    /// frame are not an error; they are logged and never fire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;

        if !self.initial.is_finite() {
            return Err(ConfigError::NonFiniteInitialState);
        }
        if self.run.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.run.trail_length > MAX_TRAIL {
            return Err(ConfigError::TrailTooLong(self.run.trail_length));
        }

        for event in &self.events {
            event.action.validate()?;
            if event.frame >= self.run.frames {
                warn!(
                    frame = event.frame,
                    frames = self.run.frames,
                    action = event.action.name(),
                    "Event is past the last frame and will not fire"
                );
            }
        }

        Ok(())
    }

    /// Render the configuration as a TOML run file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn override_with<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Run file could not be read.
    #[error("cannot read run file {}: {source}", .path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Run file is not valid TOML or has unknown or mistyped fields.
    #[error("invalid run file {}: {source}", .path.display())]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser diagnostics.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be written back out.
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A parameter, scripted value or pointer position was rejected.
    #[error(transparent)]
    Physics(#[from] PendulumError),

    /// An initial angle or velocity is NaN or infinite.
    #[error("initial state must be finite")]
    NonFiniteInitialState,

    /// Frame rate of zero.
    #[error("fps must be at least 1")]
    ZeroFps,

    /// Trail longer than the supported maximum.
    #[error("trail length {0} exceeds the maximum of {max}", max = MAX_TRAIL)]
    TrailTooLong(usize),
}
