//! The host side of the animation loop.
//!
//! A [`Driver`] plays the part of a browser's animation-frame callback: it
//! hands the [`Session`] one timestamp per frame, fires scripted events
//! before each frame, keeps the trail, and turns the result into a
//! [`FrameRecord`].

use pendulum::{Bob, BobPositions, Energy, Parameters, PendulumError, Point, Session, State};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::phase::PhasePortrait;
use crate::script::{Action, Script};
use crate::trail::Trail;

/// Everything observable after one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Zero-based frame index.
    pub frame: u64,
    /// Host timestamp handed to the session, in milliseconds.
    pub time_ms: f64,
    /// Time step derived from the timestamp, in seconds.
    pub dt: f64,
    /// Whether the integrator ran this frame.
    pub stepped: bool,
    /// Running flag after the frame.
    pub running: bool,
    /// Bob being dragged, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragging: Option<Bob>,
    /// Raw, unwrapped state.
    pub state: State,
    /// Both angles wrapped into `(-π, π]`.
    pub wrapped: [f64; 2],
    /// Cartesian bob positions.
    pub positions: BobPositions,
    /// Display energy (zero-at-rest potential).
    pub energy: Energy,
    /// Total energy in the conservation-reference form.
    pub total_energy: f64,
    /// `total_energy` minus the captured initial energy.
    pub drift: f64,
    /// Points currently in the trail.
    pub trail_length: usize,
    /// Phase-portrait coordinates, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<PhasePortrait>,
    /// Scripted actions fired before this frame.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<&'static str>,
}

/// End-of-run figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Frames driven.
    pub frames: u64,
    /// Frames in which the integrator ran.
    pub stepped_frames: u64,
    /// Scripted events fired.
    pub events_fired: usize,
    /// Conservation target at the end of the run.
    pub initial_energy: Option<f64>,
    /// Total energy at the end of the run.
    pub final_energy: f64,
    /// Largest `|drift|` seen. Drags and resets count too, since a drag
    /// changes the energy without moving the target.
    pub max_drift: f64,
    /// Parameters at the end of the run.
    pub parameters: Parameters,
    /// State at the end of the run.
    pub state: State,
    /// Bob positions at the end of the run.
    pub positions: BobPositions,
    /// Points in the trail at the end of the run.
    pub trail_length: usize,
    /// Newest trail point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_end: Option<Point>,
}

/// A session error, tagged with the frame it happened in.
#[derive(Debug, thiserror::Error)]
#[error("frame {frame}: {source}")]
pub struct FrameError {
    /// Frame index.
    pub frame: u64,
    /// What the session reported.
    #[source]
    pub source: PendulumError,
}

/// Drives a [`Session`] through a configured run.
#[derive(Debug, Clone)]
pub struct Driver {
    session: Session,
    script: Script,
    trail: Trail,
    phase: bool,
    frame_ms: f64,
    frames: u64,
    frame: u64,
    stepped_frames: u64,
    events_fired: usize,
    max_drift: f64,
}

impl Driver {
    /// Prepares a run. The configuration is expected to be validated.
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::with_state(config.parameters, config.initial),
            script: Script::new(config.events.clone()),
            trail: Trail::new(config.run.trail_length),
            phase: config.run.phase,
            frame_ms: 1000.0 / f64::from(config.run.fps),
            frames: config.run.frames,
            frame: 0,
            stepped_frames: 0,
            events_fired: 0,
            max_drift: 0.0,
        }
    }

    /// The session being driven.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The trail so far.
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Runs the next frame, or returns `None` once the run is over.
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] if a scripted event is rejected or the
    /// integration becomes non-finite. The session state is left as it was
    /// before the failing call.
    #[expect(
        clippy::cast_precision_loss,
        reason = "frame counts stay far below 2^52"
    )]
    pub fn next_frame(&mut self) -> Result<Option<FrameRecord>, FrameError> {
        if self.frame >= self.frames {
            return Ok(None);
        }
        let frame = self.frame;
        let fail = |source| FrameError { frame, source };

        let mut fired = Vec::new();
        for event in self.script.due(frame) {
            event.action.apply(&mut self.session).map_err(fail)?;
            if matches!(event.action, Action::Reset) {
                self.trail.clear();
            }
            debug!(frame, action = event.action.name(), "Event applied");
            fired.push(event.action.name());
        }
        self.events_fired += fired.len();

        let time_ms = (frame + 1) as f64 * self.frame_ms;
        let report = self.session.frame(time_ms).map_err(|source| {
            warn!(frame, %source, "Frame rejected");
            fail(source)
        })?;
        if report.stepped {
            self.stepped_frames += 1;
        }

        let running = self.session.is_running();
        let positions = self.session.positions();
        if running {
            self.trail.push(positions.second);
        }

        let state = *self.session.state();
        let total_energy = self.session.total_energy();
        let drift = self
            .session
            .initial_energy()
            .map_or(0.0, |initial| total_energy - initial);
        self.max_drift = self.max_drift.max(drift.abs());
        let (w1, w2) = self.session.wrapped_angles();

        self.frame += 1;
        Ok(Some(FrameRecord {
            frame,
            time_ms,
            dt: report.dt,
            stepped: report.stepped,
            running,
            dragging: self.session.dragging(),
            state,
            wrapped: [w1, w2],
            positions,
            energy: self.session.energy(),
            total_energy,
            drift,
            trail_length: self.trail.len(),
            phase: self.phase.then(|| PhasePortrait::of(&state)),
            events: fired,
        }))
    }

    /// Figures for the frames driven so far.
    pub fn summary(&self) -> Summary {
        Summary {
            frames: self.frame,
            stepped_frames: self.stepped_frames,
            events_fired: self.events_fired,
            initial_energy: self.session.initial_energy(),
            final_energy: self.session.total_energy(),
            max_drift: self.max_drift,
            parameters: *self.session.parameters(),
            state: *self.session.state(),
            positions: self.session.positions(),
            trail_length: self.trail.len(),
            trail_end: self.trail.latest(),
        }
    }
}
