//! Interaction contract between a host UI and the physics.
//!
//! A [`Session`] owns the [`Parameters`], the [`State`] and the captured
//! initial energy, and is the only writer of all three. The host calls
//! [`Session::frame`] (or [`Session::advance`]) once per rendered frame and
//! forwards slider edits, resets, drags and pause toggles to the matching
//! methods.

use core::fmt;
use core::str::FromStr;

use tracing::{debug, trace};

use crate::angle::pointer_angle;
use crate::clock::FrameClock;
use crate::energy::{self, Energy, Rescale};
use crate::error::{PendulumError, Result};
use crate::integrator::Integrator;
use crate::kinematics::BobPositions;
use crate::params::{Parameter, Parameters};
use crate::state::State;

/// One of the two bobs, as addressed by drag gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bob {
    /// The bob at the end of rod 1 (`"a1"`).
    #[cfg_attr(feature = "serde", serde(rename = "a1"))]
    First,
    /// The bob at the end of rod 2 (`"a2"`).
    #[cfg_attr(feature = "serde", serde(rename = "a2"))]
    Second,
}

impl Bob {
    /// The identifier of the angle this bob controls.
    pub const fn id(self) -> &'static str {
        match self {
            Bob::First => "a1",
            Bob::Second => "a2",
        }
    }
}

impl fmt::Display for Bob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Bob {
    type Err = PendulumError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a1" => Ok(Bob::First),
            "a2" => Ok(Bob::Second),
            _ => Err(PendulumError::UnknownBob),
        }
    }
}

/// What happened during one [`Session::frame`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Time step derived from the frame timestamp.
    pub dt: f64,
    /// Whether the integrator ran. `false` while paused or dragging.
    pub stepped: bool,
}

/// A running double pendulum and everything a host may do to it.
///
/// # Example
///
/// ```rust
/// use pendulum::{Bob, Session};
///
/// let mut session = Session::new();
/// session.advance(1.0 / 60.0).unwrap();
///
/// // Slider edits keep the energy captured on the first frame
/// session.set_mass2(2.0).unwrap();
///
/// // Dragging stops everything
/// session.begin_drag(Bob::Second);
/// session.update_drag(Bob::Second, 1.0, -1.0).unwrap();
/// assert_eq!(session.state().da1, 0.0);
/// session.end_drag();
///
/// session.reset().unwrap();
/// assert_eq!(session.state(), &pendulum::State::START);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    params: Parameters,
    state: State,
    initial_energy: Option<f64>,
    running: bool,
    dragging: Option<Bob>,
    integrator: Integrator,
    clock: FrameClock,
}

impl Session {
    /// Creates a running session at the default parameters and start state.
    ///
    /// The initial energy is captured lazily on the first frame.
    pub fn new() -> Self {
        Self::with_state(Parameters::default(), State::default())
    }

    /// Creates a running session from explicit parameters and state.
    ///
    /// Neither is validated; use [`Parameters::validate`] first if the values
    /// come from outside.
    pub fn with_state(params: Parameters, state: State) -> Self {
        Self {
            params,
            state,
            initial_energy: None,
            running: true,
            dragging: None,
            integrator: Integrator::new(),
            clock: FrameClock::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Parameter setters
    // -------------------------------------------------------------------------

    /// Sets the first bob mass. See [`Session::set`].
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for non-finite or
    /// non-positive values.
    pub fn set_mass1(&mut self, value: f64) -> Result<Rescale> {
        self.set(Parameter::Mass1, value)
    }

    /// Sets the second bob mass. See [`Session::set`].
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for non-finite or
    /// non-positive values.
    pub fn set_mass2(&mut self, value: f64) -> Result<Rescale> {
        self.set(Parameter::Mass2, value)
    }

    /// Sets the first rod length. See [`Session::set`].
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for non-finite or
    /// non-positive values.
    pub fn set_length1(&mut self, value: f64) -> Result<Rescale> {
        self.set(Parameter::Length1, value)
    }

    /// Sets the second rod length. See [`Session::set`].
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for non-finite or
    /// non-positive values.
    pub fn set_length2(&mut self, value: f64) -> Result<Rescale> {
        self.set(Parameter::Length2, value)
    }

    /// Sets gravity. Zero and negative values are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] for non-finite values.
    pub fn set_gravity(&mut self, value: f64) -> Result<Rescale> {
        self.set(Parameter::Gravity, value)
    }

    /// Writes one parameter, then rescales the velocities back to the
    /// captured initial energy.
    ///
    /// Before the first frame no energy has been captured yet and the
    /// parameter is written without rescaling ([`Rescale::Unchanged`]).
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidParameter`] if the value is rejected;
    /// nothing is modified in that case.
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<Rescale> {
        self.params.set(parameter, value)?;

        let outcome = match self.initial_energy {
            Some(target) => energy::rescale(&mut self.state, &self.params, target),
            None => Rescale::Unchanged,
        };
        debug!(%parameter, value, ?outcome, "Parameter updated");
        Ok(outcome)
    }

    // -------------------------------------------------------------------------
    // Reset / running
    // -------------------------------------------------------------------------

    /// Returns to the start configuration and captures a new initial energy.
    ///
    /// In order: both angles to `π/2` and both velocities to zero; the
    /// initial energy is recomputed from that state; every parameter is
    /// restored to its default through [`Session::set`], so each restore
    /// takes the normal validation and rescale path. Any active drag is
    /// dropped. The running flag is left alone.
    ///
    /// Hosts keeping a trail of past positions should clear it here.
    ///
    /// Returns the newly captured initial energy.
    ///
    /// # Errors
    ///
    /// Only fails if a default parameter were rejected, which the built-in
    /// defaults never are.
    pub fn reset(&mut self) -> Result<f64> {
        self.state = State::START;
        self.dragging = None;
        let captured = energy::total(&self.state, &self.params);
        self.initial_energy = Some(captured);

        for parameter in Parameter::ALL {
            self.set(parameter, Parameters::DEFAULT.get(parameter))?;
        }

        debug!(initial_energy = captured, "Session reset");
        Ok(captured)
    }

    /// Flips between running and paused. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        debug!(running = self.running, "Running toggled");
        self.running
    }

    /// Whether frames advance the simulation.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    // -------------------------------------------------------------------------
    // Dragging
    // -------------------------------------------------------------------------

    /// Starts dragging `bob`. Integration is suspended until [`Session::end_drag`].
    pub fn begin_drag(&mut self, bob: Bob) {
        self.dragging = Some(bob);
        debug!(%bob, "Drag started");
    }

    /// Points `bob`'s rod at the pointer and stops all motion.
    ///
    /// `x` and `y` are the pointer position relative to the fixed pivot, in
    /// any unit (only the direction matters), with `y` pointing up. The angle
    /// becomes `atan2(x, −y)`. Both angular velocities are zeroed on every
    /// call, not only the dragged one. The drag follows `bob`: if no drag is
    /// active one starts, and if another bob was being dragged the drag
    /// moves to `bob`, so [`Session::dragging`] always names the bob whose
    /// angle was written last.
    ///
    /// Energy is not rescaled: whatever potential energy the drag adds or
    /// removes is kept until the next reset.
    ///
    /// # Errors
    ///
    /// Returns [`PendulumError::InvalidPointer`] for non-finite coordinates;
    /// the state is untouched in that case.
    pub fn update_drag(&mut self, bob: Bob, x: f64, y: f64) -> Result<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PendulumError::InvalidPointer { x, y });
        }
        if self.dragging != Some(bob) {
            self.begin_drag(bob);
        }

        let angle = pointer_angle(x, y);
        match bob {
            Bob::First => self.state.a1 = angle,
            Bob::Second => self.state.a2 = angle,
        }
        self.state.stop();
        trace!(%bob, angle, "Drag updated");
        Ok(())
    }

    /// Releases the drag. Integration resumes from the dragged angle at rest.
    pub fn end_drag(&mut self) {
        if let Some(bob) = self.dragging.take() {
            debug!(%bob, a1 = self.state.a1, a2 = self.state.a2, "Drag ended");
        }
    }

    /// The bob currently being dragged, if any.
    #[inline]
    pub const fn dragging(&self) -> Option<Bob> {
        self.dragging
    }

    // -------------------------------------------------------------------------
    // Frame entry points
    // -------------------------------------------------------------------------

    /// Advances by `dt` seconds if running and not dragging.
    ///
    /// Captures the initial energy first if no frame has done so yet.
    /// Returns whether the integrator ran.
    ///
    /// # Errors
    ///
    /// Propagates [`Integrator::step`] errors. The state is unchanged when an
    /// error is returned.
    pub fn advance(&mut self, dt: f64) -> Result<bool> {
        if self.initial_energy.is_none() {
            let captured = self.total_energy();
            self.initial_energy = Some(captured);
            debug!(initial_energy = captured, "Initial energy captured");
        }

        if !self.running || self.dragging.is_some() {
            return Ok(false);
        }
        self.integrator.step(&mut self.state, &self.params, dt)?;
        Ok(true)
    }

    /// Per-frame entry point for hosts with an animation-frame timestamp in
    /// milliseconds. Derives `dt` with a [`FrameClock`] and calls
    /// [`Session::advance`].
    ///
    /// # Errors
    ///
    /// Propagates [`Session::advance`] errors.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<FrameReport> {
        let dt = self.clock.tick(timestamp_ms);
        let stepped = self.advance(dt)?;
        Ok(FrameReport { dt, stepped })
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// Current angles and angular velocities.
    #[inline]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Current physical constants.
    #[inline]
    pub const fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// The conservation target, once captured.
    #[inline]
    pub const fn initial_energy(&self) -> Option<f64> {
        self.initial_energy
    }

    /// Total energy in the conservation-reference form.
    pub fn total_energy(&self) -> f64 {
        energy::total(&self.state, &self.params)
    }

    /// Kinetic, zero-at-rest potential and total energy, for display.
    pub fn energy(&self) -> Energy {
        Energy::of(&self.state, &self.params)
    }

    /// Cartesian bob positions.
    pub fn positions(&self) -> BobPositions {
        BobPositions::of(&self.state, &self.params)
    }

    /// Both angles wrapped into `(-π, π]`.
    pub fn wrapped_angles(&self) -> (f64, f64) {
        self.state.wrapped_angles()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
