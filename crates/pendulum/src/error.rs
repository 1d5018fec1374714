//! Error types for the pendulum core.

use thiserror::Error;

use crate::params::Parameter;

/// Errors reported by the pendulum core.
///
/// The physics itself has very few failure modes. Unreachable rescale targets
/// and zero-velocity rescales are not errors; they are reported through
/// [`Rescale`](crate::Rescale). What remains is rejected input and the
/// singular-configuration case.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`InvalidParameter`](PendulumError::InvalidParameter) | Keep the previous value, re-prompt |
/// | [`InvalidTimeStep`](PendulumError::InvalidTimeStep) | Skip the frame |
/// | [`InvalidPointer`](PendulumError::InvalidPointer) | Ignore the pointer event |
/// | [`NonFiniteState`](PendulumError::NonFiniteState) | State was restored; reset or edit parameters |
/// | [`UnknownBob`](PendulumError::UnknownBob) | Use `"a1"` or `"a2"` |
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PendulumError {
    /// A parameter value was rejected before being written.
    ///
    /// Every parameter must be finite. Masses and rod lengths must also be
    /// strictly positive.
    #[error("invalid {parameter}: {value} ({reason})")]
    InvalidParameter {
        /// Which parameter was being set.
        parameter: Parameter,
        /// The rejected value.
        value: f64,
        /// Short description of the violated constraint.
        reason: &'static str,
    },

    /// The frame time step was NaN or negative infinity.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// A drag pointer position was NaN or infinite.
    #[error("invalid pointer position: ({x}, {y})")]
    InvalidPointer {
        /// Pointer x coordinate relative to the pivot.
        x: f64,
        /// Pointer y coordinate relative to the pivot.
        y: f64,
    },

    /// Integration produced NaN or infinity.
    ///
    /// This happens near singular configurations of the equations of motion.
    /// The integrator restores the state it was handed before returning this.
    #[error("integration produced a non-finite state")]
    NonFiniteState,

    /// A bob identifier other than `"a1"` or `"a2"`.
    #[error("unknown bob (expected \"a1\" or \"a2\")")]
    UnknownBob,
}

/// A specialized [`Result`] type for pendulum operations.
pub type Result<T> = core::result::Result<T, PendulumError>;
