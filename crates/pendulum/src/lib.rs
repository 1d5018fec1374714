#![forbid(unsafe_code)]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

//! # Pendulum
//!
//! Physics core for an interactive planar double pendulum.
//!
//! Pendulum provides:
//! - **Dynamics**: angular accelerations from the Lagrangian equations of motion
//! - **Integrator**: classical RK4, five sub-steps per frame
//! - **EnergyModel**: kinetic and potential energy, plus velocity rescaling
//!   that keeps total energy fixed across parameter edits
//! - **Session**: the interaction contract (setters, reset, drag, pause)
//!
//! The crate owns no loop and no timing source. A host calls
//! [`Session::frame`] or [`Session::advance`] once per rendered frame and
//! reads positions and energies back out.
//!
//! ## Example
//!
//! ```rust
//! use pendulum::Session;
//!
//! let mut session = Session::new();
//!
//! // 60 frames at 60 FPS
//! for _ in 0..60 {
//!     session.advance(1.0 / 60.0).unwrap();
//! }
//!
//! let drift = session.total_energy() - session.initial_energy().unwrap();
//! assert!(drift.abs() < 1e-3);
//! ```
//!
//! ## Driving the pieces directly
//!
//! ```rust
//! use pendulum::{energy, Integrator, Parameters, State};
//!
//! let params = Parameters::default();
//! let mut state = State::default();
//! let target = energy::total(&state, &params);
//!
//! Integrator::new().step(&mut state, &params, 1.0 / 60.0).unwrap();
//! assert!((energy::total(&state, &params) - target).abs() < 1e-4);
//! ```
//!
//! ## Energy conventions
//!
//! Two potential energies are exposed and they differ only by a constant:
//!
//! - [`energy::potential`]: the conservation reference, used by
//!   [`energy::total`] and [`energy::rescale`]
//! - [`energy::potential_from_rest`]: zero with both bobs hanging, used for display

mod angle;
mod clock;
pub mod dynamics;
pub mod energy;
mod error;
mod integrator;
mod kinematics;
mod math;
mod params;
mod session;
mod state;

pub use angle::{pointer_angle, wrap_angle};
pub use clock::{FrameClock, FALLBACK_FRAME_DT};
pub use energy::{Energy, Rescale};
pub use error::{PendulumError, Result};
pub use integrator::{fps, rk4, Integrator, MAX_FRAME_DT, SUB_STEPS};
pub use kinematics::{BobPositions, Point};
pub use params::{Parameter, Parameters};
pub use session::{Bob, FrameReport, Session};
pub use state::{Derivative, State};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::angle::{pointer_angle, wrap_angle};
    pub use crate::energy::{self, Energy, Rescale};
    pub use crate::error::{PendulumError, Result};
    pub use crate::integrator::Integrator;
    pub use crate::kinematics::{BobPositions, Point};
    pub use crate::params::{Parameter, Parameters};
    pub use crate::session::{Bob, Session};
    pub use crate::state::State;
}
