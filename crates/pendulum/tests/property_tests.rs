#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::float_cmp)]

use core::f64::consts::PI;

use pendulum::{
    Bob, Integrator, Parameters, Rescale, Session, State, energy, fps, pointer_angle, wrap_angle,
};
use proptest::prelude::*;

fn bob() -> impl Strategy<Value = Bob> {
    prop_oneof![Just(Bob::First), Just(Bob::Second)]
}

fn parameters() -> impl Strategy<Value = Parameters> {
    (0.1f64..5.0, 0.1f64..5.0, 0.1f64..3.0, 0.1f64..3.0, 0.0f64..20.0)
        .prop_map(|(m1, m2, l1, l2, g)| Parameters::new(m1, m2, l1, l2, g))
}

fn state() -> impl Strategy<Value = State> {
    (-PI..PI, -5.0f64..5.0, -PI..PI, -5.0f64..5.0)
        .prop_map(|(a1, da1, a2, da2)| State::new(a1, da1, a2, da2))
}

// =============================================================================
// Angle wrapping
// =============================================================================

proptest! {
    #[test]
    fn wrap_lands_in_half_open_range(angle in -1e6f64..1e6) {
        let w = wrap_angle(angle);
        prop_assert!(w > -PI && w <= PI, "wrap({}) = {}", angle, w);
    }

    #[test]
    fn wrap_is_idempotent(angle in -1e6f64..1e6) {
        let w = wrap_angle(angle);
        prop_assert_eq!(wrap_angle(w), w);
    }

    #[test]
    fn wrap_preserves_direction(angle in -1e4f64..1e4) {
        let w = wrap_angle(angle);
        prop_assert!((w.sin() - angle.sin()).abs() < 1e-9);
        prop_assert!((w.cos() - angle.cos()).abs() < 1e-9);
    }

    #[test]
    fn in_range_angles_are_untouched(angle in -3.1f64..3.1) {
        prop_assert_eq!(wrap_angle(angle), angle);
    }
}

// =============================================================================
// Energy rescale
// =============================================================================

proptest! {
    #[test]
    fn rescale_hits_reachable_target(
        params in parameters(),
        mut s in state(),
        scale in 0.0f64..4.0,
    ) {
        let kinetic = energy::kinetic(&s, &params);
        prop_assume!(kinetic > 1e-3);
        let target = energy::potential(&s, &params) + kinetic * scale;

        let angles = (s.a1, s.a2);
        let outcome = energy::rescale(&mut s, &params, target);

        prop_assert!(matches!(outcome, Rescale::Scaled(f) if f >= 0.0));
        prop_assert_eq!((s.a1, s.a2), angles);
        let e = energy::total(&s, &params);
        prop_assert!(
            (e - target).abs() <= 1e-9 * target.abs().max(1.0),
            "energy {} vs target {}",
            e, target
        );
    }

    #[test]
    fn unreachable_target_zeroes_velocities(
        params in parameters(),
        mut s in state(),
        deficit in 1e-6f64..100.0,
    ) {
        let target = energy::potential(&s, &params) - deficit;
        let angles = (s.a1, s.a2);

        prop_assert_eq!(energy::rescale(&mut s, &params, target), Rescale::Clamped);
        prop_assert_eq!(s, State::at_rest(angles.0, angles.1));
    }

    #[test]
    fn rescale_never_flips_direction(
        params in parameters(),
        mut s in state(),
        boost in 0.0f64..20.0,
    ) {
        let before = s;
        let target = energy::total(&s, &params) + boost;
        energy::rescale(&mut s, &params, target);
        prop_assert!(s.da1 * before.da1 >= 0.0);
        prop_assert!(s.da2 * before.da2 >= 0.0);
    }
}

// =============================================================================
// Integration
// =============================================================================

proptest! {
    #[test]
    fn integration_stays_finite(params in parameters(), start in state()) {
        let integrator = Integrator::new();
        let mut s = start;
        for _ in 0..60 {
            integrator.step(&mut s, &params, fps(60)).unwrap();
        }
        prop_assert!(s.is_finite());
    }

    #[test]
    fn one_second_conserves_energy(
        a1 in -2.5f64..2.5,
        da1 in -2.0f64..2.0,
        a2 in -2.5f64..2.5,
        da2 in -2.0f64..2.0,
    ) {
        let params = Parameters::default();
        let mut s = State::new(a1, da1, a2, da2);
        let e0 = energy::total(&s, &params);
        for _ in 0..60 {
            Integrator::new().step(&mut s, &params, fps(60)).unwrap();
        }
        let drift = (energy::total(&s, &params) - e0).abs();
        prop_assert!(drift < 1e-3, "drift {}", drift);
    }

    #[test]
    fn oversized_dt_matches_max_frame(start in state(), dt in 0.05f64..100.0) {
        let params = Parameters::default();
        let integrator = Integrator::new();
        let mut a = start;
        let mut b = start;
        integrator.step(&mut a, &params, dt).unwrap();
        integrator.step(&mut b, &params, pendulum::MAX_FRAME_DT).unwrap();
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// Session interaction
// =============================================================================

proptest! {
    #[test]
    fn drag_always_zeroes_velocities(
        start in state(),
        bob in bob(),
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
    ) {
        let mut session = Session::with_state(Parameters::default(), start);
        session.update_drag(bob, x, y).unwrap();

        let s = session.state();
        prop_assert_eq!(s.da1, 0.0);
        prop_assert_eq!(s.da2, 0.0);

        let dragged = match bob {
            Bob::First => s.a1,
            Bob::Second => s.a2,
        };
        prop_assert_eq!(dragged, pointer_angle(x, y));
        prop_assert!((-PI..=PI).contains(&dragged));
    }

    #[test]
    fn reset_is_deterministic(
        params in parameters(),
        start in state(),
        frames in 0usize..30,
        paused in any::<bool>(),
    ) {
        let mut session = Session::with_state(params, start);
        for _ in 0..frames {
            session.advance(fps(60)).unwrap();
        }
        if paused {
            session.toggle_running();
        }

        session.reset().unwrap();
        prop_assert_eq!(session.state(), &State::START);
        prop_assert_eq!(session.parameters(), &Parameters::DEFAULT);
        prop_assert!(session.dragging().is_none());
        prop_assert_eq!(session.is_running(), !paused);
    }

    #[test]
    fn paused_frames_never_move(start in state(), frames in 1usize..50) {
        let mut session = Session::with_state(Parameters::default(), start);
        session.toggle_running();
        for _ in 0..frames {
            prop_assert!(!session.advance(fps(60)).unwrap());
        }
        prop_assert_eq!(session.state(), &start);
    }
}
