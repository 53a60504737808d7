#![allow(unused_doc_comments)]
use causet_core::{Curvature, Event, Region, Scalar};
use causet_evolve::*;
use causet_geom::{minkowski, static_metric, FlrwMetric, Spacetime};
use proptest::prelude::*;

fn close(a: Scalar, b: Scalar, tol: Scalar) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn flat_rest_frame_is_a_straight_worldline() {
    let m = minkowski();
    let source = Event::new(0.0, 0.0);
    let vt = initial_vt(&m, &source, 0.0, CausalType::Timelike).unwrap();
    assert_eq!(vt, 1.0);

    let tau = proper_time_grid(0.0, 3.0, 31);
    let path = integrate(&m, source, 0.0, vt, &tau, &IntegratorConfig::default()).unwrap();
    assert_eq!(path.len(), tau.len());
    assert!(path.radii().iter().all(|&r| r == 0.0));
    for (t, tau) in path.times().iter().zip(&tau) {
        assert!(close(*t, *tau, 1e-12), "t={t} tau={tau}");
    }
    assert_eq!(path.source(), Some(source));
}

#[test]
fn boosted_flat_geodesic_is_linear() {
    let m = static_metric(Curvature::Flat, 2.0);
    let source = Event::new(1.0, -0.5);
    let vr = 0.3;
    let vt = initial_vt(&m, &source, vr, CausalType::Timelike).unwrap();
    assert!(close(vt, (4.0 * 0.09 + 1.0_f64).sqrt(), 1e-15));

    let tau = proper_time_grid(0.0, 2.0, 11);
    let path = integrate(&m, source, vr, vt, &tau, &IntegratorConfig { substeps: 3 }).unwrap();
    for (e, tau) in path.events().zip(&tau) {
        assert!(close(e.t, 1.0 + vt * tau, 1e-12));
        assert!(close(e.r, -0.5 + vr * tau, 1e-12));
    }
}

#[test]
fn reversed_grid_runs_into_the_past() {
    let m = minkowski();
    let tau = [0.0, -0.5, -1.0];
    let path = integrate(&m, Event::new(0.0, 0.0), 0.0, 1.0, &tau, &IntegratorConfig::default()).unwrap();
    assert!(close(path.times()[2], -1.0, 1e-12));
}

#[test]
fn mass_shell_formulas() {
    let m = FlrwMetric::new(Curvature::Hyperbolic, |_t: Scalar| 2.0, |_t: Scalar| 0.0);
    let p = Event::new(0.0, 0.5);
    let chart = 1.25;

    let timelike = initial_vt(&m, &p, 0.5, CausalType::Timelike).unwrap();
    assert!(close(timelike, (4.0 * 0.25 / chart + 1.0_f64).sqrt(), 1e-15));

    let null = initial_vt(&m, &p, 0.5, CausalType::Null).unwrap();
    assert!(close(null, 2.0 * 0.5 / chart.sqrt(), 1e-15));

    let spacelike = initial_vt(&m, &p, 2.0, CausalType::Spacelike).unwrap();
    assert!(close(spacelike, (4.0 * 4.0 / chart - 1.0_f64).sqrt(), 1e-15));

    for ty in [CausalType::Timelike, CausalType::Null, CausalType::Spacelike] {
        let vr = 2.0;
        let vt = initial_vt(&m, &p, vr, ty).unwrap();
        let s = GeodesicState::new(p, vt, vr);
        assert!(close(mass_shell(&m, &s), ty.norm(), 1e-12), "{ty}");
    }
}

#[test]
fn slow_spacelike_start_is_a_domain_error() {
    let err = initial_vt(&minkowski(), &Event::new(0.0, 0.0), 0.5, CausalType::Spacelike).unwrap_err();
    match err {
        VelocityError::Imaginary { at, radicand } => {
            assert_eq!(at, Event::new(0.0, 0.0));
            assert!(close(radicand, -0.75, 1e-15));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn invalid_integrator_inputs_are_rejected() {
    let m = minkowski();
    let e = Event::new(0.0, 0.0);
    assert_eq!(
        integrate(&m, e, 0.0, 1.0, &[0.0, 1.0], &IntegratorConfig { substeps: 0 }).unwrap_err(),
        IntegratorError::NoSubsteps
    );
    assert!(matches!(
        integrate(&m, e, 0.0, 1.0, &[0.0, 2.0, 1.0], &IntegratorConfig::default()).unwrap_err(),
        IntegratorError::NonMonotonic { index: 2, .. }
    ));
    assert!(integrate(&m, e, 0.0, 1.0, &[], &IntegratorConfig::default()).unwrap().is_empty());
}

#[test]
fn expanding_geodesic_stays_on_shell() {
    let m = FlrwMetric::new(Curvature::Hyperbolic, |t: Scalar| 1.0 + 0.5 * t, |_t: Scalar| 0.5);
    let source = Event::new(0.0, 0.0);
    let vr = -0.75;
    let vt = initial_vt(&m, &source, vr, CausalType::Timelike).unwrap();

    let mut stepper = GeodesicStepper::new(&m);
    let mut s = GeodesicState::new(source, vt, vr);
    for _ in 0..400 {
        let prev = s;
        stepper.step(&mut s, 0.01);
        assert!(conserved_norm(&m, &prev, &s, 1e-9), "norm drifted at t={}", s.t);
    }
    assert!(close(mass_shell(&m, &s), -1.0, 1e-7));
    // Momentum conjugate to χ = asinh(r): a² ṙ / sqrt(1 + r²).
    let p = |s: &GeodesicState| m.a(s.t).powi(2) * s.vr / (1.0 + s.r * s.r).sqrt();
    assert!(close(p(&s), vr, 1e-7), "p={}", p(&s));
}

#[test]
fn enclosing_window_is_identity() {
    let m = static_metric(Curvature::Hyperbolic, 1.0);
    let source = Event::new(0.0, 0.0);
    let vt = initial_vt(&m, &source, -0.75, CausalType::Timelike).unwrap();
    let path = integrate(&m, source, -0.75, vt, &proper_time_grid(0.0, 2.0, 50), &IntegratorConfig::default()).unwrap();

    let t_last = *path.times().last().unwrap();
    let window = Region::time_window((0.0, t_last));
    assert_eq!(clip_to_window(&path, &window), path);
}

#[test]
fn clipping_filters_time_then_space_in_order() {
    let path: Trajectory = [(0.0, 0.0), (1.0, 0.5), (2.0, 1.5), (3.0, 0.9), (4.0, 0.1), (5.0, Scalar::NAN)]
        .into_iter()
        .map(Event::from)
        .collect();
    let clipped = clip_to_window(&path, &Region::rectangle((0.5, 5.0), (-1.0, 1.0)));
    assert_eq!(clipped.times(), &[1.0, 3.0, 4.0]);
    assert_eq!(clipped.radii(), &[0.5, 0.9, 0.1]);
    assert_eq!(clipped.target(), Some(Event::new(4.0, 0.1)));

    let empty = clip_to_window(&path, &Region::rectangle((10.0, 11.0), (-1.0, 1.0)));
    assert!(empty.is_empty());
    assert_eq!(empty.target(), None);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    /// Static flat slices have no acceleration: every geodesic is a line.
    #[test]
    fn flat_static_geodesics_are_lines(
        r0 in -5.0f64..5.0, vr in -3.0f64..3.0, a0 in 0.2f64..4.0, span in 0.1f64..5.0
    ) {
        let m = static_metric(Curvature::Flat, a0);
        let source = Event::new(0.0, r0);
        let vt = initial_vt(&m, &source, vr, CausalType::Timelike).unwrap();
        let tau = proper_time_grid(0.0, span, 20);
        let path = integrate(&m, source, vr, vt, &tau, &IntegratorConfig::default()).unwrap();
        for (e, tau) in path.events().zip(&tau) {
            prop_assert!(close(e.t, vt * tau, 1e-9));
            prop_assert!(close(e.r, r0 + vr * tau, 1e-9));
        }
    }

    /// Null rays in an open expanding universe keep g(u, u) = 0.
    #[test]
    fn null_rays_stay_null(vr in 0.0f64..1.5, r0 in -1.0f64..1.0) {
        let m = FlrwMetric::new(Curvature::Hyperbolic, |t: Scalar| 1.0 + t, |_t: Scalar| 1.0);
        let source = Event::new(0.0, r0);
        let vt = initial_vt(&m, &source, vr, CausalType::Null).unwrap();
        let mut s = GeodesicState::new(source, vt, vr);
        let mut stepper = GeodesicStepper::new(&m);
        for _ in 0..100 {
            stepper.step(&mut s, 0.01);
        }
        prop_assert!(mass_shell(&m, &s).abs() < 1e-7, "norm {}", mass_shell(&m, &s));
        prop_assert!(s.t >= 0.0);
    }
}
