use causet_core::{Bound, Curvature, IntegrationError, Region, Scalar};
use causet_geom::{from_scale_factor, minkowski, static_metric, FlrwMetric, Spacetime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn minkowski_volume_is_coordinate_area() {
    let m = minkowski();
    let v = m.volume(&Region::rectangle((0.0, 3.0), (-3.0, 3.0))).unwrap();
    assert!((v - 18.0).abs() < 1e-9, "v={v}");
}

#[test]
fn hyperbolic_static_volume_closed_form() {
    let m = static_metric(Curvature::Hyperbolic, 2.0);
    let v = m.volume(&Region::rectangle((0.0, 1.5), (-3.0, 3.0))).unwrap();
    let exact = 2.0 * 1.5 * 2.0 * 3.0_f64.asinh();
    assert!((v - exact).abs() < 1e-8, "v={v}, exact={exact}");
}

#[test]
fn spherical_volume_inside_chart() {
    let m = static_metric(Curvature::Spherical, 1.0);
    let v = m.volume(&Region::rectangle((0.0, 2.0), (-0.9, 0.9))).unwrap();
    let exact = 2.0 * 2.0 * 0.9_f64.asin();
    assert!((v - exact).abs() < 1e-8, "v={v}, exact={exact}");
}

#[test]
fn spherical_volume_touching_pole_fails() {
    let m = static_metric(Curvature::Spherical, 1.0);
    let err = m.volume(&Region::rectangle((0.0, 1.0), (-1.0, 1.0))).unwrap_err();
    assert!(matches!(err, IntegrationError::NonFinite { .. }), "unexpected {err:?}");
}

#[test]
fn expanding_volume_linear_scale() {
    // ∫_0^2 (1 + t) dt × width 2 = 4 × 2
    let m = FlrwMetric::new(Curvature::Flat, |t: Scalar| 1.0 + t, |_t: Scalar| 1.0);
    let v = m.volume(&Region::rectangle((0.0, 2.0), (-1.0, 1.0))).unwrap();
    assert!((v - 8.0).abs() < 1e-9, "v={v}");
}

#[test]
fn diamond_region_uses_time_dependent_bounds() {
    // Causal diamond of the origin in Minkowski up to t = 1: triangle of area 1.
    let m = minkowski();
    let region = Region::new((0.0, 1.0), Bound::varying(|t| -t), Bound::varying(|t| t));
    let v = m.volume(&region).unwrap();
    assert!((v - 1.0).abs() < 1e-9, "v={v}");
}

#[test]
fn finite_difference_rate_matches_analytic() {
    let exact = FlrwMetric::new(Curvature::Hyperbolic, |t: Scalar| (0.3 * t).exp(), |t: Scalar| 0.3 * (0.3 * t).exp());
    let approx = from_scale_factor(Curvature::Hyperbolic, |t: Scalar| (0.3 * t).exp());
    assert!(!approx.is_scale_factor_constant());
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let t = rng.gen_range(0.0..5.0);
        assert!((exact.da(t) - approx.da(t)).abs() < 1e-6);
    }
}

#[test]
fn volume_is_additive_over_grid() {
    let m = FlrwMetric::new(Curvature::Spherical, |t: Scalar| 1.0 + 0.5 * t, |_t: Scalar| 0.5);
    let whole = m.volume(&Region::rectangle((0.0, 1.0), (-0.6, 0.6))).unwrap();
    let mut parts = 0.0;
    for i in 0..4 {
        for j in 0..3 {
            let t0 = i as Scalar * 0.25;
            let r0 = -0.6 + j as Scalar * 0.4;
            parts += m.volume(&Region::rectangle((t0, t0 + 0.25), (r0, r0 + 0.4))).unwrap();
        }
    }
    assert!((whole - parts).abs() < 1e-8, "whole={whole}, parts={parts}");
}
