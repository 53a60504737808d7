#![doc = r#"FLRW (1+1) geometry: scale-factor metric service and causal precedence.

This crate provides:
- [`Spacetime`]: κ, a(t), a′(t), a constancy flag, conformal time and the
  invariant volume of a [`Region`](causet_core::Region).
- [`FlrwMetric`]: a closure-backed implementation, plus [`static_metric`],
  [`minkowski`] and [`from_scale_factor`] (finite-difference a′).
- [`causality`]: the six-strategy [`Lightcone`] oracle and [`precedes`].

Examples

```rust
use causet_core::{Curvature, Event, Scalar};
use causet_geom::{precedes, FlrwMetric, Spacetime};

let metric = FlrwMetric::new(Curvature::Flat, |t: Scalar| 1.0 + 0.5 * t, |_t: Scalar| 0.5);
assert!(!metric.is_scale_factor_constant());

let p = Event::new(0.0, 0.0);
assert!(precedes(&metric, &p, &Event::new(1.0, 0.5)).unwrap());
assert!(!precedes(&metric, &p, &Event::new(1.0, 0.9)).unwrap());
```
"#]

pub mod causality;
pub mod metric;

pub use causality::{
    horizons, null_ray, precedes, CausalFuture, CausalityError, HorizonSide, Lightcone,
    SphericalHorizons,
};
pub use metric::{from_scale_factor, from_scale_factor_with, minkowski, static_metric, FlrwMetric, Spacetime};
