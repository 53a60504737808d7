#![doc = r#"Continuum geodesics in a (1+1) FLRW spacetime.

Provides:
- [`CausalType`] and [`initial_vt`]: the temporal velocity that puts a
  worldline with radial velocity Vr on the requested mass shell.
- [`Evolver`] and [`GeodesicStepper`]: a classic RK4 step of the geodesic
  equations over a [`GeodesicState`] `(t, r, ṫ, ṙ)`.
- [`integrate`]: a [`Trajectory`] sampled on a proper-time grid.
- [`clip_to_window`]: the part of a trajectory inside a region.
- [`mass_shell`] and [`conserved_norm`]: helpers to check the invariant
  g(u, u) along a step.

Example (doctest):
```
use causet_core::Event;
use causet_evolve::{initial_vt, integrate, proper_time_grid, CausalType, IntegratorConfig};
use causet_geom::minkowski;

let m = minkowski();
let source = Event::new(0.0, 0.0);
let vt = initial_vt(&m, &source, 0.0, CausalType::Timelike).unwrap();
assert_eq!(vt, 1.0);

let tau = proper_time_grid(0.0, 2.0, 5);
let path = integrate(&m, source, 0.0, vt, &tau, &IntegratorConfig::default()).unwrap();
assert_eq!(path.len(), 5);
assert!(path.radii().iter().all(|r| *r == 0.0));
```
"#]

pub mod integrator;
pub mod trajectory;
pub mod velocity;

pub use integrator::{
    integrate, proper_time_grid, Evolver, GeodesicState, GeodesicStepper, IntegratorConfig, IntegratorError,
};
pub use trajectory::{clip_to_window, Trajectory};
pub use velocity::{conserved_norm, initial_vt, mass_shell, CausalType, UnknownCausalType, VelocityError};
