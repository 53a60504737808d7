//! Geodesic equations and their RK4 integration over proper time.

use causet_core::{Event, Scalar};
use causet_geom::Spacetime;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::Trajectory;

/// A minimal evolution stepper interface.
pub trait Evolver<S> {
    fn step(&mut self, state: &mut S, dt: Scalar);
}

/// Position and four-velocity `(t, r, ṫ, ṙ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicState {
    pub t: Scalar,
    pub r: Scalar,
    pub vt: Scalar,
    pub vr: Scalar,
}

impl GeodesicState {
    pub fn new(at: Event, vt: Scalar, vr: Scalar) -> Self {
        Self { t: at.t, r: at.r, vt, vr }
    }

    #[inline]
    pub fn event(&self) -> Event {
        Event::new(self.t, self.r)
    }

    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.r.is_finite() && self.vt.is_finite() && self.vr.is_finite()
    }

    /// Right-hand side of the first-order system:
    ///
    /// ```text
    /// ẗ = −a′ a ṙ² / (1 − κr²)
    /// r̈ = −κ ṙ² r / (1 − κr²) − 2 a′ ṫ ṙ / a
    /// ```
    pub fn rate<G: Spacetime + ?Sized>(&self, geom: &G) -> GeodesicState {
        let k = geom.curvature().kappa();
        let a = geom.a(self.t);
        let da = geom.da(self.t);
        let chart = 1.0 - k * self.r * self.r;
        GeodesicState {
            t: self.vt,
            r: self.vr,
            vt: -da * a * self.vr * self.vr / chart,
            vr: -k * self.vr * self.vr * self.r / chart - 2.0 * da * self.vt * self.vr / a,
        }
    }

    #[inline]
    fn offset(&self, k: &GeodesicState, h: Scalar) -> GeodesicState {
        GeodesicState {
            t: self.t + h * k.t,
            r: self.r + h * k.r,
            vt: self.vt + h * k.vt,
            vr: self.vr + h * k.vr,
        }
    }
}

/// Classic fourth-order Runge–Kutta step of the geodesic equations.
#[derive(Clone, Copy, Debug)]
pub struct GeodesicStepper<'g, G: ?Sized> {
    geom: &'g G,
}

impl<'g, G: Spacetime + ?Sized> GeodesicStepper<'g, G> {
    pub fn new(geom: &'g G) -> Self {
        Self { geom }
    }
}

impl<G: Spacetime + ?Sized> Evolver<GeodesicState> for GeodesicStepper<'_, G> {
    fn step(&mut self, s: &mut GeodesicState, dt: Scalar) {
        let g = self.geom;
        let k1 = s.rate(g);
        let k2 = s.offset(&k1, 0.5 * dt).rate(g);
        let k3 = s.offset(&k2, 0.5 * dt).rate(g);
        let k4 = s.offset(&k3, dt).rate(g);
        let sixth = dt / 6.0;
        s.t += sixth * (k1.t + 2.0 * k2.t + 2.0 * k3.t + k4.t);
        s.r += sixth * (k1.r + 2.0 * k2.r + 2.0 * k3.r + k4.r);
        s.vt += sixth * (k1.vt + 2.0 * k2.vt + 2.0 * k3.vt + k4.vt);
        s.vr += sixth * (k1.vr + 2.0 * k2.vr + 2.0 * k3.vr + k4.vr);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorConfig {
    /// RK4 steps taken inside each interval of the proper-time grid.
    pub substeps: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self { substeps: 8 }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum IntegratorError {
    #[error("substeps must be positive")]
    NoSubsteps,

    #[error("proper-time grid is not strictly monotonic at index {index}: {prev} then {next}")]
    NonMonotonic { index: usize, prev: Scalar, next: Scalar },
}

fn check_grid(tau: &[Scalar]) -> Result<(), IntegratorError> {
    let direction = match tau {
        [a, b, ..] => (b - a).signum(),
        _ => return Ok(()),
    };
    for (i, w) in tau.windows(2).enumerate() {
        let step = w[1] - w[0];
        if step == 0.0 || step.is_nan() || step.signum() != direction {
            return Err(IntegratorError::NonMonotonic { index: i + 1, prev: w[0], next: w[1] });
        }
    }
    Ok(())
}

/// Evenly spaced proper-time samples from `start` to `end` inclusive.
pub fn proper_time_grid(start: Scalar, end: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let h = (end - start) / (n - 1) as Scalar;
            (0..n).map(|i| if i + 1 == n { end } else { start + i as Scalar * h }).collect()
        }
    }
}

/// Integrates the geodesic through `source` with initial velocity `(vt, vr)`
/// and samples it at every value of `tau`, the first sample being `source`.
///
/// The grid may run forwards or backwards but must be strictly monotonic.
/// Blow-up is not guarded: once the state leaves the finite domain (κ = +1
/// rays reaching r = ±1) the remaining samples are non-finite and should be
/// removed with [`crate::clip_to_window`].
#[instrument(level = "debug", skip_all, fields(source = %source, vr = vr, vt = vt, samples = tau.len()))]
pub fn integrate<G: Spacetime + ?Sized>(
    geom: &G,
    source: Event,
    vr: Scalar,
    vt: Scalar,
    tau: &[Scalar],
    cfg: &IntegratorConfig,
) -> Result<Trajectory, IntegratorError> {
    if cfg.substeps == 0 {
        return Err(IntegratorError::NoSubsteps);
    }
    check_grid(tau)?;

    let mut trajectory = Trajectory::with_capacity(tau.len());
    if tau.is_empty() {
        return Ok(trajectory);
    }
    let mut state = GeodesicState::new(source, vt, vr);
    let mut stepper = GeodesicStepper::new(geom);
    trajectory.push(state.event());
    for w in tau.windows(2) {
        let h = (w[1] - w[0]) / cfg.substeps as Scalar;
        for _ in 0..cfg.substeps {
            stepper.step(&mut state, h);
        }
        trajectory.push(state.event());
    }

    if !state.is_finite() {
        debug!("trajectory left the finite domain");
    }
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_endpoints_are_exact() {
        let g = proper_time_grid(0.0, 100.0, 1000);
        assert_eq!(g.len(), 1000);
        assert_eq!(g[0], 0.0);
        assert_eq!(g[999], 100.0);
        assert!(proper_time_grid(1.0, 2.0, 0).is_empty());
        assert_eq!(proper_time_grid(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn grid_direction_must_not_change() {
        assert!(check_grid(&[0.0, 1.0, 2.0]).is_ok());
        assert!(check_grid(&[2.0, 1.0, 0.0]).is_ok());
        assert!(check_grid(&[3.0]).is_ok());
        assert_eq!(
            check_grid(&[0.0, 1.0, 1.0]),
            Err(IntegratorError::NonMonotonic { index: 2, prev: 1.0, next: 1.0 })
        );
        assert!(check_grid(&[0.0, 1.0, 0.5]).is_err());
        assert!(check_grid(&[0.0, Scalar::NAN]).is_err());
    }
}
