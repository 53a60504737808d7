//! Causal precedence in (1+1) FLRW.
//!
//! Radial null rays obey dr/dt = ±sqrt(1 − κr²)/a(t). With conformal time
//! η(t) = ∫_{p.t}^{t} dt'/a(t') the ray through p is
//!
//! - flat:       r(t) = p.r ± η
//! - hyperbolic: r(t) = sinh(asinh(p.r) ± η)
//! - spherical:  r(t) = sin(asin(p.r) ± η), valid until the ray reaches r = ±1
//!
//! An event q is in the causal future of p iff it lies between the two rays
//! on the slice t = q.t. In the spherical chart a ray that has reached the
//! pole r = ±1 no longer bounds the cone on that side.

use crate::metric::{conformal_interval, Spacetime};
use causet_core::numeric::newton_bounded;
use causet_core::{Curvature, Event, IntegrationError, RootError, Scalar};
use std::cell::OnceCell;
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use thiserror::Error;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizonSide {
    /// Ray moving towards r = +1.
    Right,
    /// Ray moving towards r = −1.
    Left,
}

impl HorizonSide {
    #[inline]
    fn sign(self) -> Scalar {
        match self {
            HorizonSide::Right => 1.0,
            HorizonSide::Left => -1.0,
        }
    }
}

impl fmt::Display for HorizonSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizonSide::Right => f.write_str("right (r=+1)"),
            HorizonSide::Left => f.write_str("left (r=-1)"),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CausalityError {
    #[error("causality undecidable from {apex}: {side} horizon search failed")]
    Undecidable {
        apex: Event,
        side: HorizonSide,
        #[source]
        source: RootError,
    },

    #[error("conformal time from {apex} to t={t} could not be integrated")]
    Integration {
        apex: Event,
        t: Scalar,
        #[source]
        source: IntegrationError,
    },

    #[error("event {0} lies outside the spherical chart |r| <= 1")]
    OutsideChart(Event),
}

/// One of six closed lightcone strategies: curvature × (static | expanding).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lightcone {
    FlatStatic,
    FlatExpanding,
    HyperbolicStatic,
    HyperbolicExpanding,
    SphericalStatic,
    SphericalExpanding,
}

impl Lightcone {
    pub fn for_metric<G: Spacetime + ?Sized>(geom: &G) -> Self {
        Self::select(geom.curvature(), geom.is_scale_factor_constant())
    }

    pub fn select(curvature: Curvature, is_static: bool) -> Self {
        match (curvature, is_static) {
            (Curvature::Flat, true) => Lightcone::FlatStatic,
            (Curvature::Flat, false) => Lightcone::FlatExpanding,
            (Curvature::Hyperbolic, true) => Lightcone::HyperbolicStatic,
            (Curvature::Hyperbolic, false) => Lightcone::HyperbolicExpanding,
            (Curvature::Spherical, true) => Lightcone::SphericalStatic,
            (Curvature::Spherical, false) => Lightcone::SphericalExpanding,
        }
    }

    pub fn curvature(self) -> Curvature {
        match self {
            Lightcone::FlatStatic | Lightcone::FlatExpanding => Curvature::Flat,
            Lightcone::HyperbolicStatic | Lightcone::HyperbolicExpanding => Curvature::Hyperbolic,
            Lightcone::SphericalStatic | Lightcone::SphericalExpanding => Curvature::Spherical,
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        matches!(
            self,
            Lightcone::FlatStatic | Lightcone::HyperbolicStatic | Lightcone::SphericalStatic
        )
    }

    /// Conformal time from `apex.t` to `t`: closed form for the static
    /// strategies, quadrature otherwise.
    pub fn conformal_time<G: Spacetime + ?Sized>(
        self,
        geom: &G,
        apex: &Event,
        t: Scalar,
    ) -> Result<Scalar, CausalityError> {
        eta(self, geom, apex, t).map_err(|source| CausalityError::Integration { apex: *apex, t, source })
    }

    /// Unwrapped radial null ray from `apex` evaluated at time `t`.
    pub fn null_ray<G: Spacetime + ?Sized>(
        self,
        geom: &G,
        apex: &Event,
        t: Scalar,
        side: HorizonSide,
    ) -> Result<Scalar, CausalityError> {
        let eta = side.sign() * self.conformal_time(geom, apex, t)?;
        Ok(match self.curvature() {
            Curvature::Flat => apex.r + eta,
            Curvature::Hyperbolic => (apex.r.asinh() + eta).sinh(),
            Curvature::Spherical => (chart_angle(apex)? + eta).sin(),
        })
    }
}

fn eta<G: Spacetime + ?Sized>(
    strategy: Lightcone,
    geom: &G,
    apex: &Event,
    t: Scalar,
) -> Result<Scalar, IntegrationError> {
    conformal_interval(geom, apex.t, t, strategy.is_static())
}

#[inline]
fn chart_angle(e: &Event) -> Result<Scalar, CausalityError> {
    if e.r.abs() > 1.0 || e.r.is_nan() {
        return Err(CausalityError::OutsideChart(*e));
    }
    Ok(e.r.asin())
}

/// Times at which the two null rays from an apex reach the poles of the
/// spherical chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalHorizons {
    pub right: Scalar,
    pub left: Scalar,
}

impl SphericalHorizons {
    #[inline]
    pub fn crossed(&self, side: HorizonSide, t: Scalar) -> bool {
        match side {
            HorizonSide::Right => t > self.right,
            HorizonSide::Left => t > self.left,
        }
    }
}

fn horizon_time<G: Spacetime + ?Sized>(
    strategy: Lightcone,
    geom: &G,
    apex: &Event,
    side: HorizonSide,
) -> Result<Scalar, CausalityError> {
    let chi = chart_angle(apex)?;
    let s = side.sign();
    // Phase of the ray relative to its pole: s·(chi + s·η(t)) − π/2 = 0 at the
    // crossing. Increasing in t, so the root is unique and lies above apex.t.
    let phase = |t: Scalar| -> Result<Scalar, IntegrationError> {
        Ok(s * chi + eta(strategy, geom, apex, t)? - FRAC_PI_2)
    };
    let rate = |t: Scalar| -> Result<Scalar, IntegrationError> {
        let a = if strategy.is_static() { geom.a(apex.t) } else { geom.a(t) };
        Ok(1.0 / a)
    };

    let root = newton_bounded(phase, rate, apex.t, apex.t, geom.numerics())
        .map_err(|source| CausalityError::Undecidable { apex: *apex, side, source })?;
    trace!(apex = %apex, %side, t = root.x, iterations = root.iterations, "horizon crossing");
    Ok(root.x)
}

/// Spherical horizon crossing times for the rays leaving `apex`.
///
/// Found with a Newton–Raphson search confined to t ≥ apex.t. An apex
/// sitting on a pole reports that pole's crossing at apex.t.
pub fn horizons<G: Spacetime + ?Sized>(geom: &G, apex: &Event) -> Result<SphericalHorizons, CausalityError> {
    let strategy = Lightcone::select(Curvature::Spherical, geom.is_scale_factor_constant());
    Ok(SphericalHorizons {
        right: horizon_time(strategy, geom, apex, HorizonSide::Right)?,
        left: horizon_time(strategy, geom, apex, HorizonSide::Left)?,
    })
}

/// Unwrapped null ray from `apex` at time `t` under the metric's own strategy.
pub fn null_ray<G: Spacetime + ?Sized>(
    geom: &G,
    apex: &Event,
    t: Scalar,
    side: HorizonSide,
) -> Result<Scalar, CausalityError> {
    Lightcone::for_metric(geom).null_ray(geom, apex, t, side)
}

/// The causal future of a fixed apex, reusable across many queries.
///
/// Spherical horizon times are solved at most once, on the first query that
/// needs them.
pub struct CausalFuture<'g, G: Spacetime + ?Sized> {
    geom: &'g G,
    apex: Event,
    strategy: Lightcone,
    horizons: OnceCell<SphericalHorizons>,
}

impl<'g, G: Spacetime + ?Sized> CausalFuture<'g, G> {
    pub fn new(geom: &'g G, apex: Event) -> Self {
        Self {
            geom,
            apex,
            strategy: Lightcone::for_metric(geom),
            horizons: OnceCell::new(),
        }
    }

    #[inline]
    pub fn apex(&self) -> &Event {
        &self.apex
    }

    #[inline]
    pub fn strategy(&self) -> Lightcone {
        self.strategy
    }

    fn horizons(&self) -> Result<SphericalHorizons, CausalityError> {
        if let Some(h) = self.horizons.get() {
            return Ok(*h);
        }
        let h = SphericalHorizons {
            right: horizon_time(self.strategy, self.geom, &self.apex, HorizonSide::Right)?,
            left: horizon_time(self.strategy, self.geom, &self.apex, HorizonSide::Left)?,
        };
        let _ = self.horizons.set(h);
        Ok(h)
    }

    /// True iff `q` is in the causal future of the apex. Events earlier than
    /// the apex are rejected before any numerics run.
    pub fn contains(&self, q: &Event) -> Result<bool, CausalityError> {
        let p = &self.apex;
        if q.t < p.t {
            return Ok(false);
        }
        match self.strategy {
            Lightcone::FlatStatic | Lightcone::FlatExpanding => {
                let eta = self.strategy.conformal_time(self.geom, p, q.t)?;
                Ok((q.r - p.r).abs() <= eta)
            }
            Lightcone::HyperbolicStatic | Lightcone::HyperbolicExpanding => {
                let eta = self.strategy.conformal_time(self.geom, p, q.t)?;
                let chi = p.r.asinh();
                Ok(q.r >= (chi - eta).sinh() && q.r <= (chi + eta).sinh())
            }
            Lightcone::SphericalStatic | Lightcone::SphericalExpanding => {
                let h = self.horizons()?;
                let (past_right, past_left) = (
                    h.crossed(HorizonSide::Right, q.t),
                    h.crossed(HorizonSide::Left, q.t),
                );
                if past_right && past_left {
                    return Ok(true);
                }
                let eta = self.strategy.conformal_time(self.geom, p, q.t)?;
                let chi = chart_angle(p)?;
                let upper = if past_right { 1.0 } else { (chi + eta).sin() };
                let lower = if past_left { -1.0 } else { (chi - eta).sin() };
                Ok(q.r >= lower && q.r <= upper)
            }
        }
    }
}

/// True iff `q` lies in the causal future of `p` (p ⪯ q).
///
/// Callers exclude `p == q` themselves. `q.t < p.t` is rejected immediately.
///
/// ```
/// use causet_core::Event;
/// use causet_geom::{minkowski, precedes};
///
/// let m = minkowski();
/// let p = Event::new(0.0, 0.0);
/// assert!(precedes(&m, &p, &Event::new(1.0, 0.5)).unwrap());
/// assert!(!precedes(&m, &p, &Event::new(1.0, 1.5)).unwrap());
/// ```
pub fn precedes<G: Spacetime + ?Sized>(geom: &G, p: &Event, q: &Event) -> Result<bool, CausalityError> {
    if q.t < p.t {
        return Ok(false);
    }
    CausalFuture::new(geom, *p).contains(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::static_metric;

    #[test]
    fn strategy_selection_covers_all_six() {
        let mut seen = std::collections::HashSet::new();
        for k in [Curvature::Flat, Curvature::Hyperbolic, Curvature::Spherical] {
            for s in [true, false] {
                let l = Lightcone::select(k, s);
                assert_eq!(l.curvature(), k);
                assert_eq!(l.is_static(), s);
                seen.insert(l);
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn oracle_and_metric_agree_on_conformal_time() {
        let expanding = crate::FlrwMetric::new(Curvature::Flat, |t: Scalar| 1.0 + t, |_: Scalar| 1.0);
        let apex = Event::new(0.5, 0.0);
        let via_oracle = Lightcone::for_metric(&expanding).conformal_time(&expanding, &apex, 2.0).unwrap();
        let via_metric = expanding.conformal_time(0.5, 2.0).unwrap();
        assert_eq!(via_oracle, via_metric);
        assert!((via_metric - (3.0_f64 / 1.5).ln()).abs() < 1e-9);

        let fixed = static_metric(Curvature::Hyperbolic, 2.0);
        let eta = Lightcone::for_metric(&fixed).conformal_time(&fixed, &apex, 2.0).unwrap();
        assert_eq!(eta, fixed.conformal_time(0.5, 2.0).unwrap());
        assert_eq!(eta, 0.75);
    }

    #[test]
    fn horizons_are_computed_once() {
        let m = static_metric(Curvature::Spherical, 1.0);
        let cone = CausalFuture::new(&m, Event::new(0.0, 0.0));
        assert!(cone.horizons.get().is_none());
        assert!(!cone.contains(&Event::new(-1.0, 0.0)).unwrap());
        assert!(cone.horizons.get().is_none(), "past query must not solve horizons");
        assert!(cone.contains(&Event::new(0.5, 0.1)).unwrap());
        assert!(cone.horizons.get().is_some());
    }

    #[test]
    fn outside_chart_is_reported() {
        let m = static_metric(Curvature::Spherical, 1.0);
        let err = precedes(&m, &Event::new(0.0, 1.5), &Event::new(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, CausalityError::OutsideChart(_)));
    }
}
