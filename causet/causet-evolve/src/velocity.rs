//! Mass-shell initial data.
//!
//! With signature (−, +) the four-velocity u = (ṫ, ṙ) satisfies
//!
//! ```text
//! g(u, u) = −ṫ² + a(t)² ṙ² / (1 − κr²) = −1 | 0 | +1
//! ```
//!
//! for timelike, null and spacelike curves.

use causet_core::{Event, Scalar};
use causet_geom::Spacetime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::GeodesicState;

/// Causal character of a geodesic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CausalType {
    #[default]
    Timelike,
    Null,
    Spacelike,
}

impl CausalType {
    /// Value of g(u, u) on this shell.
    pub fn norm(self) -> Scalar {
        match self {
            CausalType::Timelike => -1.0,
            CausalType::Null => 0.0,
            CausalType::Spacelike => 1.0,
        }
    }
}

impl fmt::Display for CausalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CausalType::Timelike => "timelike",
            CausalType::Null => "null",
            CausalType::Spacelike => "spacelike",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown causal type {0:?} (expected timelike, null, lightlike or spacelike)")]
pub struct UnknownCausalType(pub String);

impl FromStr for CausalType {
    type Err = UnknownCausalType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timelike" => Ok(CausalType::Timelike),
            "null" | "lightlike" => Ok(CausalType::Null),
            "spacelike" => Ok(CausalType::Spacelike),
            _ => Err(UnknownCausalType(s.to_owned())),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum VelocityError {
    #[error("no real spacelike velocity at {at}: a²Vr²/(1 − κr²) − 1 = {radicand}")]
    Imaginary { at: Event, radicand: Scalar },

    #[error("1 − κr² = {value} is not positive at {at}")]
    OutsideChart { at: Event, value: Scalar },
}

/// Temporal velocity Vt for radial velocity `vr` at `source` on the `ty` shell.
///
/// - timelike: sqrt(a²Vr²/(1−κr²) + 1)
/// - null: a·Vr / sqrt(1−κr²)
/// - spacelike: sqrt(a²Vr²/(1−κr²) − 1), an error when the radicand is negative
///
/// The null branch keeps the sign of Vr: a negative radial velocity gives a
/// past-directed ray.
pub fn initial_vt<G: Spacetime + ?Sized>(
    geom: &G,
    source: &Event,
    vr: Scalar,
    ty: CausalType,
) -> Result<Scalar, VelocityError> {
    let chart = 1.0 - geom.curvature().kappa() * source.r * source.r;
    if chart.is_nan() || chart <= 0.0 {
        return Err(VelocityError::OutsideChart { at: *source, value: chart });
    }
    let a = geom.a(source.t);
    let kinetic = a * a * vr * vr / chart;
    match ty {
        CausalType::Timelike => Ok((kinetic + 1.0).sqrt()),
        CausalType::Null => Ok(a * vr / chart.sqrt()),
        CausalType::Spacelike => {
            let radicand = kinetic - 1.0;
            if radicand < 0.0 {
                Err(VelocityError::Imaginary { at: *source, radicand })
            } else {
                Ok(radicand.sqrt())
            }
        }
    }
}

/// g(u, u) of a state.
pub fn mass_shell<G: Spacetime + ?Sized>(geom: &G, s: &GeodesicState) -> Scalar {
    let a = geom.a(s.t);
    let chart = 1.0 - geom.curvature().kappa() * s.r * s.r;
    -s.vt * s.vt + a * a * s.vr * s.vr / chart
}

/// True iff g(u, u) changed by at most `tol · max(1, |g(prev)|)` between two states.
#[inline]
pub fn conserved_norm<G: Spacetime + ?Sized>(geom: &G, prev: &GeodesicState, next: &GeodesicState, tol: Scalar) -> bool {
    let before = mass_shell(geom, prev);
    let after = mass_shell(geom, next);
    (after - before).abs() <= tol * 1.0_f64.max(before.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use causet_core::Curvature;
    use causet_geom::{minkowski, static_metric};

    #[test]
    fn parses_every_spelling() {
        assert_eq!("timelike".parse::<CausalType>().unwrap(), CausalType::Timelike);
        assert_eq!("null".parse::<CausalType>().unwrap(), CausalType::Null);
        assert_eq!(" Lightlike ".parse::<CausalType>().unwrap(), CausalType::Null);
        assert_eq!("spacelike".parse::<CausalType>().unwrap(), CausalType::Spacelike);
        assert_eq!("tachyonic".parse::<CausalType>().unwrap_err(), UnknownCausalType("tachyonic".into()));
        assert_eq!(CausalType::Null.to_string().parse::<CausalType>().unwrap(), CausalType::Null);
    }

    #[test]
    fn null_branch_is_reachable() {
        let origin = Event::new(0.0, 0.0);
        assert_eq!(initial_vt(&minkowski(), &origin, 0.75, CausalType::Null).unwrap(), 0.75);
        assert_eq!(initial_vt(&minkowski(), &origin, -0.75, CausalType::Null).unwrap(), -0.75);
    }

    #[test]
    fn pole_is_outside_the_chart() {
        let m = static_metric(Curvature::Spherical, 1.0);
        let err = initial_vt(&m, &Event::new(0.0, 1.0), 0.1, CausalType::Timelike).unwrap_err();
        assert!(matches!(err, VelocityError::OutsideChart { .. }));
    }
}
