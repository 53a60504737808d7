#![doc = r#"
causet-core: shared vocabulary for (1+1) FLRW causal sets.

This crate provides:
- Core types [`Scalar`], [`Event`] and [`Curvature`]
- [`CausalSet`]: an insertion-ordered set of unique events with stable ids
- [`Region`]: a time window with constant or time-dependent space bounds
- [`numeric`]: adaptive quadrature and a bounded Newton–Raphson solver
- [`NumericsConfig`]: tolerances and iteration caps for the kernels above
- Error enums for the numerical layer

Deterministic users depend only on this crate; randomness, graphs and
parallelism are introduced by the crates layered on top.
"#]

pub mod causet;
pub mod error;
pub mod numeric;
pub mod region;

pub use causet::{CausalSet, EventId};
pub use error::{CurvatureError, IntegrationError, RootError};
pub use numeric::NumericsConfig;
pub use region::{Bound, Region};

use std::fmt;
use std::hash::{Hash, Hasher};

pub type Scalar = f64;

/// A spacetime event: time coordinate `t` and radial coordinate `r`.
///
/// Equality and hashing go through the bit pattern of both coordinates, so
/// events can be used as map keys. `-0.0` is folded onto `0.0` first.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub t: Scalar,
    pub r: Scalar,
}

impl Event {
    #[inline]
    pub const fn new(t: Scalar, r: Scalar) -> Self {
        Self { t, r }
    }

    #[inline]
    fn key(&self) -> (u64, u64) {
        #[inline]
        fn bits(x: Scalar) -> u64 {
            if x == 0.0 { 0.0_f64.to_bits() } else { x.to_bits() }
        }
        (bits(self.t), bits(self.r))
    }
}

impl PartialEq for Event {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(Scalar, Scalar)> for Event {
    #[inline]
    fn from((t, r): (Scalar, Scalar)) -> Self {
        Self { t, r }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(t={}, r={})", self.t, self.r)
    }
}

/// Sign of the constant spatial curvature of an FLRW slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curvature {
    /// κ = −1
    Hyperbolic,
    /// κ = 0
    Flat,
    /// κ = +1; the radial chart only covers |r| < 1.
    Spherical,
}

impl Curvature {
    /// κ as a number, for use inside metric expressions.
    #[inline]
    pub fn kappa(self) -> Scalar {
        match self {
            Curvature::Hyperbolic => -1.0,
            Curvature::Flat => 0.0,
            Curvature::Spherical => 1.0,
        }
    }

    /// Spatial line element factor `1 / sqrt(1 - κ r²)`.
    #[inline]
    pub fn radial_factor(self, r: Scalar) -> Scalar {
        1.0 / (1.0 - self.kappa() * r * r).sqrt()
    }
}

impl TryFrom<i32> for Curvature {
    type Error = CurvatureError;

    fn try_from(k: i32) -> Result<Self, Self::Error> {
        match k {
            -1 => Ok(Curvature::Hyperbolic),
            0 => Ok(Curvature::Flat),
            1 => Ok(Curvature::Spherical),
            other => Err(CurvatureError(other)),
        }
    }
}

impl fmt::Display for Curvature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curvature::Hyperbolic => f.write_str("hyperbolic (k=-1)"),
            Curvature::Flat => f.write_str("flat (k=0)"),
            Curvature::Spherical => f.write_str("spherical (k=+1)"),
        }
    }
}
