//! Spacetime regions with optionally time-dependent space bounds.

use crate::{Event, Scalar};
use std::fmt;
use std::sync::Arc;

/// One side of the space range of a [`Region`].
#[derive(Clone)]
pub enum Bound {
    Fixed(Scalar),
    Varying(Arc<dyn Fn(Scalar) -> Scalar + Send + Sync>),
}

impl Bound {
    pub fn varying<F>(f: F) -> Self
    where
        F: Fn(Scalar) -> Scalar + Send + Sync + 'static,
    {
        Bound::Varying(Arc::new(f))
    }

    /// Value of the bound on the slice at time `t`.
    #[inline]
    pub fn at(&self, t: Scalar) -> Scalar {
        match self {
            Bound::Fixed(x) => *x,
            Bound::Varying(f) => f(t),
        }
    }

    #[inline]
    pub fn fixed(&self) -> Option<Scalar> {
        match self {
            Bound::Fixed(x) => Some(*x),
            Bound::Varying(_) => None,
        }
    }
}

impl From<Scalar> for Bound {
    fn from(x: Scalar) -> Self {
        Bound::Fixed(x)
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Fixed(x) => f.debug_tuple("Fixed").field(x).finish(),
            Bound::Varying(_) => f.write_str("Varying(<fn>)"),
        }
    }
}

/// A time window `[t_min, t_max]` with space range `[lower(t), upper(t)]`.
#[derive(Clone, Debug)]
pub struct Region {
    pub time: (Scalar, Scalar),
    pub lower: Bound,
    pub upper: Bound,
}

impl Region {
    pub fn new(time: (Scalar, Scalar), lower: impl Into<Bound>, upper: impl Into<Bound>) -> Self {
        Self { time, lower: lower.into(), upper: upper.into() }
    }

    pub fn rectangle(time: (Scalar, Scalar), space: (Scalar, Scalar)) -> Self {
        Self::new(time, space.0, space.1)
    }

    /// Time window only; every radius is admitted.
    pub fn time_window(time: (Scalar, Scalar)) -> Self {
        Self::rectangle(time, (Scalar::NEG_INFINITY, Scalar::INFINITY))
    }

    /// `(time, space)` when both space bounds are constant.
    pub fn as_rectangle(&self) -> Option<((Scalar, Scalar), (Scalar, Scalar))> {
        Some((self.time, (self.lower.fixed()?, self.upper.fixed()?)))
    }

    #[inline]
    pub fn space_at(&self, t: Scalar) -> (Scalar, Scalar) {
        (self.lower.at(t), self.upper.at(t))
    }

    #[inline]
    pub fn contains_time(&self, t: Scalar) -> bool {
        t >= self.time.0 && t <= self.time.1
    }

    /// Closed-interval membership test; NaN coordinates are never inside.
    pub fn contains(&self, e: &Event) -> bool {
        if !self.contains_time(e.t) {
            return false;
        }
        let (lo, hi) = self.space_at(e.t);
        e.r >= lo && e.r <= hi
    }
}
