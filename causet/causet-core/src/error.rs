//! Error types for the numerical layer.

use crate::Scalar;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("spatial curvature must be -1, 0 or 1, got {0}")]
pub struct CurvatureError(pub i32);

/// Quadrature failure. Raised for singular integrands (for example the
/// spherical volume element at |r| = 1) and for subdivisions that never meet
/// the tolerance.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum IntegrationError {
    #[error("integrand is not finite at x={at} (value {value})")]
    NonFinite { at: Scalar, value: Scalar },

    #[error("quadrature over [{lo}, {hi}] did not converge within the subdivision limit")]
    NotConverged { lo: Scalar, hi: Scalar },

    #[error("integration bounds are not finite: [{lo}, {hi}]")]
    InvalidBounds { lo: Scalar, hi: Scalar },
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RootError {
    #[error("newton iteration did not converge after {iterations} steps (last x={last})")]
    NotConverged { iterations: usize, last: Scalar },

    #[error("vanishing or non-finite derivative at x={at}")]
    FlatDerivative { at: Scalar },

    #[error(transparent)]
    Integration(#[from] IntegrationError),
}
