//! Numerical kernels: adaptive Simpson quadrature (1D and iterated 2D) and a
//! Newton–Raphson solver confined to `x > lower`.
//!
//! Every integrand evaluation is checked for finiteness; a singular point
//! surfaces as [`IntegrationError::NonFinite`] instead of poisoning the sum.

use crate::error::{IntegrationError, RootError};
use crate::Scalar;

/// Tolerances and caps for the kernels in this module.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericsConfig {
    /// Absolute tolerance of [`quad`], scaled by `max(1, |estimate|)`.
    pub quad_tolerance: Scalar,
    /// Maximum bisection depth of the adaptive Simpson recursion.
    pub quad_max_depth: u32,
    /// Relative step tolerance of [`newton_bounded`].
    pub newton_tolerance: Scalar,
    /// Iteration cap of [`newton_bounded`].
    pub newton_max_iterations: usize,
    /// Step of the central difference used when a′(t) is not supplied.
    pub derivative_step: Scalar,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            quad_tolerance: 1e-10,
            quad_max_depth: 40,
            newton_tolerance: 1e-12,
            newton_max_iterations: 100,
            derivative_step: 1e-6,
        }
    }
}

/// Result of a successful root search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub x: Scalar,
    pub iterations: usize,
}

#[inline]
fn eval<F>(f: &F, x: Scalar) -> Result<Scalar, IntegrationError>
where
    F: Fn(Scalar) -> Result<Scalar, IntegrationError>,
{
    let y = f(x)?;
    if y.is_finite() {
        Ok(y)
    } else {
        Err(IntegrationError::NonFinite { at: x, value: y })
    }
}

/// ∫_a^b f(x) dx for a plain integrand.
///
/// ```
/// use causet_core::numeric::{quad, NumericsConfig};
///
/// let cfg = NumericsConfig::default();
/// let v = quad(|x| x * x, 0.0, 3.0, &cfg).unwrap();
/// assert!((v - 9.0).abs() < 1e-9);
/// ```
pub fn quad<F>(f: F, a: Scalar, b: Scalar, cfg: &NumericsConfig) -> Result<Scalar, IntegrationError>
where
    F: Fn(Scalar) -> Scalar,
{
    try_quad(|x| Ok(f(x)), a, b, cfg)
}

/// ∫_a^b f(x) dx for an integrand that may itself fail (nested quadrature).
/// Reversed bounds flip the sign.
pub fn try_quad<F>(f: F, a: Scalar, b: Scalar, cfg: &NumericsConfig) -> Result<Scalar, IntegrationError>
where
    F: Fn(Scalar) -> Result<Scalar, IntegrationError>,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(IntegrationError::InvalidBounds { lo: a, hi: b });
    }
    if a == b {
        return Ok(0.0);
    }
    if b < a {
        return try_quad(f, b, a, cfg).map(|v| -v);
    }

    let m = 0.5 * (a + b);
    let fa = eval(&f, a)?;
    let fm = eval(&f, m)?;
    let fb = eval(&f, b)?;
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    let eps = cfg.quad_tolerance * whole.abs().max(1.0);
    simpson_step(&f, [a, m, b], [fa, fm, fb], whole, eps, cfg.quad_max_depth)
}

fn simpson_step<F>(
    f: &F,
    [a, m, b]: [Scalar; 3],
    [fa, fm, fb]: [Scalar; 3],
    whole: Scalar,
    eps: Scalar,
    depth: u32,
) -> Result<Scalar, IntegrationError>
where
    F: Fn(Scalar) -> Result<Scalar, IntegrationError>,
{
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = eval(f, lm)?;
    let frm = eval(f, rm)?;
    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;

    if delta.abs() <= 15.0 * eps {
        // Richardson extrapolation of the two-panel estimate.
        return Ok(left + right + delta / 15.0);
    }
    if depth == 0 || lm <= a || rm >= b {
        return Err(IntegrationError::NotConverged { lo: a, hi: b });
    }
    let l = simpson_step(f, [a, lm, m], [fa, flm, fm], left, 0.5 * eps, depth - 1)?;
    let r = simpson_step(f, [m, rm, b], [fm, frm, fb], right, 0.5 * eps, depth - 1)?;
    Ok(l + r)
}

/// Iterated double integral ∫_{t0}^{t1} ∫_{lo(t)}^{hi(t)} f(t, r) dr dt.
pub fn dblquad<F, L, H>(
    f: F,
    (t0, t1): (Scalar, Scalar),
    lo: L,
    hi: H,
    cfg: &NumericsConfig,
) -> Result<Scalar, IntegrationError>
where
    F: Fn(Scalar, Scalar) -> Scalar,
    L: Fn(Scalar) -> Scalar,
    H: Fn(Scalar) -> Scalar,
{
    try_quad(|t| quad(|r| f(t, r), lo(t), hi(t), cfg), t0, t1, cfg)
}

/// Newton–Raphson for `f(x) = 0` starting at `seed`, never evaluating at or
/// below `lower` once it has left the seed.
///
/// A step that would cross `lower` is replaced by halving the distance to
/// it, so the search stays in the half-line `x > lower`. Both `f` and `df`
/// may fail with an [`IntegrationError`], which is forwarded.
pub fn newton_bounded<F, D>(
    f: F,
    df: D,
    seed: Scalar,
    lower: Scalar,
    cfg: &NumericsConfig,
) -> Result<Root, RootError>
where
    F: Fn(Scalar) -> Result<Scalar, IntegrationError>,
    D: Fn(Scalar) -> Result<Scalar, IntegrationError>,
{
    let mut x = seed.max(lower);
    for iteration in 1..=cfg.newton_max_iterations {
        let fx = f(x)?;
        if fx == 0.0 {
            return Ok(Root { x, iterations: iteration });
        }
        let dx = df(x)?;
        if dx == 0.0 || !dx.is_finite() {
            return Err(RootError::FlatDerivative { at: x });
        }

        let mut next = x - fx / dx;
        if next <= lower {
            next = lower + 0.5 * (x - lower);
        }
        if !next.is_finite() {
            return Err(RootError::NotConverged { iterations: iteration, last: x });
        }
        if (next - x).abs() <= cfg.newton_tolerance * (1.0 + x.abs()) {
            return Ok(Root { x: next, iterations: iteration });
        }
        x = next;
    }
    Err(RootError::NotConverged {
        iterations: cfg.newton_max_iterations,
        last: x,
    })
}

/// Central difference `(f(x+h) - f(x-h)) / 2h`.
#[inline]
pub fn central_difference<F: Fn(Scalar) -> Scalar>(f: &F, x: Scalar, h: Scalar) -> Scalar {
    (f(x + h) - f(x - h)) / (2.0 * h)
}
