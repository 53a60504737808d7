//! The FLRW metric service: ds² = −dt² + a(t)² (dr² / (1 − κr²)).

use causet_core::numeric::{central_difference, dblquad, quad};
use causet_core::{Curvature, IntegrationError, NumericsConfig, Region, Scalar};
use tracing::trace;

/// Time-dependent (1+1) FLRW geometry.
///
/// Implementors supply κ, a(t) and a′(t); volume and conformal time have
/// default implementations on top of [`causet_core::numeric`].
pub trait Spacetime {
    fn curvature(&self) -> Curvature;

    /// Scale factor a(t); expected to be strictly positive where queried.
    fn a(&self, t: Scalar) -> Scalar;

    /// Time derivative a′(t).
    fn da(&self, t: Scalar) -> Scalar;

    /// Fast-path discriminator for the causality oracle. Must be
    /// deterministic for a given instance.
    ///
    /// [`FlrwMetric`] decides this by sampling a′ on t ∈ [0, 10] only; a
    /// scale factor that is flat there but varies elsewhere is reported as
    /// constant unless overridden with [`FlrwMetric::assume_constant`].
    fn is_scale_factor_constant(&self) -> bool;

    fn numerics(&self) -> &NumericsConfig;

    /// Conformal time ∫_{t0}^{t1} dt / a(t): the coordinate distance a light
    /// ray covers in a flat slice.
    fn conformal_time(&self, t0: Scalar, t1: Scalar) -> Result<Scalar, IntegrationError> {
        conformal_interval(self, t0, t1, self.is_scale_factor_constant())
    }

    /// Invariant volume ∫∫ a(t) / sqrt(1 − κr²) dr dt over `region`, with the
    /// space bounds evaluated per time slice.
    ///
    /// Fails when the integrand is singular in the region, e.g. κ = +1 with
    /// a space bound reaching |r| = 1.
    fn volume(&self, region: &Region) -> Result<Scalar, IntegrationError> {
        let k = self.curvature();
        let v = dblquad(
            |t, r| self.a(t) * k.radial_factor(r),
            region.time,
            |t| region.lower.at(t),
            |t| region.upper.at(t),
            self.numerics(),
        )?;
        trace!(volume = v, t0 = region.time.0, t1 = region.time.1, "region volume");
        Ok(v)
    }
}

impl<S: Spacetime + ?Sized> Spacetime for &S {
    fn curvature(&self) -> Curvature {
        (**self).curvature()
    }
    fn a(&self, t: Scalar) -> Scalar {
        (**self).a(t)
    }
    fn da(&self, t: Scalar) -> Scalar {
        (**self).da(t)
    }
    fn is_scale_factor_constant(&self) -> bool {
        (**self).is_scale_factor_constant()
    }
    fn numerics(&self) -> &NumericsConfig {
        (**self).numerics()
    }
    fn conformal_time(&self, t0: Scalar, t1: Scalar) -> Result<Scalar, IntegrationError> {
        (**self).conformal_time(t0, t1)
    }
    fn volume(&self, region: &Region) -> Result<Scalar, IntegrationError> {
        (**self).volume(region)
    }
}

/// ∫_{t0}^{t1} dt / a(t), closed form with a(t0) when `constant`.
pub(crate) fn conformal_interval<G: Spacetime + ?Sized>(
    geom: &G,
    t0: Scalar,
    t1: Scalar,
    constant: bool,
) -> Result<Scalar, IntegrationError> {
    if !constant {
        return quad(|t| 1.0 / geom.a(t), t0, t1, geom.numerics());
    }
    let a0 = geom.a(t0);
    let eta = (t1 - t0) / a0;
    if eta.is_finite() {
        Ok(eta)
    } else {
        Err(IntegrationError::NonFinite { at: t0, value: a0 })
    }
}

/// Probe grid used to decide whether a′ vanishes identically: t = 0, 0.25, …, 10.
const PROBE_POINTS: usize = 41;
const PROBE_SPACING: Scalar = 0.25;

/// Closure-backed FLRW metric.
///
/// `scale` is a(t) and `rate` is a′(t). Constancy of a(t) is decided once in
/// [`FlrwMetric::new`] by probing `rate` on a fixed grid; any non-finite
/// probe counts as "not constant".
#[derive(Clone)]
pub struct FlrwMetric<SF, DF>
where
    SF: Fn(Scalar) -> Scalar,
    DF: Fn(Scalar) -> Scalar,
{
    curvature: Curvature,
    scale: SF,
    rate: DF,
    constant: bool,
    numerics: NumericsConfig,
}

impl<SF, DF> FlrwMetric<SF, DF>
where
    SF: Fn(Scalar) -> Scalar,
    DF: Fn(Scalar) -> Scalar,
{
    pub fn new(curvature: Curvature, scale: SF, rate: DF) -> Self {
        let constant = (0..PROBE_POINTS).all(|i| {
            let t = i as Scalar * PROBE_SPACING;
            let (a, da) = (scale(t), rate(t));
            a.is_finite() && da.is_finite() && da.abs() <= 1e-12 * a.abs().max(1.0)
        });
        Self {
            curvature,
            scale,
            rate,
            constant,
            numerics: NumericsConfig::default(),
        }
    }

    pub fn with_numerics(mut self, numerics: NumericsConfig) -> Self {
        self.numerics = numerics;
        self
    }

    /// Overrides the probed constancy flag. Claiming a non-constant scale
    /// factor is constant makes the oracle use a(p.t) along whole rays.
    pub fn assume_constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }
}

impl<SF, DF> Spacetime for FlrwMetric<SF, DF>
where
    SF: Fn(Scalar) -> Scalar,
    DF: Fn(Scalar) -> Scalar,
{
    #[inline]
    fn curvature(&self) -> Curvature {
        self.curvature
    }

    #[inline]
    fn a(&self, t: Scalar) -> Scalar {
        (self.scale)(t)
    }

    #[inline]
    fn da(&self, t: Scalar) -> Scalar {
        (self.rate)(t)
    }

    #[inline]
    fn is_scale_factor_constant(&self) -> bool {
        self.constant
    }

    #[inline]
    fn numerics(&self) -> &NumericsConfig {
        &self.numerics
    }
}

impl<SF, DF> std::fmt::Debug for FlrwMetric<SF, DF>
where
    SF: Fn(Scalar) -> Scalar,
    DF: Fn(Scalar) -> Scalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlrwMetric")
            .field("curvature", &self.curvature)
            .field("constant", &self.constant)
            .field("numerics", &self.numerics)
            .finish_non_exhaustive()
    }
}

/// Static universe a(t) = a0.
pub fn static_metric(
    curvature: Curvature,
    a0: Scalar,
) -> FlrwMetric<impl Fn(Scalar) -> Scalar + Copy + Send + Sync, impl Fn(Scalar) -> Scalar + Copy + Send + Sync> {
    FlrwMetric::new(curvature, move |_t: Scalar| a0, |_t: Scalar| 0.0).assume_constant(true)
}

/// Flat, static, a ≡ 1.
pub fn minkowski(
) -> FlrwMetric<impl Fn(Scalar) -> Scalar + Copy + Send + Sync, impl Fn(Scalar) -> Scalar + Copy + Send + Sync> {
    static_metric(Curvature::Flat, 1.0)
}

/// Metric from a(t) alone, with [`NumericsConfig::default`].
/// See [`from_scale_factor_with`].
pub fn from_scale_factor<SF>(
    curvature: Curvature,
    scale: SF,
) -> FlrwMetric<SF, impl Fn(Scalar) -> Scalar + Clone>
where
    SF: Fn(Scalar) -> Scalar + Clone,
{
    from_scale_factor_with(curvature, scale, NumericsConfig::default())
}

/// Metric from a(t) alone. a′(t) is a central difference with step
/// `numerics.derivative_step` and inherits its O(h²) truncation error.
///
/// The step is fixed here: a later [`FlrwMetric::with_numerics`] changes the
/// quadrature and root-finding settings but not a′.
pub fn from_scale_factor_with<SF>(
    curvature: Curvature,
    scale: SF,
    numerics: NumericsConfig,
) -> FlrwMetric<SF, impl Fn(Scalar) -> Scalar + Clone>
where
    SF: Fn(Scalar) -> Scalar + Clone,
{
    let h = numerics.derivative_step;
    let inner = scale.clone();
    FlrwMetric::new(curvature, scale, move |t: Scalar| central_difference(&inner, t, h)).with_numerics(numerics)
}
