//! Continuum side of the correspondence.

use causet_core::{Event, Region, Scalar};
use causet_evolve::{clip_to_window, initial_vt, integrate, proper_time_grid, CausalType, IntegratorConfig, Trajectory};
use causet_geom::Spacetime;
use tracing::{debug, instrument};

use crate::SimulationError;

/// Initial data and sampling of a continuum geodesic.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuumParams {
    pub source: Event,
    /// Radial velocity ṙ at the source.
    pub vr: Scalar,
    pub causal_type: CausalType,
    /// Proper-time samples; strictly monotonic.
    pub tau: Vec<Scalar>,
    pub integrator: IntegratorConfig,
}

impl Default for ContinuumParams {
    fn default() -> Self {
        Self {
            source: Event::new(0.0, 0.0),
            vr: -0.75,
            causal_type: CausalType::Timelike,
            tau: proper_time_grid(0.0, 100.0, 1000),
            integrator: IntegratorConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct ContinuumSimulation<G> {
    metric: G,
    params: ContinuumParams,
    vt: Scalar,
    geodesic: Option<Trajectory>,
}

impl<G: Spacetime> ContinuumSimulation<G> {
    /// Solves the mass shell for ṫ at the source; fails for an impossible
    /// spacelike start.
    pub fn new(metric: G, params: ContinuumParams) -> Result<Self, SimulationError> {
        let vt = initial_vt(&metric, &params.source, params.vr, params.causal_type).map_err(|source| {
            SimulationError::Velocity {
                at: params.source,
                vr: params.vr,
                ty: params.causal_type,
                source,
            }
        })?;
        debug!(vt, ty = %params.causal_type, "initial temporal velocity");
        Ok(Self { metric, params, vt, geodesic: None })
    }

    pub fn metric(&self) -> &G {
        &self.metric
    }

    pub fn params(&self) -> &ContinuumParams {
        &self.params
    }

    #[inline]
    pub fn source(&self) -> Event {
        self.params.source
    }

    #[inline]
    pub fn vt(&self) -> Scalar {
        self.vt
    }

    /// Last computed geodesic, windowed if a window was given.
    pub fn geodesic(&self) -> Option<&Trajectory> {
        self.geodesic.as_ref()
    }

    /// Endpoint of the last computed geodesic; `None` before computing or
    /// when nothing survived the window.
    pub fn target(&self) -> Option<Event> {
        self.geodesic.as_ref()?.target()
    }

    /// Integrates over the configured proper-time grid and, with a window,
    /// keeps only the samples inside it.
    #[instrument(level = "info", skip_all, fields(source = %self.params.source))]
    pub fn compute_geodesic(&mut self, window: Option<&Region>) -> Result<&Trajectory, SimulationError> {
        let p = &self.params;
        let full = integrate(&self.metric, p.source, p.vr, self.vt, &p.tau, &p.integrator).map_err(|source| {
            SimulationError::Integration {
                at: p.source,
                samples: p.tau.len(),
                source,
            }
        })?;
        let geodesic = match window {
            Some(region) => clip_to_window(&full, region),
            None => full,
        };
        debug!(samples = geodesic.len(), target = ?geodesic.target(), "continuum geodesic");
        Ok(self.geodesic.insert(geodesic))
    }
}
