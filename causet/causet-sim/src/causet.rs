//! Discrete side of the correspondence.

use causet_core::{CausalSet, Event, EventId, Region, Scalar};
use causet_geom::{CausalityError, Spacetime};
use causet_order::{build_links, chronological_future, longest_paths, LinkMap};
use causet_sprinkle::{sprinkle, SprinkleConfig};
use tracing::{debug, info, instrument};

use crate::SimulationError;

/// Sprinkling window and parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CausetParams {
    pub time: (Scalar, Scalar),
    pub space: (Scalar, Scalar),
    pub sprinkle: SprinkleConfig,
}

impl Default for CausetParams {
    fn default() -> Self {
        Self {
            time: (0.0, 3.0),
            space: (-3.0, 3.0),
            sprinkle: SprinkleConfig::default(),
        }
    }
}

impl CausetParams {
    pub fn region(&self) -> Region {
        Region::rectangle(self.time, self.space)
    }
}

/// A causal set sprinkled into a metric, with its links and discrete geodesics.
///
/// Links are dropped whenever the set changes and rebuilt on demand.
#[derive(Debug)]
pub struct CausetSimulation<G> {
    metric: G,
    params: CausetParams,
    causet: CausalSet,
    links: Option<LinkMap>,
    geodesics: Vec<Vec<Event>>,
}

impl<G: Spacetime + Sync> CausetSimulation<G> {
    pub fn new(metric: G, params: CausetParams) -> Self {
        Self {
            metric,
            params,
            causet: CausalSet::new(),
            links: None,
            geodesics: Vec::new(),
        }
    }

    pub fn metric(&self) -> &G {
        &self.metric
    }

    pub fn params(&self) -> &CausetParams {
        &self.params
    }

    pub fn causet(&self) -> &CausalSet {
        &self.causet
    }

    pub fn links(&self) -> Option<&LinkMap> {
        self.links.as_ref()
    }

    /// Discrete geodesics from the last [`CausetSimulation::geodesics`] call.
    pub fn discrete_geodesics(&self) -> &[Vec<Event>] {
        &self.geodesics
    }

    /// Replaces the current set with a fresh sprinkling.
    #[instrument(level = "info", skip_all)]
    pub fn create_causet(&mut self) -> Result<&CausalSet, SimulationError> {
        let p = self.params;
        let causet = sprinkle(&self.metric, &p.region(), &p.sprinkle).map_err(|source| {
            SimulationError::Sprinkling {
                time: p.time,
                space: p.space,
                target: p.sprinkle.target_count,
                source,
            }
        })?;
        self.causet = causet;
        self.invalidate();
        Ok(&self.causet)
    }

    /// Adds a marked event (e.g. a geodesic endpoint). Idempotent.
    pub fn insert(&mut self, e: Event) -> EventId {
        if let Some(id) = self.causet.id_of(&e) {
            return id;
        }
        debug!(event = %e, "marked event inserted");
        self.invalidate();
        self.causet.insert(e)
    }

    fn invalidate(&mut self) {
        self.links = None;
        self.geodesics.clear();
    }

    fn causality_error(&self, source: CausalityError) -> SimulationError {
        SimulationError::Causality { points: self.causet.len(), source }
    }

    /// Covering relation of the current set, built if missing.
    pub fn build_links(&mut self) -> Result<&LinkMap, SimulationError> {
        let links = match self.links.take() {
            Some(links) => links,
            None => build_links(&self.metric, &self.causet).map_err(|e| self.causality_error(e))?,
        };
        Ok(self.links.insert(links))
    }

    pub fn chronological_future(&self, p: &Event) -> Result<Vec<Event>, SimulationError> {
        chronological_future(&self.metric, &self.causet, p).map_err(|e| self.causality_error(e))
    }

    /// Longest chains `source → target`, building links first if needed.
    /// Empty when either endpoint is not in the set or no chain exists.
    pub fn geodesics(&mut self, source: &Event, target: &Event) -> Result<&[Vec<Event>], SimulationError> {
        let paths = longest_paths(self.build_links()?, source, target);
        info!(
            count = paths.len(),
            length = paths.first().map_or(0, Vec::len),
            "discrete geodesics"
        );
        self.geodesics = paths;
        Ok(&self.geodesics)
    }
}
