use causet_core::{CausalSet, Event};
use causet_evolve::Trajectory;
use causet_geom::Spacetime;
use causet_order::LinkMap;
use tracing::{info, instrument, warn};

use crate::{CausetParams, CausetSimulation, ContinuumParams, ContinuumSimulation, SimulationError};

/// Output of [`correspondence`].
#[derive(Clone, Debug)]
pub struct Correspondence {
    /// Sprinkled set plus the two endpoints.
    pub causet: CausalSet,
    pub links: LinkMap,
    /// Every longest chain from `source` to `target`.
    pub discrete: Vec<Vec<Event>>,
    /// Continuum geodesic clipped to the sprinkling window.
    pub continuum: Trajectory,
    pub source: Event,
    /// Last continuum sample inside the window.
    pub target: Option<Event>,
}

/// Continuum geodesic and discrete geodesics between the same endpoints.
///
/// The continuum geodesic is integrated first and clipped to the sprinkling
/// window; its source and last surviving sample are inserted into a fresh
/// sprinkling, links are built, and every longest chain between the two is
/// extracted. When no continuum sample lies in the window only the source is
/// inserted and `discrete` is empty.
#[instrument(level = "info", skip_all, fields(target = causet.sprinkle.target_count))]
pub fn correspondence<G>(
    metric: &G,
    causet: &CausetParams,
    continuum: &ContinuumParams,
) -> Result<Correspondence, SimulationError>
where
    G: Spacetime + Sync + ?Sized,
{
    let region = causet.region();
    let mut flow = ContinuumSimulation::new(metric, continuum.clone())?;
    let trajectory = flow.compute_geodesic(Some(&region))?.clone();
    let source = flow.source();
    let target = flow.target();

    let mut sim = CausetSimulation::new(metric, *causet);
    sim.create_causet()?;
    sim.insert(source);
    match target {
        Some(target) => {
            sim.insert(target);
        }
        None => warn!(%source, "continuum geodesic leaves the window immediately"),
    }
    let discrete = match target {
        Some(target) => sim.geodesics(&source, &target)?.to_vec(),
        None => Vec::new(),
    };
    let links = sim.build_links()?.clone();
    info!(
        points = links.len(),
        links = links.link_count(),
        chains = discrete.len(),
        "correspondence computed"
    );
    Ok(Correspondence {
        causet: sim.causet().clone(),
        links,
        discrete,
        continuum: trajectory,
        source,
        target,
    })
}
