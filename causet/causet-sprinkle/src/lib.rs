#![doc = r#"Poisson sprinkling of causal sets into a rectangular FLRW region.

- [`SprinkleConfig`]: target point count, grid resolution and optional seed.
- [`sprinkle`]: seeded or entropy-backed sprinkling into a fresh [`CausalSet`].
- [`sprinkle_with`]: the same with a caller-supplied RNG.
- [`density`]: the global density ρ = N / V(region).

The region is cut into a regular `time × space` grid. Each cell receives a
Poisson(ρ·V_cell) number of points placed uniformly in its coordinate
rectangle, so the point process follows the invariant volume element even
where a(t) or the curvature factor vary across the region.

Notes:
- Deterministic users depend only on causet-core/causet-geom; `rand` and
  `rand_distr` enter the workspace only here.

Example (doctest):
```
use causet_core::Region;
use causet_geom::minkowski;
use causet_sprinkle::{sprinkle, GridDivisions, SprinkleConfig};

let cfg = SprinkleConfig {
    target_count: 200,
    divisions: GridDivisions { time: 10, space: 10 },
    seed: Some(42),
};
let region = Region::rectangle((0.0, 1.0), (-1.0, 1.0));
let a = sprinkle(&minkowski(), &region, &cfg).unwrap();
let b = sprinkle(&minkowski(), &region, &cfg).unwrap();
assert_eq!(a.events(), b.events());
assert!(a.iter().all(|e| region.contains(e)));
```
"#]
use causet_core::{CausalSet, Event, IntegrationError, Region, Scalar};
use causet_geom::Spacetime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Number of grid cells along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDivisions {
    pub time: usize,
    pub space: usize,
}

impl Default for GridDivisions {
    fn default() -> Self {
        Self { time: 100, space: 250 }
    }
}

/// Sprinkling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SprinkleConfig {
    /// Expected number of points in the whole region.
    pub target_count: usize,
    pub divisions: GridDivisions,
    /// Reproducible stream when set; OS entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for SprinkleConfig {
    fn default() -> Self {
        Self {
            target_count: 350,
            divisions: GridDivisions::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SprinkleError {
    #[error("target point count must be positive")]
    EmptyTarget,

    #[error("grid divisions must be non-zero, got {time}x{space}")]
    EmptyGrid { time: usize, space: usize },

    #[error("sprinkling needs constant space bounds")]
    NonRectangular,

    #[error("region volume {0} is not positive")]
    DegenerateVolume(Scalar),

    #[error("region bounds {time:?} x {space:?} are not increasing")]
    InvertedBounds {
        time: (Scalar, Scalar),
        space: (Scalar, Scalar),
    },

    #[error("volume of cell {time:?} x {space:?} could not be integrated")]
    Volume {
        time: (Scalar, Scalar),
        space: (Scalar, Scalar),
        #[source]
        source: IntegrationError,
    },

    #[error("poisson mean {0} is not usable")]
    InvalidMean(Scalar),
}

/// One grid cell of a sprinkling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub time: (Scalar, Scalar),
    pub space: (Scalar, Scalar),
}

/// Regular grid over `time × space`, row-major in time.
pub fn cells(
    time: (Scalar, Scalar),
    space: (Scalar, Scalar),
    divisions: GridDivisions,
) -> impl Iterator<Item = Cell> {
    let dt = (time.1 - time.0) / divisions.time as Scalar;
    let dr = (space.1 - space.0) / divisions.space as Scalar;
    (0..divisions.time).flat_map(move |i| {
        (0..divisions.space).map(move |j| Cell {
            time: (time.0 + i as Scalar * dt, time.0 + (i + 1) as Scalar * dt),
            space: (space.0 + j as Scalar * dr, space.0 + (j + 1) as Scalar * dr),
        })
    })
}

fn cell_volume<G: Spacetime + ?Sized>(geom: &G, time: (Scalar, Scalar), space: (Scalar, Scalar)) -> Result<Scalar, SprinkleError> {
    geom.volume(&Region::rectangle(time, space))
        .map_err(|source| SprinkleError::Volume { time, space, source })
}

/// Global point density ρ = target / V(region).
pub fn density<G: Spacetime + ?Sized>(geom: &G, region: &Region, target: usize) -> Result<Scalar, SprinkleError> {
    if target == 0 {
        return Err(SprinkleError::EmptyTarget);
    }
    let (time, space) = region.as_rectangle().ok_or(SprinkleError::NonRectangular)?;
    let volume = cell_volume(geom, time, space)?;
    if volume.is_nan() || volume <= 0.0 {
        return Err(SprinkleError::DegenerateVolume(volume));
    }
    // Reversing both axes keeps the volume positive.
    if !(time.0 < time.1 && space.0 < space.1) {
        return Err(SprinkleError::InvertedBounds { time, space });
    }
    Ok(target as Scalar / volume)
}

/// Sprinkles with `cfg.seed` (or entropy) into a fresh causal set.
pub fn sprinkle<G: Spacetime + ?Sized>(geom: &G, region: &Region, cfg: &SprinkleConfig) -> Result<CausalSet, SprinkleError> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sprinkle_with(geom, region, cfg, &mut rng)
}

/// Sprinkles using the caller's RNG. `cfg.seed` is ignored.
#[instrument(level = "debug", skip_all, fields(target = cfg.target_count, grid_t = cfg.divisions.time, grid_r = cfg.divisions.space))]
pub fn sprinkle_with<G, R>(geom: &G, region: &Region, cfg: &SprinkleConfig, rng: &mut R) -> Result<CausalSet, SprinkleError>
where
    G: Spacetime + ?Sized,
    R: Rng + ?Sized,
{
    let GridDivisions { time: nt, space: nr } = cfg.divisions;
    if nt == 0 || nr == 0 {
        return Err(SprinkleError::EmptyGrid { time: nt, space: nr });
    }
    let rho = density(geom, region, cfg.target_count)?;
    let (time, space) = region.as_rectangle().ok_or(SprinkleError::NonRectangular)?;
    debug!(rho, "global sprinkling density");

    let mut causet = CausalSet::with_capacity(cfg.target_count + cfg.target_count / 4);
    for cell in cells(time, space, cfg.divisions) {
        let mean = rho * cell_volume(geom, cell.time, cell.space)?;
        for _ in 0..poisson_count(mean, rng)? {
            let t = rng.gen_range(cell.time.0..cell.time.1);
            let r = rng.gen_range(cell.space.0..cell.space.1);
            causet.insert(Event::new(t, r));
        }
    }

    info!(points = causet.len(), "sprinkled causal set");
    Ok(causet)
}

fn poisson_count<R: Rng + ?Sized>(mean: Scalar, rng: &mut R) -> Result<u64, SprinkleError> {
    if mean == 0.0 {
        return Ok(0);
    }
    let dist = Poisson::new(mean).map_err(|_| SprinkleError::InvalidMean(mean))?;
    let n: Scalar = dist.sample(rng);
    Ok(n as u64)
}
