use causet_core::{Event, Scalar};
use causet_evolve::{CausalType, IntegratorError, VelocityError};
use causet_geom::CausalityError;
use causet_sprinkle::SprinkleError;
use std::fmt;
use thiserror::Error;

/// Pipeline stage a [`SimulationError`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Sprinkling,
    Causality,
    Integration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Sprinkling => "sprinkling",
            Stage::Causality => "causality",
            Stage::Integration => "integration",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("sprinkling failed for {target} points in t {time:?}, r {space:?}")]
    Sprinkling {
        time: (Scalar, Scalar),
        space: (Scalar, Scalar),
        target: usize,
        #[source]
        source: SprinkleError,
    },

    #[error("causality failed on a set of {points} events")]
    Causality {
        points: usize,
        #[source]
        source: CausalityError,
    },

    #[error("integration failed: no {ty} velocity at {at} with Vr = {vr}")]
    Velocity {
        at: Event,
        vr: Scalar,
        ty: CausalType,
        #[source]
        source: VelocityError,
    },

    #[error("integration failed for the geodesic from {at} over {samples} proper-time samples")]
    Integration {
        at: Event,
        samples: usize,
        #[source]
        source: IntegratorError,
    },
}

impl SimulationError {
    pub fn stage(&self) -> Stage {
        match self {
            SimulationError::Sprinkling { .. } => Stage::Sprinkling,
            SimulationError::Causality { .. } => Stage::Causality,
            SimulationError::Velocity { .. } | SimulationError::Integration { .. } => Stage::Integration,
        }
    }
}
