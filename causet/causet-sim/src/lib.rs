#![doc = r#"Simulation drivers for the path–geodesic correspondence.

- [`CausetSimulation`]: sprinkle a causal set, add marked events, build its
  links and extract the longest chains between two events.
- [`ContinuumSimulation`]: mass-shell initial data and the integrated,
  optionally windowed, continuum geodesic.
- [`correspondence`]: both of the above chained: the continuum geodesic is
  computed first, its source and windowed endpoint are inserted into the
  sprinkled set, and the discrete geodesics between them are extracted.

Every failure is reported as a [`SimulationError`] naming the stage
(sprinkling, causality or integration) and the inputs that failed.
Results are plain data.
"#]

pub mod causet;
pub mod continuum;
pub mod error;
pub mod pipeline;

pub use causet::{CausetParams, CausetSimulation};
pub use continuum::{ContinuumParams, ContinuumSimulation};
pub use error::{SimulationError, Stage};
pub use pipeline::{correspondence, Correspondence};
