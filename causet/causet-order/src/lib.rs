#![doc = r#"Order structure of a sprinkled causal set.

- [`build_links`]: full causal futures, then the covering relation
  (Hasse diagram) as a [`LinkMap`].
- [`chronological_future`]: the causal future of a single event.
- [`CausalGraph`]: the link map as a petgraph `DiGraph`.
- [`longest_paths`]: every maximum-cardinality chain between two events,
  the discrete counterpart of a timelike geodesic.

Example (doctest):
```
use causet_core::{CausalSet, Event};
use causet_geom::minkowski;
use causet_order::{build_links, longest_paths};

let chain: CausalSet = (0..4).map(|i| Event::new(i as f64, 0.0)).collect();
let links = build_links(&minkowski(), &chain).unwrap();
let paths = longest_paths(&links, &Event::new(0.0, 0.0), &Event::new(3.0, 0.0));
assert_eq!(paths.len(), 1);
assert_eq!(paths[0].len(), 4);
```
"#]

pub mod graph;
pub mod links;

pub use graph::{longest_paths, longest_paths_exhaustive, CausalGraph};
pub use links::{build_links, chronological_future, LinkMap};
