//! Covering relation of a causal set.
//!
//! For each event p the full future F(p) is computed first (all-pairs
//! precedence, O(n²) oracle calls, parallel over p). The links of p are then
//!
//! ```text
//! L(p) = F(p) − ⋃_{r ∈ F(p)} F(r)
//! ```
//!
//! which drops every q reachable through an intermediate r. Checking each
//! q ∈ F(p) against each r ∈ F(p) makes this step O(n³) in the worst case and
//! the dominant cost of the whole pipeline.

use causet_core::{CausalSet, Event, EventId};
use causet_geom::{precedes, CausalFuture, CausalityError, Spacetime};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Direct causal links of every event in a causal set.
///
/// Ids follow the [`CausalSet`] the map was built from; each link list is
/// sorted by id.
#[derive(Clone, Debug)]
pub struct LinkMap {
    causet: CausalSet,
    links: Vec<Vec<EventId>>,
}

impl LinkMap {
    #[inline]
    pub fn causet(&self) -> &CausalSet {
        &self.causet
    }

    /// Number of events (keys), including those without links.
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }

    /// Ids directly linked above `id`.
    #[inline]
    pub fn direct_future(&self, id: EventId) -> &[EventId] {
        self.links.get(id).map_or(&[], Vec::as_slice)
    }

    /// Events directly linked above `e`, or `None` if `e` is not a key.
    pub fn links_of<'a>(&'a self, e: &Event) -> Option<impl Iterator<Item = &'a Event> + 'a> {
        let id = self.causet.id_of(e)?;
        Some(self.links[id].iter().map(move |&q| &self.causet.events()[q]))
    }

    pub fn is_link(&self, p: &Event, q: &Event) -> bool {
        match (self.causet.id_of(p), self.causet.id_of(q)) {
            (Some(p), Some(q)) => self.links[p].binary_search(&q).is_ok(),
            _ => false,
        }
    }

    /// Every covering pair `(p, q)`.
    pub fn pairs(&self) -> impl Iterator<Item = (&Event, &Event)> + '_ {
        let events = self.causet.events();
        self.links
            .iter()
            .enumerate()
            .flat_map(move |(p, qs)| qs.iter().map(move |&q| (&events[p], &events[q])))
    }

    /// Plain `event → set of linked events` view.
    pub fn to_map(&self) -> HashMap<Event, HashSet<Event>> {
        let events = self.causet.events();
        self.links
            .iter()
            .enumerate()
            .map(|(p, qs)| (events[p], qs.iter().map(|&q| events[q]).collect()))
            .collect()
    }
}

/// All events of `causet` other than `p` that lie in the causal future of `p`.
pub fn chronological_future<G>(geom: &G, causet: &CausalSet, p: &Event) -> Result<Vec<Event>, CausalityError>
where
    G: Spacetime + ?Sized,
{
    let mut future = Vec::new();
    for q in causet.iter().filter(|q| *q != p) {
        if precedes(geom, p, q)? {
            future.push(*q);
        }
    }
    Ok(future)
}

fn future_sets<G>(geom: &G, causet: &CausalSet) -> Result<Vec<Vec<EventId>>, CausalityError>
where
    G: Spacetime + Sync + ?Sized,
{
    let events = causet.events();
    events
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            let cone = CausalFuture::new(geom, *p);
            let mut future = Vec::new();
            for (j, q) in events.iter().enumerate() {
                if i != j && cone.contains(q)? {
                    future.push(j);
                }
            }
            Ok(future)
        })
        .collect()
}

/// Covering relation of `causet` under `geom`.
///
/// The first oracle failure aborts the build; no partial map is returned.
#[instrument(level = "info", skip_all, fields(points = causet.len()))]
pub fn build_links<G>(geom: &G, causet: &CausalSet) -> Result<LinkMap, CausalityError>
where
    G: Spacetime + Sync + ?Sized,
{
    let n = causet.len();
    let futures = future_sets(geom, causet)?;
    debug!(relations = futures.iter().map(Vec::len).sum::<usize>(), "causal futures computed");

    let mut reach = vec![vec![false; n]; n];
    for (p, future) in futures.iter().enumerate() {
        for &q in future {
            reach[p][q] = true;
        }
    }

    let links: Vec<Vec<EventId>> = futures
        .par_iter()
        .map(|future| {
            future
                .iter()
                .copied()
                .filter(|&q| !future.iter().any(|&r| reach[r][q]))
                .collect()
        })
        .collect();

    let map = LinkMap { causet: causet.clone(), links };
    info!(links = map.link_count(), "covering relation built");
    Ok(map)
}
