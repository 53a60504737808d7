//! Link map as a directed acyclic graph and its longest chains.

use crate::links::LinkMap;
use causet_core::Event;
use petgraph::algo::{all_simple_paths, is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Hasse diagram of a causal set. Node `i` carries the event with id `i`.
#[derive(Clone, Debug)]
pub struct CausalGraph<'a> {
    links: &'a LinkMap,
    graph: DiGraph<Event, ()>,
}

impl<'a> CausalGraph<'a> {
    pub fn from_links(links: &'a LinkMap) -> Self {
        let mut graph = DiGraph::with_capacity(links.len(), links.link_count());
        for e in links.causet() {
            graph.add_node(*e);
        }
        for p in 0..links.len() {
            for &q in links.direct_future(p) {
                graph.add_edge(NodeIndex::new(p), NodeIndex::new(q), ());
            }
        }
        Self { links, graph }
    }

    #[inline]
    pub fn graph(&self) -> &DiGraph<Event, ()> {
        &self.graph
    }

    pub fn node(&self, e: &Event) -> Option<NodeIndex> {
        self.links.causet().id_of(e).map(NodeIndex::new)
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    fn endpoints(&self, source: &Event, target: &Event) -> Option<(NodeIndex, NodeIndex)> {
        let s = self.node(source)?;
        let t = self.node(target)?;
        (s != t).then_some((s, t))
    }

    fn to_events(&self, mut paths: Vec<Vec<NodeIndex>>) -> Vec<Vec<Event>> {
        paths.sort();
        paths
            .into_iter()
            .map(|path| path.into_iter().map(|n| self.graph[n]).collect())
            .collect()
    }

    /// All maximum-cardinality paths `source → … → target`, each listed
    /// source first. Paths are sorted by the ids of their events.
    ///
    /// Longest path lengths come from one pass in topological order; the
    /// paths themselves are recovered by walking back along predecessors
    /// whose length is exactly one less. Empty when either endpoint is
    /// missing, when they coincide, or when no path exists.
    pub fn longest_paths(&self, source: &Event, target: &Event) -> Vec<Vec<Event>> {
        let Some((s, t)) = self.endpoints(source, target) else {
            return Vec::new();
        };
        let order = match toposort(&self.graph, None) {
            Ok(order) => order,
            Err(cycle) => {
                warn!(node = cycle.node_id().index(), "link graph has a cycle");
                return Vec::new();
            }
        };

        let mut depth: Vec<Option<usize>> = vec![None; self.graph.node_count()];
        depth[s.index()] = Some(1);
        for v in order {
            let Some(d) = depth[v.index()] else { continue };
            for w in self.graph.neighbors_directed(v, Direction::Outgoing) {
                let slot = &mut depth[w.index()];
                if slot.map_or(true, |cur| cur < d + 1) {
                    *slot = Some(d + 1);
                }
            }
        }
        let Some(len) = depth[t.index()] else {
            return Vec::new();
        };

        let mut paths = Vec::new();
        let mut stack = Vec::with_capacity(len);
        stack.push(t);
        self.walk_back(s, &depth, &mut stack, &mut paths);
        debug!(length = len, count = paths.len(), "longest chains found");
        self.to_events(paths)
    }

    fn walk_back(
        &self,
        source: NodeIndex,
        depth: &[Option<usize>],
        stack: &mut Vec<NodeIndex>,
        out: &mut Vec<Vec<NodeIndex>>,
    ) {
        let Some(&v) = stack.last() else { return };
        if v == source {
            out.push(stack.iter().rev().copied().collect());
            return;
        }
        let Some(d) = depth[v.index()] else { return };
        for u in self.graph.neighbors_directed(v, Direction::Incoming) {
            if depth[u.index()] == Some(d - 1) {
                stack.push(u);
                self.walk_back(source, depth, stack, out);
                stack.pop();
            }
        }
    }

    /// Reference enumeration over every simple path. Exponential; for
    /// cross-checking [`CausalGraph::longest_paths`] on small sets.
    pub fn longest_paths_exhaustive(&self, source: &Event, target: &Event) -> Vec<Vec<Event>> {
        let Some((s, t)) = self.endpoints(source, target) else {
            return Vec::new();
        };
        let mut longest: Vec<Vec<NodeIndex>> = Vec::new();
        let mut best = 0;
        for path in all_simple_paths::<Vec<NodeIndex>, _>(&self.graph, s, t, 0, None) {
            match path.len().cmp(&best) {
                Ordering::Greater => {
                    best = path.len();
                    longest.clear();
                    longest.push(path);
                }
                Ordering::Equal => longest.push(path),
                Ordering::Less => {}
            }
        }
        self.to_events(longest)
    }
}

/// Discrete geodesics between `source` and `target`: every longest chain of links.
pub fn longest_paths(links: &LinkMap, source: &Event, target: &Event) -> Vec<Vec<Event>> {
    CausalGraph::from_links(links).longest_paths(source, target)
}

pub fn longest_paths_exhaustive(links: &LinkMap, source: &Event, target: &Event) -> Vec<Vec<Event>> {
    CausalGraph::from_links(links).longest_paths_exhaustive(source, target)
}
