use causet_core::{Event, Region, Scalar};
use tracing::trace;

/// Sampled continuum worldline: `times[i]` pairs with `radii[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    times: Vec<Scalar>,
    radii: Vec<Scalar>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { times: Vec::with_capacity(n), radii: Vec::with_capacity(n) }
    }

    #[inline]
    pub fn push(&mut self, e: Event) {
        self.times.push(e.t);
        self.radii.push(e.r);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[Scalar] {
        &self.times
    }

    pub fn radii(&self) -> &[Scalar] {
        &self.radii
    }

    pub fn events(&self) -> impl Iterator<Item = Event> + '_ {
        self.times.iter().zip(&self.radii).map(|(&t, &r)| Event::new(t, r))
    }

    pub fn source(&self) -> Option<Event> {
        self.events().next()
    }

    /// Last sample; after windowing, the endpoint used for the discrete comparison.
    pub fn target(&self) -> Option<Event> {
        Some(Event::new(*self.times.last()?, *self.radii.last()?))
    }
}

impl FromIterator<Event> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut out = Trajectory::new();
        for e in iter {
            out.push(e);
        }
        out
    }
}

/// Samples of `trajectory` inside `region`, in their original order.
///
/// Times are filtered against the time range first, then the survivors
/// against the space bounds at their own time. Non-finite samples never
/// survive. An empty result means no reachable target in the window.
pub fn clip_to_window(trajectory: &Trajectory, region: &Region) -> Trajectory {
    let clipped: Trajectory = trajectory
        .events()
        .filter(|e| region.contains_time(e.t))
        .filter(|e| region.contains(e))
        .collect();
    trace!(kept = clipped.len(), of = trajectory.len(), "clipped trajectory");
    clipped
}
