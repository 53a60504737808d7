//! Causal set storage: unique events with stable integer ids.

use crate::Event;
use std::collections::HashMap;

/// Index of an event inside its [`CausalSet`]. Ids are assigned on first
/// insertion and never change.
pub type EventId = usize;

/// A finite set of unique events.
///
/// Iteration follows insertion order, which carries no physical meaning.
/// Re-inserting an existing event returns its original id.
#[derive(Clone, Debug, Default)]
pub struct CausalSet {
    events: Vec<Event>,
    index: HashMap<Event, EventId>,
}

impl CausalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            events: Vec::with_capacity(n),
            index: HashMap::with_capacity(n),
        }
    }

    /// Inserts `e` if absent and returns its id.
    pub fn insert(&mut self, e: Event) -> EventId {
        if let Some(&id) = self.index.get(&e) {
            return id;
        }
        let id = self.events.len();
        self.events.push(e);
        self.index.insert(e, id);
        id
    }

    #[inline]
    pub fn id_of(&self, e: &Event) -> Option<EventId> {
        self.index.get(e).copied()
    }

    #[inline]
    pub fn contains(&self, e: &Event) -> bool {
        self.index.contains_key(e)
    }

    #[inline]
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events indexed by id.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a CausalSet {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Extend<Event> for CausalSet {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        for e in iter {
            self.insert(e);
        }
    }
}

impl FromIterator<Event> for CausalSet {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut set = CausalSet::new();
        set.extend(iter);
        set
    }
}
