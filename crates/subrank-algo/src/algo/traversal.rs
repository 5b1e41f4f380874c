// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Hop-bounded breadth-first traversal over a [`GraphView`].
//!
//! The traversal is a fixed pipeline of small stages:
//!
//! 1. [`SeedFilter`] picks the starting vertices.
//! 2. [`Expand`] lists the incident edges of a frontier vertex.
//! 3. [`Dedup`] drops edges and vertices that were already visited.
//! 4. [`Accumulator`] collects what survives, in visitation order.
//!
//! [`HopTraversal`] wires stages 2 and 3 into a lazy iterator of
//! [`TraversalEvent`]s; callers own the accumulators.

use fxhash::FxHashSet;
use std::collections::VecDeque;
use std::hash::Hash;
use std::mem;
use subrank_common::{Direction, Eid, GraphError, Result, Value, Vid};
use subrank_store::{Edge, GraphView};

/// Selects the seed vertices of a traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedFilter {
    /// Vertices whose property `key` holds exactly `value`.
    PropertyEq { key: String, value: Value },
    /// An explicit id list. Every id must exist.
    Ids(Vec<Vid>),
}

impl SeedFilter {
    pub fn property_eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        SeedFilter::PropertyEq {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn ids(vids: impl IntoIterator<Item = Vid>) -> Self {
        SeedFilter::Ids(vids.into_iter().collect())
    }

    /// Resolves the seeds against `store`, ascending and without duplicates.
    pub fn select<S: GraphView>(&self, store: &S) -> Result<Vec<Vid>> {
        match self {
            SeedFilter::PropertyEq { key, value } => Ok(store.vertices_with_property(key, value)),
            SeedFilter::Ids(vids) => {
                let mut seeds = vids.clone();
                seeds.sort_unstable();
                seeds.dedup();
                if let Some(missing) = seeds.iter().find(|vid| !store.contains_vertex(**vid)) {
                    return Err(GraphError::vertex_not_found(*missing));
                }
                Ok(seeds)
            }
        }
    }
}

/// Lists the edges a frontier vertex can be left through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expand {
    direction: Direction,
}

impl Expand {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Incident edges of `vid` paired with the vertex each one leads to.
    ///
    /// A self-loop leads back to `vid`.
    pub fn apply<'g, S: GraphView>(&self, store: &'g S, vid: Vid) -> Result<Vec<(&'g Edge, Vid)>> {
        Ok(store
            .neighbors(vid, self.direction)?
            .map(|edge| {
                let far = if edge.out_vid() == vid {
                    edge.in_vid()
                } else {
                    edge.out_vid()
                };
                (edge, far)
            })
            .collect())
    }
}

/// Lets each item through once.
#[derive(Debug, Clone)]
pub struct Dedup<T> {
    seen: FxHashSet<T>,
}

impl<T: Eq + Hash> Dedup<T> {
    pub fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
        }
    }

    /// `true` the first time `item` is offered, `false` afterwards.
    pub fn admit(&mut self, item: T) -> bool {
        self.seen.insert(item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.seen.contains(item)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<T: Eq + Hash> Default for Dedup<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-ordered, duplicate-free collection of traversal results.
#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    items: Vec<T>,
    members: FxHashSet<T>,
}

impl<T: Copy + Eq + Hash> Accumulator<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            members: FxHashSet::default(),
        }
    }

    /// Appends `item` unless present. Returns whether it was added.
    pub fn push(&mut self, item: T) -> bool {
        if self.members.insert(item) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.members.contains(item)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T: Copy + Eq + Hash> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> Extend<T> for Accumulator<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// One step of a [`HopTraversal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent {
    /// A seed vertex, emitted before any expansion.
    Seed(Vid),
    /// An edge crossed for the first time during `hop`.
    Edge { hop: usize, eid: Eid, from: Vid, to: Vid },
    /// A vertex reached for the first time during `hop`.
    Vertex { hop: usize, vid: Vid },
}

/// Lazy breadth-first expansion of a seed set, at most `hops` rounds deep.
///
/// Every edge is crossed at most once. A newly crossed edge is always
/// reported, even when it leads to a vertex that was already reached; only
/// first-time vertices join the next frontier. The iterator is finite and
/// cannot be restarted. After yielding an error it is exhausted.
#[derive(Debug)]
pub struct HopTraversal<'g, S> {
    store: &'g S,
    expand: Expand,
    hops: usize,
    hop: usize,
    frontier: VecDeque<Vid>,
    next_frontier: Vec<Vid>,
    crossed: Dedup<Eid>,
    reached: Dedup<Vid>,
    pending: VecDeque<TraversalEvent>,
    failed: bool,
}

impl<'g, S: GraphView> HopTraversal<'g, S> {
    /// Starts a traversal from `seeds`. Seeds are not checked for existence.
    pub fn new(store: &'g S, seeds: &[Vid], expand: Expand, hops: usize) -> Self {
        let mut reached = Dedup::new();
        let mut pending = VecDeque::with_capacity(seeds.len());
        let mut next_frontier = Vec::with_capacity(seeds.len());
        for &vid in seeds {
            if reached.admit(vid) {
                pending.push_back(TraversalEvent::Seed(vid));
                next_frontier.push(vid);
            }
        }

        Self {
            store,
            expand,
            hops,
            hop: 0,
            frontier: VecDeque::new(),
            next_frontier,
            crossed: Dedup::new(),
            reached,
            pending,
            failed: false,
        }
    }

    /// Expansion round currently being drained (0 while seeds are emitted).
    pub fn hop(&self) -> usize {
        self.hop
    }

    fn expand_vertex(&mut self, vid: Vid) -> Result<()> {
        for (edge, far) in self.expand.apply(self.store, vid)? {
            if !self.crossed.admit(edge.id()) {
                continue;
            }
            self.pending.push_back(TraversalEvent::Edge {
                hop: self.hop,
                eid: edge.id(),
                from: vid,
                to: far,
            });
            if self.reached.admit(far) {
                self.pending.push_back(TraversalEvent::Vertex {
                    hop: self.hop,
                    vid: far,
                });
                self.next_frontier.push(far);
            }
        }
        Ok(())
    }
}

impl<S: GraphView> Iterator for HopTraversal<'_, S> {
    type Item = Result<TraversalEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.failed {
                return None;
            }
            if let Some(vid) = self.frontier.pop_front() {
                if let Err(e) = self.expand_vertex(vid) {
                    self.failed = true;
                    return Some(Err(e));
                }
                continue;
            }
            if self.hop >= self.hops || self.next_frontier.is_empty() {
                return None;
            }
            self.hop += 1;
            self.frontier = mem::take(&mut self.next_frontier).into();
        }
    }
}

impl<S: GraphView> std::iter::FusedIterator for HopTraversal<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::{build_test_graph, vids};

    fn collect(traversal: HopTraversal<'_, impl GraphView>) -> Vec<TraversalEvent> {
        traversal.map(|e| e.unwrap()).collect()
    }

    #[test]
    fn test_seed_filter_property_eq() {
        let graph = build_test_graph(&[1, 2, 3], &[]);
        let seeds = SeedFilter::property_eq("number", 2i64)
            .select(&graph)
            .unwrap();
        assert_eq!(seeds, vids(&[2]));

        let none = SeedFilter::property_eq("number", "2").select(&graph).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_seed_filter_ids_must_exist() {
        let graph = build_test_graph(&[1, 2], &[]);
        let seeds = SeedFilter::ids(vids(&[2, 1, 2])).select(&graph).unwrap();
        assert_eq!(seeds, vids(&[1, 2]));

        let err = SeedFilter::ids(vids(&[9])).select(&graph).unwrap_err();
        assert!(matches!(err, GraphError::NotFound { .. }));
    }

    #[test]
    fn test_hops_bound_expansion() {
        // Path 1 - 2 - 3 - 4
        let graph = build_test_graph(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);
        let events = collect(HopTraversal::new(&graph, &vids(&[1]), Expand::default(), 2));

        assert_eq!(
            events,
            vec![
                TraversalEvent::Seed(Vid::new(1)),
                TraversalEvent::Edge {
                    hop: 1,
                    eid: Eid::new(0),
                    from: Vid::new(1),
                    to: Vid::new(2)
                },
                TraversalEvent::Vertex {
                    hop: 1,
                    vid: Vid::new(2)
                },
                TraversalEvent::Edge {
                    hop: 2,
                    eid: Eid::new(1),
                    from: Vid::new(2),
                    to: Vid::new(3)
                },
                TraversalEvent::Vertex {
                    hop: 2,
                    vid: Vid::new(3)
                },
            ]
        );
    }

    #[test]
    fn test_zero_hops_yields_seeds_only() {
        let graph = build_test_graph(&[1, 2], &[(1, 2)]);
        let events = collect(HopTraversal::new(&graph, &vids(&[1]), Expand::default(), 0));
        assert_eq!(events, vec![TraversalEvent::Seed(Vid::new(1))]);
    }

    #[test]
    fn test_edge_to_visited_vertex_is_reported_once() {
        // Triangle 1 - 2 - 3 - 1
        let graph = build_test_graph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let events = collect(HopTraversal::new(&graph, &vids(&[1]), Expand::default(), 2));

        let edges: Vec<Eid> = events
            .iter()
            .filter_map(|e| match e {
                TraversalEvent::Edge { eid, .. } => Some(*eid),
                _ => None,
            })
            .collect();
        let vertices = events
            .iter()
            .filter(|e| !matches!(e, TraversalEvent::Edge { .. }))
            .count();

        assert_eq!(edges.len(), 3);
        assert_eq!(vertices, 3);
    }

    #[test]
    fn test_outgoing_direction_only() {
        // 2 -> 1 is not followed from 1 when going out
        let graph = build_test_graph(&[1, 2, 3], &[(2, 1), (1, 3)]);
        let events = collect(HopTraversal::new(
            &graph,
            &vids(&[1]),
            Expand::new(Direction::Outgoing),
            3,
        ));
        assert!(events.contains(&TraversalEvent::Vertex {
            hop: 1,
            vid: Vid::new(3)
        }));
        assert!(!events.iter().any(|e| matches!(
            e,
            TraversalEvent::Vertex { vid, .. } if *vid == Vid::new(2)
        )));
    }

    #[test]
    fn test_missing_seed_surfaces_once() {
        let graph = build_test_graph(&[1], &[]);
        let mut traversal = HopTraversal::new(&graph, &vids(&[7]), Expand::default(), 1);

        assert_eq!(
            traversal.next().unwrap().unwrap(),
            TraversalEvent::Seed(Vid::new(7))
        );
        assert!(traversal.next().unwrap().is_err());
        assert!(traversal.next().is_none());
    }

    #[test]
    fn test_accumulator_keeps_first_occurrence_order() {
        let mut acc = Accumulator::new();
        assert!(acc.push(3));
        assert!(acc.push(1));
        assert!(!acc.push(3));
        acc.extend([2, 1]);
        assert_eq!(acc.as_slice(), &[3, 1, 2]);
        assert!(acc.contains(&2));
    }
}
