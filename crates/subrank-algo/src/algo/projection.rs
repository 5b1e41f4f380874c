// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph Projection - Dense CSR representation for compute runs.
//!
//! A `GraphProjection` is a read-only snapshot of the part of a store a
//! [`ComputeFilter`] lets through. It provides:
//! - Dense vertex indexing (0..V), ascending by vertex id
//! - CSR adjacency along one [`Direction`], each list ordered by edge id
//! - The edge id behind every adjacency entry
//!
//! Both orderings are fixed so the same vertex and edge set yields the same
//! projection, and thus bit-identical floating point sums, whether it was
//! read from a full store through a filter or from a standalone copy.

use crate::algo::IdMap;
use crate::algo::filter::ComputeFilter;
use fxhash::FxHashSet;
use subrank_common::{Direction, Eid, Result, Vid};
use subrank_store::GraphView;
use tracing::debug;

/// Adjacency entries for CSR construction: (source_slot, destination_slot, edge).
type EdgeList = Vec<(u32, u32, Eid)>;

/// Dense CSR representation optimized for superstep execution.
#[derive(Debug)]
pub struct GraphProjection {
    pub(crate) vertex_count: usize,

    /// Distinct edges that survived the filter
    pub(crate) edge_count: usize,

    pub(crate) direction: Direction,

    pub(crate) offsets: Vec<u32>, // [V+1] vertex slot -> entry start
    pub(crate) neighbors: Vec<u32>, // [entries] neighbor slots
    pub(crate) edge_ids: Vec<Eid>, // [entries] edge behind each entry

    pub(crate) id_map: IdMap,
}

impl GraphProjection {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of distinct edges in the projection.
    ///
    /// Under [`Direction::Both`] a non-loop edge appears in two adjacency
    /// lists but is counted once here.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Neighbor slots of a vertex along the projection direction.
    #[inline]
    pub fn neighbors(&self, slot: u32) -> &[u32] {
        let (start, end) = self.range(slot);
        &self.neighbors[start..end]
    }

    /// Edge ids parallel to [`neighbors`](Self::neighbors).
    #[inline]
    pub fn edge_ids(&self, slot: u32) -> &[Eid] {
        let (start, end) = self.range(slot);
        &self.edge_ids[start..end]
    }

    /// Number of adjacency entries of a vertex.
    #[inline]
    pub fn degree(&self, slot: u32) -> u32 {
        self.offsets[slot as usize + 1] - self.offsets[slot as usize]
    }

    /// Map slot back to vertex id.
    #[inline]
    pub fn to_vid(&self, slot: u32) -> Vid {
        self.id_map.to_vid_unchecked(slot)
    }

    #[inline]
    pub fn to_slot(&self, vid: Vid) -> Option<u32> {
        self.id_map.to_slot(vid)
    }

    /// Iterate over all vertices as (slot, vid).
    pub fn vertices(&self) -> impl Iterator<Item = (u32, Vid)> + '_ {
        self.id_map.iter()
    }

    /// Memory usage in bytes.
    pub fn memory_size(&self) -> usize {
        self.offsets.len() * 4
            + self.neighbors.len() * 4
            + self.edge_ids.len() * std::mem::size_of::<Eid>()
            + self.id_map.memory_size()
    }

    #[inline]
    fn range(&self, slot: u32) -> (usize, usize) {
        (
            self.offsets[slot as usize] as usize,
            self.offsets[slot as usize + 1] as usize,
        )
    }
}

/// Builder for constructing a `GraphProjection` from any [`GraphView`].
pub struct ProjectionBuilder<'a, S> {
    store: &'a S,
    filter: Option<&'a ComputeFilter>,
    direction: Direction,
}

impl<'a, S: GraphView> ProjectionBuilder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            filter: None,
            direction: Direction::Both,
        }
    }

    /// Restrict the projection to what `filter` accepts.
    pub fn filter(mut self, filter: &'a ComputeFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Direction whose incident edges become adjacency entries.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Build the projection.
    ///
    /// Fails with `InvalidFilter` if the filter names ids absent from the store.
    pub fn build(self) -> Result<GraphProjection> {
        let unrestricted = ComputeFilter::all();
        let filter = self.filter.unwrap_or(&unrestricted);
        filter.validate(self.store)?;

        // 1. Collect accepted vertices; slots follow id order
        let id_map = IdMap::from_unsorted(
            self.store
                .all_vertices()
                .map(|v| v.id())
                .filter(|vid| filter.accepts_vertex(*vid))
                .collect(),
        );
        let vertex_count = id_map.len();

        // 2. Collect adjacency entries whose far end is also projected
        let (entries, edge_count) = self.collect_edges(&id_map, filter)?;

        let (offsets, neighbors, edge_ids) = build_csr(vertex_count, &entries);

        debug!(
            vertices = vertex_count,
            edges = edge_count,
            direction = %self.direction,
            "Built graph projection"
        );

        Ok(GraphProjection {
            vertex_count,
            edge_count,
            direction: self.direction,
            offsets,
            neighbors,
            edge_ids,
            id_map,
        })
    }

    fn collect_edges(&self, id_map: &IdMap, filter: &ComputeFilter) -> Result<(EdgeList, usize)> {
        let mut entries = Vec::new();
        let mut distinct = FxHashSet::default();

        for (src_slot, src_vid) in id_map.iter() {
            let start = entries.len();
            for edge in self.store.neighbors(src_vid, self.direction)? {
                if !filter.accepts_edge(edge.id()) {
                    continue;
                }
                let far = if edge.out_vid() == src_vid {
                    edge.in_vid()
                } else {
                    edge.out_vid()
                };
                if let Some(dst_slot) = id_map.to_slot(far) {
                    entries.push((src_slot, dst_slot, edge.id()));
                    distinct.insert(edge.id());
                }
            }
            // Store adjacency order is insertion order; pin it to edge id.
            entries[start..].sort_unstable_by_key(|&(_, _, eid)| eid);
        }

        Ok((entries, distinct.len()))
    }
}

/// Build CSR from an entry list grouped by source slot.
fn build_csr(vertex_count: usize, entries: &[(u32, u32, Eid)]) -> (Vec<u32>, Vec<u32>, Vec<Eid>) {
    if vertex_count == 0 {
        return (vec![0], Vec::new(), Vec::new());
    }

    // Count degrees
    let mut degrees = vec![0u32; vertex_count];
    for &(src, _, _) in entries {
        degrees[src as usize] += 1;
    }

    // Build offsets (prefix sum)
    let mut offsets = vec![0u32; vertex_count + 1];
    for i in 0..vertex_count {
        offsets[i + 1] = offsets[i] + degrees[i];
    }

    // Fill neighbors, keeping per-source entry order
    let mut neighbors = vec![0u32; entries.len()];
    let mut edge_ids = vec![Eid::new(0); entries.len()];
    let mut current = offsets.clone();

    for &(src, dst, eid) in entries {
        let idx = current[src as usize] as usize;
        neighbors[idx] = dst;
        edge_ids[idx] = eid;
        current[src as usize] += 1;
    }

    (offsets, neighbors, edge_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::build_test_graph;
    use subrank_common::GraphError;

    #[test]
    fn test_build_csr() {
        // Triangle: 0 -> 1, 1 -> 2, 2 -> 0 plus a chord 0 -> 2
        let entries = vec![
            (0, 1, Eid::new(0)),
            (0, 2, Eid::new(3)),
            (1, 2, Eid::new(1)),
            (2, 0, Eid::new(2)),
        ];
        let (offsets, neighbors, edge_ids) = build_csr(3, &entries);

        assert_eq!(offsets, vec![0, 2, 3, 4]);
        assert_eq!(&neighbors[0..2], &[1, 2]);
        assert_eq!(&edge_ids[0..2], &[Eid::new(0), Eid::new(3)]);
        assert_eq!(neighbors[2], 2);
        assert_eq!(neighbors[3], 0);
    }

    #[test]
    fn test_direction_controls_adjacency() {
        // 1 -> 2, 1 -> 3
        let graph = build_test_graph(&[1, 2, 3], &[(1, 2), (1, 3)]);

        let out = ProjectionBuilder::new(&graph)
            .direction(Direction::Outgoing)
            .build()
            .unwrap();
        assert_eq!(out.vertex_count(), 3);
        assert_eq!(out.edge_count(), 2);
        assert_eq!(out.degree(0), 2);
        assert_eq!(out.degree(1), 0);

        let inc = ProjectionBuilder::new(&graph)
            .direction(Direction::Incoming)
            .build()
            .unwrap();
        assert_eq!(inc.degree(0), 0);
        assert_eq!(inc.neighbors(1), &[0]);

        let both = ProjectionBuilder::new(&graph).build().unwrap();
        assert_eq!(both.edge_count(), 2);
        assert_eq!(both.degree(0), 2);
        assert_eq!(both.degree(2), 1);
    }

    #[test]
    fn test_self_loop_counted_once() {
        let graph = build_test_graph(&[1, 2], &[(1, 1), (1, 2)]);
        let projection = ProjectionBuilder::new(&graph).build().unwrap();

        assert_eq!(projection.edge_count(), 2);
        assert_eq!(projection.degree(0), 2);
        assert_eq!(projection.neighbors(0), &[0, 1]);
    }

    #[test]
    fn test_filter_drops_edges_to_excluded_vertices() {
        // 1 - 2 - 3, keep 1 and 2 only
        let graph = build_test_graph(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let filter = ComputeFilter::vertices([Vid::new(1), Vid::new(2)]);
        let projection = ProjectionBuilder::new(&graph)
            .filter(&filter)
            .build()
            .unwrap();

        assert_eq!(projection.vertex_count(), 2);
        assert_eq!(projection.edge_count(), 1);
        assert_eq!(projection.to_slot(Vid::new(3)), None);
        assert_eq!(projection.edge_ids(1), &[Eid::new(0)]);
    }

    #[test]
    fn test_edge_restriction() {
        let graph = build_test_graph(&[1, 2], &[(1, 2), (2, 1)]);
        let filter = ComputeFilter::all().with_edges([Eid::new(1)]);
        let projection = ProjectionBuilder::new(&graph)
            .filter(&filter)
            .build()
            .unwrap();

        assert_eq!(projection.edge_count(), 1);
        assert_eq!(projection.edge_ids(0), &[Eid::new(1)]);
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let graph = build_test_graph(&[1], &[]);
        let filter = ComputeFilter::vertices([Vid::new(2)]);
        let err = ProjectionBuilder::new(&graph)
            .filter(&filter)
            .build()
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidFilter { .. }));
    }

    #[test]
    fn test_empty_projection() {
        let graph = build_test_graph(&[], &[]);
        let projection = ProjectionBuilder::new(&graph).build().unwrap();
        assert_eq!(projection.vertex_count(), 0);
        assert_eq!(projection.edge_count(), 0);
        assert_eq!(projection.vertices().count(), 0);
    }
}
