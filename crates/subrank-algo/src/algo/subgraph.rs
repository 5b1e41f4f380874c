// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Bounded-radius subgraph extraction.
//!
//! Extraction runs a [`HopTraversal`] from the seed set, accumulating every
//! reached vertex and crossed edge, then makes a closure pass: any edge whose
//! two endpoints both landed in the vertex set joins the edge set. The result
//! is the subgraph induced by the vertices within `hops` of a seed.

use crate::algo::traversal::{Accumulator, Expand, HopTraversal, SeedFilter, TraversalEvent};
use std::collections::BTreeSet;
use subrank_common::{Direction, Eid, Result, TraversalConfig, Vid};
use subrank_store::{Edge, GraphStore, GraphView, MemoryGraph, Vertex};
use tracing::{debug, instrument};

/// Ids of an extracted subgraph, in visitation order.
///
/// Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    vertices: Accumulator<Vid>,
    edges: Accumulator<Eid>,
}

impl Subgraph {
    pub fn vertex_ids(&self) -> &[Vid] {
        self.vertices.as_slice()
    }

    pub fn edge_ids(&self) -> &[Eid] {
        self.edges.as_slice()
    }

    pub fn contains_vertex(&self, vid: Vid) -> bool {
        self.vertices.contains(&vid)
    }

    pub fn contains_edge(&self, eid: Eid) -> bool {
        self.edges.contains(&eid)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex ids in ascending order.
    pub fn sorted_vertices(&self) -> BTreeSet<Vid> {
        self.vertices.iter().copied().collect()
    }

    /// Edge ids in ascending order.
    pub fn sorted_edges(&self) -> BTreeSet<Eid> {
        self.edges.iter().copied().collect()
    }
}

impl PartialEq for Subgraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count() == other.vertex_count()
            && self.edge_count() == other.edge_count()
            && self.vertex_ids().iter().all(|v| other.contains_vertex(*v))
            && self.edge_ids().iter().all(|e| other.contains_edge(*e))
    }
}

impl Eq for Subgraph {}

/// An extracted subgraph holding references to the store's elements.
///
/// Lets a standalone copy be built without going back to the store.
#[derive(Debug, Clone)]
pub struct MaterializedSubgraph<'g> {
    vertices: Vec<&'g Vertex>,
    edges: Vec<&'g Edge>,
}

impl<'g> MaterializedSubgraph<'g> {
    pub fn vertices(&self) -> &[&'g Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[&'g Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Copies the subgraph into a new in-memory store.
    ///
    /// Ids, labels and properties are preserved.
    pub fn to_graph(&self) -> Result<MemoryGraph> {
        let mut graph = MemoryGraph::with_capacity(self.vertices.len(), self.edges.len());
        for vertex in &self.vertices {
            graph.add_vertex(vertex.id(), vertex.label(), vertex.properties().clone())?;
        }
        for edge in &self.edges {
            graph.add_edge(
                edge.id(),
                edge.label(),
                edge.out_vid(),
                edge.in_vid(),
                edge.properties().clone(),
            )?;
        }
        Ok(graph)
    }

    /// Drops the references, keeping only ids.
    pub fn to_subgraph(&self) -> Subgraph {
        let mut subgraph = Subgraph::default();
        subgraph.vertices.extend(self.vertices.iter().map(|v| v.id()));
        subgraph.edges.extend(self.edges.iter().map(|e| e.id()));
        subgraph
    }
}

/// Extracts the subgraph within a fixed number of hops of a seed set.
///
/// # Example
///
/// ```ignore
/// let subgraph = SubgraphExtractor::new(&graph)
///     .hops(2)
///     .extract(&SeedFilter::property_eq("number", 204984i64))?;
/// ```
pub struct SubgraphExtractor<'g, S> {
    store: &'g S,
    config: TraversalConfig,
}

impl<'g, S: GraphView> SubgraphExtractor<'g, S> {
    pub fn new(store: &'g S) -> Self {
        Self::with_config(store, TraversalConfig::default())
    }

    pub fn with_config(store: &'g S, config: TraversalConfig) -> Self {
        Self { store, config }
    }

    pub fn hops(mut self, hops: usize) -> Self {
        self.config.hops = hops;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Lazy event stream of the expansion phase only.
    pub fn traverse(&self, seed: &SeedFilter) -> Result<HopTraversal<'g, S>> {
        let seeds = seed.select(self.store)?;
        Ok(HopTraversal::new(
            self.store,
            &seeds,
            Expand::new(self.config.direction),
            self.config.hops,
        ))
    }

    /// Extracts the subgraph as id sets.
    ///
    /// A seed filter matching nothing yields an empty subgraph.
    #[instrument(skip(self), fields(hops = self.config.hops, direction = %self.config.direction))]
    pub fn extract(&self, seed: &SeedFilter) -> Result<Subgraph> {
        let mut subgraph = Subgraph::default();
        for event in self.traverse(seed)? {
            match event? {
                TraversalEvent::Seed(vid) | TraversalEvent::Vertex { vid, .. } => {
                    subgraph.vertices.push(vid);
                }
                TraversalEvent::Edge { eid, .. } => {
                    subgraph.edges.push(eid);
                }
            }
        }
        let traversed = subgraph.edges.len();

        let closed = close_edges(self.store, &subgraph.vertices, &mut subgraph.edges)?;

        debug!(
            vertices = subgraph.vertex_count(),
            traversed_edges = traversed,
            closure_edges = closed,
            "Extracted subgraph"
        );
        Ok(subgraph)
    }

    /// Extracts the subgraph as references into the store.
    pub fn extract_materialized(&self, seed: &SeedFilter) -> Result<MaterializedSubgraph<'g>> {
        let subgraph = self.extract(seed)?;
        let vertices = subgraph
            .vertex_ids()
            .iter()
            .map(|vid| self.store.get_vertex(*vid))
            .collect::<Result<Vec<_>>>()?;
        let edges = subgraph
            .edge_ids()
            .iter()
            .map(|eid| self.store.get_edge(*eid))
            .collect::<Result<Vec<_>>>()?;
        Ok(MaterializedSubgraph { vertices, edges })
    }
}

/// Adds every edge joining two accumulated vertices. Returns how many were new.
///
/// Incident edges are scanned in both directions whatever direction the
/// expansion used.
fn close_edges<S: GraphView>(
    store: &S,
    vertices: &Accumulator<Vid>,
    edges: &mut Accumulator<Eid>,
) -> Result<usize> {
    let mut added = 0;
    for &vid in vertices.as_slice() {
        for edge in store.neighbors(vid, Direction::Both)? {
            if edges.contains(&edge.id()) {
                continue;
            }
            let far = edge.other_end(vid).unwrap_or(vid);
            if vertices.contains(&far) && edges.push(edge.id()) {
                added += 1;
            }
        }
    }
    Ok(added)
}
