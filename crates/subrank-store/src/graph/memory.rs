// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! In-memory property graph.
//!
//! Adjacency lists per vertex plus direct id maps:
//! - O(1) vertex and edge lookup by id
//! - O(degree) neighbor iteration
//! - O(1) equality lookup on vertex properties through [`PropertyIndex`]

use super::element::{Edge, Vertex};
use super::index::PropertyIndex;
use super::{GraphStore, GraphView};
use fxhash::FxBuildHasher;
use std::collections::HashMap;
use subrank_common::{Direction, Eid, GraphError, Properties, Result, Value, Vid};
use tracing::trace;

/// Type alias for FxHashMap (faster hashing for integer keys)
type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

#[derive(Debug)]
pub struct MemoryGraph {
    vertices: FxHashMap<Vid, Vertex>,
    edges: FxHashMap<Eid, Edge>,
    /// Outgoing edges per vertex: out_vid -> [eid]
    outgoing: FxHashMap<Vid, Vec<Eid>>,
    /// Incoming edges per vertex: in_vid -> [eid]
    incoming: FxHashMap<Vid, Vec<Eid>>,
    index: PropertyIndex,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self {
            vertices: HashMap::with_hasher(FxBuildHasher::default()),
            edges: HashMap::with_hasher(FxBuildHasher::default()),
            outgoing: HashMap::with_hasher(FxBuildHasher::default()),
            incoming: HashMap::with_hasher(FxBuildHasher::default()),
            index: PropertyIndex::new(),
        }
    }
}

impl MemoryGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity_and_hasher(vertices, FxBuildHasher::default()),
            edges: HashMap::with_capacity_and_hasher(edges, FxBuildHasher::default()),
            outgoing: HashMap::with_capacity_and_hasher(vertices, FxBuildHasher::default()),
            incoming: HashMap::with_capacity_and_hasher(vertices, FxBuildHasher::default()),
            index: PropertyIndex::new(),
        }
    }

    fn merge_vertex_properties(&mut self, vid: Vid, properties: Properties) {
        let Some(vertex) = self.vertices.get_mut(&vid) else {
            return;
        };
        for (key, value) in properties {
            let value = value.dedup();
            if let Some(old) = vertex.properties.insert(key.clone(), value.clone()) {
                self.index.remove(&key, &old, vid);
            }
            self.index.insert(&key, &value, vid);
        }
    }
}

fn adjacency(map: &FxHashMap<Vid, Vec<Eid>>, vid: Vid, enabled: bool) -> &[Eid] {
    if !enabled {
        return &[];
    }
    map.get(&vid).map(|v| v.as_slice()).unwrap_or(&[])
}

impl GraphView for MemoryGraph {
    fn vertex(&self, vid: Vid) -> Option<&Vertex> {
        self.vertices.get(&vid)
    }

    fn edge(&self, eid: Eid) -> Option<&Edge> {
        self.edges.get(&eid)
    }

    fn neighbors(&self, vid: Vid, direction: Direction) -> Result<impl Iterator<Item = &Edge>> {
        if !self.vertices.contains_key(&vid) {
            return Err(GraphError::vertex_not_found(vid));
        }

        let edges = &self.edges;
        let outgoing = adjacency(&self.outgoing, vid, direction.includes_outgoing());
        let incoming = adjacency(&self.incoming, vid, direction.includes_incoming());

        Ok(outgoing
            .iter()
            .filter_map(move |eid| edges.get(eid))
            .chain(
                incoming
                    .iter()
                    .filter_map(move |eid| edges.get(eid))
                    // Already yielded from the outgoing side.
                    .filter(move |e| !(direction == Direction::Both && e.is_self_loop())),
            ))
    }

    fn all_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn vertices_with_property(&self, key: &str, value: &Value) -> Vec<Vid> {
        self.index.lookup(key, value)
    }
}

impl GraphStore for MemoryGraph {
    fn add_vertex(&mut self, vid: Vid, label: &str, properties: Properties) -> Result<&Vertex> {
        if !self.vertices.contains_key(&vid) {
            trace!(vid = %vid, label, "Inserting vertex");
            self.vertices
                .insert(vid, Vertex::new(vid, label, Properties::new()));
        }
        self.merge_vertex_properties(vid, properties);
        self.get_vertex(vid)
    }

    fn add_edge(
        &mut self,
        eid: Eid,
        label: &str,
        out_vid: Vid,
        in_vid: Vid,
        properties: Properties,
    ) -> Result<&Edge> {
        if !self.vertices.contains_key(&out_vid) {
            return Err(GraphError::vertex_not_found(out_vid));
        }
        if !self.vertices.contains_key(&in_vid) {
            return Err(GraphError::vertex_not_found(in_vid));
        }

        if let Some(existing) = self.edges.get_mut(&eid) {
            if existing.out_vid != out_vid || existing.in_vid != in_vid {
                return Err(GraphError::invalid_argument(
                    "eid",
                    format!(
                        "edge {} already connects {} -> {}, cannot re-add as {} -> {}",
                        eid, existing.out_vid, existing.in_vid, out_vid, in_vid
                    ),
                ));
            }
            for (key, value) in properties {
                existing.properties.insert(key, value.dedup());
            }
            return self.get_edge(eid);
        }

        trace!(eid = %eid, label, out_vid = %out_vid, in_vid = %in_vid, "Inserting edge");
        let properties = properties
            .into_iter()
            .map(|(k, v)| (k, v.dedup()))
            .collect();
        self.outgoing.entry(out_vid).or_default().push(eid);
        self.incoming.entry(in_vid).or_default().push(eid);
        self.edges
            .insert(eid, Edge::new(eid, label, out_vid, in_vid, properties));
        self.get_edge(eid)
    }

    fn remove_all(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.index.clear();
    }
}
