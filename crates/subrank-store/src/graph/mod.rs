// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Property graph store interface.
//!
//! The algorithms only consume [`GraphView`]. Loaders and subgraph
//! materialization additionally need [`GraphStore`]. Callers construct the
//! implementation they want and pass it in; there is no lookup by name.

pub mod element;
pub mod index;
pub mod memory;

use element::{Edge, Vertex};
use subrank_common::{Direction, Eid, GraphError, Properties, Result, Value, Vid};

/// Read access to a property graph.
pub trait GraphView {
    /// Vertex by id, `None` if absent.
    fn vertex(&self, vid: Vid) -> Option<&Vertex>;

    /// Edge by id, `None` if absent.
    fn edge(&self, eid: Eid) -> Option<&Edge>;

    /// Edges incident to `vid` in `direction`.
    ///
    /// Under [`Direction::Both`] a self-loop is yielded once. Fails with
    /// `NotFound` when the vertex is absent.
    fn neighbors(&self, vid: Vid, direction: Direction) -> Result<impl Iterator<Item = &Edge>>;

    fn all_vertices(&self) -> impl Iterator<Item = &Vertex>;

    fn all_edges(&self) -> impl Iterator<Item = &Edge>;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Ids of vertices whose `key` property holds `value`, ascending.
    ///
    /// The default scans every vertex; indexed stores override it.
    fn vertices_with_property(&self, key: &str, value: &Value) -> Vec<Vid> {
        let mut vids: Vec<Vid> = self
            .all_vertices()
            .filter(|v| v.property(key).is_some_and(|pv| pv.contains(value)))
            .map(Vertex::id)
            .collect();
        vids.sort_unstable();
        vids
    }

    fn get_vertex(&self, vid: Vid) -> Result<&Vertex> {
        self.vertex(vid)
            .ok_or_else(|| GraphError::vertex_not_found(vid))
    }

    fn get_edge(&self, eid: Eid) -> Result<&Edge> {
        self.edge(eid).ok_or_else(|| GraphError::edge_not_found(eid))
    }

    fn contains_vertex(&self, vid: Vid) -> bool {
        self.vertex(vid).is_some()
    }

    fn contains_edge(&self, eid: Eid) -> bool {
        self.edge(eid).is_some()
    }
}

/// Write access to a property graph.
pub trait GraphStore: GraphView {
    /// Inserts a vertex, or merges `properties` into an existing vertex with
    /// the same id. The label of an existing vertex is kept.
    fn add_vertex(&mut self, vid: Vid, label: &str, properties: Properties) -> Result<&Vertex>;

    /// Inserts an edge between two existing vertices.
    ///
    /// Fails with `NotFound` if either endpoint is absent. Re-adding an id
    /// with the same endpoints merges properties; different endpoints fail
    /// with `InvalidArgument`.
    fn add_edge(
        &mut self,
        eid: Eid,
        label: &str,
        out_vid: Vid,
        in_vid: Vid,
        properties: Properties,
    ) -> Result<&Edge>;

    /// Removes every vertex and edge.
    fn remove_all(&mut self);
}
