// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Vertex and edge restriction applied to a compute run.

use crate::algo::subgraph::{MaterializedSubgraph, Subgraph};
use fxhash::FxHashSet;
use std::fmt::Display;
use subrank_common::{Eid, GraphError, Result, Vid};
use subrank_store::GraphView;

/// Ids shown in an `InvalidFilter` message before it is truncated.
const MAX_REPORTED_IDS: usize = 5;

/// Restricts which vertices and edges a compute run sees.
///
/// `None` on either side means "everything". An edge is visible only when it
/// passes the edge restriction and both of its endpoints pass the vertex
/// restriction.
#[derive(Debug, Clone, Default)]
pub struct ComputeFilter {
    vertices: Option<FxHashSet<Vid>>,
    edges: Option<FxHashSet<Eid>>,
}

impl ComputeFilter {
    /// A filter that accepts the whole store.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts vertices only; every edge between accepted vertices stays.
    pub fn vertices(vids: impl IntoIterator<Item = Vid>) -> Self {
        Self {
            vertices: Some(vids.into_iter().collect()),
            edges: None,
        }
    }

    pub fn with_edges(mut self, eids: impl IntoIterator<Item = Eid>) -> Self {
        self.edges = Some(eids.into_iter().collect());
        self
    }

    pub fn from_subgraph(subgraph: &Subgraph) -> Self {
        Self::vertices(subgraph.vertex_ids().iter().copied())
            .with_edges(subgraph.edge_ids().iter().copied())
    }

    #[inline]
    pub fn accepts_vertex(&self, vid: Vid) -> bool {
        self.vertices.as_ref().is_none_or(|set| set.contains(&vid))
    }

    #[inline]
    pub fn accepts_edge(&self, eid: Eid) -> bool {
        self.edges.as_ref().is_none_or(|set| set.contains(&eid))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.vertices.is_none() && self.edges.is_none()
    }

    /// Checks every restricted id against `store`.
    ///
    /// Fails with `InvalidFilter` naming the first few absent ids.
    pub fn validate<S: GraphView>(&self, store: &S) -> Result<()> {
        if let Some(vertices) = &self.vertices {
            let mut missing: Vec<Vid> = vertices
                .iter()
                .copied()
                .filter(|vid| !store.contains_vertex(*vid))
                .collect();
            if !missing.is_empty() {
                missing.sort_unstable();
                return Err(missing_ids("vertex", &missing));
            }
        }

        if let Some(edges) = &self.edges {
            let mut missing: Vec<Eid> = edges
                .iter()
                .copied()
                .filter(|eid| !store.contains_edge(*eid))
                .collect();
            if !missing.is_empty() {
                missing.sort_unstable();
                return Err(missing_ids("edge", &missing));
            }
        }

        Ok(())
    }
}

fn missing_ids<T: Display>(entity: &str, ids: &[T]) -> GraphError {
    let mut shown: Vec<String> = ids
        .iter()
        .take(MAX_REPORTED_IDS)
        .map(ToString::to_string)
        .collect();
    if ids.len() > MAX_REPORTED_IDS {
        shown.push("...".to_string());
    }
    GraphError::InvalidFilter {
        message: format!(
            "{} {} id(s) not in store: [{}]",
            ids.len(),
            entity,
            shown.join(", ")
        ),
    }
}

impl From<&Subgraph> for ComputeFilter {
    fn from(subgraph: &Subgraph) -> Self {
        Self::from_subgraph(subgraph)
    }
}

impl From<&MaterializedSubgraph<'_>> for ComputeFilter {
    fn from(subgraph: &MaterializedSubgraph<'_>) -> Self {
        Self::vertices(subgraph.vertices().iter().map(|v| v.id()))
            .with_edges(subgraph.edges().iter().map(|e| e.id()))
    }
}
