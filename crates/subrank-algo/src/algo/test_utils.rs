// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use subrank_common::{Eid, Properties, PropertyValue, Vid};
use subrank_store::{GraphStore, MemoryGraph};

/// Builds a graph with one vertex per id and one edge per pair.
///
/// Each vertex carries `number = id`. Edge ids are assigned 0.. in list order.
pub fn build_test_graph(vids: &[u64], edges: &[(u64, u64)]) -> MemoryGraph {
    let mut graph = MemoryGraph::with_capacity(vids.len(), edges.len());
    for &id in vids {
        let mut props = Properties::new();
        props.insert("number".to_string(), PropertyValue::from(id as i64));
        graph
            .add_vertex(Vid::new(id), "vertex", props)
            .expect("vertex insert");
    }
    for (i, &(src, dst)) in edges.iter().enumerate() {
        graph
            .add_edge(
                Eid::new(i as u64),
                "edge",
                Vid::new(src),
                Vid::new(dst),
                Properties::new(),
            )
            .expect("edge endpoints must be listed in vids");
    }
    graph
}

pub fn vids(ids: &[u64]) -> Vec<Vid> {
    ids.iter().copied().map(Vid::new).collect()
}
