// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Property-based tests for the in-memory store.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use subrank_common::{Direction, Eid, Properties, PropertyValue, Value, Vid};
use subrank_store::{Edge, GraphStore, GraphView, MemoryGraph};

#[derive(Debug, Clone)]
enum StoreOp {
    AddVertex(u64, i64),
    AddEdge(u64, u64, u64),
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (0u64..20, 0i64..5).prop_map(|(v, n)| StoreOp::AddVertex(v, n)),
        (0u64..50, 0u64..20, 0u64..20).prop_map(|(e, a, b)| StoreOp::AddEdge(e, a, b)),
    ]
}

fn number(n: i64) -> Properties {
    let mut p = Properties::new();
    p.insert("number".to_string(), PropertyValue::from(n));
    p
}

proptest! {
    /// Re-adding a vertex id never creates a duplicate.
    #[test]
    fn vertex_upsert_keeps_count(vid in 0u64..1000, repeats in 1usize..10) {
        let mut g = MemoryGraph::new();
        for i in 0..repeats {
            g.add_vertex(Vid::new(vid), "node", number(i as i64)).unwrap();
            prop_assert_eq!(g.vertex_count(), 1);
            prop_assert_eq!(g.all_vertices().count(), 1);
        }
        let last = (repeats - 1) as i64;
        prop_assert_eq!(g.vertices_with_property("number", &Value::Int(last)), vec![Vid::new(vid)]);
    }

    /// After any sequence of operations the index, counts and adjacency agree
    /// with a naive model.
    #[test]
    fn store_matches_model(ops in prop::collection::vec(store_op_strategy(), 0..80)) {
        let mut g = MemoryGraph::new();
        let mut model_vertices: HashMap<u64, i64> = HashMap::new();
        let mut model_edges: HashMap<u64, (u64, u64)> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::AddVertex(v, n) => {
                    g.add_vertex(Vid::new(v), "node", number(n)).unwrap();
                    model_vertices.insert(v, n);
                }
                StoreOp::AddEdge(e, a, b) => {
                    let result = g.add_edge(Eid::new(e), "link", Vid::new(a), Vid::new(b), Properties::new());
                    let endpoints_exist = model_vertices.contains_key(&a) && model_vertices.contains_key(&b);
                    match model_edges.get(&e) {
                        _ if !endpoints_exist => {
                            prop_assert!(result.is_err());
                        }
                        Some(&(ea, eb)) => {
                            prop_assert_eq!(result.is_ok(), (ea, eb) == (a, b));
                        }
                        None => {
                            prop_assert!(result.is_ok());
                            model_edges.insert(e, (a, b));
                        }
                    }
                }
            }
        }

        prop_assert_eq!(g.vertex_count(), model_vertices.len());
        prop_assert_eq!(g.edge_count(), model_edges.len());

        for (&v, &n) in &model_vertices {
            prop_assert!(g.vertices_with_property("number", &Value::Int(n)).contains(&Vid::new(v)));
        }

        // Every edge appears exactly once among its endpoints' incident lists.
        for v in model_vertices.keys() {
            let incident: Vec<Eid> = g.neighbors(Vid::new(*v), Direction::Both).unwrap().map(Edge::id).collect();
            let unique: HashSet<Eid> = incident.iter().copied().collect();
            prop_assert_eq!(incident.len(), unique.len());
            for eid in &incident {
                let (a, b) = model_edges[&eid.as_u64()];
                prop_assert!(a == *v || b == *v);
            }
        }
    }
}
