// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Ordered, truncated rank tables.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use subrank_common::{Properties, ReportConfig, Result, Vid};
use subrank_store::GraphView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankRow {
    pub vid: Vid,
    /// Vertex properties at the time the table was built
    pub properties: Properties,
    pub rank: f64,
}

/// The top ranks of a run plus the size of the graph view it ran on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankTable {
    rows: Vec<RankRow>,
    vertex_count: usize,
    edge_count: usize,
}

impl RankTable {
    /// Sorts `scores` by rank descending, ties by vertex id ascending, keeps
    /// the first `config.top_k` and snapshots each vertex's properties from
    /// `store`.
    pub fn build<S: GraphView>(
        store: &S,
        scores: &[(Vid, f64)],
        vertex_count: usize,
        edge_count: usize,
        config: &ReportConfig,
    ) -> Result<Self> {
        let mut ranked = scores.to_vec();
        ranked.sort_by(rank_order);
        ranked.truncate(config.top_k);

        let rows = ranked
            .into_iter()
            .map(|(vid, rank)| {
                let properties = store.get_vertex(vid)?.properties().clone();
                Ok(RankRow {
                    vid,
                    properties,
                    rank,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rows,
            vertex_count,
            edge_count,
        })
    }

    pub fn rows(&self) -> &[RankRow] {
        &self.rows
    }

    /// Row vertex ids in table order.
    pub fn ids(&self) -> Vec<Vid> {
        self.rows.iter().map(|row| row.vid).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn rank_order(a: &(Vid, f64), b: &(Vid, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

impl fmt::Display for RankTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let mut keys: Vec<&String> = row.properties.keys().collect();
            keys.sort();
            let props = keys
                .into_iter()
                .map(|k| format!("{k}={}", row.properties[k]))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{}\t{:.6}\t{{{props}}}", row.vid, row.rank)?;
        }
        writeln!(f, "V: {}", self.vertex_count)?;
        write!(f, "E: {}", self.edge_count)
    }
}
