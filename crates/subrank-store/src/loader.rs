// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph loaders.
//!
//! The JSON-lines format holds one element per line:
//!
//! ```text
//! {"type":"vertex","id":1,"label":"paper","properties":{"number":204984}}
//! {"type":"edge","id":7,"label":"cites","out":1,"in":2,"properties":{}}
//! ```
//!
//! Vertices must appear before the edges that reference them.

use crate::graph::GraphStore;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use subrank_common::{Eid, GraphError, Properties, Result, Vid};
use tracing::{debug, info, instrument};

/// Counts of elements read by a loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub vertices: usize,
    pub edges: usize,
}

/// Reads an external graph representation into a store.
pub trait GraphLoader {
    fn load<S: GraphStore>(&self, store: &mut S, reader: impl BufRead) -> Result<LoadStats>;

    /// Opens `path` and loads it.
    fn load_path<S: GraphStore>(&self, store: &mut S, path: impl AsRef<Path>) -> Result<LoadStats> {
        let file = File::open(path.as_ref())?;
        self.load(store, BufReader::new(file))
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Vertex {
        id: Vid,
        #[serde(default = "default_vertex_label")]
        label: String,
        #[serde(default)]
        properties: Properties,
    },
    Edge {
        id: Eid,
        #[serde(default = "default_edge_label")]
        label: String,
        out: Vid,
        #[serde(rename = "in")]
        in_vid: Vid,
        #[serde(default)]
        properties: Properties,
    },
}

fn default_vertex_label() -> String {
    "vertex".to_string()
}

fn default_edge_label() -> String {
    "edge".to_string()
}

/// Loader for newline-delimited JSON graphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLinesLoader;

impl JsonLinesLoader {
    pub fn new() -> Self {
        Self
    }
}

impl GraphLoader for JsonLinesLoader {
    #[instrument(skip_all)]
    fn load<S: GraphStore>(&self, store: &mut S, reader: impl BufRead) -> Result<LoadStats> {
        let mut stats = LoadStats::default();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: Record =
                serde_json::from_str(trimmed).map_err(|e| GraphError::Parse {
                    message: e.to_string(),
                    line: line_no,
                })?;

            match record {
                Record::Vertex {
                    id,
                    label,
                    properties,
                } => {
                    store.add_vertex(id, &label, properties)?;
                    stats.vertices += 1;
                }
                Record::Edge {
                    id,
                    label,
                    out,
                    in_vid,
                    properties,
                } => {
                    store.add_edge(id, &label, out, in_vid, properties)?;
                    stats.edges += 1;
                }
            }

            if line_no % 100_000 == 0 {
                debug!(line_no, "Loading graph");
            }
        }

        info!(
            vertices = stats.vertices,
            edges = stats.edges,
            "Graph load completed"
        );
        Ok(stats)
    }
}
