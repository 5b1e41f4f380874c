// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod rank;

use rank::SubgraphRankBuilder;
use std::io::BufRead;
use std::path::Path;
use subrank_common::{Result, SubrankConfig};
use subrank_store::{GraphStore, JsonLinesLoader, LoadStats, MemoryGraph, SharedGraph};
use tracing::info;

/// Handle to an in-memory property graph plus run defaults.
///
/// Loading and clearing take the graph's write lock. Rank runs hold the read
/// lock for their whole duration, so a graph never changes under a run.
///
/// # Example
///
/// ```no_run
/// # fn example() -> subrank::Result<()> {
/// let db = subrank::Subrank::in_memory();
/// db.load_path("graph.jsonl")?;
///
/// let report = db
///     .rank()
///     .seed("number", 204984i64)
///     .hops(2)
///     .iterations(1)
///     .top_k(20)
///     .run(subrank::RunMode::Filtered)?;
///
/// for row in report.table.rows() {
///     println!("{} {}", row.vid, row.rank);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Subrank {
    graph: SharedGraph<MemoryGraph>,
    config: SubrankConfig,
}

impl Subrank {
    pub fn new(config: SubrankConfig) -> Self {
        Self {
            graph: SharedGraph::new(MemoryGraph::new()),
            config,
        }
    }

    /// An empty graph with default configuration.
    pub fn in_memory() -> Self {
        Self::new(SubrankConfig::default())
    }

    /// Wraps an already populated graph.
    pub fn from_graph(graph: MemoryGraph, config: SubrankConfig) -> Self {
        Self {
            graph: SharedGraph::new(graph),
            config,
        }
    }

    pub fn config(&self) -> &SubrankConfig {
        &self.config
    }

    pub fn graph(&self) -> &SharedGraph<MemoryGraph> {
        &self.graph
    }

    /// Loads JSON-lines records into the graph.
    pub fn load(&self, reader: impl BufRead) -> Result<LoadStats> {
        self.graph.load(&JsonLinesLoader::new(), reader)
    }

    /// Loads a JSON-lines file into the graph.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadStats> {
        let path = path.as_ref();
        let stats = self.graph.load_path(&JsonLinesLoader::new(), path)?;
        info!(
            path = %path.display(),
            vertices = stats.vertices,
            edges = stats.edges,
            "Graph file loaded"
        );
        Ok(stats)
    }

    /// Removes every vertex and edge.
    pub fn clear(&self) {
        self.graph.clear();
    }

    /// Inserts into the graph under the write lock.
    pub fn write<T>(&self, f: impl FnOnce(&mut MemoryGraph) -> Result<T>) -> Result<T> {
        let mut graph = self.graph.write();
        f(&mut graph)
    }

    /// Starts configuring a subgraph rank run.
    pub fn rank(&self) -> SubgraphRankBuilder<'_> {
        SubgraphRankBuilder::new(self)
    }
}

impl Default for Subrank {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Convenience for callers holding a bare store.
impl From<MemoryGraph> for Subrank {
    fn from(graph: MemoryGraph) -> Self {
        Self::from_graph(graph, SubrankConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use subrank_common::{Properties, Vid};
    use subrank_store::GraphView;

    #[test]
    fn test_load_write_and_clear() {
        let db = Subrank::in_memory();
        let stats = db
            .load(Cursor::new(
                "{\"type\":\"vertex\",\"id\":1}\n{\"type\":\"vertex\",\"id\":2}\n",
            ))
            .unwrap();
        assert_eq!(stats.vertices, 2);

        db.write(|g| {
            g.add_vertex(Vid::new(3), "vertex", Properties::new())?;
            Ok(())
        })
        .unwrap();
        assert_eq!(db.graph().read().vertex_count(), 3);

        db.clear();
        assert_eq!(db.graph().read().vertex_count(), 0);
    }
}
