// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use crate::api::Subrank;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use subrank_algo::{
    CancellationToken, ComputeEngine, ComputeFilter, ComputeStats, PageRank, PageRankConfig,
    RankTable, SeedFilter, SubgraphExtractor,
};
use subrank_common::{
    ComputeConfig, Direction, GraphError, ReportConfig, Result, TraversalConfig, Value, Vid,
};
use subrank_store::GraphView;
use tracing::{info, instrument};

/// Where PageRank runs once the subgraph is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Copy the subgraph into a fresh store and rank the copy.
    Materialized,
    /// Rank the original store restricted to the ids of the extracted elements.
    Filtered,
    /// Rank the original store restricted by the ids-only extraction.
    FilteredIds,
}

impl RunMode {
    pub const ALL: [RunMode; 3] = [
        RunMode::Materialized,
        RunMode::Filtered,
        RunMode::FilteredIds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Materialized => "materialized",
            RunMode::Filtered => "filtered",
            RunMode::FilteredIds => "filtered-ids",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        RunMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                GraphError::invalid_argument(
                    "mode",
                    format!("'{s}' is not one of materialized, filtered, filtered-ids"),
                )
            })
    }
}

/// Outcome of one rank run.
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub mode: RunMode,
    /// Vertices in the extracted subgraph
    pub subgraph_vertices: usize,
    /// Edges in the extracted subgraph
    pub subgraph_edges: usize,
    pub table: RankTable,
    pub stats: ComputeStats,
}

/// Builder for subgraph PageRank runs.
///
/// Defaults come from the owning [`Subrank`]'s configuration.
#[must_use = "builders do nothing until .run() is called"]
pub struct SubgraphRankBuilder<'a> {
    db: &'a Subrank,
    seed: Option<SeedFilter>,
    traversal: TraversalConfig,
    pagerank: PageRankConfig,
    compute: ComputeConfig,
    report: ReportConfig,
    cancel: Option<CancellationToken>,
}

impl<'a> SubgraphRankBuilder<'a> {
    pub(crate) fn new(db: &'a Subrank) -> Self {
        let config = db.config();
        Self {
            db,
            seed: None,
            traversal: config.traversal,
            pagerank: PageRankConfig::default(),
            compute: config.compute.clone(),
            report: config.report,
            cancel: None,
        }
    }

    /// Seeds from vertices whose `key` property equals `value`.
    pub fn seed(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.seed = Some(SeedFilter::property_eq(key, value));
        self
    }

    /// Seeds from explicit vertex ids.
    pub fn seed_ids(mut self, vids: impl IntoIterator<Item = Vid>) -> Self {
        self.seed = Some(SeedFilter::ids(vids));
        self
    }

    pub fn hops(mut self, hops: usize) -> Self {
        self.traversal.hops = hops;
        self
    }

    /// Direction followed both while extracting and while ranking.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.traversal.direction = direction;
        self.pagerank.direction = direction;
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.pagerank.iterations = iterations;
        self
    }

    pub fn damping(mut self, d: f64) -> Self {
        self.pagerank.damping_factor = Some(d);
        self
    }

    pub fn tolerance(mut self, t: f64) -> Self {
        self.pagerank.tolerance = Some(t);
        self
    }

    pub fn top_k(mut self, k: usize) -> Self {
        self.report.top_k = k;
        self
    }

    pub fn parallelism(mut self, threads: usize) -> Self {
        self.compute.parallelism = threads;
        self
    }

    pub fn max_supersteps(mut self, n: u32) -> Self {
        self.compute.max_supersteps = n;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Extracts and ranks in one mode.
    pub fn run(self, mode: RunMode) -> Result<RankReport> {
        let (seed, mut engine) = self.prepare()?;
        let graph = self.db.graph().read();
        self.run_mode(&*graph, &mut engine, &seed, mode)
    }

    /// Extracts and ranks in every mode, in [`RunMode::ALL`] order.
    pub fn run_all(self) -> Result<Vec<RankReport>> {
        self.run_modes(&RunMode::ALL)
    }

    /// Runs `modes` in order against one consistent view of the graph.
    pub fn run_modes(self, modes: &[RunMode]) -> Result<Vec<RankReport>> {
        let (seed, mut engine) = self.prepare()?;
        let graph = self.db.graph().read();
        modes
            .iter()
            .map(|&mode| self.run_mode(&*graph, &mut engine, &seed, mode))
            .collect()
    }

    fn prepare(&self) -> Result<(SeedFilter, ComputeEngine)> {
        let seed = self
            .seed
            .clone()
            .ok_or_else(|| GraphError::invalid_argument("seed", "no seed filter was set"))?;

        let mut engine = ComputeEngine::new(self.compute.clone())?;
        if let Some(token) = &self.cancel {
            engine = engine.with_cancellation(token.clone());
        }
        Ok((seed, engine))
    }

    #[instrument(skip(self, store, engine, seed), fields(hops = self.traversal.hops))]
    fn run_mode<S: GraphView>(
        &self,
        store: &S,
        engine: &mut ComputeEngine,
        seed: &SeedFilter,
        mode: RunMode,
    ) -> Result<RankReport> {
        let extractor = SubgraphExtractor::with_config(store, self.traversal);
        let pagerank = self.pagerank.clone();

        let (result, table, subgraph_vertices, subgraph_edges) = match mode {
            RunMode::Materialized => {
                let subgraph = extractor.extract_materialized(seed)?;
                let copy = subgraph.to_graph()?;
                let result =
                    PageRank::run_filtered(engine, &copy, &ComputeFilter::all(), pagerank)?;
                let table = self.table(&copy, &result.scores, &result.stats)?;
                (result, table, subgraph.vertex_count(), subgraph.edge_count())
            }
            RunMode::Filtered => {
                let subgraph = extractor.extract_materialized(seed)?;
                let filter = ComputeFilter::from(&subgraph);
                let result = PageRank::run_filtered(engine, store, &filter, pagerank)?;
                let table = self.table(store, &result.scores, &result.stats)?;
                (result, table, subgraph.vertex_count(), subgraph.edge_count())
            }
            RunMode::FilteredIds => {
                let subgraph = extractor.extract(seed)?;
                let filter = ComputeFilter::from(&subgraph);
                let result = PageRank::run_filtered(engine, store, &filter, pagerank)?;
                let table = self.table(store, &result.scores, &result.stats)?;
                (result, table, subgraph.vertex_count(), subgraph.edge_count())
            }
        };

        info!(
            %mode,
            vertices = table.vertex_count(),
            edges = table.edge_count(),
            supersteps = result.stats.supersteps,
            "Subgraph ranked"
        );

        Ok(RankReport {
            mode,
            subgraph_vertices,
            subgraph_edges,
            table,
            stats: result.stats,
        })
    }

    fn table<S: GraphView>(
        &self,
        store: &S,
        scores: &[(Vid, f64)],
        stats: &ComputeStats,
    ) -> Result<RankTable> {
        RankTable::build(
            store,
            scores,
            stats.vertex_count,
            stats.edge_count,
            &self.report,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subrank_common::{Eid, Properties, PropertyValue};
    use subrank_store::GraphStore;

    fn db() -> Subrank {
        let db = Subrank::in_memory();
        db.write(|g| {
            for id in 1..=5u64 {
                let mut props = Properties::new();
                props.insert("number".into(), PropertyValue::from(id as i64 * 10));
                g.add_vertex(Vid::new(id), "vertex", props)?;
            }
            for (i, (a, b)) in [(1, 2), (2, 3), (3, 4), (4, 5)].into_iter().enumerate() {
                g.add_edge(
                    Eid::new(i as u64),
                    "edge",
                    Vid::new(a),
                    Vid::new(b),
                    Properties::new(),
                )?;
            }
            Ok(())
        })
        .unwrap();
        db
    }

    #[test]
    fn test_run_mode_round_trips_through_str() {
        for mode in RunMode::ALL {
            assert_eq!(mode.to_string().parse::<RunMode>().unwrap(), mode);
        }
        assert!("olap".parse::<RunMode>().is_err());
    }

    #[test]
    fn test_missing_seed_rejected() {
        let err = db().rank().run(RunMode::Filtered).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));
    }

    #[test]
    fn test_modes_agree() {
        let db = db();
        let reports = db.rank().seed("number", 30i64).hops(1).run_all().unwrap();

        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert_eq!(report.subgraph_vertices, 3);
            assert_eq!(report.subgraph_edges, 2);
            assert_eq!(report.table.vertex_count(), 3);
            assert_eq!(report.table.edge_count(), 2);
            assert_eq!(report.table, reports[0].table);
        }
        // Vertex 3 sits in the middle of the path 2 - 3 - 4.
        assert_eq!(reports[0].table.ids()[0], Vid::new(3));
    }

    #[test]
    fn test_cancelled_token_aborts_run() {
        let token = CancellationToken::new();
        token.cancel();
        let err = db()
            .rank()
            .seed_ids([Vid::new(1)])
            .cancellation(token)
            .run(RunMode::Materialized)
            .unwrap_err();
        assert!(matches!(err, GraphError::Cancelled { superstep: 0 }));
    }
}
