// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! PageRank Centrality Algorithm.
//!
//! Superstep 0 gives every vertex rank `1/N` and sends `rank / degree` along
//! each adjacency entry. Every later superstep replaces a vertex's rank with
//! the sum of what it received and, unless it is the last, sends again. There
//! is no teleportation term unless `damping_factor` is set, so a vertex with
//! no adjacency entries absorbs whatever rank reaches it.

use crate::algo::GraphProjection;
use crate::algo::algorithms::Algorithm;
use crate::algo::compute::{
    ComputeEngine, ComputeStats, HaltReason, InitContext, SuperstepSummary, VertexContext,
    VertexProgram,
};
use crate::algo::filter::ComputeFilter;
use crate::algo::projection::ProjectionBuilder;
use subrank_common::{Direction, GraphError, Result, Vid};
use subrank_store::GraphView;

pub struct PageRank;

#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Rank-propagation rounds after the seeding superstep (default: 1)
    pub iterations: u32,
    /// `Some(d)` uses `(1 - d) / N + d * sum` (default: None)
    pub damping_factor: Option<f64>,
    /// Stop once the summed absolute rank change falls below this (default: None)
    pub tolerance: Option<f64>,
    /// Edges rank flows along (default: both)
    pub direction: Direction,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            iterations: 1,
            damping_factor: None,
            tolerance: None,
            direction: Direction::Both,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(d) = self.damping_factor
            && !(0.0..=1.0).contains(&d)
        {
            return Err(GraphError::invalid_argument(
                "damping_factor",
                format!("{d} is outside [0, 1]"),
            ));
        }
        if let Some(t) = self.tolerance
            && !(t.is_finite() && t > 0.0)
        {
            return Err(GraphError::invalid_argument(
                "tolerance",
                format!("{t} must be a positive finite number"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Final rank per vertex, ascending by vertex id
    pub scores: Vec<(Vid, f64)>,
    /// Propagation rounds actually run
    pub iterations: u32,
    /// Whether the tolerance stopped the run early
    pub converged: bool,
    pub stats: ComputeStats,
}

impl PageRankResult {
    pub fn score(&self, vid: Vid) -> Option<f64> {
        self.scores
            .binary_search_by_key(&vid, |(v, _)| *v)
            .ok()
            .map(|i| self.scores[i].1)
    }

    /// Sum of all ranks.
    pub fn total(&self) -> f64 {
        self.scores.iter().map(|(_, r)| r).sum()
    }
}

/// The PageRank vertex program. Vertex state is the current rank.
#[derive(Debug, Clone)]
pub struct PageRankProgram {
    config: PageRankConfig,
}

impl PageRankProgram {
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    fn converged(&self, summary: &SuperstepSummary) -> bool {
        summary.superstep > 0
            && self
                .config
                .tolerance
                .is_some_and(|t| summary.aggregate < t)
    }
}

impl VertexProgram for PageRankProgram {
    type State = f64;
    type Message = f64;

    fn name(&self) -> &'static str {
        PageRank::name()
    }

    fn direction(&self) -> Direction {
        self.config.direction
    }

    fn initial_state(&self, _vid: Vid, ctx: &InitContext) -> f64 {
        1.0 / ctx.vertex_count as f64
    }

    fn compute(
        &self,
        ctx: &mut VertexContext<'_, f64, f64>,
        messages: &[f64],
    ) -> anyhow::Result<()> {
        let superstep = ctx.superstep();

        if superstep > 0 {
            let sum = messages.iter().fold(0.0, |acc, m| acc + m);
            let next = match self.config.damping_factor {
                Some(d) => (1.0 - d) / ctx.vertex_count() as f64 + d * sum,
                None => sum,
            };
            ctx.aggregate((next - *ctx.state()).abs());
            *ctx.state_mut() = next;
        }

        if superstep < self.config.iterations {
            let degree = ctx.degree();
            if degree > 0 {
                let share = *ctx.state() / degree as f64;
                ctx.send_to_neighbors(share);
            }
        } else {
            ctx.vote_to_halt();
        }
        Ok(())
    }

    fn terminate(&self, summary: &SuperstepSummary) -> bool {
        summary.superstep >= self.config.iterations || self.converged(summary)
    }
}

impl PageRank {
    /// Projects `store` through `filter` and runs PageRank on it.
    pub fn run_filtered<S: GraphView>(
        engine: &mut ComputeEngine,
        store: &S,
        filter: &ComputeFilter,
        config: PageRankConfig,
    ) -> Result<PageRankResult> {
        config.validate()?;
        let projection = ProjectionBuilder::new(store)
            .filter(filter)
            .direction(Self::direction(&config))
            .build()?;
        Self::run(engine, &projection, config)
    }
}

impl Algorithm for PageRank {
    type Config = PageRankConfig;
    type Result = PageRankResult;

    fn name() -> &'static str {
        "pageRank"
    }

    fn direction(config: &Self::Config) -> Direction {
        config.direction
    }

    fn run(
        engine: &mut ComputeEngine,
        graph: &GraphProjection,
        config: Self::Config,
    ) -> Result<Self::Result> {
        config.validate()?;
        if graph.direction() != config.direction {
            return Err(GraphError::invalid_argument(
                "direction",
                format!(
                    "projection follows '{}' edges but PageRank was configured for '{}'",
                    graph.direction(),
                    config.direction
                ),
            ));
        }

        let iterations = config.iterations;
        let result = engine.run_projection(graph, &PageRankProgram::new(config))?;

        let stats = result.stats;
        Ok(PageRankResult {
            scores: result.states,
            iterations: stats.supersteps.saturating_sub(1).min(iterations),
            converged: stats.halt_reason == HaltReason::ProgramTerminated
                && stats.supersteps <= iterations,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::build_test_graph;
    use subrank_common::ComputeConfig;

    fn engine() -> ComputeEngine {
        ComputeEngine::new(ComputeConfig {
            max_supersteps: 1_000,
            parallelism: 2,
        })
        .unwrap()
    }

    fn run(graph: &subrank_store::MemoryGraph, config: PageRankConfig) -> PageRankResult {
        PageRank::run_filtered(&mut engine(), graph, &ComputeFilter::all(), config).unwrap()
    }

    #[test]
    fn test_pagerank_single_iteration() {
        // Star: 1 - 2, 1 - 3, 1 - 4 (undirected rank flow)
        let graph = build_test_graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (1, 4)]);
        let result = run(&graph, PageRankConfig::default());

        // Hub receives 3 * 0.25; each leaf receives 0.25 / 3.
        assert!((result.score(Vid::new(1)).unwrap() - 0.75).abs() < 1e-12);
        assert!((result.score(Vid::new(2)).unwrap() - 0.25 / 3.0).abs() < 1e-12);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.stats.supersteps, 2);
        assert!(!result.converged);
    }

    #[test]
    fn test_rank_conserved_without_sinks() {
        // Triangle with a tail, every vertex has degree > 0 under both
        let graph = build_test_graph(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 1), (3, 4)]);
        for iterations in [0, 1, 2, 5] {
            let result = run(
                &graph,
                PageRankConfig {
                    iterations,
                    ..Default::default()
                },
            );
            assert!((result.total() - 1.0).abs() < 1e-12, "iterations={iterations}");
        }
    }

    #[test]
    fn test_sink_absorbs_rank() {
        // 1 -> 2 -> 3 following outgoing edges only; 3 has no out edges
        let graph = build_test_graph(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let config = PageRankConfig {
            iterations: 1,
            direction: Direction::Outgoing,
            ..Default::default()
        };
        let result = run(&graph, config);

        let third = 1.0 / 3.0;
        assert_eq!(result.score(Vid::new(1)), Some(0.0));
        assert!((result.score(Vid::new(2)).unwrap() - third).abs() < 1e-12);
        assert!((result.score(Vid::new(3)).unwrap() - third).abs() < 1e-12);
        // Vertex 3's own rank was never re-emitted.
        assert!((result.total() - 2.0 * third).abs() < 1e-12);
    }

    #[test]
    fn test_zero_iterations_keeps_uniform_rank() {
        let graph = build_test_graph(&[1, 2], &[(1, 2)]);
        let result = run(
            &graph,
            PageRankConfig {
                iterations: 0,
                ..Default::default()
            },
        );
        assert_eq!(result.scores, vec![(Vid::new(1), 0.5), (Vid::new(2), 0.5)]);
        assert_eq!(result.stats.supersteps, 1);
    }

    #[test]
    fn test_damping_adds_teleport_term() {
        // Isolated vertex 3 receives only the teleport share
        let graph = build_test_graph(&[1, 2, 3], &[(1, 2)]);
        let result = run(
            &graph,
            PageRankConfig {
                damping_factor: Some(0.85),
                ..Default::default()
            },
        );
        let teleport = 0.15 / 3.0;
        assert!((result.score(Vid::new(3)).unwrap() - teleport).abs() < 1e-12);
        assert!((result.score(Vid::new(1)).unwrap() - (teleport + 0.85 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_stops_early() {
        // A cycle is already at its fixed point, so the first round changes nothing
        let graph = build_test_graph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let result = run(
            &graph,
            PageRankConfig {
                iterations: 50,
                tolerance: Some(1e-9),
                ..Default::default()
            },
        );
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.stats.supersteps, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let graph = build_test_graph(&[1], &[]);
        let bad_damping = PageRankConfig {
            damping_factor: Some(1.5),
            ..Default::default()
        };
        let err = PageRank::run_filtered(&mut engine(), &graph, &ComputeFilter::all(), bad_damping)
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));

        let bad_tolerance = PageRankConfig {
            tolerance: Some(0.0),
            ..Default::default()
        };
        assert!(bad_tolerance.validate().is_err());
    }

    #[test]
    fn test_direction_mismatch_rejected() {
        let graph = build_test_graph(&[1, 2], &[(1, 2)]);
        let projection = ProjectionBuilder::new(&graph)
            .direction(Direction::Incoming)
            .build()
            .unwrap();
        let err = PageRank::run(&mut engine(), &projection, PageRankConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));
    }
}
