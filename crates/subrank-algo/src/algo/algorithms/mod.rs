// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Core algorithm trait and the vertex programs built on it.

use crate::algo::GraphProjection;
use crate::algo::compute::ComputeEngine;
use subrank_common::{Direction, Result};

/// Core trait for graph algorithms run on the superstep engine.
pub trait Algorithm {
    /// Algorithm parameters.
    type Config: Default + Clone + Send + 'static;
    /// Result type.
    type Result: Send + 'static;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Adjacency direction the projection must be built with.
    fn direction(config: &Self::Config) -> Direction;

    /// Execute algorithm on a projection.
    fn run(
        engine: &mut ComputeEngine,
        graph: &GraphProjection,
        config: Self::Config,
    ) -> Result<Self::Result>;
}

mod pagerank;
pub use pagerank::{PageRank, PageRankConfig, PageRankProgram, PageRankResult};
