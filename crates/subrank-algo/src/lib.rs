// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod algo;

pub use algo::algorithms::{Algorithm, PageRank, PageRankConfig, PageRankResult};
pub use algo::compute::{
    CancellationToken, ComputeEngine, ComputeResult, ComputeStats, EngineState, HaltReason,
    InitContext, SuperstepSummary, VertexContext, VertexProgram,
};
pub use algo::filter::ComputeFilter;
pub use algo::projection::{GraphProjection, ProjectionBuilder};
pub use algo::report::{RankRow, RankTable};
pub use algo::subgraph::{MaterializedSubgraph, Subgraph, SubgraphExtractor};
pub use algo::traversal::{Accumulator, Dedup, Expand, HopTraversal, SeedFilter, TraversalEvent};
