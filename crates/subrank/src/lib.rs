// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! # Subrank - Subgraph PageRank
//!
//! Subrank loads a property graph into memory, cuts out the subgraph within a
//! few hops of a seed vertex and ranks it with a superstep PageRank, either on
//! a standalone copy of the subgraph or on the full graph behind an id filter.

pub mod api;

pub use api::Subrank;
pub use api::rank::{RankReport, RunMode, SubgraphRankBuilder};

// Re-exports from internal crates
pub use subrank_algo::{
    CancellationToken, ComputeEngine, ComputeFilter, ComputeStats, HaltReason, PageRank,
    PageRankConfig, RankRow, RankTable, SeedFilter, Subgraph, SubgraphExtractor,
};
pub use subrank_common::{
    ComputeConfig, Direction, Eid, GraphError, Properties, PropertyValue, ReportConfig, Result,
    SubrankConfig, TraversalConfig, Value, Vid,
};
pub use subrank_store::{GraphStore, GraphView, JsonLinesLoader, LoadStats, MemoryGraph};

// Re-export crates
pub use subrank_algo as algo;
pub use subrank_common as common;
pub use subrank_store as store;
