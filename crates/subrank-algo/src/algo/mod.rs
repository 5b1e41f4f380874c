// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Subgraph extraction and vertex-program compute.
//!
//! # Architecture
//!
//! - **Traversal**: a hop-bounded BFS pipeline (seed filter → expand → dedup →
//!   accumulate) over any [`GraphView`](subrank_store::GraphView).
//! - **Subgraph**: runs the traversal, then a closure pass that adds every edge
//!   whose endpoints both landed in the vertex set.
//! - **Projection**: a dense CSR snapshot of the store restricted by a
//!   [`ComputeFilter`], the only structure the compute engine reads.
//! - **Compute**: a bulk-synchronous superstep engine running a
//!   [`VertexProgram`](compute::VertexProgram) such as PageRank.
//!
//! # Example
//!
//! ```ignore
//! use subrank_algo::{ComputeEngine, ComputeFilter, PageRank, SeedFilter, SubgraphExtractor};
//!
//! let subgraph = SubgraphExtractor::new(&store)
//!     .hops(2)
//!     .extract(&SeedFilter::property_eq("number", 204984i64))?;
//!
//! let mut engine = ComputeEngine::new(Default::default())?;
//! let result = PageRank::run_filtered(
//!     &mut engine,
//!     &store,
//!     &ComputeFilter::from(&subgraph),
//!     Default::default(),
//! )?;
//! ```

mod id_map;
pub mod projection;

pub mod algorithms;
pub mod compute;
pub mod filter;
pub mod report;
pub mod subgraph;
pub mod traversal;

pub use id_map::IdMap;
pub use projection::{GraphProjection, ProjectionBuilder};

#[cfg(test)]
pub mod test_utils;
