// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use crate::core::direction::Direction;
use std::thread;

/// Configuration for bounded-radius subgraph extraction.
#[derive(Clone, Copy, Debug)]
pub struct TraversalConfig {
    /// Number of expansion rounds from the seed set (default: 2)
    pub hops: usize,

    /// Edge direction followed while expanding (default: both)
    pub direction: Direction,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            hops: 2,
            direction: Direction::Both,
        }
    }
}

/// Configuration for the superstep compute engine.
#[derive(Clone, Debug)]
pub struct ComputeConfig {
    /// Hard upper bound on supersteps regardless of what the program asks for
    /// (default: 10_000)
    pub max_supersteps: u32,

    /// Number of worker threads used inside a superstep
    pub parallelism: usize,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        let parallelism = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            max_supersteps: 10_000,
            parallelism,
        }
    }
}

/// Configuration for rendering rank tables.
#[derive(Clone, Copy, Debug)]
pub struct ReportConfig {
    /// Number of rows kept after sorting (default: 20)
    pub top_k: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_k: 20 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubrankConfig {
    /// Subgraph extraction configuration
    pub traversal: TraversalConfig,

    /// Compute engine configuration
    pub compute: ComputeConfig,

    /// Result reporting configuration
    pub report: ReportConfig,
}
