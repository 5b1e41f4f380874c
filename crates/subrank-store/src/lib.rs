// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod graph;
pub mod loader;
pub mod shared;

pub use graph::element::{Edge, Vertex};
pub use graph::index::PropertyIndex;
pub use graph::memory::MemoryGraph;
pub use graph::{GraphStore, GraphView};
pub use loader::{GraphLoader, JsonLinesLoader, LoadStats};
pub use shared::SharedGraph;
