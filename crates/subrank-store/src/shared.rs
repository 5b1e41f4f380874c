// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Single-writer / many-readers handle around a graph store.
//!
//! Load and clear take the write lock; traversals and compute runs hold a
//! read guard for their whole duration, so a store never changes under an
//! in-flight run.

use crate::graph::GraphStore;
use crate::loader::{GraphLoader, LoadStats};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use subrank_common::Result;
use tracing::info;

#[derive(Debug, Default)]
pub struct SharedGraph<G> {
    inner: Arc<RwLock<G>>,
}

impl<G> Clone for SharedGraph<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: GraphStore> SharedGraph<G> {
    pub fn new(graph: G) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Shared read access for traversal and compute.
    pub fn read(&self) -> RwLockReadGuard<'_, G> {
        self.inner.read()
    }

    /// Exclusive access for mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, G> {
        self.inner.write()
    }

    /// Loads a graph from `reader` while holding the write lock.
    pub fn load<L: GraphLoader>(&self, loader: &L, reader: impl BufRead) -> Result<LoadStats> {
        let mut graph = self.inner.write();
        loader.load(&mut *graph, reader)
    }

    /// Loads a graph file while holding the write lock.
    pub fn load_path<L: GraphLoader>(
        &self,
        loader: &L,
        path: impl AsRef<Path>,
    ) -> Result<LoadStats> {
        let mut graph = self.inner.write();
        loader.load_path(&mut *graph, path)
    }

    /// Removes all vertices and edges while holding the write lock.
    pub fn clear(&self) {
        let mut graph = self.inner.write();
        graph.remove_all();
        info!("Graph cleared");
    }
}
