// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Vertex program interface.

use crate::algo::projection::GraphProjection;
use subrank_common::{Direction, Vid};

/// Per-vertex computation driven by the superstep engine.
///
/// In every superstep the engine calls [`compute`](Self::compute) once per
/// active vertex with the messages sent to it during the previous superstep.
/// Messages sent now are delivered in the next superstep, never the current
/// one. A vertex that voted to halt is skipped until a message arrives.
pub trait VertexProgram: Send + Sync {
    type State: Send;
    type Message: Send + Sync;

    fn name(&self) -> &'static str;

    /// Edge direction the program's messages travel along.
    fn direction(&self) -> Direction {
        Direction::Both
    }

    fn initial_state(&self, vid: Vid, ctx: &InitContext) -> Self::State;

    /// Runs one vertex for one superstep.
    ///
    /// An error aborts the whole run; no later superstep starts.
    fn compute(
        &self,
        ctx: &mut VertexContext<'_, Self::State, Self::Message>,
        messages: &[Self::Message],
    ) -> anyhow::Result<()>;

    /// Asked after each superstep's barrier. `true` ends the run.
    fn terminate(&self, _summary: &SuperstepSummary) -> bool {
        false
    }
}

/// Global facts available when initial states are created.
#[derive(Debug, Clone, Copy)]
pub struct InitContext {
    pub vertex_count: usize,
    pub edge_count: usize,
}

/// What happened in one superstep, reported at its barrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperstepSummary {
    pub superstep: u32,
    /// Vertices whose `compute` ran
    pub active_vertices: usize,
    pub messages_sent: u64,
    /// Sum of every value passed to [`VertexContext::aggregate`]
    pub aggregate: f64,
}

/// A vertex's view of the run during `compute`.
pub struct VertexContext<'a, S, M> {
    pub(crate) slot: u32,
    pub(crate) superstep: u32,
    pub(crate) projection: &'a GraphProjection,
    pub(crate) state: &'a mut S,
    pub(crate) outbox: Vec<(u32, M)>,
    pub(crate) aggregate: f64,
    pub(crate) halted: bool,
}

impl<'a, S, M> VertexContext<'a, S, M> {
    pub(crate) fn new(
        slot: u32,
        superstep: u32,
        projection: &'a GraphProjection,
        state: &'a mut S,
    ) -> Self {
        Self {
            slot,
            superstep,
            projection,
            state,
            outbox: Vec::new(),
            aggregate: 0.0,
            halted: false,
        }
    }

    #[inline]
    pub fn vid(&self) -> Vid {
        self.projection.to_vid(self.slot)
    }

    #[inline]
    pub fn superstep(&self) -> u32 {
        self.superstep
    }

    /// Vertices taking part in the run.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.projection.vertex_count()
    }

    /// Adjacency entries along the program's direction. A parallel edge
    /// counts once per edge.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.projection.degree(self.slot)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = Vid> + '_ {
        self.projection
            .neighbors(self.slot)
            .iter()
            .map(|&slot| self.projection.to_vid(slot))
    }

    pub fn state(&self) -> &S {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut *self.state
    }

    /// Sends `message` to `target` for delivery next superstep.
    ///
    /// Fails if `target` is not part of the run.
    pub fn send(&mut self, target: Vid, message: M) -> anyhow::Result<()> {
        let slot = self
            .projection
            .to_slot(target)
            .ok_or_else(|| anyhow::anyhow!("message target {target} is not part of the run"))?;
        self.outbox.push((slot, message));
        Ok(())
    }

    /// Sends one copy of `message` along every adjacency entry.
    pub fn send_to_neighbors(&mut self, message: M)
    where
        M: Clone,
    {
        let neighbors = self.projection.neighbors(self.slot);
        self.outbox.reserve(neighbors.len());
        for &slot in neighbors {
            self.outbox.push((slot, message.clone()));
        }
    }

    /// Adds `value` to this superstep's global sum.
    pub fn aggregate(&mut self, value: f64) {
        self.aggregate += value;
    }

    /// Skips this vertex in later supersteps until it receives a message.
    pub fn vote_to_halt(&mut self) {
        self.halted = true;
    }
}
