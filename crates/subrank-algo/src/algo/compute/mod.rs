// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Bulk-synchronous superstep engine.
//!
//! A run walks `Idle → Initialized → Running(0) → … → Halted`. Within a
//! superstep every active vertex computes in parallel on the engine's rayon
//! pool; messages are routed to next-superstep inboxes only after all vertices
//! finished, so no vertex can observe a message from the superstep it is in.
//! Inboxes are filled in ascending sender order, which keeps message order and
//! thus floating point sums independent of thread scheduling.

mod program;

pub use program::{InitContext, SuperstepSummary, VertexContext, VertexProgram};

use crate::algo::filter::ComputeFilter;
use crate::algo::projection::{GraphProjection, ProjectionBuilder};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use subrank_common::{ComputeConfig, GraphError, Result, Vid};
use subrank_store::GraphView;
use tracing::{debug, info, instrument, warn};

/// Lifecycle of a [`ComputeEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No run in progress. Also the state after a failed or cancelled run.
    #[default]
    Idle,
    /// Vertex states created; no superstep has run yet.
    Initialized { vertex_count: usize },
    Running { superstep: u32 },
    /// Last run completed after this many supersteps.
    Halted { supersteps: u32 },
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// The program's `terminate` returned `true`.
    ProgramTerminated,
    /// Every vertex voted to halt and no message is in flight.
    AllHalted,
    /// `ComputeConfig::max_supersteps` was reached.
    SuperstepLimit,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComputeStats {
    pub supersteps: u32,
    pub messages_sent: u64,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub halt_reason: HaltReason,
    pub elapsed: Duration,
}

/// Final vertex states of a completed run, ascending by vertex id.
#[derive(Debug, Clone)]
pub struct ComputeResult<T> {
    pub states: Vec<(Vid, T)>,
    pub stats: ComputeStats,
}

impl<T> ComputeResult<T> {
    pub fn get(&self, vid: Vid) -> Option<&T> {
        self.states
            .binary_search_by_key(&vid, |(v, _)| *v)
            .ok()
            .map(|i| &self.states[i].1)
    }
}

/// Cooperative cancellation flag, checked at every superstep boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What one vertex produced in one superstep.
struct VertexOutput<M> {
    messages: Vec<(u32, M)>,
    aggregate: f64,
    halted: bool,
    computed: bool,
}

impl<M> VertexOutput<M> {
    fn skipped() -> Self {
        Self {
            messages: Vec::new(),
            aggregate: 0.0,
            halted: true,
            computed: false,
        }
    }
}

/// Runs [`VertexProgram`]s over graph projections.
pub struct ComputeEngine {
    config: ComputeConfig,
    pool: rayon::ThreadPool,
    state: EngineState,
    cancel: CancellationToken,
}

impl ComputeEngine {
    /// Creates an engine with a dedicated pool of `config.parallelism` threads.
    pub fn new(config: ComputeConfig) -> Result<Self> {
        if config.parallelism == 0 {
            return Err(GraphError::invalid_argument(
                "parallelism",
                "must be at least 1",
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .thread_name(|i| format!("subrank-compute-{i}"))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build compute pool: {e}"))?;

        Ok(Self {
            config,
            pool,
            state: EngineState::Idle,
            cancel: CancellationToken::new(),
        })
    }

    /// Replaces the engine's cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels runs of this engine.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    /// Projects `store` through `filter` along the program's direction and runs
    /// the program on the projection.
    pub fn run<S, P>(
        &mut self,
        store: &S,
        filter: &ComputeFilter,
        program: &P,
    ) -> Result<ComputeResult<P::State>>
    where
        S: GraphView,
        P: VertexProgram,
    {
        let projection = ProjectionBuilder::new(store)
            .filter(filter)
            .direction(program.direction())
            .build()?;
        self.run_projection(&projection, program)
    }

    /// Runs `program` to completion on `projection`.
    ///
    /// On error or cancellation the engine returns to `Idle` and partial
    /// states are dropped.
    #[instrument(skip_all, fields(program = program.name(), vertices = projection.vertex_count()))]
    pub fn run_projection<P: VertexProgram>(
        &mut self,
        projection: &GraphProjection,
        program: &P,
    ) -> Result<ComputeResult<P::State>> {
        let result = self.execute(projection, program);
        match &result {
            Ok(r) => {
                self.state = EngineState::Halted {
                    supersteps: r.stats.supersteps,
                };
                info!(
                    supersteps = r.stats.supersteps,
                    messages = r.stats.messages_sent,
                    halt_reason = ?r.stats.halt_reason,
                    elapsed_ms = r.stats.elapsed.as_millis() as u64,
                    "Compute run finished"
                );
            }
            Err(e) => {
                self.state = EngineState::Idle;
                warn!(error = %e, "Compute run aborted");
            }
        }
        result
    }

    fn execute<P: VertexProgram>(
        &mut self,
        projection: &GraphProjection,
        program: &P,
    ) -> Result<ComputeResult<P::State>> {
        let start = Instant::now();
        let n = projection.vertex_count();
        let init = InitContext {
            vertex_count: n,
            edge_count: projection.edge_count(),
        };

        let mut states: Vec<P::State> = projection
            .vertices()
            .map(|(_, vid)| program.initial_state(vid, &init))
            .collect();
        let mut inboxes: Vec<Vec<P::Message>> = (0..n).map(|_| Vec::new()).collect();
        let mut halted = vec![false; n];
        self.state = EngineState::Initialized { vertex_count: n };

        let mut superstep = 0u32;
        let mut messages_sent = 0u64;

        let halt_reason = loop {
            if self.cancel.is_cancelled() {
                return Err(GraphError::Cancelled { superstep });
            }
            if superstep >= self.config.max_supersteps {
                break HaltReason::SuperstepLimit;
            }
            self.state = EngineState::Running { superstep };

            let outputs = self.pool.install(|| {
                states
                    .par_iter_mut()
                    .zip(inboxes.par_iter())
                    .zip(halted.par_iter())
                    .enumerate()
                    .map(|(slot, ((state, inbox), &was_halted))| -> Result<VertexOutput<P::Message>> {
                        if was_halted && inbox.is_empty() {
                            return Ok(VertexOutput::skipped());
                        }
                        let mut ctx = VertexContext::new(slot as u32, superstep, projection, state);
                        program.compute(&mut ctx, inbox).map_err(|source| {
                            GraphError::Compute {
                                vertex: projection.to_vid(slot as u32),
                                superstep,
                                source,
                            }
                        })?;
                        Ok(VertexOutput {
                            messages: ctx.outbox,
                            aggregate: ctx.aggregate,
                            halted: ctx.halted,
                            computed: true,
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })?;

            // Barrier: route messages in sender order.
            let mut next_inboxes: Vec<Vec<P::Message>> = (0..n).map(|_| Vec::new()).collect();
            let mut sent = 0u64;
            let mut aggregate = 0.0;
            let mut active = 0usize;
            for (slot, output) in outputs.into_iter().enumerate() {
                halted[slot] = output.halted;
                aggregate += output.aggregate;
                if output.computed {
                    active += 1;
                }
                sent += output.messages.len() as u64;
                for (target, message) in output.messages {
                    next_inboxes[target as usize].push(message);
                }
            }
            inboxes = next_inboxes;
            messages_sent += sent;

            let summary = SuperstepSummary {
                superstep,
                active_vertices: active,
                messages_sent: sent,
                aggregate,
            };
            debug!(
                superstep,
                active_vertices = active,
                messages = sent,
                aggregate,
                "Superstep complete"
            );
            superstep += 1;

            if program.terminate(&summary) {
                break HaltReason::ProgramTerminated;
            }
            if sent == 0 && halted.iter().all(|h| *h) {
                break HaltReason::AllHalted;
            }
        };

        let states = projection
            .vertices()
            .map(|(_, vid)| vid)
            .zip(states)
            .collect();

        Ok(ComputeResult {
            states,
            stats: ComputeStats {
                supersteps: superstep,
                messages_sent,
                vertex_count: n,
                edge_count: projection.edge_count(),
                halt_reason,
                elapsed: start.elapsed(),
            },
        })
    }
}
