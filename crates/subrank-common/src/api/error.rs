// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use crate::core::id::Vid;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// An id was referenced that the store does not hold.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Malformed external input handed to a loader.
    #[error("Parse error at line {line}: {message}")]
    Parse { message: String, line: usize },

    /// A vertex program failed mid-superstep. The whole run is aborted.
    #[error("Vertex program failed on vertex {vertex} in superstep {superstep}: {source}")]
    Compute {
        vertex: Vid,
        superstep: u32,
        #[source]
        source: anyhow::Error,
    },

    /// A compute filter names ids the store does not contain.
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Argument '{arg}' is invalid: {message}")]
    InvalidArgument { arg: String, message: String },

    /// The run was cancelled at a superstep boundary.
    #[error("Compute run cancelled before superstep {superstep}")]
    Cancelled { superstep: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl GraphError {
    pub fn vertex_not_found(vid: Vid) -> Self {
        GraphError::NotFound {
            entity: "Vertex",
            id: vid.as_u64(),
        }
    }

    pub fn edge_not_found(eid: crate::core::id::Eid) -> Self {
        GraphError::NotFound {
            entity: "Edge",
            id: eid.as_u64(),
        }
    }

    pub fn invalid_argument(arg: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::InvalidArgument {
            arg: arg.into(),
            message: message.into(),
        }
    }

    /// Returns the failing vertex for compute errors.
    pub fn failed_vertex(&self) -> Option<Vid> {
        match self {
            GraphError::Compute { vertex, .. } => Some(*vertex),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
