// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod api {
    pub mod error;
}

pub mod config;

pub mod core {
    pub mod direction;
    pub mod id;
    pub mod value;
}

// Re-exports for convenience
pub use api::error::{GraphError, Result};
pub use config::{ComputeConfig, ReportConfig, SubrankConfig, TraversalConfig};
pub use core::direction::Direction;
pub use core::id::{Eid, Vid};
pub use core::value::{Properties, PropertyValue, Value};
