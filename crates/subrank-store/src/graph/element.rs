// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use subrank_common::{Eid, Properties, PropertyValue, Value, Vid};

/// A vertex owned by a graph store.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub(crate) id: Vid,
    pub(crate) label: String,
    pub(crate) properties: Properties,
}

impl Vertex {
    pub fn new(id: Vid, label: impl Into<String>, properties: Properties) -> Self {
        Self {
            id,
            label: label.into(),
            properties,
        }
    }

    pub fn id(&self) -> Vid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Single value of a property, `None` if absent or multi-valued.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.property(key).and_then(PropertyValue::as_single)
    }
}

/// An edge owned by a graph store. Endpoints are held by id only.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub(crate) id: Eid,
    pub(crate) label: String,
    pub(crate) out_vid: Vid,
    pub(crate) in_vid: Vid,
    pub(crate) properties: Properties,
}

impl Edge {
    pub fn new(
        id: Eid,
        label: impl Into<String>,
        out_vid: Vid,
        in_vid: Vid,
        properties: Properties,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            out_vid,
            in_vid,
            properties,
        }
    }

    pub fn id(&self) -> Eid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tail of the edge.
    pub fn out_vid(&self) -> Vid {
        self.out_vid
    }

    /// Head of the edge.
    pub fn in_vid(&self) -> Vid {
        self.in_vid
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn is_self_loop(&self) -> bool {
        self.out_vid == self.in_vid
    }

    /// The endpoint opposite `vid`, or `None` if `vid` is not an endpoint.
    pub fn other_end(&self, vid: Vid) -> Option<Vid> {
        if vid == self.out_vid {
            Some(self.in_vid)
        } else if vid == self.in_vid {
            Some(self.out_vid)
        } else {
            None
        }
    }

    pub fn touches(&self, vid: Vid) -> bool {
        self.out_vid == vid || self.in_vid == vid
    }
}
