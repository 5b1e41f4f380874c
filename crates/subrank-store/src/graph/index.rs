// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Secondary equality index: (property key, value) -> vertex ids.

use fxhash::FxHashMap;
use std::collections::BTreeSet;
use subrank_common::{PropertyValue, Value, Vid};

#[derive(Debug, Default)]
pub struct PropertyIndex {
    entries: FxHashMap<String, FxHashMap<Value, BTreeSet<Vid>>>,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every value held in `pv` under `key`.
    pub fn insert(&mut self, key: &str, pv: &PropertyValue, vid: Vid) {
        let by_value = self.entries.entry(key.to_string()).or_default();
        for value in pv.values() {
            by_value.entry(value.clone()).or_default().insert(vid);
        }
    }

    pub fn remove(&mut self, key: &str, pv: &PropertyValue, vid: Vid) {
        let Some(by_value) = self.entries.get_mut(key) else {
            return;
        };
        for value in pv.values() {
            if let Some(vids) = by_value.get_mut(value) {
                vids.remove(&vid);
                if vids.is_empty() {
                    by_value.remove(value);
                }
            }
        }
        if by_value.is_empty() {
            self.entries.remove(key);
        }
    }

    /// Vertex ids holding `value` under `key`, in ascending id order.
    pub fn lookup(&self, key: &str, value: &Value) -> Vec<Vid> {
        self.entries
            .get(key)
            .and_then(|by_value| by_value.get(value))
            .map(|vids| vids.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
