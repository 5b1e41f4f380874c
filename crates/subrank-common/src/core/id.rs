// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertex ID.
///
/// Opaque to the algorithms; only equality, hashing and ordering are relied on.
/// Ordering is used to break rank ties deterministically.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vid(u64);

impl Vid {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Vid {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl fmt::Debug for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vid({})", self.0)
    }
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Vid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| anyhow!("Invalid Vid '{}': {}", s, e))
    }
}

/// Edge ID.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Eid(u64);

impl Eid {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Eid {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl fmt::Debug for Eid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Eid({})", self.0)
    }
}

impl fmt::Display for Eid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Eid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| anyhow!("Invalid Eid '{}': {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vid_parse_and_display() {
        let vid: Vid = "204984".parse().unwrap();
        assert_eq!(vid, Vid::new(204984));
        assert_eq!(vid.to_string(), "204984");
        assert_eq!(format!("{:?}", vid), "Vid(204984)");
    }

    #[test]
    fn test_invalid_ids_rejected() {
        assert!("abc".parse::<Vid>().is_err());
        assert!("-1".parse::<Eid>().is_err());
        assert!("".parse::<Eid>().is_err());
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let mut vids = vec![Vid::new(9), Vid::new(1), Vid::new(5)];
        vids.sort();
        assert_eq!(vids, vec![Vid::new(1), Vid::new(5), Vid::new(9)]);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Eid::new(12)).unwrap();
        assert_eq!(json, "12");
        let eid: Eid = serde_json::from_str("12").unwrap();
        assert_eq!(eid, Eid::new(12));
    }
}
