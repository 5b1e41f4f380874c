// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Identity mapping between sparse vertex ids and dense compute slots.
//!
//! Vertex programs keep their state in arrays indexed 0..V. Slots are handed
//! out in ascending id order so every projection of the same vertex set lays
//! its state out identically, whichever store it was built from.

use subrank_common::Vid;

/// Ascending slot -> vertex id table with binary-search reverse lookup.
///
/// # Example
///
/// ```ignore
/// let id_map = IdMap::from_unsorted(vec![Vid::new(200), Vid::new(100)]);
///
/// assert_eq!(id_map.to_slot(Vid::new(100)), Some(0));
/// assert_eq!(id_map.to_vid(1), Some(Vid::new(200)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdMap {
    slot_to_vid: Vec<Vid>,
}

impl IdMap {
    /// Builds a map from ids in any order. Duplicates collapse to one slot.
    pub fn from_unsorted(mut vids: Vec<Vid>) -> Self {
        vids.sort_unstable();
        vids.dedup();
        Self { slot_to_vid: vids }
    }

    #[inline]
    pub fn to_slot(&self, vid: Vid) -> Option<u32> {
        self.slot_to_vid.binary_search(&vid).ok().map(|i| i as u32)
    }

    #[inline]
    pub fn to_vid(&self, slot: u32) -> Option<Vid> {
        self.slot_to_vid.get(slot as usize).copied()
    }

    /// Vertex id for a slot (panics if out of bounds).
    #[inline]
    pub fn to_vid_unchecked(&self, slot: u32) -> Vid {
        self.slot_to_vid[slot as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slot_to_vid.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot_to_vid.is_empty()
    }

    #[inline]
    pub fn contains(&self, vid: Vid) -> bool {
        self.to_slot(vid).is_some()
    }

    /// Iterate over all (slot, vid) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Vid)> + '_ {
        self.slot_to_vid
            .iter()
            .enumerate()
            .map(|(slot, &vid)| (slot as u32, vid))
    }

    /// Memory usage in bytes.
    pub fn memory_size(&self) -> usize {
        self.slot_to_vid.len() * std::mem::size_of::<Vid>()
    }
}

impl FromIterator<Vid> for IdMap {
    fn from_iter<I: IntoIterator<Item = Vid>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}
