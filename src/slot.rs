// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Slot state (vacant, buried or live)
#[derive(Clone, Debug)]
pub(crate) enum Slot<K> {
    /// Never held a key, or was wiped by a clear
    Empty,

    /// Holds a removed key
    ///
    /// The key is kept so probe sequences that pass through this slot
    /// stay intact, but it is logically absent.
    Tombstone(K),

    /// Holds a live key
    Occupied(K),
}

impl<K> Slot<K> {
    /// Returns `true` if the slot holds a live key.
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// Returns `true` if the slot holds nothing at all, not even a tombstone.
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the stored key, live or buried.
    pub(crate) fn key(&self) -> Option<&K> {
        match self {
            Self::Empty => None,
            Self::Tombstone(key) | Self::Occupied(key) => Some(key),
        }
    }

    /// Returns the stored key if it is live.
    pub(crate) fn live_key(&self) -> Option<&K> {
        match self {
            Self::Occupied(key) => Some(key),
            _ => None,
        }
    }

    /// Returns the stored key mutably if it is live.
    pub(crate) fn live_key_mut(&mut self) -> Option<&mut K> {
        match self {
            Self::Occupied(key) => Some(key),
            _ => None,
        }
    }

    /// Buries a live key under a tombstone, in place.
    ///
    /// Returns `false` (and leaves the slot untouched) if there is no live
    /// key to bury.
    pub(crate) fn bury(&mut self) -> bool {
        match std::mem::replace(self, Self::Empty) {
            Self::Occupied(key) => {
                *self = Self::Tombstone(key);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }
}
