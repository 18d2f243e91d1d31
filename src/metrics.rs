// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::cell::Cell;

/// Lifetime instrumentation counters
///
/// Starts at zero on construction and only ever counts up; clearing the
/// table does not reset it.
///
/// Uses [`Cell`] instead of atomics so read paths can bump counters
/// through `&self`, which is also what keeps the table `!Sync`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Metrics {
    /// Number of slots examined across all probe sequences
    pub(crate) probes: Cell<u64>,

    /// Number of lookups issued
    pub(crate) finds: Cell<u64>,
}

impl Metrics {
    /// Number of slots examined across all probe sequences.
    pub(crate) fn probe_count(&self) -> u64 {
        self.probes.get()
    }

    /// Number of lookups issued.
    pub(crate) fn find_count(&self) -> u64 {
        self.finds.get()
    }

    /// Counts one examined slot.
    pub(crate) fn record_probe(&self) {
        self.probes.set(self.probes.get() + 1);
    }

    /// Counts one lookup.
    pub(crate) fn record_find(&self) {
        self.finds.set(self.finds.get() + 1);
    }
}
