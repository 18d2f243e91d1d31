// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A K.I.S.S. implementation of an open-addressing hash table using double
//! hashing and lazy deletion.
//!
//! ##### About
//!
//! This crate exports a [`ProbingHashTable`] that keeps its keys in a single
//! flat, prime-sized slot array.
//!
//! A colliding key steps through the array with a stride derived from a
//! second hash, so keys that share a home slot spread over different probe
//! sequences instead of clustering. Because the slot count is prime, every
//! stride is coprime to it and every probe sequence cycles through the whole
//! array before repeating.
//!
//! Removal is lazy: a removed key is buried under a tombstone so that probe
//! sequences running through its slot stay intact. Tombstones still consume
//! capacity; the table grows (to the next prime at least double its size)
//! once more than half of its slots are in use, and the rebuild purges them.
//!
//! Two lifetime counters, [`probe_count`](ProbingHashTable::probe_count) and
//! [`find_count`](ProbingHashTable::find_count), make probe behaviour
//! observable in tests and benchmarks.
//!
//! Keys only need `Eq + Hash`. For map-like workloads, store a key type
//! whose `Eq`/`Hash` cover just the lookup portion and patch the payload in
//! place through [`find_mut`](ProbingHashTable::find_mut).
//!
//! The table is single-threaded by design and deliberately not `Sync`; wrap
//! it in a lock if it has to be shared.

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod metrics;
mod prime;
mod slot;
mod table;

pub use {
    error::{Error, Result},
    table::{Iter, ProbingHashTable, DEFAULT_CAPACITY, MAX_CAPACITY},
};
