// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::metrics::Metrics;
use crate::prime::next_prime;
use crate::slot::Slot;
use crate::{Error, Result};
use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

/// Capacity hint used by [`ProbingHashTable::new`]
pub const DEFAULT_CAPACITY: usize = 101;

/// Largest accepted capacity hint
///
/// Past this, doubling the slot count would overflow `usize`.
pub const MAX_CAPACITY: usize = usize::MAX / 2;

/// Smallest slot count; the probe stride modulus `capacity - 2` needs it
const MIN_CAPACITY: usize = 3;

fn allocate_slots<K>(table_size: usize) -> Box<[Slot<K>]> {
    std::iter::repeat_with(|| Slot::Empty).take(table_size).collect()
}

/// An open-addressing hash table using double hashing and lazy deletion
///
/// Keys are stored directly in a flat, prime-sized slot array. A colliding
/// key walks the array with a stride derived from a second hash of the key,
/// so keys sharing a home slot still fan out over different probe
/// sequences. The stride is coprime to the prime slot count, which makes
/// every probe sequence visit every slot before repeating.
///
/// Removing a key buries it under a tombstone instead of emptying its slot,
/// keeping the probe sequences of colliding keys intact. Tombstones still
/// consume capacity; they are only purged when the table grows, which
/// happens once more than half of all slots are in use.
///
/// Two lifetime counters make probe behaviour observable: one counts every
/// slot examined ([`probe_count`](Self::probe_count)), one counts lookups
/// issued ([`find_count`](Self::find_count)).
///
/// The table is deliberately not `Sync`; wrap it in a lock if it has to be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use probing_table::ProbingHashTable;
///
/// let mut words = ProbingHashTable::new();
///
/// assert!(words.insert("opossum"));
/// assert!(!words.insert("opossum"), "duplicate");
///
/// assert!(words.contains(&"opossum"));
///
/// assert!(words.remove(&"opossum"));
/// assert!(!words.contains(&"opossum"));
/// ```
#[allow(clippy::module_name_repetitions)]
#[derive(Clone)]
pub struct ProbingHashTable<K, S = FxBuildHasher> {
    /// Flat slot array; the length is always prime
    slots: Box<[Slot<K>]>,

    /// Number of live keys
    len: usize,

    /// Number of slots holding a live key or a tombstone
    ///
    /// Tombstones keep consuming probe capacity, so the growth trigger
    /// watches this count, not `len`.
    occupied: usize,

    /// Hasher factory for both hash functions
    hasher: S,

    /// Lifetime probe/lookup counters
    metrics: Metrics,
}

impl<K> ProbingHashTable<K> {
    /// Creates an empty table with the default capacity hint
    /// ([`DEFAULT_CAPACITY`]).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `capacity_hint` slots.
    ///
    /// The hint is clamped to a minimum of 3 and rounded up to the next
    /// prime, so the allocated slot count may exceed it.
    ///
    /// # Panics
    ///
    /// Panics if `capacity_hint` exceeds [`MAX_CAPACITY`];
    /// [`try_with_capacity`](Self::try_with_capacity) returns an error
    /// instead.
    #[must_use]
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self::with_capacity_and_hasher(capacity_hint, FxBuildHasher)
    }

    /// Creates an empty table, rejecting capacity hints the growth schedule
    /// could not handle.
    ///
    /// The infallible constructors panic on such hints; this is the
    /// non-panicking variant for callers passing through untrusted sizes.
    ///
    /// ```
    /// use probing_table::{Error, ProbingHashTable};
    ///
    /// let table = ProbingHashTable::<u64>::try_with_capacity(1_000)?;
    /// assert!(table.capacity() >= 1_000);
    ///
    /// assert!(matches!(
    ///     ProbingHashTable::<u64>::try_with_capacity(usize::MAX),
    ///     Err(Error::InvalidCapacity(_)),
    /// ));
    /// # Ok::<_, probing_table::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity_hint` exceeds
    /// [`MAX_CAPACITY`].
    pub fn try_with_capacity(capacity_hint: usize) -> Result<Self> {
        if capacity_hint > MAX_CAPACITY {
            return Err(Error::InvalidCapacity(capacity_hint));
        }
        Ok(Self::with_capacity(capacity_hint))
    }
}

impl<K, S> ProbingHashTable<K, S> {
    /// Creates an empty table with the default capacity hint, hashing keys
    /// with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    /// Creates an empty table with at least `capacity_hint` slots, hashing
    /// keys with `hasher`.
    ///
    /// The hint is clamped and rounded up like in
    /// [`with_capacity`](ProbingHashTable::with_capacity).
    ///
    /// # Panics
    ///
    /// Panics if `capacity_hint` exceeds [`MAX_CAPACITY`].
    #[must_use]
    pub fn with_capacity_and_hasher(capacity_hint: usize, hasher: S) -> Self {
        assert!(
            capacity_hint <= MAX_CAPACITY,
            "capacity hint {capacity_hint} exceeds MAX_CAPACITY"
        );

        let table_size = next_prime(capacity_hint.max(MIN_CAPACITY));

        log::trace!("allocating table with {table_size} slots (hint was {capacity_hint})");

        Self {
            slots: allocate_slots(table_size),
            len: 0,
            occupied: 0,
            hasher,
            metrics: Metrics::default(),
        }
    }

    /// Returns the number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no live keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the allocated slot count, which is always prime.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots examined across all probe sequences so far.
    ///
    /// Every operation that locates a key contributes, including the
    /// re-inserts performed while growing. The counter is never reset, not
    /// even by [`clear`](Self::clear).
    #[must_use]
    pub fn probe_count(&self) -> u64 {
        self.metrics.probe_count()
    }

    /// Number of lookups issued so far, hit or miss.
    ///
    /// Counts [`find`](Self::find) and [`find_mut`](Self::find_mut);
    /// [`contains`](Self::contains) is deliberately exempt. The counter is
    /// never reset, not even by [`clear`](Self::clear).
    #[must_use]
    pub fn find_count(&self) -> u64 {
        self.metrics.find_count()
    }

    /// Returns an iterator over the live keys.
    ///
    /// Keys come out in slot order, which is not a meaningful order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Removes all keys and tombstones.
    ///
    /// Keeps the current capacity and the lifetime probe/lookup counters.
    pub fn clear(&mut self) {
        log::trace!("clearing table with {} live keys", self.len);

        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.occupied = 0;
    }

    fn slot(&self, idx: usize) -> &Slot<K> {
        // NOTE: locate only produces indexes reduced modulo the slot count
        #[allow(clippy::expect_used)]
        self.slots.get(idx).expect("slot index should be in bounds")
    }

    fn slot_mut(&mut self, idx: usize) -> &mut Slot<K> {
        #[allow(clippy::expect_used)]
        self.slots.get_mut(idx).expect("slot index should be in bounds")
    }
}

impl<K: Eq + Hash, S: BuildHasher> ProbingHashTable<K, S> {
    /// Inserts a key.
    ///
    /// Returns `false` (and keeps the stored key) if an equal key is
    /// already present; duplicates are an expected outcome, not an error.
    /// May grow the table before returning.
    pub fn insert(&mut self, key: K) -> bool {
        let idx = self.locate(&key);
        let slot = self.slot_mut(idx);

        if slot.is_occupied() {
            return false;
        }

        let was_empty = slot.is_empty();
        *slot = Slot::Occupied(key);
        self.len += 1;

        if was_empty {
            // NOTE: a reused tombstone slot was already counted
            self.occupied += 1;

            if self.occupied > self.capacity() / 2 {
                self.grow();
            }
        }

        true
    }

    /// Returns a reference to the stored key equal to `key`.
    ///
    /// This is the instrumented lookup: it bumps the lookup counter exactly
    /// once, hit or miss. The reference points at the *stored* instance,
    /// which matters for key types carrying state their `Eq`/`Hash` ignore.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&K> {
        self.metrics.record_find();

        let idx = self.locate(key);
        self.slot(idx).live_key()
    }

    /// Returns a mutable reference to the stored key equal to `key`.
    ///
    /// Same walk and counter semantics as [`find`](Self::find). This is how
    /// state attached to a stored key (an occurrence count, say) gets
    /// updated in place without reinserting the key.
    ///
    /// Anything the key's `Eq` and `Hash` implementations look at must not
    /// be mutated through the returned reference, or later lookups will
    /// probe down the wrong sequence.
    ///
    /// ```
    /// # use probing_table::ProbingHashTable;
    /// # use std::hash::{Hash, Hasher};
    /// struct Tally(&'static str, u64);
    ///
    /// impl PartialEq for Tally {
    ///     fn eq(&self, other: &Self) -> bool {
    ///         self.0 == other.0
    ///     }
    /// }
    /// impl Eq for Tally {}
    ///
    /// impl Hash for Tally {
    ///     fn hash<H: Hasher>(&self, state: &mut H) {
    ///         self.0.hash(state);
    ///     }
    /// }
    ///
    /// let mut table = ProbingHashTable::new();
    /// table.insert(Tally("fox", 1));
    ///
    /// if let Some(stat) = table.find_mut(&Tally("fox", 0)) {
    ///     stat.1 += 1;
    /// }
    ///
    /// assert_eq!(Some(2), table.find(&Tally("fox", 0)).map(|stat| stat.1));
    /// ```
    pub fn find_mut(&mut self, key: &K) -> Option<&mut K> {
        self.metrics.record_find();

        let idx = self.locate(key);
        self.slot_mut(idx).live_key_mut()
    }

    /// Returns `true` if an equal key is present.
    ///
    /// Walks the same probe sequence as [`find`](Self::find), but is exempt
    /// from the lookup counter; membership tests are not lookups.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        let idx = self.locate(key);
        self.slot(idx).is_occupied()
    }

    /// Removes a key, burying it under a tombstone.
    ///
    /// Returns `false` if no equal key is present. The tombstone keeps
    /// consuming capacity until the next growth purges it; removing keys
    /// never shrinks the table.
    pub fn remove(&mut self, key: &K) -> bool {
        let idx = self.locate(key);

        if self.slot_mut(idx).bury() {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Walks the probe sequence of `key` to its terminal slot: the first
    /// slot that is empty or stores an equal key, live or buried.
    ///
    /// Counts one probe per slot examined. Most walks end at the home slot
    /// without ever computing the stride hash.
    ///
    /// # Panics
    ///
    /// Panics if the sequence cycles through the entire table, which the
    /// growth trigger makes unreachable: at least one slot stays empty at
    /// all times.
    fn locate(&self, key: &K) -> usize {
        let table_size = self.slots.len();
        let mut idx = self.primary_hash(key);

        self.metrics.record_probe();
        if self.is_terminal(idx, key) {
            return idx;
        }

        let step = self.step_hash(key);

        for _ in 1..table_size {
            idx = (idx + step) % table_size;

            self.metrics.record_probe();
            if self.is_terminal(idx, key) {
                return idx;
            }
        }

        panic!("probe sequence exhausted all {table_size} slots");
    }

    /// Returns `true` if a probe sequence for `key` ends at `idx`.
    fn is_terminal(&self, idx: usize, key: &K) -> bool {
        let slot = self.slot(idx);
        slot.is_empty() || slot.key() == Some(key)
    }

    /// First hash function, the home slot of `key`.
    #[allow(clippy::cast_possible_truncation)]
    fn primary_hash(&self, key: &K) -> usize {
        // NOTE: the remainder is strictly below the slot count, which fits a usize
        (self.hasher.hash_one(key) % self.slots.len() as u64) as usize
    }

    /// Second hash function, the probe stride of `key`.
    ///
    /// Strides span `1..=capacity - 2`: never zero, always below the prime
    /// slot count, hence coprime to it. At the minimum capacity of 3 the
    /// modulus is 1 and every stride collapses to 1, plain linear probing.
    #[allow(clippy::cast_possible_truncation)]
    fn step_hash(&self, key: &K) -> usize {
        let modulus = self.slots.len() as u64 - 2;
        1 + (self.hasher.hash_one(key) % modulus) as usize
    }

    /// Grows to the next prime at least double the current slot count and
    /// migrates all live keys, purging every tombstone.
    ///
    /// The migration runs through the regular insert path, so it shows up
    /// in the probe counter.
    fn grow(&mut self) {
        let table_size = next_prime(2 * self.slots.len());

        log::debug!(
            "growing table from {} to {table_size} slots ({} live, {} buried)",
            self.slots.len(),
            self.len,
            self.occupied - self.len,
        );

        let old_slots = std::mem::replace(&mut self.slots, allocate_slots(table_size));
        self.len = 0;
        self.occupied = 0;

        for slot in old_slots.into_vec() {
            if let Slot::Occupied(key) = slot {
                let inserted = self.insert(key);
                debug_assert!(inserted, "keys in the old table should be distinct");
            }
        }
    }
}

impl<K, S: Default> Default for ProbingHashTable<K, S> {
    fn default() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

impl<K: std::fmt::Debug, S> std::fmt::Debug for ProbingHashTable<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Eq + Hash, S: BuildHasher> Extend<K> for ProbingHashTable<K, S> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Eq + Hash, S: BuildHasher + Default> FromIterator<K> for ProbingHashTable<K, S> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default());
        table.extend(iter);
        table
    }
}

impl<'a, K, S> IntoIterator for &'a ProbingHashTable<K, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the live keys of a [`ProbingHashTable`]
///
/// Created by [`ProbingHashTable::iter`]; yields keys in slot order, which
/// is not a meaningful order.
pub struct Iter<'a, K> {
    slots: std::slice::Iter<'a, Slot<K>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Slot::Occupied(key) = self.slots.next()? {
                self.remaining -= 1;
                return Some(key);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> std::iter::FusedIterator for Iter<'_, K> {}
