use probing_table::ProbingHashTable;
use std::hash::{BuildHasher, Hasher};
use test_log::test;

/// Degenerate hasher that sends every key to slot 0 with stride 1, making
/// collision chains (and their probe counts) fully deterministic.
struct OneBucket;

impl BuildHasher for OneBucket {
    type Hasher = OneBucketHasher;

    fn build_hasher(&self) -> OneBucketHasher {
        OneBucketHasher
    }
}

struct OneBucketHasher;

impl Hasher for OneBucketHasher {
    fn finish(&self) -> u64 {
        0
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

#[test]
fn find_counter_counts_lookups_only() {
    let mut table = ProbingHashTable::with_capacity(101);
    assert_eq!(0, table.find_count());

    assert!(table.insert("a"));
    assert_eq!(0, table.find_count(), "inserts are not lookups");

    assert!(table.find(&"a").is_some());
    assert_eq!(1, table.find_count());

    assert!(table.find(&"miss").is_none());
    assert_eq!(2, table.find_count(), "misses count too");

    assert!(table.find_mut(&"a").is_some());
    assert_eq!(3, table.find_count());

    assert!(table.contains(&"a"));
    assert!(!table.contains(&"miss"));
    assert_eq!(3, table.find_count(), "contains is exempt");

    assert!(table.remove(&"a"));
    assert_eq!(3, table.find_count(), "removals are not lookups");
}

#[test]
fn probe_counter_accrues_on_every_operation() {
    let mut table = ProbingHashTable::with_capacity(101);
    assert_eq!(0, table.probe_count());

    assert!(table.insert("a"));
    let after_insert = table.probe_count();
    assert!(after_insert >= 1);

    assert!(table.contains(&"a"));
    let after_contains = table.probe_count();
    assert!(after_contains > after_insert, "contains probes, counter-exempt or not");

    assert!(table.find(&"a").is_some());
    let after_find = table.probe_count();
    assert!(after_find > after_contains);

    assert!(table.remove(&"a"));
    assert!(table.probe_count() > after_find);
}

#[test]
fn single_probe_walks_are_exact() {
    let mut table = ProbingHashTable::with_capacity(101);

    // A lone key in a near-empty table terminates every walk on the home
    // slot, making probe counts exact
    assert!(table.insert("a"));
    assert_eq!(1, table.probe_count());

    assert!(table.contains(&"a"));
    assert_eq!(2, table.probe_count());

    assert!(table.find(&"a").is_some());
    assert_eq!(3, table.probe_count());

    assert!(table.remove(&"a"));
    assert_eq!(4, table.probe_count());

    // The tombstone still terminates the walk for its own key
    assert!(!table.contains(&"a"));
    assert_eq!(5, table.probe_count());
}

#[test]
fn collision_walks_count_each_slot_once() {
    let mut table = ProbingHashTable::with_capacity_and_hasher(101, OneBucket);

    // Home slot is empty
    assert!(table.insert("a"));
    assert_eq!(1, table.probe_count());

    // Home slot holds "a", the stride lands on an empty slot: two slots
    // examined, two probes; the chain start is not counted again
    assert!(table.insert("b"));
    assert_eq!(3, table.probe_count());

    assert!(table.insert("c"));
    assert_eq!(6, table.probe_count());

    // Lookups pay the same walk, hit or miss
    assert!(table.contains(&"a"));
    assert_eq!(7, table.probe_count());

    assert!(table.contains(&"b"));
    assert_eq!(9, table.probe_count());

    assert!(table.find(&"c").is_some());
    assert_eq!(12, table.probe_count());

    // A miss walks the whole chain and one empty slot past it
    assert!(!table.contains(&"d"));
    assert_eq!(16, table.probe_count());

    // A buried slot mid-chain is still exactly one probe
    assert!(table.remove(&"b"));
    assert_eq!(18, table.probe_count());

    assert!(table.find(&"c").is_some());
    assert_eq!(21, table.probe_count());
}

#[test]
fn growing_probes_the_new_table() {
    let mut table = ProbingHashTable::with_capacity(3);

    assert!(table.insert("a"));
    let before = table.probe_count();

    // The second insert goes over half of 3 slots and migrates both keys
    assert!(table.insert("b"));

    assert!(
        table.probe_count() >= before + 3,
        "one walk for b, then one walk per migrated key"
    );
    assert_eq!(0, table.find_count(), "growing performs no lookups");
}

#[test]
fn counters_survive_clear() {
    let mut table = ProbingHashTable::with_capacity(11);

    for x in 0..5 {
        assert!(table.insert(x));
    }
    assert!(table.find(&0).is_some());
    assert!(table.find(&1).is_some());

    let probes = table.probe_count();
    let finds = table.find_count();
    assert!(probes >= 7);
    assert_eq!(2, finds);

    table.clear();

    assert_eq!(probes, table.probe_count(), "clearing does not reset counters");
    assert_eq!(finds, table.find_count(), "clearing does not reset counters");

    // and they keep counting from where they stopped
    assert!(table.find(&0).is_none());
    assert_eq!(finds + 1, table.find_count());
    assert_eq!(probes + 1, table.probe_count(), "one probe, the home slot is empty now");
}
