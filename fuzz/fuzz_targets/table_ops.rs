#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use probing_table::ProbingHashTable;
use std::collections::HashSet;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Insert(u16),
    Remove(u16),
    Find(u16),
    Contains(u16),
    Clear,
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    // Tiny initial capacity maximizes growths and tombstone traffic
    let capacity = u8::arbitrary(&mut unstructured).unwrap_or_default();
    let mut table = ProbingHashTable::with_capacity(capacity.into());

    let mut model = HashSet::new();

    if let Ok(ops) = <Vec<Op> as Arbitrary>::arbitrary_take_rest(unstructured) {
        // eprintln!("ops={ops:?}");

        for op in ops {
            match op {
                Op::Insert(key) => assert_eq!(model.insert(key), table.insert(key)),
                Op::Remove(key) => assert_eq!(model.remove(&key), table.remove(&key)),
                Op::Find(key) => assert_eq!(model.get(&key), table.find(&key)),
                Op::Contains(key) => assert_eq!(model.contains(&key), table.contains(&key)),
                Op::Clear => {
                    table.clear();
                    model.clear();
                }
            }
        }

        assert_eq!(model.len(), table.len());

        for key in &model {
            assert!(table.contains(key));
        }
        for key in &table {
            assert!(model.contains(key));
        }
    }
});
