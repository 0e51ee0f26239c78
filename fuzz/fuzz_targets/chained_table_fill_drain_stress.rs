#![no_main]

use libfuzzer_sys::fuzz_target;
use chainkit::table::{ChainedTable, DuplicatePolicy};
use std::collections::HashMap;

// Fuzz stress test with repeated fill/drain cycles and reference validation
//
// Drives long runs of inserts followed by full drains against a reference
// HashMap occurrence count, ensuring node reuse across cycles never corrupts
// the chains or the counters. The first byte picks the bucket count, so
// heavily aliased single-bucket layouts are explored alongside sparse ones.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let buckets = usize::from(data[0]).max(1);
    let mut table = match ChainedTable::try_new(buckets, DuplicatePolicy::Count) {
        Ok(table) => table,
        Err(_) => return,
    };
    let mut reference: HashMap<i64, u64> = HashMap::new();

    for cycle in data[1..].chunks(16) {
        // Fill phase: every byte becomes one logical occurrence.
        for &byte in cycle {
            let value = i64::from(byte as i8);
            assert!(table.insert(value));
            *reference.entry(value).or_insert(0) += 1;
        }

        let expected_len: u64 = reference.values().sum();
        assert_eq!(table.len() as u64, expected_len);
        assert!(table.buckets_used() <= buckets);
        for (&value, &count) in &reference {
            assert_eq!(table.occurrences(value), count);
        }

        // Drain phase: remove every other value completely.
        let victims: Vec<i64> = reference
            .keys()
            .copied()
            .filter(|value| value % 2 == 0)
            .collect();
        for value in victims {
            let count = reference.remove(&value).unwrap();
            for _ in 0..count {
                assert!(table.remove(value));
            }
            assert_eq!(table.occurrences(value), 0);
            assert!(!table.remove(value));
        }
    }

    // Final drain leaves a table indistinguishable from a fresh one.
    let leftovers: Vec<(i64, u64)> = reference.drain().collect();
    for (value, count) in leftovers {
        for _ in 0..count {
            assert!(table.remove(value));
        }
    }
    assert_eq!(table.len(), 0);
    assert_eq!(table.buckets_used(), 0);
    assert!(table.is_empty());
    assert_eq!(table.load_factor(), 0.0);
});
