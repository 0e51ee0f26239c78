#![no_main]

use libfuzzer_sys::fuzz_target;
use chainkit::table::{ChainedTable, DuplicatePolicy};
use std::collections::BTreeMap;

// Fuzz arbitrary operation sequences on ChainedTable
//
// Tests random sequences of insert, remove, occurrences, contains, clear,
// and dump operations against a BTreeMap occurrence model. The first byte
// picks the duplicate policy and bucket count.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let policy = if data[0] & 1 == 0 {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::Count
    };
    let buckets = usize::from(data[0] >> 1).max(1);
    let mut table = match ChainedTable::try_new(buckets, policy) {
        Ok(table) => table,
        Err(_) => return,
    };
    let mut model: BTreeMap<i64, u64> = BTreeMap::new();

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let value = i64::from(data[idx + 1] as i8);

        match op {
            0 => {
                // insert
                let fresh = !model.contains_key(&value);
                let stored = table.insert(value);
                match policy {
                    DuplicatePolicy::Reject => {
                        assert_eq!(stored, fresh);
                        model.entry(value).or_insert(1);
                    }
                    DuplicatePolicy::Count => {
                        assert!(stored);
                        *model.entry(value).or_insert(0) += 1;
                    }
                }
            }
            1 => {
                // remove
                let present = model.contains_key(&value);
                assert_eq!(table.remove(value), present);
                if present {
                    let count = model.get_mut(&value).unwrap();
                    *count -= 1;
                    if *count == 0 {
                        model.remove(&value);
                    }
                }
            }
            2 => {
                // occurrences
                let expected = model.get(&value).copied().unwrap_or(0);
                assert_eq!(table.occurrences(value), expected);
            }
            3 => {
                // contains
                assert_eq!(table.contains(value), model.contains_key(&value));
            }
            4 => {
                // dump (read-only; must never panic)
                let mut text = String::new();
                let _ = table.dump(&mut text, value & 1 == 0);
            }
            5 => {
                // clear, rarely
                if data[idx + 1] == 0xFF {
                    table.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }

        // Counter coherence after every op
        let expected_len: u64 = model.values().sum();
        assert_eq!(table.len() as u64, expected_len);
        assert_eq!(table.is_empty(), model.is_empty());
        assert!(table.buckets_used() <= table.bucket_count());
        assert!(table.buckets_used() <= model.len());

        idx += 2;
    }
});
