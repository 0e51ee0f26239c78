//! Fixed-bucket integer table with sorted separate chaining.
//!
//! Maps `i64` values to set membership or multiplicity counts. The bucket
//! array never grows; collisions extend a per-bucket singly linked chain that
//! is kept strictly ascending, with duplicate values folded into a per-node
//! occurrence count instead of extra nodes.
//!
//! ## Architecture
//!
//! ```text
//!   heads (Vec<Option<SlotId>>)         nodes (ChainArena<Node>)
//!   ┌────────┬──────────┐              ┌────────┬──────────────────────────┐
//!   │ bucket │ head     │              │ SlotId │ Node                     │
//!   ├────────┼──────────┤              ├────────┼──────────────────────────┤
//!   │   0    │ None     │              │ id_0   │ { value: 3,  occ: 2,     │
//!   │   1    │ Some ────┼───────┐      │        │   next: Some(id_1) }     │
//!   │   2    │ None     │       └─────►│ id_1   │ { value: 103, occ: 1,    │
//!   │  ...   │  ...     │              │        │   next: None }           │
//!   └────────┴──────────┘              └────────┴──────────────────────────┘
//!
//!   bucket(v) = |v| mod bucket_count          chain: 3 ──► 103   (ascending)
//! ```
//!
//! ## Operations
//!
//! | Operation       | Time     | Notes                                     |
//! |-----------------|----------|-------------------------------------------|
//! | `insert`        | O(chain) | Sorted position; duplicates fold or reject|
//! | `occurrences`   | O(chain) | Early exit past the first larger value    |
//! | `remove`        | O(chain) | Frees the node once its count hits zero   |
//! | `len`           | O(1)     | Total logical occurrences                 |
//! | `buckets_used`  | O(1)     | Non-empty chains, maintained incrementally|
//! | `load_factor`   | O(1)     | `buckets_used / bucket_count`             |
//! | `entries`       | O(n)     | Bucket order, ascending within a bucket   |
//! | `dump` / `print`| O(n)     | Diagnostic text, the crate's only I/O     |
//!
//! The hash is deliberately `|v| mod bucket_count`: negative values share a
//! bucket with their absolute-value counterparts, and adversarial inputs
//! cluster. Both are part of the container's contract, not defects.
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::table::{ChainedTable, DuplicatePolicy};
//!
//! let mut table = ChainedTable::try_new(100, DuplicatePolicy::Count).unwrap();
//! assert!(table.insert(7));
//! assert!(table.insert(7));
//! assert_eq!(table.occurrences(7), 2);
//!
//! assert!(table.remove(7));
//! assert_eq!(table.occurrences(7), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Single-threaded. The table never blocks or suspends; callers that share
//! one across threads wrap it in an exclusive lock per instance.

use std::fmt;

use crate::ds::{ChainArena, SlotId};
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TableMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TableMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, TableMetricsReadRecorder, TableMetricsRecorder,
};

/// How a chain resolves an insert of a value it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Set semantics: the insert is rejected and the table is unchanged.
    Reject,
    /// Multiset semantics: the node's occurrence count absorbs the insert.
    Count,
}

/// Chain node. `occurrences` stays at 1 under [`DuplicatePolicy::Reject`].
#[derive(Debug)]
struct Node {
    next: Option<SlotId>,
    value: i64,
    occurrences: u64,
}

/// Position of a value in its chain after a sorted scan.
///
/// `prev` is the last node strictly below the target; `hit` is the node
/// holding exactly the target, when present. The scan stops at the first
/// node whose value exceeds the target, so a miss never walks a full chain.
struct ChainScan {
    prev: Option<SlotId>,
    hit: Option<SlotId>,
}

/// Mutating actions the chain resolver can apply at a scan position.
#[derive(Debug, Clone, Copy)]
enum ChainAction {
    Insert,
    Remove,
}

/// Typed outcome of resolving a [`ChainAction`] against a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainOutcome {
    /// The value was absent; a remove touched nothing.
    Absent,
    /// A fresh node was linked at its sorted position.
    Inserted,
    /// The value was already present under [`DuplicatePolicy::Reject`].
    Rejected,
    /// An existing node absorbed the insert under [`DuplicatePolicy::Count`].
    Counted,
    /// A remove decremented a node that still has occurrences left.
    Decremented,
    /// A remove unlinked and freed the node.
    Unlinked,
}

/// Fixed-bucket integer table with sorted, count-folding collision chains.
#[derive(Debug)]
pub struct ChainedTable {
    heads: Vec<Option<SlotId>>,
    nodes: ChainArena<Node>,
    values_stored: usize,
    buckets_used: usize,
    policy: DuplicatePolicy,
    #[cfg(feature = "metrics")]
    metrics: TableMetrics,
}

impl ChainedTable {
    /// Creates a table with `bucket_count` buckets and the given duplicate
    /// policy. The bucket count is fixed for the table's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `bucket_count` is zero.
    ///
    /// # Example
    /// ```
    /// use chainkit::table::{ChainedTable, DuplicatePolicy};
    ///
    /// let table = ChainedTable::try_new(100, DuplicatePolicy::Reject).unwrap();
    /// assert_eq!(table.bucket_count(), 100);
    /// assert!(table.is_empty());
    /// ```
    pub fn try_new(bucket_count: usize, policy: DuplicatePolicy) -> Result<Self, ConfigError> {
        if bucket_count == 0 {
            return Err(ConfigError::new("bucket count must be > 0"));
        }
        Ok(Self {
            heads: vec![None; bucket_count],
            nodes: ChainArena::new(),
            values_stored: 0,
            buckets_used: 0,
            policy,
            #[cfg(feature = "metrics")]
            metrics: TableMetrics::default(),
        })
    }

    /// Inserts `value`, returning `true` if it was stored or counted.
    ///
    /// Under [`DuplicatePolicy::Reject`] a second insert of the same value
    /// returns `false` and leaves the table untouched. Under
    /// [`DuplicatePolicy::Count`] it bumps the value's occurrence count.
    #[inline]
    pub fn insert(&mut self, value: i64) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        match self.resolve(value, ChainAction::Insert) {
            ChainOutcome::Inserted => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
                true
            }
            ChainOutcome::Counted => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_counted();
                true
            }
            ChainOutcome::Rejected => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_rejected();
                false
            }
            ChainOutcome::Absent | ChainOutcome::Decremented | ChainOutcome::Unlinked => {
                unreachable!("remove outcome from an insert")
            }
        }
    }

    /// Returns how many live occurrences of `value` the table holds.
    ///
    /// 0 means absent. Under [`DuplicatePolicy::Reject`] a present value
    /// always reports 1.
    #[inline]
    pub fn occurrences(&self, value: i64) -> u64 {
        #[cfg(feature = "metrics")]
        self.metrics.record_probe_call();

        let bucket = self.bucket_of(value);
        match self.scan_chain(bucket, value).hit {
            Some(id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_probe_hit();
                self.nodes.get(id).map_or(0, |node| node.occurrences)
            }
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_probe_miss();
                0
            }
        }
    }

    /// Returns `true` if at least one occurrence of `value` is stored.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.occurrences(value) > 0
    }

    /// Removes one occurrence of `value`, returning `true` on a match.
    ///
    /// The node is unlinked and freed once its count reaches zero; a chain
    /// that empties gives its bucket back to the `buckets_used` gauge.
    #[inline]
    pub fn remove(&mut self, value: i64) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        match self.resolve(value, ChainAction::Remove) {
            ChainOutcome::Absent => {
                #[cfg(feature = "metrics")]
                self.metrics.record_remove_miss();
                false
            }
            ChainOutcome::Decremented => {
                #[cfg(feature = "metrics")]
                self.metrics.record_remove_decrement();
                true
            }
            ChainOutcome::Unlinked => {
                #[cfg(feature = "metrics")]
                self.metrics.record_remove_unlink();
                true
            }
            ChainOutcome::Inserted | ChainOutcome::Rejected | ChainOutcome::Counted => {
                unreachable!("insert outcome from a remove")
            }
        }
    }

    /// Returns the total number of logical occurrences stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.values_stored
    }

    /// Returns `true` if the table stores nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values_stored == 0
    }

    /// Returns the number of buckets with a non-empty chain.
    #[inline]
    pub fn buckets_used(&self) -> usize {
        self.buckets_used
    }

    /// Returns the fixed bucket count.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// Returns bucket occupancy: `buckets_used / bucket_count`.
    ///
    /// This measures occupied buckets, not average chain length, and is 0.0
    /// for an empty table.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        if self.heads.is_empty() {
            return 0.0;
        }
        self.buckets_used as f64 / self.heads.len() as f64
    }

    /// Returns the duplicate policy fixed at construction.
    #[inline]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Drops every node and resets the counters; the bucket array keeps its
    /// configured size.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.nodes.clear();
        for head in &mut self.heads {
            *head = None;
        }
        self.values_stored = 0;
        self.buckets_used = 0;
    }

    /// Returns `(bucket, value, occurrences)` triples in bucket order,
    /// ascending by value within each bucket.
    pub fn entries(&self) -> impl Iterator<Item = (usize, i64, u64)> + '_ {
        let nodes = &self.nodes;
        self.heads.iter().enumerate().flat_map(move |(bucket, &head)| {
            ChainIter { nodes, cursor: head }
                .map(move |(value, occurrences)| (bucket, value, occurrences))
        })
    }

    /// Writes a human-readable dump of every bucket to `out`.
    ///
    /// Each line holds one bucket index followed by its values in ascending
    /// order, every value repeated once per occurrence. With `skip_empty`,
    /// buckets with no chain are omitted instead of printed bare.
    pub fn dump<W: fmt::Write>(&self, out: &mut W, skip_empty: bool) -> fmt::Result {
        for (bucket, &head) in self.heads.iter().enumerate() {
            if head.is_none() && skip_empty {
                continue;
            }
            write!(out, "bucket {bucket}:")?;
            let mut cursor = head;
            while let Some(id) = cursor {
                let node = match self.nodes.get(id) {
                    Some(node) => node,
                    None => break,
                };
                for _ in 0..node.occurrences {
                    write!(out, " {}", node.value)?;
                }
                cursor = node.next;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Prints the [`dump`](Self::dump) text to stdout.
    pub fn print(&self, skip_empty: bool) {
        let mut text = String::new();
        // fmt::Write to a String is infallible
        let _ = self.dump(&mut text, skip_empty);
        print!("{text}");
    }

    /// Returns an approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.heads.capacity() * std::mem::size_of::<Option<SlotId>>()
            + self.nodes.approx_bytes()
    }

    /// Maps a value to its bucket. `unsigned_abs` is total on `i64`, so
    /// `i64::MIN` lands at `2^63 mod bucket_count` instead of overflowing.
    #[inline]
    fn bucket_of(&self, value: i64) -> usize {
        (value.unsigned_abs() % self.heads.len() as u64) as usize
    }

    /// Sorted scan of one chain: the single traversal primitive behind
    /// insert, remove, and the read-only probes.
    fn scan_chain(&self, bucket: usize, value: i64) -> ChainScan {
        let mut prev = None;
        let mut cursor = self.heads[bucket];
        while let Some(id) = cursor {
            let node = match self.nodes.get(id) {
                Some(node) => node,
                None => break,
            };
            if node.value > value {
                break;
            }
            if node.value == value {
                return ChainScan { prev, hit: Some(id) };
            }
            prev = Some(id);
            cursor = node.next;
        }
        ChainScan { prev, hit: None }
    }

    /// Applies `action` at the scan position for `value`, maintaining the
    /// `values_stored` and `buckets_used` counters.
    fn resolve(&mut self, value: i64, action: ChainAction) -> ChainOutcome {
        let bucket = self.bucket_of(value);
        let ChainScan { prev, hit } = self.scan_chain(bucket, value);

        match (action, hit) {
            (ChainAction::Insert, Some(id)) => match self.policy {
                DuplicatePolicy::Reject => ChainOutcome::Rejected,
                DuplicatePolicy::Count => {
                    if let Some(node) = self.nodes.get_mut(id) {
                        node.occurrences += 1;
                    }
                    self.values_stored += 1;
                    ChainOutcome::Counted
                }
            },
            (ChainAction::Insert, None) => {
                let was_empty = self.heads[bucket].is_none();
                // The scan stopped either at the first larger node or at the
                // chain end; prev's successor is exactly that position.
                let next = match prev {
                    Some(prev_id) => self.nodes.get(prev_id).and_then(|node| node.next),
                    None => self.heads[bucket],
                };
                let id = self.nodes.alloc(Node {
                    next,
                    value,
                    occurrences: 1,
                });
                match prev {
                    Some(prev_id) => {
                        if let Some(prev_node) = self.nodes.get_mut(prev_id) {
                            prev_node.next = Some(id);
                        }
                    }
                    None => self.heads[bucket] = Some(id),
                }
                if was_empty {
                    self.buckets_used += 1;
                }
                self.values_stored += 1;
                ChainOutcome::Inserted
            }
            (ChainAction::Remove, None) => ChainOutcome::Absent,
            (ChainAction::Remove, Some(id)) => {
                let keeps_node = match self.nodes.get_mut(id) {
                    Some(node) if node.occurrences > 1 => {
                        node.occurrences -= 1;
                        true
                    }
                    _ => false,
                };
                self.values_stored -= 1;
                if keeps_node {
                    return ChainOutcome::Decremented;
                }

                let next = self.nodes.get(id).and_then(|node| node.next);
                match prev {
                    Some(prev_id) => {
                        if let Some(prev_node) = self.nodes.get_mut(prev_id) {
                            prev_node.next = next;
                        }
                    }
                    None => self.heads[bucket] = next,
                }
                self.nodes.free(id);

                if self.heads[bucket].is_none() {
                    self.buckets_used -= 1;
                }
                ChainOutcome::Unlinked
            }
        }
    }

    /// Validates every structural invariant, returning the first violation.
    ///
    /// Recounts what the hot paths maintain incrementally: chain sortedness
    /// and bucket membership, occurrence positivity, the `Reject`-policy
    /// count cap, the two gauges, and arena/node reachability.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut reachable = 0usize;
        let mut occupied = 0usize;
        let mut total_occurrences = 0u64;

        for (bucket, &head) in self.heads.iter().enumerate() {
            if head.is_some() {
                occupied += 1;
            }
            let mut cursor = head;
            let mut last_value: Option<i64> = None;
            let mut hops = 0usize;
            while let Some(id) = cursor {
                let node = self.nodes.get(id).ok_or_else(|| {
                    InvariantError::new(format!(
                        "bucket {bucket}: chain references vacant slot {}",
                        id.index()
                    ))
                })?;
                if let Some(last) = last_value {
                    if node.value <= last {
                        return Err(InvariantError::new(format!(
                            "bucket {bucket}: chain not strictly ascending at {}",
                            node.value
                        )));
                    }
                }
                if node.occurrences == 0 {
                    return Err(InvariantError::new(format!(
                        "bucket {bucket}: node {} persisted with zero occurrences",
                        node.value
                    )));
                }
                if self.policy == DuplicatePolicy::Reject && node.occurrences != 1 {
                    return Err(InvariantError::new(format!(
                        "bucket {bucket}: node {} counted {} under reject policy",
                        node.value, node.occurrences
                    )));
                }
                if self.bucket_of(node.value) != bucket {
                    return Err(InvariantError::new(format!(
                        "bucket {bucket}: node {} belongs in bucket {}",
                        node.value,
                        self.bucket_of(node.value)
                    )));
                }
                hops += 1;
                if hops > self.nodes.len() {
                    return Err(InvariantError::new(format!("bucket {bucket}: chain cycle")));
                }
                reachable += 1;
                total_occurrences += node.occurrences;
                last_value = Some(node.value);
                cursor = node.next;
            }
        }

        if occupied != self.buckets_used {
            return Err(InvariantError::new(format!(
                "buckets_used {} but {} chains are non-empty",
                self.buckets_used, occupied
            )));
        }
        if total_occurrences != self.values_stored as u64 {
            return Err(InvariantError::new(format!(
                "values_stored {} but chains hold {} occurrences",
                self.values_stored, total_occurrences
            )));
        }
        if reachable != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "arena holds {} nodes but {} are reachable",
                self.nodes.len(),
                reachable
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<TableMetricsSnapshot> for ChainedTable {
    fn metrics_snapshot(&self) -> TableMetricsSnapshot {
        self.metrics
            .snapshot(self.values_stored, self.buckets_used, self.heads.len())
    }

    fn reset_metrics(&mut self) {
        self.metrics = TableMetrics::default();
    }
}

/// Walks one chain from its head, yielding `(value, occurrences)`.
struct ChainIter<'a> {
    nodes: &'a ChainArena<Node>,
    cursor: Option<SlotId>,
}

impl Iterator for ChainIter<'_> {
    type Item = (i64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(id)?;
        self.cursor = node.next;
        Some((node.value, node.occurrences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(buckets: usize, policy: DuplicatePolicy) -> ChainedTable {
        ChainedTable::try_new(buckets, policy).unwrap()
    }

    #[test]
    fn zero_buckets_is_rejected() {
        let err = ChainedTable::try_new(0, DuplicatePolicy::Count).unwrap_err();
        assert!(err.to_string().contains("bucket count"));
    }

    #[test]
    fn fresh_table_is_empty() {
        let t = table(10, DuplicatePolicy::Reject);
        assert_eq!(t.len(), 0);
        assert_eq!(t.buckets_used(), 0);
        assert_eq!(t.bucket_count(), 10);
        assert_eq!(t.load_factor(), 0.0);
        assert!(t.is_empty());
        t.check_invariants().unwrap();
    }

    #[test]
    fn insert_probe_remove_roundtrip() {
        let mut t = table(100, DuplicatePolicy::Reject);
        assert!(t.insert(1));
        assert_eq!(t.occurrences(1), 1);
        assert!(t.contains(1));
        assert!(t.remove(1));
        assert_eq!(t.occurrences(1), 0);
        assert!(!t.remove(1));
        assert!(t.is_empty());
        t.check_invariants().unwrap();
    }

    #[test]
    fn reject_policy_turns_away_duplicates() {
        let mut t = table(100, DuplicatePolicy::Reject);
        assert!(t.insert(1));
        assert!(!t.insert(1));
        assert_eq!(t.len(), 1);
        assert_eq!(t.buckets_used(), 1);
        assert_eq!(t.occurrences(1), 1);
        t.check_invariants().unwrap();
    }

    #[test]
    fn count_policy_folds_duplicates_into_one_node() {
        let mut t = table(100, DuplicatePolicy::Count);
        assert!(t.insert(1));
        assert!(t.insert(1));
        assert!(t.insert(1));
        assert_eq!(t.occurrences(1), 3);
        assert_eq!(t.len(), 3);
        assert_eq!(t.buckets_used(), 1);

        assert!(t.remove(1));
        assert_eq!(t.occurrences(1), 2);
        assert_eq!(t.buckets_used(), 1);

        assert!(t.remove(1));
        assert!(t.remove(1));
        assert_eq!(t.occurrences(1), 0);
        assert_eq!(t.buckets_used(), 0);
        t.check_invariants().unwrap();
    }

    #[test]
    fn chain_stays_sorted_under_reverse_insertion() {
        // One bucket forces every value into a single chain.
        let mut t = table(1, DuplicatePolicy::Reject);
        for value in (0..10).rev() {
            assert!(t.insert(value));
        }
        let values: Vec<i64> = t.entries().map(|(_, value, _)| value).collect();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
        t.check_invariants().unwrap();
    }

    #[test]
    fn colliding_values_share_one_bucket() {
        let mut t = table(10, DuplicatePolicy::Reject);
        assert!(t.insert(3));
        assert!(t.insert(13));
        assert!(t.insert(23));
        assert_eq!(t.buckets_used(), 1);
        assert_eq!(t.len(), 3);
        t.check_invariants().unwrap();
    }

    #[test]
    fn negative_values_hash_by_absolute_value() {
        let mut t = table(1000, DuplicatePolicy::Reject);
        assert!(t.insert(3));
        assert!(t.insert(-3));
        // Same bucket, distinct values: one chain, two nodes.
        assert_eq!(t.buckets_used(), 1);
        assert_eq!(t.occurrences(3), 1);
        assert_eq!(t.occurrences(-3), 1);
        t.check_invariants().unwrap();
    }

    #[test]
    fn min_value_round_trips() {
        let mut t = table(97, DuplicatePolicy::Count);
        assert!(t.insert(i64::MIN));
        assert!(t.insert(i64::MIN));
        assert_eq!(t.occurrences(i64::MIN), 2);
        assert!(t.remove(i64::MIN));
        assert!(t.remove(i64::MIN));
        assert!(!t.contains(i64::MIN));
        t.check_invariants().unwrap();
    }

    #[test]
    fn removing_a_middle_node_keeps_the_chain_linked() {
        let mut t = table(1, DuplicatePolicy::Reject);
        for value in 0..5 {
            assert!(t.insert(value));
        }
        assert!(t.remove(2));
        let values: Vec<i64> = t.entries().map(|(_, value, _)| value).collect();
        assert_eq!(values, vec![0, 1, 3, 4]);
        assert_eq!(t.buckets_used(), 1);
        t.check_invariants().unwrap();
    }

    #[test]
    fn removing_the_head_relinks_the_bucket() {
        let mut t = table(1, DuplicatePolicy::Reject);
        assert!(t.insert(1));
        assert!(t.insert(2));
        assert!(t.remove(1));
        assert_eq!(t.occurrences(2), 1);
        assert_eq!(t.buckets_used(), 1);
        assert!(t.remove(2));
        assert_eq!(t.buckets_used(), 0);
        t.check_invariants().unwrap();
    }

    #[test]
    fn probe_exits_early_without_false_positives() {
        let mut t = table(1, DuplicatePolicy::Reject);
        assert!(t.insert(10));
        assert!(t.insert(30));
        // 20 sits between the two stored values; the scan stops at 30.
        assert_eq!(t.occurrences(20), 0);
        assert!(!t.remove(20));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn clear_resets_counters_but_not_bucket_count() {
        let mut t = table(8, DuplicatePolicy::Count);
        for value in 0..20 {
            t.insert(value);
        }
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.buckets_used(), 0);
        assert_eq!(t.bucket_count(), 8);
        assert_eq!(t.load_factor(), 0.0);
        t.check_invariants().unwrap();
    }

    #[test]
    fn dump_lists_occurrences_in_ascending_order() {
        let mut t = table(4, DuplicatePolicy::Count);
        t.insert(6);
        t.insert(2);
        t.insert(2);

        let mut text = String::new();
        t.dump(&mut text, true).unwrap();
        assert_eq!(text, "bucket 2: 2 2 6\n");

        let mut full = String::new();
        t.dump(&mut full, false).unwrap();
        assert_eq!(full, "bucket 0:\nbucket 1:\nbucket 2: 2 2 6\nbucket 3:\n");
    }

    #[test]
    fn entries_walk_buckets_in_index_order() {
        let mut t = table(4, DuplicatePolicy::Count);
        t.insert(5);
        t.insert(2);
        t.insert(2);
        t.insert(7);
        let collected: Vec<(usize, i64, u64)> = t.entries().collect();
        assert_eq!(collected, vec![(1, 5, 1), (2, 2, 2), (3, 7, 1)]);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_operation_outcomes() {
        use crate::metrics::traits::MetricsSnapshotProvider;

        let mut t = table(10, DuplicatePolicy::Reject);
        t.insert(1);
        t.insert(1);
        t.occurrences(1);
        t.occurrences(2);
        t.remove(1);
        t.remove(1);

        let snapshot = t.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 2);
        assert_eq!(snapshot.insert_new, 1);
        assert_eq!(snapshot.insert_rejected, 1);
        assert_eq!(snapshot.probe_calls, 2);
        assert_eq!(snapshot.probe_hits, 1);
        assert_eq!(snapshot.probe_misses, 1);
        assert_eq!(snapshot.remove_calls, 2);
        assert_eq!(snapshot.remove_unlinks, 1);
        assert_eq!(snapshot.remove_misses, 1);
        assert_eq!(snapshot.values_stored, 0);

        t.reset_metrics();
        assert_eq!(t.metrics_snapshot().insert_calls, 0);
    }
}
