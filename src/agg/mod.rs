//! Pure group-by aggregation over the sales dataset.
//!
//! Every chart consumes a `SummaryTable` produced here (or reads raw rows
//! directly, for the scatter/bubble charts). Aggregation never mutates the
//! dataset and never fails: an empty input yields an empty table.
//!
//! Keys are held in `BTreeMap`s, so iteration is always ascending by key
//! (e.g. Year ascending) without a separate sort step. Missing key
//! combinations are absent rather than zero; callers that need a complete
//! grid treat absent entries as zero.

use std::collections::BTreeMap;

use crate::domain::SalesRecord;

/// Single-level aggregation result: grouping key -> aggregated value.
pub type SummaryTable<K> = BTreeMap<K, f64>;

/// Two-level aggregation result: outer key -> inner key -> aggregated value.
pub type SummaryTable2<K1, K2> = BTreeMap<K1, BTreeMap<K2, f64>>;

/// How grouped values are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    /// Arithmetic mean over matching rows. Used by the trend charts that
    /// track level columns (GDP, unemployment rate) rather than volumes.
    Mean,
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    fn finish(self, op: AggregateOp) -> f64 {
        match op {
            AggregateOp::Sum => self.total,
            AggregateOp::Mean => self.total / self.count as f64,
        }
    }
}

/// Group `rows` by `key` and combine `value` over each group with `op`.
pub fn group_agg<'a, K, I>(
    rows: I,
    key: impl Fn(&SalesRecord) -> K,
    value: impl Fn(&SalesRecord) -> f64,
    op: AggregateOp,
) -> SummaryTable<K>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut acc: BTreeMap<K, Accumulator> = BTreeMap::new();
    for row in rows {
        acc.entry(key(row)).or_default().push(value(row));
    }
    acc.into_iter().map(|(k, a)| (k, a.finish(op))).collect()
}

/// Shorthand for the common sum-over-groups case.
pub fn group_sum<'a, K, I>(
    rows: I,
    key: impl Fn(&SalesRecord) -> K,
    value: impl Fn(&SalesRecord) -> f64,
) -> SummaryTable<K>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
{
    group_agg(rows, key, value, AggregateOp::Sum)
}

/// Two-level grouping: `key1` is the outer map key, `key2` the inner.
pub fn group_agg2<'a, K1, K2, I>(
    rows: I,
    key1: impl Fn(&SalesRecord) -> K1,
    key2: impl Fn(&SalesRecord) -> K2,
    value: impl Fn(&SalesRecord) -> f64,
    op: AggregateOp,
) -> SummaryTable2<K1, K2>
where
    K1: Ord,
    K2: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut acc: BTreeMap<K1, BTreeMap<K2, Accumulator>> = BTreeMap::new();
    for row in rows {
        acc.entry(key1(row))
            .or_default()
            .entry(key2(row))
            .or_default()
            .push(value(row));
    }
    acc.into_iter()
        .map(|(k1, inner)| {
            let inner = inner.into_iter().map(|(k2, a)| (k2, a.finish(op))).collect();
            (k1, inner)
        })
        .collect()
}
