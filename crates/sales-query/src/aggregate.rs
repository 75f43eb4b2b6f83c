//! Sums, averages, and per-store totals over a selection of sale records.

use crate::model::SaleRecord;

// ── Flat aggregation ────────────────────────────────────────────────────────

/// Totals over a flat selection of records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregationResult {
    pub total_revenue: f64,
    pub total_quantity: u64,
    /// Mean revenue per record; `0.0` when there are no records.
    pub average_revenue: f64,
    pub count: usize,
}

/// Sum revenue and quantity over `records` and compute the mean revenue per record.
pub fn aggregate_flat(records: &[SaleRecord]) -> AggregationResult {
    let (total_revenue, total_quantity) = records
        .iter()
        .fold((0.0, 0u64), |(revenue, quantity), r| {
            (revenue + r.revenue, quantity.saturating_add(r.quantity))
        });
    let count = records.len();
    let average_revenue = if count == 0 {
        0.0
    } else {
        total_revenue / count as f64
    };

    AggregationResult {
        total_revenue,
        total_quantity,
        average_revenue,
        count,
    }
}

// ── Per-store grouping ──────────────────────────────────────────────────────

/// Summed revenue for one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreTotal {
    pub store: String,
    pub total_revenue: f64,
}

/// Store → summed revenue, in the order each store was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreTotals(Vec<StoreTotal>);

impl StoreTotals {
    fn add(mut self, store: &str, revenue: f64) -> Self {
        match self.0.iter_mut().find(|t| t.store == store) {
            Some(total) => total.total_revenue += revenue,
            None => self.0.push(StoreTotal {
                store: store.to_string(),
                total_revenue: revenue,
            }),
        }
        self
    }

    pub fn get(&self, store: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|t| t.store == store)
            .map(|t| t.total_revenue)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreTotal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for StoreTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |totals, (store, revenue)| {
                totals.add(&store, revenue)
            })
    }
}

/// Sum revenue per store with a single pass over `records`.
pub fn group_by_store(records: &[SaleRecord]) -> StoreTotals {
    records
        .iter()
        .fold(StoreTotals::default(), |totals, r| totals.add(&r.store, r.revenue))
}

/// Which end of the ranking to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Max,
    Min,
}

/// Pick the store with the highest or lowest total.
///
/// `Max` starts from a best of `0.0`, so a store needs a strictly positive
/// total to win; an all-non-positive selection has no winner. `Min` starts
/// from `+inf` and only comes up empty for an empty selection. Ties keep the
/// store seen first.
pub fn pick_extremal_store(totals: &StoreTotals, direction: Direction) -> Option<StoreTotal> {
    let seed = match direction {
        Direction::Max => 0.0,
        Direction::Min => f64::INFINITY,
    };

    totals
        .iter()
        .fold((None, seed), |(best, best_total), candidate| {
            let better = match direction {
                Direction::Max => candidate.total_revenue > best_total,
                Direction::Min => candidate.total_revenue < best_total,
            };
            if better {
                (Some(candidate), candidate.total_revenue)
            } else {
                (best, best_total)
            }
        })
        .0
        .cloned()
}
