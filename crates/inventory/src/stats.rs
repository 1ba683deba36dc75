//! Stats History: rolling aggregate snapshots and trend deltas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::Reducer;

use crate::record::Record;
use crate::status::StockStatus;

/// Maximum number of snapshots kept; oldest are evicted first.
pub const MAX_SNAPSHOTS: usize = 100;

/// Sentinel change value when there is not enough history.
pub const NOT_AVAILABLE: &str = "N/A";

/// Aggregate counts over one owner's records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounts {
    pub total_count: u64,
    pub in_stock_count: u64,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
}

impl AggregateCounts {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records.into_iter().fold(Self::default(), |mut counts, record| {
            counts.total_count += 1;
            match record.status() {
                StockStatus::InStock => counts.in_stock_count += 1,
                StockStatus::LowStock => counts.low_stock_count += 1,
                StockStatus::OutOfStock => counts.out_of_stock_count += 1,
            }
            counts
        })
    }

    pub fn get(&self, category: StatCategory) -> u64 {
        match category {
            StatCategory::Total => self.total_count,
            StatCategory::InStock => self.in_stock_count,
            StatCategory::LowStock => self.low_stock_count,
            StatCategory::OutOfStock => self.out_of_stock_count,
        }
    }
}

/// Which count a trend is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatCategory {
    Total,
    InStock,
    LowStock,
    OutOfStock,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        StatCategory::Total,
        StatCategory::InStock,
        StatCategory::LowStock,
        StatCategory::OutOfStock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Total => "Total Products",
            StatCategory::InStock => "In Stock",
            StatCategory::LowStock => "Low Stock",
            StatCategory::OutOfStock => "Out of Stock",
        }
    }
}

/// One aggregate sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub counts: AggregateCounts,
    pub timestamp: DateTime<Utc>,
}

/// Trend reading for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// `+12.5%`, `-3.0%`, `+100%`, `0%` or `N/A`.
    pub value: String,
    pub is_positive: bool,
}

impl Change {
    pub fn not_available() -> Self {
        Self {
            value: NOT_AVAILABLE.to_string(),
            is_positive: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value != NOT_AVAILABLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsAction {
    Append {
        counts: AggregateCounts,
        at: DateTime<Utc>,
    },
}

/// Rolling window of at most [`MAX_SNAPSHOTS`] snapshots, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsHistory {
    snapshots: Vec<StatsSnapshot>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[StatsSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&StatsSnapshot> {
        self.snapshots.last()
    }

    pub fn append_snapshot(&mut self, counts: AggregateCounts, at: DateTime<Utc>) {
        self.apply(&StatsAction::Append { counts, at });
    }

    pub fn percent_change(&self, category: StatCategory) -> Change {
        percent_change(category, &self.snapshots)
    }
}

impl Reducer for StatsHistory {
    type Action = StatsAction;

    fn apply(&mut self, action: &Self::Action) {
        match action {
            StatsAction::Append { counts, at } => {
                self.snapshots.push(StatsSnapshot {
                    counts: *counts,
                    timestamp: *at,
                });
                if self.snapshots.len() > MAX_SNAPSHOTS {
                    let excess = self.snapshots.len() - MAX_SNAPSHOTS;
                    self.snapshots.drain(..excess);
                }
            }
        }
    }
}

/// Change of `category` between the last snapshot and the one before it.
///
/// The comparison is always against `history[len - 2]`, not a fixed
/// baseline. A zero previous count yields `+100%` (or `0%` if still zero).
pub fn percent_change(category: StatCategory, history: &[StatsSnapshot]) -> Change {
    let [.., previous, current] = history else {
        return Change::not_available();
    };
    let previous = previous.counts.get(category);
    let current = current.counts.get(category);

    if previous == 0 {
        return Change {
            value: if current > 0 { "+100%" } else { "0%" }.to_string(),
            is_positive: current > 0,
        };
    }

    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    let is_positive = change >= 0.0;
    Change {
        value: format!("{}{change:.1}%", if is_positive { "+" } else { "" }),
        is_positive,
    }
}
