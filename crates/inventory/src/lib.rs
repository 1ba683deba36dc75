//! Inventory domain module.
//!
//! Records, the derived stock status, and the state containers that follow a
//! record mutation (activity log, stats history). Everything here is pure,
//! deterministic domain logic (no IO, no clock reads, no storage).

pub mod activity;
pub mod query;
pub mod record;
pub mod stats;
pub mod status;
pub mod store;

pub use activity::{ActionType, ActivityAction, ActivityEntry, ActivityLog, MAX_ACTIVITIES, time_ago};
pub use query::filter_records;
pub use record::{MAX_PRICE, Record, RecordDraft};
pub use stats::{
    AggregateCounts, Change, MAX_SNAPSHOTS, StatCategory, StatsAction, StatsHistory, StatsSnapshot,
    percent_change,
};
pub use status::{LOW_STOCK_THRESHOLD, StockStatus, derive_status};
pub use store::{RecordAction, RecordEvent, RecordStore};
