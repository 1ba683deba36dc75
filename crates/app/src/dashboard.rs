//! Dashboard read model: stat cards and the recent-activity feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::{OwnerId, RecordId};
use stockroom_inventory::{ActionType, AggregateCounts, Change, StatCategory};

use crate::workspace::WorkspaceState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub category: StatCategory,
    pub title: &'static str,
    pub count: u64,
    pub change: Change,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub action_type: ActionType,
    pub record_id: RecordId,
    pub text: String,
    pub time_ago: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub cards: Vec<StatCard>,
    pub feed: Vec<FeedItem>,
}

impl Dashboard {
    /// Counts come from the owner's current records; trends from the owner's
    /// stats history (`N/A` until two snapshots exist).
    pub fn build(state: &WorkspaceState, owner: &OwnerId, feed_len: usize, now: DateTime<Utc>) -> Self {
        let counts = AggregateCounts::from_records(state.records.query_by_owner(owner));
        let history = state.stats.get(owner);

        let cards = StatCategory::ALL
            .into_iter()
            .map(|category| StatCard {
                category,
                title: category.label(),
                count: counts.get(category),
                change: history.map_or_else(Change::not_available, |h| h.percent_change(category)),
            })
            .collect();

        let feed = state
            .activity
            .recent(owner, feed_len)
            .into_iter()
            .map(|entry| FeedItem {
                id: entry.id.clone(),
                action_type: entry.action_type,
                record_id: entry.record_id,
                text: entry.describe(),
                time_ago: entry.time_ago(now),
            })
            .collect();

        Self { cards, feed }
    }

    pub fn card(&self, category: StatCategory) -> Option<&StatCard> {
        self.cards.iter().find(|c| c.category == category)
    }
}
