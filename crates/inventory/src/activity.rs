//! Activity Log: coalescing, bounded, most-recent-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{OwnerId, RecordId, Reducer};

use crate::store::RecordEvent;

/// Maximum number of live entries; the least recently touched are evicted.
pub const MAX_ACTIVITIES: usize = 10;

/// Kind of record mutation an entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Added,
    Edited,
    Removed,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Added => "added",
            ActionType::Edited => "edited",
            ActionType::Removed => "removed",
        }
    }

    /// Feed text for a record with this name.
    pub fn describe(self, record_name: &str) -> String {
        match self {
            ActionType::Added => format!("New Product added: {record_name}"),
            ActionType::Edited => format!("Product Edited: {record_name}"),
            ActionType::Removed => format!("Product Removed: {record_name}"),
        }
    }
}

/// One coalesced action on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// `<owner>-<record>-<action>-<created millis>`; fixed at first occurrence.
    pub id: String,
    pub owner_id: OwnerId,
    pub action_type: ActionType,
    pub record_id: RecordId,
    /// Latest name seen for the record.
    pub record_name: String,
    /// Last time the entry was touched.
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

impl ActivityEntry {
    fn matches(&self, owner_id: &OwnerId, record_id: RecordId, action_type: ActionType) -> bool {
        self.owner_id == *owner_id && self.record_id == record_id && self.action_type == action_type
    }

    /// Feed line, e.g. `Product Edited: Lamp (3 times)`.
    pub fn describe(&self) -> String {
        let text = self.action_type.describe(&self.record_name);
        if self.count > 1 {
            format!("{text} ({} times)", self.count)
        } else {
            text
        }
    }

    /// Relative age of the entry at `now`.
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        time_ago(self.timestamp, now)
    }
}

/// Transitions of the [`ActivityLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    Record {
        owner_id: OwnerId,
        record_id: RecordId,
        record_name: String,
        action_type: ActionType,
        at: DateTime<Utc>,
    },
    Clear,
    ClearOwner(OwnerId),
}

impl From<&RecordEvent> for ActivityAction {
    fn from(event: &RecordEvent) -> Self {
        ActivityAction::Record {
            owner_id: event.owner_id.clone(),
            record_id: event.record_id,
            record_name: event.record_name.clone(),
            action_type: event.action,
            at: event.occurred_at,
        }
    }
}

/// Append-only activity log with same-subject coalescing.
///
/// Invariants:
/// - at most one entry per `(owner, record, action)` triple
/// - entries are ordered most-recently-touched first
/// - never more than [`MAX_ACTIVITIES`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coalesce one action into the log.
    pub fn record_activity(
        &mut self,
        owner_id: OwnerId,
        record_id: RecordId,
        record_name: impl Into<String>,
        action_type: ActionType,
        at: DateTime<Utc>,
    ) {
        self.apply(&ActivityAction::Record {
            owner_id,
            record_id,
            record_name: record_name.into(),
            action_type,
            at,
        });
    }

    /// Feed the log from a store event.
    pub fn observe(&mut self, event: &RecordEvent) {
        self.apply(&ActivityAction::from(event));
    }

    /// The first `limit` entries belonging to `owner_id`.
    pub fn recent(&self, owner_id: &OwnerId, limit: usize) -> Vec<&ActivityEntry> {
        self.entries
            .iter()
            .filter(|e| e.owner_id == *owner_id)
            .take(limit)
            .collect()
    }

    fn coalesce(
        &mut self,
        owner_id: &OwnerId,
        record_id: RecordId,
        record_name: &str,
        action_type: ActionType,
        at: DateTime<Utc>,
    ) {
        let existing = self
            .entries
            .iter()
            .position(|e| e.matches(owner_id, record_id, action_type));

        let entry = match existing {
            Some(index) => {
                let mut entry = self.entries.remove(index);
                entry.count += 1;
                entry.timestamp = at;
                entry.record_name = record_name.to_string();
                tracing::debug!(entry_id = %entry.id, count = entry.count, "activity coalesced");
                entry
            }
            None => ActivityEntry {
                id: format!(
                    "{owner_id}-{record_id}-{}-{}",
                    action_type.as_str(),
                    at.timestamp_millis()
                ),
                owner_id: owner_id.clone(),
                action_type,
                record_id,
                record_name: record_name.to_string(),
                timestamp: at,
                count: 1,
            },
        };
        self.entries.insert(0, entry);

        if self.entries.len() > MAX_ACTIVITIES {
            let evicted = self.entries.len() - MAX_ACTIVITIES;
            self.entries.truncate(MAX_ACTIVITIES);
            tracing::debug!(evicted, "activity log truncated");
        }
    }
}

impl Reducer for ActivityLog {
    type Action = ActivityAction;

    fn apply(&mut self, action: &Self::Action) {
        match action {
            ActivityAction::Record {
                owner_id,
                record_id,
                record_name,
                action_type,
                at,
            } => self.coalesce(owner_id, *record_id, record_name, *action_type, *at),
            ActivityAction::Clear => self.entries.clear(),
            ActivityAction::ClearOwner(owner_id) => self.entries.retain(|e| e.owner_id != *owner_id),
        }
    }
}

/// Relative time between `then` and `now`, e.g. `5 minutes ago`.
///
/// Units truncate; ages in the future count as zero seconds.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{s} seconds ago"),
        s if s < 3_600 => format!("{} minutes ago", s / 60),
        s if s < 86_400 => format!("{} hours ago", s / 3_600),
        s => format!("{} days ago", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id)
    }

    #[test]
    fn repeated_action_coalesces_into_one_entry() {
        let mut log = ActivityLog::new();
        for i in 0..3 {
            log.record_activity(owner("1"), RecordId::new(5), "X", ActionType::Edited, t0() + Duration::seconds(i));
        }

        assert_eq!(log.len(), 1);
        let entry = &log.entries()[0];
        assert_eq!(entry.count, 3);
        assert_eq!(entry.record_name, "X");
        assert_eq!(entry.timestamp, t0() + Duration::seconds(2));
        // Key is fixed at the first occurrence.
        assert_eq!(entry.id, format!("1-5-edited-{}", t0().timestamp_millis()));
    }

    #[test]
    fn coalesced_entry_moves_to_front_with_latest_name() {
        let mut log = ActivityLog::new();
        log.record_activity(owner("1"), RecordId::new(1), "Lamp", ActionType::Added, t0());
        log.record_activity(owner("1"), RecordId::new(2), "Desk", ActionType::Added, t0());
        log.record_activity(owner("1"), RecordId::new(1), "Floor Lamp", ActionType::Added, t0());

        assert_eq!(log.entries()[0].record_id, RecordId::new(1));
        assert_eq!(log.entries()[0].record_name, "Floor Lamp");
        assert_eq!(log.entries()[1].record_id, RecordId::new(2));
    }

    #[test]
    fn different_action_types_are_separate_entries() {
        let mut log = ActivityLog::new();
        log.record_activity(owner("1"), RecordId::new(1), "Lamp", ActionType::Added, t0());
        log.record_activity(owner("1"), RecordId::new(1), "Lamp", ActionType::Edited, t0());
        log.record_activity(owner("2"), RecordId::new(1), "Lamp", ActionType::Edited, t0());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn eleventh_distinct_entry_evicts_the_oldest() {
        let mut log = ActivityLog::new();
        for id in 1..=11 {
            log.record_activity(owner("1"), RecordId::new(id), "Item", ActionType::Added, t0());
        }

        assert_eq!(log.len(), MAX_ACTIVITIES);
        assert!(log.entries().iter().all(|e| e.record_id != RecordId::new(1)));
        assert_eq!(log.entries()[0].record_id, RecordId::new(11));
    }

    #[test]
    fn recent_filters_by_owner_and_limits() {
        let mut log = ActivityLog::new();
        for id in 1..=7 {
            log.record_activity(owner("1"), RecordId::new(id), "Item", ActionType::Added, t0());
        }
        log.record_activity(owner("2"), RecordId::new(1), "Other", ActionType::Removed, t0());

        let feed = log.recent(&owner("1"), 5);
        assert_eq!(feed.len(), 5);
        assert_eq!(feed[0].record_id, RecordId::new(7));
        assert_eq!(log.recent(&owner("2"), 5).len(), 1);
    }

    #[test]
    fn clear_owner_keeps_other_owners() {
        let mut log = ActivityLog::new();
        log.record_activity(owner("1"), RecordId::new(1), "A", ActionType::Added, t0());
        log.record_activity(owner("2"), RecordId::new(1), "B", ActionType::Added, t0());

        log.apply(&ActivityAction::ClearOwner(owner("1")));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].owner_id, owner("2"));

        log.apply(&ActivityAction::Clear);
        assert!(log.is_empty());
    }

    #[test]
    fn describe_mentions_repeat_count() {
        let mut log = ActivityLog::new();
        log.record_activity(owner("1"), RecordId::new(1), "Lamp", ActionType::Removed, t0());
        assert_eq!(log.entries()[0].describe(), "Product Removed: Lamp");
        log.record_activity(owner("1"), RecordId::new(1), "Lamp", ActionType::Removed, t0());
        assert_eq!(log.entries()[0].describe(), "Product Removed: Lamp (2 times)");
    }

    #[test]
    fn time_ago_units() {
        assert_eq!(time_ago(t0(), t0() + Duration::seconds(59)), "59 seconds ago");
        assert_eq!(time_ago(t0(), t0() + Duration::seconds(60)), "1 minutes ago");
        assert_eq!(time_ago(t0(), t0() + Duration::minutes(125)), "2 hours ago");
        assert_eq!(time_ago(t0(), t0() + Duration::hours(49)), "2 days ago");
        assert_eq!(time_ago(t0(), t0() - Duration::seconds(5)), "0 seconds ago");
    }

    proptest! {
        #[test]
        fn triples_stay_unique_and_bounded(ops in prop::collection::vec((0u64..6, 0u8..3), 0..60)) {
            let mut log = ActivityLog::new();
            for (id, kind) in ops {
                let action = match kind {
                    0 => ActionType::Added,
                    1 => ActionType::Edited,
                    _ => ActionType::Removed,
                };
                log.record_activity(owner("1"), RecordId::new(id), "Item", action, t0());
            }

            prop_assert!(log.len() <= MAX_ACTIVITIES);
            let mut seen = std::collections::HashSet::new();
            for entry in log.entries() {
                prop_assert!(seen.insert((entry.record_id, entry.action_type)));
            }
        }
    }
}
