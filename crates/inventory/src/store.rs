//! Record Store: the canonical list of records, evolved by a reducer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, Event, Owned, OwnerId, RecordId, Reducer};

use crate::activity::ActionType;
use crate::record::Record;

/// Mutations accepted by the [`RecordStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordAction {
    /// Append. No uniqueness check on `(id, owner)` is performed.
    Insert(Record),
    /// Replace the record addressed by the payload's `(id, owner)`.
    Update(Record),
    /// Remove the record addressed by `(id, owner)`.
    Delete { owner_id: OwnerId, id: RecordId },
    /// Bulk overwrite (rehydration from persistence).
    ReplaceAll(Vec<Record>),
}

/// What a store mutation did, from the activity log's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEvent {
    pub owner_id: OwnerId,
    pub record_id: RecordId,
    pub record_name: String,
    pub action: ActionType,
    pub occurred_at: DateTime<Utc>,
}

impl Event for RecordEvent {
    fn event_type(&self) -> &'static str {
        match self.action {
            ActionType::Added => "inventory.record.added",
            ActionType::Edited => "inventory.record.edited",
            ActionType::Removed => "inventory.record.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Holds every owner's records in insertion order.
///
/// Derived fields are never computed here: callers hand in records whose
/// status was already derived from stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Every record, all owners, insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records of one owner, insertion order.
    pub fn query_by_owner(&self, owner_id: &OwnerId) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.owner_id() == owner_id)
            .collect()
    }

    /// First record addressed by `(id, owner)`.
    pub fn find(&self, owner_id: &OwnerId, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.is_addressed_by(&id, owner_id))
    }

    /// Next free id within one owner's collection (`max + 1`, starting at 1).
    ///
    /// Fails when the owner already holds the largest representable id.
    pub fn next_id(&self, owner_id: &OwnerId) -> DomainResult<RecordId> {
        self.records
            .iter()
            .filter(|r| r.owner_id() == owner_id)
            .map(|r| r.record_id())
            .max()
            .map_or(Ok(RecordId::new(1)), RecordId::next)
    }

    /// Describe what `action` will do, without mutating.
    ///
    /// Returns `None` for bulk replacement and for update/delete of an absent
    /// `(id, owner)`; those produce no activity.
    pub fn handle(&self, action: &RecordAction, occurred_at: DateTime<Utc>) -> Option<RecordEvent> {
        let (record, kind) = match action {
            RecordAction::Insert(record) => (record, ActionType::Added),
            RecordAction::Update(record) => {
                self.find(record.owner_id(), record.record_id())?;
                (record, ActionType::Edited)
            }
            RecordAction::Delete { owner_id, id } => (self.find(owner_id, *id)?, ActionType::Removed),
            RecordAction::ReplaceAll(_) => return None,
        };

        Some(RecordEvent {
            owner_id: record.owner_id().clone(),
            record_id: record.record_id(),
            record_name: record.name().to_string(),
            action: kind,
            occurred_at,
        })
    }

    fn position(&self, owner_id: &OwnerId, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.is_addressed_by(&id, owner_id))
    }
}

impl Reducer for RecordStore {
    type Action = RecordAction;

    fn apply(&mut self, action: &Self::Action) {
        match action {
            RecordAction::Insert(record) => {
                self.records.push(record.clone());
            }
            RecordAction::Update(record) => {
                match self.position(record.owner_id(), record.record_id()) {
                    Some(index) => self.records[index] = record.clone(),
                    None => tracing::debug!(
                        owner_id = %record.owner_id(),
                        record_id = %record.record_id(),
                        "update of absent record ignored"
                    ),
                }
            }
            RecordAction::Delete { owner_id, id } => {
                let before = self.records.len();
                self.records.retain(|r| !r.is_addressed_by(id, owner_id));
                if self.records.len() == before {
                    tracing::debug!(%owner_id, record_id = %id, "delete of absent record ignored");
                }
            }
            RecordAction::ReplaceAll(records) => {
                self.records = records.clone();
            }
        }
    }
}
