//! The state container that wires record mutations through the activity log
//! and the stats history, and persists the result.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Event, OwnerId, RecordId, Reducer};
use stockroom_infra::{
    ACTIVITY_KEY, FileKeyValueStore, IdentityProvider, InMemoryKeyValueStore, KeyValueStore, PRODUCTS_KEY,
    PersistenceError, STATS_KEY, StateRepository,
};
use stockroom_inventory::{
    ActivityAction, ActivityEntry, ActivityLog, AggregateCounts, Record, RecordAction, RecordDraft, RecordStore,
    StatsHistory,
};

use crate::config::StockroomConfig;
use crate::dashboard::Dashboard;
use crate::error::AppResult;

/// Everything that is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub records: RecordStore,
    pub activity: ActivityLog,
    /// One rolling history per owner.
    pub stats: BTreeMap<OwnerId, StatsHistory>,
}

/// Direction of a one-unit stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    Increment,
    /// Never goes below zero.
    Decrement,
}

impl StockAdjustment {
    pub fn apply_to(self, stock: u64) -> u64 {
        match self {
            StockAdjustment::Increment => stock.saturating_add(1),
            StockAdjustment::Decrement => stock.saturating_sub(1),
        }
    }
}

/// The signed-in user's view of the inventory.
///
/// Every mutation runs synchronously: validate, build the record (status
/// derived), reduce the record store, coalesce the activity, snapshot stats
/// when the owner's counts moved, then save.
pub struct Workspace {
    config: StockroomConfig,
    state: WorkspaceState,
    repository: StateRepository<Arc<dyn KeyValueStore>>,
    identity: Arc<dyn IdentityProvider>,
}

impl Workspace {
    /// Open the workspace described by `config`: file-backed when a data
    /// directory is configured, in-memory otherwise.
    pub fn open(config: StockroomConfig, identity: Arc<dyn IdentityProvider>) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileKeyValueStore::open(dir).map_err(PersistenceError::Storage)?),
            None => Arc::new(InMemoryKeyValueStore::new()),
        };
        Ok(Self::with_store(config, store, identity)?)
    }

    /// Open on an explicit store, rehydrating whatever it holds.
    pub fn with_store(
        config: StockroomConfig,
        store: Arc<dyn KeyValueStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, PersistenceError> {
        let repository = StateRepository::new(store);
        let state = load_state(&repository)?;
        tracing::info!(
            records = state.records.len(),
            activities = state.activity.len(),
            "workspace loaded"
        );
        Ok(Self {
            config,
            state,
            repository,
            identity,
        })
    }

    pub fn config(&self) -> &StockroomConfig {
        &self.config
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// The signed-in owner; every operation is scoped to it.
    pub fn owner(&self) -> DomainResult<OwnerId> {
        self.identity.current_owner().ok_or(DomainError::Unauthorized)
    }

    /// The owner's records in insertion order.
    pub fn records(&self) -> DomainResult<Vec<&Record>> {
        let owner = self.owner()?;
        Ok(self.state.records.query_by_owner(&owner))
    }

    pub fn record(&self, id: RecordId) -> DomainResult<Option<&Record>> {
        let owner = self.owner()?;
        Ok(self.state.records.find(&owner, id))
    }

    /// Look a record up by a route segment such as `"12"`.
    pub fn record_by_segment(&self, segment: &str) -> DomainResult<Option<&Record>> {
        let id: RecordId = segment.parse()?;
        self.record(id)
    }

    /// The owner's activity, most recent first.
    pub fn activity(&self) -> DomainResult<Vec<&ActivityEntry>> {
        let owner = self.owner()?;
        Ok(self.state.activity.recent(&owner, usize::MAX))
    }

    pub fn stats(&self) -> DomainResult<Option<&StatsHistory>> {
        let owner = self.owner()?;
        Ok(self.state.stats.get(&owner))
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> DomainResult<Dashboard> {
        let owner = self.owner()?;
        Ok(Dashboard::build(&self.state, &owner, self.config.activity_feed_len, now))
    }

    /// Create a record with the next free id of the owner.
    pub fn add_record(&mut self, draft: RecordDraft, at: DateTime<Utc>) -> AppResult<Record> {
        let owner = self.owner()?;
        let id = self.state.records.next_id(&owner)?;
        let record = Record::new(owner, id, draft, at.date_naive())?;
        self.dispatch(RecordAction::Insert(record.clone()), at)?;
        Ok(record)
    }

    /// Replace every editable field of record `id`. `None` if it does not exist.
    pub fn edit_record(&mut self, id: RecordId, draft: RecordDraft, at: DateTime<Utc>) -> AppResult<Option<Record>> {
        let owner = self.owner()?;
        let Some(existing) = self.state.records.find(&owner, id) else {
            return Ok(None);
        };
        let revised = existing.revised(draft, at.date_naive())?;
        self.dispatch(RecordAction::Update(revised.clone()), at)?;
        Ok(Some(revised))
    }

    /// Remove record `id`, returning it. `None` if it does not exist.
    pub fn remove_record(&mut self, id: RecordId, at: DateTime<Utc>) -> AppResult<Option<Record>> {
        let owner = self.owner()?;
        let Some(existing) = self.state.records.find(&owner, id).cloned() else {
            return Ok(None);
        };
        self.dispatch(RecordAction::Delete { owner_id: owner, id }, at)?;
        Ok(Some(existing))
    }

    /// Move stock of record `id` by one unit. `None` if it does not exist.
    pub fn adjust_stock(
        &mut self,
        id: RecordId,
        adjustment: StockAdjustment,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Record>> {
        let owner = self.owner()?;
        let Some(existing) = self.state.records.find(&owner, id) else {
            return Ok(None);
        };
        let adjusted = existing.with_stock(adjustment.apply_to(existing.stock()), at.date_naive());
        self.dispatch(RecordAction::Update(adjusted.clone()), at)?;
        Ok(Some(adjusted))
    }

    /// Drop the owner's activity entries.
    pub fn clear_activity(&mut self) -> AppResult<()> {
        let owner = self.owner()?;
        self.state.activity.apply(&ActivityAction::ClearOwner(owner));
        self.persist()?;
        Ok(())
    }

    /// Save the whole state under the well-known keys.
    pub fn persist(&self) -> Result<(), PersistenceError> {
        self.repository.save(PRODUCTS_KEY, &self.state.records)?;
        self.repository.save(ACTIVITY_KEY, &self.state.activity)?;
        self.repository.save(STATS_KEY, &self.state.stats)?;
        Ok(())
    }

    /// Replace in-memory state with what the store holds.
    pub fn reload(&mut self) -> Result<(), PersistenceError> {
        self.state = load_state(&self.repository)?;
        Ok(())
    }

    fn dispatch(&mut self, action: RecordAction, at: DateTime<Utc>) -> Result<(), PersistenceError> {
        let event = self.state.records.handle(&action, at);
        self.state.records.apply(&action);

        if let Some(event) = event {
            tracing::info!(
                event_type = event.event_type(),
                owner_id = %event.owner_id,
                record_id = %event.record_id,
                "record mutated"
            );
            self.state.activity.observe(&event);
            self.snapshot_stats(&event.owner_id, at);
        }

        self.persist()
    }

    fn snapshot_stats(&mut self, owner: &OwnerId, at: DateTime<Utc>) {
        let counts = AggregateCounts::from_records(self.state.records.query_by_owner(owner));
        let history = self.state.stats.entry(owner.clone()).or_default();
        if history.latest().map(|s| s.counts) != Some(counts) {
            history.append_snapshot(counts, at);
            tracing::debug!(%owner, snapshots = history.len(), "stats snapshot appended");
        }
    }
}

impl core::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Workspace")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn load_state<S: KeyValueStore>(repository: &StateRepository<S>) -> Result<WorkspaceState, PersistenceError> {
    let records: Vec<Record> = repository.load(PRODUCTS_KEY)?;
    Ok(WorkspaceState {
        records: RecordStore::default().reduce(&RecordAction::ReplaceAll(records)),
        activity: repository.load(ACTIVITY_KEY)?,
        stats: repository.load(STATS_KEY)?,
    })
}
