use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, Owned, OwnerId, RecordId};

use crate::status::{StockStatus, derive_status};

/// Highest accepted unit price.
pub const MAX_PRICE: f64 = 999_999.0;

/// Shortest accepted (trimmed) record name.
pub const MIN_NAME_LEN: usize = 3;

/// User-editable fields of a record, as submitted by a form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u64,
    pub image: Option<String>,
}

impl RecordDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64, stock: u64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            stock,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Check the draft against the record invariants.
    pub fn validate(&self) -> DomainResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if name.chars().count() < MIN_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name must be at least {MIN_NAME_LEN} characters"
            )));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category is required"));
        }
        if !self.price.is_finite() {
            return Err(DomainError::validation("price must be a valid number"));
        }
        if self.price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if self.price > MAX_PRICE {
            return Err(DomainError::validation("price must be less than 1,000,000"));
        }
        Ok(())
    }
}

/// A user-owned inventory record.
///
/// `status` is private and only ever produced by [`derive_status`], so it
/// cannot drift from `stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecord")]
pub struct Record {
    id: RecordId,
    owner_id: OwnerId,
    name: String,
    category: String,
    price: f64,
    stock: u64,
    status: StockStatus,
    last_updated: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Record {
    /// Build a new record from a validated draft.
    pub fn new(owner_id: OwnerId, id: RecordId, draft: RecordDraft, today: NaiveDate) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            owner_id,
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            price: draft.price,
            stock: draft.stock,
            status: derive_status(draft.stock),
            last_updated: today,
            image: draft.image,
        })
    }

    /// The same record with every editable field replaced by `draft`.
    pub fn revised(&self, draft: RecordDraft, today: NaiveDate) -> DomainResult<Self> {
        Self::new(self.owner_id.clone(), self.id, draft, today)
    }

    /// The same record with a new stock quantity (status re-derived).
    pub fn with_stock(&self, stock: u64, today: NaiveDate) -> Self {
        Self {
            stock,
            status: derive_status(stock),
            last_updated: today,
            ..self.clone()
        }
    }

    /// Editable fields, e.g. to pre-fill an edit form.
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            stock: self.stock,
            image: self.image.clone(),
        }
    }

    pub fn record_id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    pub fn last_updated(&self) -> NaiveDate {
        self.last_updated
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl Entity for Record {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Owned for Record {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// Persisted shape of a record. A stored `status` is ignored and re-derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: RecordId,
    owner_id: OwnerId,
    name: String,
    category: String,
    price: f64,
    stock: u64,
    last_updated: NaiveDate,
    #[serde(default)]
    image: Option<String>,
}

impl From<StoredRecord> for Record {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            owner_id: stored.owner_id,
            name: stored.name,
            category: stored.category,
            price: stored.price,
            stock: stored.stock,
            status: derive_status(stored.stock),
            last_updated: stored.last_updated,
            image: stored.image,
        }
    }
}
