//! Column resolution: from records to a labelled grid of cells.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use stockroom_core::CellValue;

use crate::error::ExportError;

/// One exported column: serialized field name plus header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHeader {
    pub key: String,
    pub label: String,
}

impl ExportHeader {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Header labels plus one row of cells per record.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub labels: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Project `records` onto columns.
    ///
    /// Explicit `headers` are used in order. Without them the columns are the
    /// first record's fields in declaration order, each labelled by its key.
    /// Missing fields become `Null`.
    pub fn project<T: Serialize>(records: &[T], headers: &[ExportHeader]) -> Result<Self, ExportError> {
        let first = records.first().ok_or(ExportError::NoData)?;

        let objects = records
            .iter()
            .map(to_object)
            .collect::<Result<Vec<_>, _>>()?;

        let headers: Vec<ExportHeader> = if headers.is_empty() {
            to_object(first)?
                .keys()
                .map(|key| ExportHeader::new(key.clone(), key.clone()))
                .collect()
        } else {
            headers.to_vec()
        };

        let rows = objects
            .iter()
            .map(|object| {
                headers
                    .iter()
                    .map(|h| object.get(&h.key).map_or(CellValue::Null, CellValue::from_json))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        Ok(Self {
            labels: headers.into_iter().map(|h| h.label).collect(),
            rows,
        })
    }
}

/// Serialized field map of one record (empty for non-struct records).
fn to_object<T: Serialize>(record: &T) -> Result<Map<String, JsonValue>, ExportError> {
    match serde_json::to_value(record)? {
        JsonValue::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}
