//! Export engine: serialize a record collection to CSV or spreadsheet XML.
//!
//! Records are projected through `serde` onto header columns, then encoded by
//! the requested format. Output text is deterministic for a given input.

pub mod artifact;
pub mod csv;
pub mod error;
pub mod notify;
pub mod sheet;
pub mod spreadsheet;

pub use artifact::{ExportArtifact, ExportFormat, default_base_name, resolve_filename};
pub use error::ExportError;
pub use notify::{NO_DATA_MESSAGE, Notifier, report_export};
pub use sheet::{ExportHeader, Sheet};

use chrono::NaiveDate;
use serde::Serialize;

/// Caller-selected export settings.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Columns to export. Empty means "every field of the first record".
    pub headers: Vec<ExportHeader>,
    /// Requested base filename; a dated default is used when absent.
    pub filename: Option<String>,
}

/// Render `records` as text in `format`.
pub fn render<T: Serialize>(
    format: ExportFormat,
    records: &[T],
    headers: &[ExportHeader],
) -> Result<String, ExportError> {
    let sheet = Sheet::project(records, headers)?;
    match format {
        ExportFormat::Csv => Ok(csv::render(&sheet)),
        ExportFormat::Spreadsheet => Ok(spreadsheet::render(&sheet)),
    }
}

/// Produce a downloadable artifact for `records`.
///
/// An empty collection yields [`ExportError::NoData`] and no output.
pub fn export<T: Serialize>(
    format: ExportFormat,
    records: &[T],
    options: &ExportOptions,
    today: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let text = render(format, records, &options.headers)?;
    let filename = resolve_filename(options.filename.as_deref(), format, today);
    tracing::debug!(%filename, rows = records.len(), "rendered export");

    Ok(ExportArtifact {
        filename,
        mime_type: format.mime_type(),
        bytes: text.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        id: u64,
        product_name: &'static str,
        price: f64,
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn csv_export_with_labels() {
        let rows = [Row { id: 1, product_name: "A,B", price: 10.0 }];
        let options = ExportOptions {
            headers: vec![
                ExportHeader::new("productName", "Name"),
                ExportHeader::new("price", "Price"),
            ],
            filename: Some("inventory".into()),
        };
        let artifact = export(ExportFormat::Csv, &rows, &options, day()).unwrap();
        assert_eq!(artifact.filename, "inventory.csv");
        assert_eq!(artifact.as_text(), Some("Name,Price\n\"A,B\",10"));
    }

    #[test]
    fn inferred_headers_use_field_names() {
        let rows = [Row { id: 7, product_name: "Lamp", price: 2.5 }];
        let text = render(ExportFormat::Csv, &rows, &[]).unwrap();
        assert_eq!(text, "id,productName,price\n7,\"Lamp\",2.5");
    }

    #[test]
    fn empty_collection_produces_nothing() {
        let rows: Vec<Row> = Vec::new();
        let err = export(ExportFormat::Spreadsheet, &rows, &ExportOptions::default(), day()).unwrap_err();
        assert!(matches!(err, ExportError::NoData));
    }

    #[test]
    fn spreadsheet_artifact_metadata() {
        let rows = [Row { id: 1, product_name: "Lamp", price: 2.5 }];
        let artifact = export(ExportFormat::Spreadsheet, &rows, &ExportOptions::default(), day()).unwrap();
        assert_eq!(artifact.filename, "export_2024-01-15.xlsx");
        assert_eq!(artifact.mime_type, "application/vnd.ms-excel");
        assert!(artifact.as_text().unwrap().ends_with("</Workbook>"));
    }
}
