use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Spreadsheet,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Spreadsheet => "application/vnd.ms-excel",
        }
    }

    /// File extension including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Spreadsheet => ".xlsx",
        }
    }

    /// User-facing message when producing this format fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "Failed to export CSV file",
            ExportFormat::Spreadsheet => "Failed to export Excel file",
        }
    }
}

/// A finished, downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// `export_<YYYY-MM-DD>`
pub fn default_base_name(today: NaiveDate) -> String {
    format!("export_{}", today.format("%Y-%m-%d"))
}

/// Final filename: the requested base (or the dated default) with any
/// `.csv`/`.xlsx` suffix removed, then the format's extension appended.
pub fn resolve_filename(requested: Option<&str>, format: ExportFormat, today: NaiveDate) -> String {
    let base = match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => strip_known_extension(name).to_string(),
        None => default_base_name(today),
    };
    format!("{base}{}", format.extension())
}

fn strip_known_extension(name: &str) -> &str {
    for ext in [".csv", ".xlsx"] {
        if name.len() >= ext.len() {
            let split = name.len() - ext.len();
            if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(ext) {
                return &name[..split];
            }
        }
    }
    name
}
