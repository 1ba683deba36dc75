//! CSV serialization.
//!
//! Quoting is decided per value, not per content: numbers are written bare,
//! every other non-empty value is quoted with inner quotes doubled, and
//! absent values are empty. The header row is written as-is.

use stockroom_core::CellValue;

use crate::sheet::Sheet;

/// Encode one cell.
pub fn encode_field(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Int(_) | CellValue::Float(_) => value.to_string(),
        other => format!("\"{}\"", other.to_string().replace('"', "\"\"")),
    }
}

/// Render the sheet as newline-joined CSV lines (no trailing newline).
pub fn render(sheet: &Sheet) -> String {
    let mut lines = Vec::with_capacity(sheet.rows.len() + 1);
    lines.push(sheet.labels.join(","));
    for row in &sheet.rows {
        let fields: Vec<String> = row.iter().map(encode_field).collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}
