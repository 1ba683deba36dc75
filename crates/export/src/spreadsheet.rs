//! Spreadsheet 2003 XML ("Excel XML") serialization.

use std::fmt::Write as _;

use stockroom_core::CellValue;

use crate::sheet::Sheet;

const PREAMBLE: &str = concat!(
    "<?xml version=\"1.0\"?>\n",
    "<?mso-application progid=\"Excel.Sheet\"?>\n",
    "<Workbook xmlns=\"urn:schemas-microsoft-com:office:spreadsheet\"\n",
    " xmlns:o=\"urn:schemas-microsoft-com:office:office\"\n",
    " xmlns:x=\"urn:schemas-microsoft-com:office:excel\"\n",
    " xmlns:ss=\"urn:schemas-microsoft-com:office:spreadsheet\"\n",
    " xmlns:html=\"http://www.w3.org/TR/REC-html40\">\n",
    "<Worksheet ss:Name=\"Sheet1\">\n",
    "<Table>\n",
);

const CLOSING: &str = "</Table>\n</Worksheet>\n</Workbook>";

/// Replace the five XML special characters with their entities.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// `Number` for numbers, booleans and numeric-looking text, `String` otherwise.
///
/// Text follows number-literal coercion: surrounding whitespace is ignored,
/// blank (but non-empty) text counts as zero, and `Infinity` and
/// `0x`/`0o`/`0b` literals are numeric.
pub fn data_type(value: &CellValue) -> &'static str {
    match value {
        CellValue::Int(_) | CellValue::Float(_) | CellValue::Bool(_) => "Number",
        CellValue::Text(text) if is_numeric_text(text) => "Number",
        _ => "String",
    }
}

fn is_numeric_text(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    if let Some((radix, digits)) = radix_literal(trimmed) {
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }
    // `f64::from_str` also takes `inf` and `nan`; only digit-led forms pass here.
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') && trimmed.parse::<f64>().is_ok()
}

fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let (prefix, digits) = text.split_at_checked(2)?;
    match prefix {
        "0x" | "0X" => Some((16, digits)),
        "0o" | "0O" => Some((8, digits)),
        "0b" | "0B" => Some((2, digits)),
        _ => None,
    }
}

/// Render the sheet as a single-worksheet XML workbook.
pub fn render(sheet: &Sheet) -> String {
    let mut out = String::from(PREAMBLE);

    out.push_str("<Row>\n");
    for label in &sheet.labels {
        let _ = writeln!(
            out,
            "<Cell><Data ss:Type=\"String\"><html:B>{}</html:B></Data></Cell>",
            escape_xml(label)
        );
    }
    out.push_str("</Row>\n");

    for row in &sheet.rows {
        out.push_str("<Row>\n");
        for value in row {
            let _ = writeln!(
                out,
                "<Cell><Data ss:Type=\"{}\">{}</Data></Cell>",
                data_type(value),
                escape_xml(&value.to_string())
            );
        }
        out.push_str("</Row>\n");
    }

    out.push_str(CLOSING);
    out
}
