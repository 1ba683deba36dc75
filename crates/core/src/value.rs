//! Runtime cell values shared by the table and export engines.

use core::cmp::Ordering;
use serde_json::Value as JsonValue;

/// The runtime value of one field of a record, as seen by a column.
///
/// Column accessors are typed closures over the record type; they hand back a
/// `CellValue` so sorting and serialization can stay record-agnostic.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent value (`None`, missing key). Renders as the empty string.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// True for numeric values (not for numeric-looking text).
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Sort comparator.
    ///
    /// Numbers compare numerically (ints and floats mix), text compares
    /// lexicographically, equal values compare `Equal`. Values of different
    /// kinds order as `Null < Bool < number < Text` so the comparator stays
    /// total; incomparable floats (NaN) compare `Equal`.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (a, b) if a.is_number() && b.is_number() => {
                let (x, y) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Convert a serialized field value into a cell.
    ///
    /// Nested arrays/objects have no cell form of their own and are carried
    /// as their compact JSON text.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl core::fmt::Display for CellValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) if v.is_nan() => f.write_str("NaN"),
            CellValue::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // `{}` on f64 already prints integral values without a fraction.
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => CellValue::Int(v),
            Err(_) => CellValue::Float(value as f64),
        }
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::from(value as u64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn null_renders_empty() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(None::<String>).to_string(), "");
    }

    #[test]
    fn floats_render_like_plain_numbers() {
        assert_eq!(CellValue::Float(10.0).to_string(), "10");
        assert_eq!(CellValue::Float(19.99).to_string(), "19.99");
        assert_eq!(CellValue::Float(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn numbers_compare_numerically_across_kinds() {
        assert_eq!(CellValue::Int(9).compare(&CellValue::Float(10.5)), Ordering::Less);
        assert_eq!(CellValue::Int(2).compare(&CellValue::Int(10)), Ordering::Less);
        // Lexicographic for text, so "10" < "9".
        assert_eq!(
            CellValue::text("10").compare(&CellValue::text("9")),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_kinds_have_a_total_order() {
        assert_eq!(CellValue::Null.compare(&CellValue::Int(0)), Ordering::Less);
        assert_eq!(CellValue::text("a").compare(&CellValue::Int(0)), Ordering::Greater);
        assert_eq!(
            CellValue::Float(f64::NAN).compare(&CellValue::Float(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn json_values_map_onto_cells() {
        assert_eq!(CellValue::from_json(&json!(3)), CellValue::Int(3));
        assert_eq!(CellValue::from_json(&json!(2.5)), CellValue::Float(2.5));
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!("x")), CellValue::text("x"));
        assert_eq!(CellValue::from_json(&json!([1, 2])), CellValue::text("[1,2]"));
    }

    fn any_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::Null),
            any::<bool>().prop_map(CellValue::Bool),
            any::<i64>().prop_map(CellValue::Int),
            (-1.0e6f64..1.0e6).prop_map(CellValue::Float),
            "[a-z0-9]{0,6}".prop_map(CellValue::Text),
        ]
    }

    proptest! {
        #[test]
        fn compare_is_antisymmetric(a in any_cell(), b in any_cell()) {
            prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
        }
    }
}
