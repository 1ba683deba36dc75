//! Single-column sort state and the stable comparator sort.

use crate::column::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Sort state after a click on the header `key`.
///
/// Same column cycles `unsorted -> ascending -> descending -> unsorted`; a
/// different column always starts at ascending.
pub fn next_sort(current: Option<&SortConfig>, key: &str) -> Option<SortConfig> {
    match current {
        Some(sort) if sort.key == key => match sort.direction {
            SortDirection::Ascending => Some(SortConfig {
                key: key.to_string(),
                direction: SortDirection::Descending,
            }),
            SortDirection::Descending => None,
        },
        _ => Some(SortConfig::ascending(key)),
    }
}

/// Rows ordered by `column` in `direction`.
///
/// The sort is stable: rows whose values compare equal keep their input
/// order in both directions.
pub fn sort_rows<'a, T>(rows: &'a [T], column: &Column<T>, direction: SortDirection) -> Vec<&'a T> {
    let mut keyed: Vec<_> = rows.iter().map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}
