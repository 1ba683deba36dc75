use crate::record::Record;

/// Records whose name or category contains `term`, case-insensitively.
///
/// An empty (or all-whitespace) term matches everything. Order is preserved.
pub fn filter_records<'a, I>(records: I, term: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = term.trim().to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            needle.is_empty()
                || r.name().to_lowercase().contains(&needle)
                || r.category().to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordDraft;
    use chrono::NaiveDate;
    use stockroom_core::{OwnerId, RecordId};

    fn records() -> Vec<Record> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        [("USB Cable", "Accessories"), ("Monitor", "Displays"), ("HDMI Cable", "Accessories")]
            .into_iter()
            .enumerate()
            .map(|(i, (name, category))| {
                Record::new(
                    OwnerId::new("u"),
                    RecordId::new(i as u64 + 1),
                    RecordDraft::new(name, category, 5.0, 3),
                    today,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn matches_name_or_category_ignoring_case() {
        let records = records();
        let names: Vec<_> = filter_records(&records, "cable").iter().map(|r| r.name()).collect();
        assert_eq!(names, ["USB Cable", "HDMI Cable"]);
        assert_eq!(filter_records(&records, "DISPLAY").len(), 1);
    }

    #[test]
    fn blank_term_matches_all() {
        let records = records();
        assert_eq!(filter_records(&records, "  ").len(), 3);
        assert!(filter_records(&records, "keyboard").is_empty());
    }
}
