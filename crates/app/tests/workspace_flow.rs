use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use stockroom_app::{AppError, Catalog, StockAdjustment, StockroomConfig, Workspace};
use stockroom_core::{DomainError, Event, RecordId};
use stockroom_export::{ExportFormat, report_export};
use stockroom_infra::{FileKeyValueStore, KeyValueStore, StaticIdentity};
use stockroom_inventory::{ActionType, MAX_ACTIVITIES, RecordDraft, StatCategory, StockStatus};

fn t(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::seconds(seconds)
}

fn open(config: StockroomConfig, owner: &str) -> Workspace {
    stockroom_observability::init();
    Workspace::open(config, Arc::new(StaticIdentity::signed_in(owner))).unwrap()
}

fn with_dir(dir: &std::path::Path) -> StockroomConfig {
    StockroomConfig {
        data_dir: Some(dir.to_path_buf()),
        ..StockroomConfig::default()
    }
}

#[test]
fn state_survives_reopen_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut ws = open(with_dir(dir.path()), "alice");
        let lamp = ws.add_record(RecordDraft::new("Desk Lamp", "Lighting", 25.0, 30), t(0)).unwrap();
        ws.add_record(RecordDraft::new("Cable", "Accessories", 5.0, 2), t(1)).unwrap();
        ws.adjust_stock(lamp.record_id(), StockAdjustment::Increment, t(2)).unwrap();
    }

    let ws = open(with_dir(dir.path()), "alice");
    let records = ws.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].stock(), 31);
    assert_eq!(records[1].status(), StockStatus::LowStock);
    assert_eq!(ws.activity().unwrap()[0].action_type, ActionType::Edited);
    assert_eq!(ws.stats().unwrap().unwrap().len(), 2);

    let raw = FileKeyValueStore::open(dir.path()).unwrap();
    assert!(raw.get("products").unwrap().is_some());
    assert!(raw.get("activity").unwrap().is_some());
    assert!(raw.get("stats").unwrap().is_some());
}

#[test]
fn tampered_status_is_rederived_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::open(dir.path()).unwrap();
    store
        .set(
            "products",
            r#"[{"id":1,"ownerId":"alice","name":"Lamp","category":"Home","price":3.0,"stock":0,"status":"In Stock","lastUpdated":"2024-01-01"}]"#
                .to_string(),
        )
        .unwrap();

    let ws = open(with_dir(dir.path()), "alice");
    assert_eq!(ws.records().unwrap()[0].status(), StockStatus::OutOfStock);
}

#[test]
fn adding_past_the_largest_stored_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyValueStore::open(dir.path()).unwrap();
    store
        .set(
            "products",
            r#"[{"id":18446744073709551615,"ownerId":"alice","name":"Last","category":"Home","price":1.0,"stock":5,"status":"Low Stock","lastUpdated":"2024-01-01"}]"#
                .to_string(),
        )
        .unwrap();

    let mut ws = open(with_dir(dir.path()), "alice");
    let err = ws
        .add_record(RecordDraft::new("Lamp", "Home", 1.0, 1), t(0))
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::InvalidId(_))));
    assert_eq!(ws.records().unwrap().len(), 1);
    assert!(ws.activity().unwrap().is_empty());
    assert!(store.get("activity").unwrap().is_none());
}

#[test]
fn activity_log_keeps_the_ten_most_recent_subjects() {
    let mut ws = open(StockroomConfig::default(), "alice");
    for i in 0..12 {
        ws.add_record(RecordDraft::new(format!("Item {i:02}"), "Bulk", 1.0, 20), t(i)).unwrap();
    }
    let activity = ws.activity().unwrap();
    assert_eq!(activity.len(), MAX_ACTIVITIES);
    assert_eq!(activity[0].record_name, "Item 11");
    assert_eq!(activity[MAX_ACTIVITIES - 1].record_name, "Item 02");

    let dashboard = ws.dashboard(t(120)).unwrap();
    assert_eq!(dashboard.feed.len(), 5);
    assert_eq!(dashboard.feed[0].time_ago, "1 minutes ago");
    let total = dashboard.cards.iter().find(|c| c.category == StatCategory::Total).unwrap();
    assert_eq!(total.count, 12);
    assert_eq!(total.change.value, "+9.1%");
}

#[test]
fn catalog_pages_and_exports_everything() {
    let mut ws = open(StockroomConfig::default(), "alice");
    for i in 0..11 {
        ws.add_record(RecordDraft::new(format!("Widget {i}"), "Parts", 2.0 + i as f64, i), t(i as i64))
            .unwrap();
    }
    let records = ws.records().unwrap();
    let mut catalog = Catalog::new(ws.config());

    let visible = catalog.visible(&records);
    let first = catalog.render(&visible);
    assert_eq!(first.rows.len(), 10);
    let pagination = first.pagination.unwrap();
    assert_eq!((pagination.total_pages, pagination.start, pagination.end), (2, 1, 10));

    catalog.next_page(&records);
    let second = catalog.render(&visible);
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.rows[0].record.name(), "Widget 10");

    let artifact = catalog
        .export(&records, ExportFormat::Csv, Some("widgets.xlsx".into()), t(0).date_naive())
        .unwrap();
    assert_eq!(artifact.filename, "widgets.csv");
    let text = artifact.as_text().unwrap().to_string();
    assert!(!text.ends_with('\n'));

    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[1], "Product Name");
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 11);
    assert_eq!(&rows[0][1], "Widget 0");
    assert_eq!(&rows[0][5], "Out of Stock");
}

#[test]
fn spreadsheet_export_types_numbers() {
    let mut ws = open(StockroomConfig::default(), "alice");
    ws.add_record(RecordDraft::new("Tom & Jerry DVD", "Media", 9.5, 40), t(0)).unwrap();
    let records = ws.records().unwrap();
    let catalog = Catalog::new(ws.config());

    let artifact = catalog
        .export(&records, ExportFormat::Spreadsheet, None, t(0).date_naive())
        .unwrap();
    assert_eq!(artifact.filename, "export_2024-06-01.xlsx");
    assert_eq!(artifact.mime_type, "application/vnd.ms-excel");
    let xml = artifact.as_text().unwrap();
    assert!(xml.contains("<Cell><Data ss:Type=\"String\"><html:B>Product Name</html:B></Data></Cell>\n"));
    assert!(xml.contains("<Cell><Data ss:Type=\"String\">Tom &amp; Jerry DVD</Data></Cell>\n"));
    assert!(xml.contains("<Cell><Data ss:Type=\"Number\">9.5</Data></Cell>\n"));
    assert!(xml.ends_with("</Table>\n</Worksheet>\n</Workbook>"));
}

#[test]
fn empty_catalog_export_is_reported_not_raised() {
    let ws = open(StockroomConfig::default(), "alice");
    let records = ws.records().unwrap();
    let catalog = Catalog::new(ws.config());

    let messages = std::cell::RefCell::new(Vec::new());
    let notifier = |m: &str| messages.borrow_mut().push(m.to_string());
    let result = catalog.export(&records, ExportFormat::Csv, None, t(0).date_naive());
    assert!(report_export(ExportFormat::Csv, result, &notifier).is_none());
    assert_eq!(*messages.borrow(), ["No data to export"]);
}

#[test]
fn removal_is_logged_once_and_ids_restart_per_owner() {
    let mut ws = open(StockroomConfig::default(), "alice");
    let lamp = ws.add_record(RecordDraft::new("Lamp", "Home", 1.0, 1), t(0)).unwrap();
    let removed = ws.remove_record(lamp.record_id(), t(1)).unwrap().unwrap();
    assert_eq!(removed.name(), "Lamp");
    assert!(ws.remove_record(lamp.record_id(), t(2)).unwrap().is_none());

    let activity = ws.activity().unwrap();
    assert_eq!(activity[0].describe(), "Product Removed: Lamp");
    assert_eq!(activity.len(), 2);

    let again = ws.add_record(RecordDraft::new("Lamp", "Home", 1.0, 1), t(3)).unwrap();
    assert_eq!(again.record_id(), RecordId::new(1));
}

#[test]
fn record_events_name_their_type() {
    let ws = open(StockroomConfig::default(), "alice");
    let store = &ws.state().records;
    let record = stockroom_inventory::Record::new(
        "alice".into(),
        RecordId::new(1),
        RecordDraft::new("Lamp", "Home", 1.0, 1),
        t(0).date_naive(),
    )
    .unwrap();
    let event = store
        .handle(&stockroom_inventory::RecordAction::Insert(record), t(0))
        .unwrap();
    assert_eq!(event.event_type(), "inventory.record.added");
    assert_eq!(event.version(), 1);
}
