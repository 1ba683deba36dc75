//! Product catalog view: searchable, sortable, paginated table of the owner's
//! records plus export of exactly what the view shows.

use chrono::NaiveDate;

use stockroom_core::{CellValue, DomainResult, RecordId};
use stockroom_export::{ExportArtifact, ExportError, ExportFormat, ExportHeader, ExportOptions};
use stockroom_inventory::{Record, filter_records};
use stockroom_table::{Cell, ClickTarget, Column, Table, TableConfig, TableState, TableView};

use crate::config::StockroomConfig;

/// Exported columns: serialized field name and header label.
pub const EXPORT_COLUMNS: [(&str, &str); 7] = [
    ("id", "ID"),
    ("name", "Product Name"),
    ("category", "Category"),
    ("price", "Price"),
    ("stock", "Stock"),
    ("status", "Status"),
    ("lastUpdated", "Last Updated"),
];

pub fn export_headers() -> Vec<ExportHeader> {
    EXPORT_COLUMNS
        .iter()
        .map(|(key, label)| ExportHeader::new(*key, *label))
        .collect()
}

/// Detail route of a record.
pub fn record_route(record: &Record) -> String {
    format!("/products/{}", record.record_id())
}

/// Record id from the last segment of a detail route.
pub fn parse_route_segment(segment: &str) -> DomainResult<RecordId> {
    segment.parse()
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("id", "ID", |r: &Record| r.record_id().get().into())
            .sortable()
            .width("80px"),
        Column::new("name", "Product Name", |r: &Record| r.name().into()).sortable(),
        Column::new("category", "Category", |r: &Record| r.category().into()).sortable(),
        Column::new("price", "Price", |r: &Record| r.price().into())
            .sortable()
            .render_with(|value, _, _| {
                Cell::text(value.as_f64().map(|p| format!("${p:.2}")).unwrap_or_default())
            }),
        Column::new("stock", "Stock", |r: &Record| r.stock().into())
            .sortable()
            .render_with(|value, _, _| Cell::interactive(format!("- {value} +"))),
        Column::new("status", "Status", |r: &Record| r.status().label().into()).sortable(),
        Column::new("lastUpdated", "Last Updated", |r: &Record| {
            r.last_updated().format("%Y-%m-%d").to_string().into()
        })
        .sortable(),
        Column::new("actions", "Actions", |_: &Record| CellValue::Null)
            .render_with(|_, _, _| Cell::interactive("Edit | Delete")),
    ]
}

/// Interaction state of the catalog page.
pub struct Catalog {
    table: Table<Record>,
    state: TableState,
    search: String,
}

impl Catalog {
    pub fn new(config: &StockroomConfig) -> Self {
        let table = Table::new(columns()).with_config(TableConfig {
            items_per_page: config.items_per_page,
            show_pagination: config.show_pagination,
            empty_message: "No products found".to_string(),
            ..TableConfig::default()
        });
        Self {
            table,
            state: TableState::new(),
            search: String::new(),
        }
    }

    /// Call `open` with the id of a clicked row.
    pub fn on_open<F>(mut self, open: F) -> Self
    where
        F: Fn(RecordId) + Send + Sync + 'static,
    {
        self.table = self.table.on_row_click(move |record: &Record, _| open(record.record_id()));
        self
    }

    pub fn table_state(&self) -> &TableState {
        &self.state
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Change the search term and return to the first page.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.state = TableState::with_sort(self.state.sort().cloned());
    }

    pub fn click_header(&mut self, key: &str) {
        self.table.click_header(&mut self.state, key);
    }

    pub fn next_page(&mut self, records: &[&Record]) {
        let len = self.visible(records).len();
        self.table.next_page(&mut self.state, len);
    }

    pub fn previous_page(&mut self, records: &[&Record]) {
        let len = self.visible(records).len();
        self.table.previous_page(&mut self.state, len);
    }

    pub fn go_to_page(&mut self, records: &[&Record], page: usize) {
        let len = self.visible(records).len();
        self.table.go_to_page(&mut self.state, len, page);
    }

    /// Records matching the search term, in store order.
    pub fn visible(&self, records: &[&Record]) -> Vec<Record> {
        filter_records(records.iter().copied(), &self.search)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Render the visible records (see [`Catalog::visible`]).
    pub fn render<'a>(&self, visible: &'a [Record]) -> TableView<'a, Record> {
        self.table.render(visible, &self.state)
    }

    pub fn click_row(&self, view: &TableView<'_, Record>, index: usize, target: ClickTarget) -> bool {
        self.table.click_row(view, index, target)
    }

    /// Export the filtered records in the current sort order (all pages).
    pub fn export(
        &self,
        records: &[&Record],
        format: ExportFormat,
        filename: Option<String>,
        today: NaiveDate,
    ) -> Result<ExportArtifact, ExportError> {
        let visible = self.visible(records);
        let ordered = self.table.sorted(&visible, &self.state);
        let options = ExportOptions {
            headers: export_headers(),
            filename,
        };
        stockroom_export::export(format, &ordered, &options, today)
    }
}

impl core::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Catalog")
            .field("table", &self.table)
            .field("state", &self.state)
            .field("search", &self.search)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::OwnerId;
    use stockroom_inventory::RecordDraft;

    fn records() -> Vec<Record> {
        let today = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        [
            ("Desk Lamp", "Lighting", 25.0, 30),
            ("Cable, USB", "Accessories", 5.5, 4),
            ("Floor Lamp", "Lighting", 80.0, 0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, category, price, stock))| {
            Record::new(
                OwnerId::from("u1"),
                RecordId::new(i as u64 + 1),
                RecordDraft::new(name, category, price, stock),
                today,
            )
            .unwrap()
        })
        .collect()
    }

    #[test]
    fn search_then_sort_by_price_descending() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let mut catalog = Catalog::new(&StockroomConfig::default());
        catalog.search("lamp");
        catalog.click_header("price");
        catalog.click_header("price");

        let visible = catalog.visible(&refs);
        let view = catalog.render(&visible);
        let names: Vec<_> = view.rows.iter().map(|r| r.record.name()).collect();
        assert_eq!(names, ["Floor Lamp", "Desk Lamp"]);
        assert_eq!(view.rows[0].cells[3].content, "$80.00");
    }

    #[test]
    fn export_uses_labels_and_view_order() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let mut catalog = Catalog::new(&StockroomConfig::default());
        catalog.click_header("stock");

        let today = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
        let artifact = catalog.export(&refs, ExportFormat::Csv, None, today).unwrap();
        assert_eq!(artifact.filename, "export_2024-04-03.csv");
        let text = artifact.as_text().unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "ID,Product Name,Category,Price,Stock,Status,Last Updated");
        assert_eq!(
            lines[1],
            "3,\"Floor Lamp\",\"Lighting\",80,0,\"Out of Stock\",\"2024-04-02\""
        );
        assert_eq!(
            lines[2],
            "2,\"Cable, USB\",\"Accessories\",5.5,4,\"Low Stock\",\"2024-04-02\""
        );
    }

    #[test]
    fn empty_search_result_cannot_be_exported() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let mut catalog = Catalog::new(&StockroomConfig::default());
        catalog.search("nothing matches");
        let today = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
        assert!(matches!(
            catalog.export(&refs, ExportFormat::Spreadsheet, None, today),
            Err(ExportError::NoData)
        ));
    }

    #[test]
    fn stock_and_action_cells_do_not_open_the_record() {
        use std::sync::{Arc, Mutex};

        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&opened);
        let catalog = Catalog::new(&StockroomConfig::default()).on_open(move |id| sink.lock().unwrap().push(id));

        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let visible = catalog.visible(&refs);
        let view = catalog.render(&visible);

        assert!(!catalog.click_row(&view, 0, ClickTarget::Cell(4)));
        assert!(!catalog.click_row(&view, 0, ClickTarget::Cell(7)));
        assert!(catalog.click_row(&view, 1, ClickTarget::Cell(1)));
        assert_eq!(*opened.lock().unwrap(), vec![RecordId::new(2)]);
    }

    #[test]
    fn route_round_trip() {
        let data = records();
        assert_eq!(record_route(&data[1]), "/products/2");
        assert_eq!(parse_route_segment("2").unwrap(), RecordId::new(2));
        assert!(parse_route_segment("abc").is_err());
    }
}
