//! Generic sortable/paginated table over any record type.

use crate::column::{Cell, Column};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Pagination};
use crate::sort::{SortConfig, SortDirection, next_sort, sort_rows};

type RowClick<T> = Box<dyn Fn(&T, usize) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub items_per_page: usize,
    /// Slice rows into pages (only when they don't fit on one page).
    pub show_pagination: bool,
    /// Show the pagination control even when not paginating.
    pub always_show_pagination: bool,
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            show_pagination: false,
            always_show_pagination: false,
            empty_message: "No data available".to_string(),
        }
    }
}

/// Per-view interaction state: active sort and current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortConfig>,
    current_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            current_page: 1,
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page 1 with a given sort, e.g. to restart paging after a new filter.
    pub fn with_sort(sort: Option<SortConfig>) -> Self {
        Self { sort, current_page: 1 }
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }
}

/// Where a click on a row originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The row background / a plain cell area.
    Row,
    /// Content of the cell in column `n` (may be interactive).
    Cell(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub width: Option<String>,
    /// Direction indicator when this column is the active sort.
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a, T> {
    /// Index within the rendered page.
    pub index: usize,
    pub record: &'a T,
    pub cells: Vec<Cell>,
}

/// One render pass of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, T> {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView<'a, T>>,
    /// Present when the control is shown at all.
    pub pagination: Option<Pagination>,
    /// Present when there are no rows.
    pub empty_message: Option<String>,
}

/// Sort + paginate + render over a column descriptor set.
pub struct Table<T> {
    columns: Vec<Column<T>>,
    config: TableConfig,
    on_row_click: Option<RowClick<T>>,
}

impl<T> Table<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            config: TableConfig::default(),
            on_row_click: None,
        }
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_row_click<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T, usize) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Header click. Unknown and non-sortable columns are ignored.
    pub fn click_header(&self, state: &mut TableState, key: &str) {
        match self.column(key) {
            Some(column) if column.is_sortable() => {
                state.sort = next_sort(state.sort.as_ref(), key);
                tracing::debug!(key, sort = ?state.sort, "table sort changed");
            }
            _ => {}
        }
    }

    /// Rows in display order (unsorted input order when no sort is active).
    pub fn sorted<'a>(&self, rows: &'a [T], state: &TableState) -> Vec<&'a T> {
        let active = state
            .sort
            .as_ref()
            .and_then(|sort| self.column(&sort.key).map(|column| (column, sort.direction)));
        match active {
            Some((column, direction)) => sort_rows(rows, column, direction),
            None => rows.iter().collect(),
        }
    }

    fn paginates(&self, len: usize) -> bool {
        self.config.show_pagination && crate::pagination::can_paginate(len, self.config.items_per_page)
    }

    fn pagination(&self, len: usize, state: &TableState) -> Pagination {
        Pagination::compute(len, self.config.items_per_page, state.current_page)
    }

    /// Jump to `page`; ignored when not paginating or out of range.
    pub fn go_to_page(&self, state: &mut TableState, len: usize, page: usize) {
        if !self.paginates(len) {
            return;
        }
        let pages = crate::pagination::total_pages(len, self.config.items_per_page);
        if (1..=pages).contains(&page) {
            state.current_page = page;
        }
    }

    pub fn next_page(&self, state: &mut TableState, len: usize) {
        if self.paginates(len) && self.pagination(len, state).next_enabled() {
            let page = state.current_page + 1;
            self.go_to_page(state, len, page);
        }
    }

    pub fn previous_page(&self, state: &mut TableState, len: usize) {
        if self.paginates(len) && self.pagination(len, state).back_enabled() {
            let page = state.current_page - 1;
            self.go_to_page(state, len, page);
        }
    }

    pub fn render<'a>(&self, rows: &'a [T], state: &TableState) -> TableView<'a, T> {
        let sorted = self.sorted(rows, state);
        let pagination = self.pagination(sorted.len(), state);

        let page: &[&'a T] = if self.paginates(sorted.len()) {
            &sorted[pagination.row_range()]
        } else {
            &sorted
        };

        let rows = page
            .iter()
            .enumerate()
            .map(|(index, record)| RowView {
                index,
                record: *record,
                cells: self
                    .columns
                    .iter()
                    .map(|column| column.render_cell(record, index))
                    .collect(),
            })
            .collect::<Vec<_>>();

        let headers = self
            .columns
            .iter()
            .map(|column| HeaderView {
                key: column.key().to_string(),
                label: column.label().to_string(),
                sortable: column.is_sortable(),
                width: column.width_hint().map(str::to_string),
                sort: state
                    .sort
                    .as_ref()
                    .filter(|sort| sort.key == column.key())
                    .map(|sort| sort.direction),
            })
            .collect();

        let show_control = self.config.show_pagination || self.config.always_show_pagination;
        TableView {
            headers,
            empty_message: rows.is_empty().then(|| self.config.empty_message.clone()),
            rows,
            pagination: show_control.then_some(pagination),
        }
    }

    /// Row click on a rendered view.
    ///
    /// Fires the callback with `(row, index)` unless the click landed on
    /// interactive cell content. Returns whether the callback fired.
    pub fn click_row(&self, view: &TableView<'_, T>, index: usize, target: ClickTarget) -> bool {
        let (Some(callback), Some(row)) = (&self.on_row_click, view.rows.get(index)) else {
            return false;
        };
        if let ClickTarget::Cell(column) = target {
            if row.cells.get(column).is_some_and(|cell| cell.interactive) {
                return false;
            }
        }
        callback(row.record, row.index);
        true
    }
}

impl<T> core::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("row_click", &self.on_row_click.is_some())
            .finish()
    }
}
