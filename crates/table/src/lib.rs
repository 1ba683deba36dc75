//! `stockroom-table`: a data-agnostic table engine.
//!
//! Sorts, paginates and renders any `&[T]` given a set of [`Column`]
//! descriptors. Columns read fields through typed accessors, so the engine
//! never looks fields up by name at runtime. Rendering is pure: every call
//! works on an immutable snapshot of rows plus the caller-held
//! [`TableState`].

pub mod column;
pub mod pagination;
pub mod sort;
pub mod table;

pub use column::{Cell, Column};
pub use pagination::{DEFAULT_ITEMS_PER_PAGE, Pagination, can_paginate, total_pages};
pub use sort::{SortConfig, SortDirection, next_sort, sort_rows};
pub use table::{ClickTarget, HeaderView, RowView, Table, TableConfig, TableState, TableView};
