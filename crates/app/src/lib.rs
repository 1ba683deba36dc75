//! `stockroom-app`: configuration and the workspace that ties the inventory,
//! table, export and persistence crates together.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod workspace;

pub use catalog::{Catalog, EXPORT_COLUMNS, export_headers, parse_route_segment, record_route};
pub use config::{ConfigError, StockroomConfig};
pub use dashboard::{Dashboard, FeedItem, StatCard};
pub use error::{AppError, AppResult};
pub use workspace::{StockAdjustment, Workspace, WorkspaceState};
