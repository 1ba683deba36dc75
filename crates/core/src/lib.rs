//! `stockroom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod reducer;
pub mod value;

pub use entity::{Entity, Owned};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{OwnerId, RecordId};
pub use reducer::Reducer;
pub use value::CellValue;
