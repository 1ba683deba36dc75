//! Runtime configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use stockroom_table::DEFAULT_ITEMS_PER_PAGE;

pub const ITEMS_PER_PAGE_VAR: &str = "STOCKROOM_ITEMS_PER_PAGE";
pub const SHOW_PAGINATION_VAR: &str = "STOCKROOM_SHOW_PAGINATION";
pub const ACTIVITY_FEED_LEN_VAR: &str = "STOCKROOM_ACTIVITY_FEED_LEN";
pub const DATA_DIR_VAR: &str = "STOCKROOM_DATA_DIR";

/// Number of activity entries the dashboard shows by default.
pub const DEFAULT_ACTIVITY_FEED_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    pub items_per_page: usize,
    pub show_pagination: bool,
    pub activity_feed_len: usize,
    /// Directory for persisted state. In-memory only when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            show_pagination: true,
            activity_feed_len: DEFAULT_ACTIVITY_FEED_LEN,
            data_dir: None,
        }
    }
}

impl StockroomConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset or blank variables keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let items_per_page = match var(ITEMS_PER_PAGE_VAR) {
            Some(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ITEMS_PER_PAGE_VAR,
                        value,
                        reason: "expected a positive integer",
                    });
                }
            },
            None => defaults.items_per_page,
        };

        let show_pagination = match var(SHOW_PAGINATION_VAR) {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: SHOW_PAGINATION_VAR,
                value,
                reason: "expected true or false",
            })?,
            None => defaults.show_pagination,
        };

        let activity_feed_len = match var(ACTIVITY_FEED_LEN_VAR) {
            Some(value) => value.parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: ACTIVITY_FEED_LEN_VAR,
                value,
                reason: "expected a non-negative integer",
            })?,
            None => defaults.activity_feed_len,
        };

        Ok(Self {
            items_per_page,
            show_pagination,
            activity_feed_len,
            data_dir: var(DATA_DIR_VAR).map(PathBuf::from),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
