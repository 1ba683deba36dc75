use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_infra::PersistenceError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type AppResult<T> = Result<T, AppError>;
