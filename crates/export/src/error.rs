use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Empty or absent record collection; nothing is produced.
    #[error("no data to export")]
    NoData,

    #[error("failed to project records: {0}")]
    Projection(#[from] serde_json::Error),
}
