//! User-facing boundary around the export engine.

use crate::artifact::{ExportArtifact, ExportFormat};
use crate::error::ExportError;

pub const NO_DATA_MESSAGE: &str = "No data to export";

/// Sink for messages shown to the user (toast, status bar, stderr).
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F: Fn(&str)> Notifier for F {
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Turn an export result into a user-facing outcome.
///
/// Failures are logged and reported through `notifier`; only a successful
/// artifact is handed back to the caller.
pub fn report_export(
    format: ExportFormat,
    result: Result<ExportArtifact, ExportError>,
    notifier: &dyn Notifier,
) -> Option<ExportArtifact> {
    match result {
        Ok(artifact) => {
            tracing::info!(
                filename = %artifact.filename,
                bytes = artifact.bytes.len(),
                "export produced"
            );
            Some(artifact)
        }
        Err(ExportError::NoData) => {
            tracing::warn!(?format, "export requested with no data");
            notifier.notify(NO_DATA_MESSAGE);
            None
        }
        Err(err) => {
            tracing::error!(?format, error = %err, "export failed");
            notifier.notify(format.failure_message());
            None
        }
    }
}
