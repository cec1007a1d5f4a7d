use std::path::PathBuf;

use thiserror::Error;

/// Failures of the data preparation pipeline.
///
/// Unparseable dates are not errors; they become null cells.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The file is missing, unreadable, or not a supported spreadsheet.
    #[error("failed to load {}: {source:#}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A required column is absent after normalization.
    #[error("missing required column: {column}")]
    Validation { column: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
