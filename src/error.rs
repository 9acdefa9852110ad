use thiserror::Error;

use crate::data::transform::SchemaError;

/// Everything that can end a run early, mapped onto process exit codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// No input path on the command line (or any other usage error).
    #[error(transparent)]
    MissingArgument(#[from] clap::Error),

    /// The file could not be opened or parsed as a table.
    #[error("{0:#}")]
    Load(anyhow::Error),

    /// The table parsed but lacks the `n1`/`n2`/`jac` shape.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Formatting the stdout table failed.
    #[error("rendering table: {0:#}")]
    Report(anyhow::Error),

    /// The chart window could not be created.
    #[error("displaying chart: {0}")]
    Display(String),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingArgument(e) => e.exit_code(),
            AppError::Load(_) => 1,
            AppError::Schema(_) | AppError::Report(_) => 3,
            AppError::Display(_) => 4,
        }
    }
}
