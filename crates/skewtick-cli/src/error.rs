use skewtick_core::{
    CoreError, ExportError, PipelineError, SourceError, StatsError, ValidationError,
};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Too few returns for a skewness; keeps the pipeline error for its symbol and counts.
    #[error(transparent)]
    InsufficientData(PipelineError),

    #[error(transparent)]
    Render(#[from] skewtick_core::RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Stats(_) | Self::InsufficientData(_) => 5,
            Self::Render(_) => 6,
            Self::Io(_) | Self::Export(_) => 10,
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Source(error) => Self::Source(error),
            PipelineError::Validation(error) => Self::Validation(error),
            PipelineError::Stats(error) => Self::Stats(error),
            error @ PipelineError::InsufficientData { .. } => Self::InsufficientData(error),
            PipelineError::Render(error) => Self::Render(error),
            PipelineError::Export(error) => Self::Export(error),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(error) => Self::Validation(error),
            CoreError::Serialization(error) => Self::Serialization(error),
        }
    }
}
