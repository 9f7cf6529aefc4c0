use thiserror::Error;

use crate::remote::ServiceError;
use crate::upload::UploadRejection;
use crate::validation::ValidationReport;

/// Application-level error for page workflows.
///
/// Every variant is recoverable: the caller shows it and returns the user to
/// an interactive state.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Upload rejected: {0}")]
    UploadRejected(#[from] UploadRejection),

    #[error("Select a template first")]
    NoTemplateSelected,

    #[error("Job description must be longer than {min} characters (got {got})")]
    JobDescriptionTooShort { min: usize, got: usize },

    #[error("Remote call failed: {0}")]
    Remote(#[from] ServiceError),
}

impl From<ValidationReport> for AppError {
    fn from(report: ValidationReport) -> Self {
        AppError::Validation(report)
    }
}

impl AppError {
    /// Short machine-readable code, mirroring the API error codes.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UploadRejected(_) => "UPLOAD_REJECTED",
            AppError::NoTemplateSelected => "NO_TEMPLATE",
            AppError::JobDescriptionTooShort { .. } => "JOB_DESCRIPTION_TOO_SHORT",
            AppError::Remote(_) => "REMOTE_ERROR",
        }
    }
}
