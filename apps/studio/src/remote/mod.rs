//! Remote Operations Gateway and the service boundary behind it.
//!
//! ARCHITECTURAL RULE: nothing else in the crate talks to the resume service.
//! Pages go through [`Gateway`]; the gateway goes through a [`ResumeService`].

#[cfg(test)]
pub(crate) mod fake;
pub mod gateway;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::TemplateCatalog;
use crate::upload::ResumeFile;

pub use gateway::{CallKind, Gateway};
pub use http::HttpResumeService;

/// Whatever the service sends back for generate/upload/tailor.
pub type ResumeResult = Value;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ServiceError {
    /// The `message` field of the server's error body, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The external generation / reformatting / tailoring service.
///
/// Carried by the gateway as `Arc<dyn ResumeService>` so tests and
/// alternative transports can stand in for HTTP.
#[async_trait]
pub trait ResumeService: Send + Sync {
    async fn generate(&self, data: &Value) -> Result<ResumeResult, ServiceError>;

    async fn upload(
        &self,
        file: &ResumeFile,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError>;

    async fn tailor(
        &self,
        file: &ResumeFile,
        job_description: &str,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError>;

    async fn list_templates(&self) -> Result<TemplateCatalog, ServiceError>;
}
