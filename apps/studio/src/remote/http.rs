use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::debug;

use crate::models::TemplateCatalog;
use crate::remote::{ResumeResult, ResumeService, ServiceError};
use crate::upload::ResumeFile;

const GENERATE_PATH: &str = "/api/generate-resume";
const UPLOAD_PATH: &str = "/api/upload-resume";
const TAILOR_PATH: &str = "/api/tailor-resume";
const TEMPLATES_PATH: &str = "/api/templates";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `ResumeService` over HTTP: JSON for generation, multipart for file calls.
#[derive(Clone)]
pub struct HttpResumeService {
    client: Client,
    base_url: String,
}

impl HttpResumeService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn resume_part(file: &ResumeFile) -> Result<Part, ServiceError> {
        Ok(Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(file.content_type())?)
    }

    /// Sends the request and decodes a JSON success body.
    /// Non-2xx responses become `ServiceError::Api` with the server's message, if any.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Resume service returned {status}: {body}");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: parse_error_message(&body),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ResumeService for HttpResumeService {
    async fn generate(&self, data: &Value) -> Result<ResumeResult, ServiceError> {
        let request = self.client.post(self.url(GENERATE_PATH)).json(data);
        self.execute(request).await
    }

    async fn upload(
        &self,
        file: &ResumeFile,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError> {
        let form = Form::new()
            .part("resume", Self::resume_part(file)?)
            .text("templateId", template_id.to_string());
        let request = self.client.post(self.url(UPLOAD_PATH)).multipart(form);
        self.execute(request).await
    }

    async fn tailor(
        &self,
        file: &ResumeFile,
        job_description: &str,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError> {
        let form = Form::new()
            .part("resume", Self::resume_part(file)?)
            .text("jobDescription", job_description.to_string())
            .text("templateId", template_id.to_string());
        let request = self.client.post(self.url(TAILOR_PATH)).multipart(form);
        self.execute(request).await
    }

    async fn list_templates(&self) -> Result<TemplateCatalog, ServiceError> {
        let request = self.client.get(self.url(TEMPLATES_PATH));
        self.execute(request).await
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pulls `message` out of an error body like `{"message": "..."}`.
/// Blank messages and non-JSON bodies count as "no message".
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}
