//! In-process `ResumeService` for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::models::TemplateCatalog;
use crate::remote::{ResumeResult, ResumeService, ServiceError};
use crate::upload::ResumeFile;

enum Outcome {
    Succeed(Value),
    Fail { status: u16, message: Option<String> },
}

pub struct FakeService {
    outcome: Outcome,
    upload_gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last_body: Mutex<Option<Value>>,
}

impl FakeService {
    pub fn succeeding(payload: Value) -> Self {
        Self::with(Outcome::Succeed(payload))
    }

    pub fn failing(status: u16, message: Option<&str>) -> Self {
        Self::with(Outcome::Fail {
            status,
            message: message.map(str::to_string),
        })
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            upload_gate: None,
            calls: AtomicUsize::new(0),
            last_body: Mutex::new(None),
        }
    }

    /// Makes `upload` wait until the returned gate is notified.
    pub fn with_upload_gate(mut self) -> Self {
        self.upload_gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn upload_gate(&self) -> Arc<Notify> {
        self.upload_gate.clone().unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    fn respond(&self, body: Value) -> Result<ResumeResult, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_body.lock().unwrap() = Some(body);
        match &self.outcome {
            Outcome::Succeed(payload) => Ok(payload.clone()),
            Outcome::Fail { status, message } => Err(ServiceError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[async_trait]
impl ResumeService for FakeService {
    async fn generate(&self, data: &Value) -> Result<ResumeResult, ServiceError> {
        self.respond(data.clone())
    }

    async fn upload(
        &self,
        file: &ResumeFile,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError> {
        if let Some(gate) = &self.upload_gate {
            gate.notified().await;
        }
        self.respond(serde_json::json!({ "resume": file.name, "templateId": template_id }))
    }

    async fn tailor(
        &self,
        file: &ResumeFile,
        job_description: &str,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError> {
        self.respond(serde_json::json!({
            "resume": file.name,
            "jobDescription": job_description,
            "templateId": template_id,
        }))
    }

    async fn list_templates(&self) -> Result<TemplateCatalog, ServiceError> {
        self.respond(Value::Null)?;
        Ok(TemplateCatalog::builtin())
    }
}
