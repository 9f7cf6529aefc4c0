use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::TemplateCatalog;
use crate::notify::Notifier;
use crate::remote::{ResumeResult, ResumeService, ServiceError};
use crate::upload::ResumeFile;

const TEMPLATES_FAILURE_NOTICE: &str = "Failed to fetch templates";

/// The mutating calls, each with its own in-flight indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Generate,
    Upload,
    Tailor,
}

impl CallKind {
    pub const ALL: [CallKind; 3] = [CallKind::Generate, CallKind::Upload, CallKind::Tailor];

    fn slot(self) -> usize {
        self as usize
    }

    pub fn success_notice(self) -> &'static str {
        match self {
            CallKind::Generate => "Resume generated successfully!",
            CallKind::Upload => "Resume uploaded successfully!",
            CallKind::Tailor => "Resume tailored successfully!",
        }
    }

    /// Shown when the server gives no message of its own.
    pub fn failure_notice(self) -> &'static str {
        match self {
            CallKind::Generate => "Failed to generate resume",
            CallKind::Upload => "Failed to upload resume",
            CallKind::Tailor => "Failed to tailor resume",
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CallKind::Generate => "generate",
            CallKind::Upload => "upload",
            CallKind::Tailor => "tailor",
        };
        f.write_str(name)
    }
}

/// Holds one unit of a call kind's in-flight count until dropped.
struct PendingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Single point of entry for remote calls.
///
/// Each call is one request/response exchange: success returns the payload
/// and raises a success notice; failure raises a failure notice (the server's
/// message when it sent one, a fixed fallback otherwise) and hands the error
/// back. Nothing is retried.
///
/// In-flight state is counted per [`CallKind`], so overlapping calls never
/// clear each other's indicator. A call that is dropped mid-flight releases
/// its count too.
pub struct Gateway {
    service: Arc<dyn ResumeService>,
    notifier: Arc<dyn Notifier>,
    pending: [AtomicUsize; 3],
}

impl Gateway {
    pub fn new(service: Arc<dyn ResumeService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            pending: Default::default(),
        }
    }

    pub fn is_pending(&self, kind: CallKind) -> bool {
        self.pending[kind.slot()].load(Ordering::SeqCst) > 0
    }

    pub fn any_pending(&self) -> bool {
        CallKind::ALL.iter().any(|&k| self.is_pending(k))
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub async fn generate_resume<T: Serialize + ?Sized>(
        &self,
        data: &T,
    ) -> Result<ResumeResult, ServiceError> {
        self.tracked(CallKind::Generate, async {
            let body = serde_json::to_value(data)?;
            self.service.generate(&body).await
        })
        .await
    }

    pub async fn upload_resume(
        &self,
        file: &ResumeFile,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError> {
        self.tracked(CallKind::Upload, self.service.upload(file, template_id))
            .await
    }

    pub async fn tailor_resume(
        &self,
        file: &ResumeFile,
        job_description: &str,
        template_id: &str,
    ) -> Result<ResumeResult, ServiceError> {
        self.tracked(
            CallKind::Tailor,
            self.service.tailor(file, job_description, template_id),
        )
        .await
    }

    /// Read-only: no pending indicator, no success notice.
    pub async fn get_templates(&self) -> Result<TemplateCatalog, ServiceError> {
        match self.service.list_templates().await {
            Ok(catalog) => {
                info!("Fetched {} templates", catalog.len());
                Ok(catalog)
            }
            Err(e) => {
                warn!("Template fetch failed: {e}");
                self.notifier.failure(TEMPLATES_FAILURE_NOTICE);
                Err(e)
            }
        }
    }

    fn begin(&self, kind: CallKind) -> PendingGuard<'_> {
        let counter = &self.pending[kind.slot()];
        counter.fetch_add(1, Ordering::SeqCst);
        PendingGuard { counter }
    }

    async fn tracked<F>(&self, kind: CallKind, call: F) -> Result<ResumeResult, ServiceError>
    where
        F: Future<Output = Result<ResumeResult, ServiceError>>,
    {
        let _pending = self.begin(kind);
        info!("Issuing {kind} request");

        match call.await {
            Ok(result) => {
                info!("{kind} request succeeded");
                self.notifier.success(kind.success_notice());
                Ok(result)
            }
            Err(e) => {
                warn!("{kind} request failed: {e}");
                let message = e.server_message().unwrap_or(kind.failure_notice());
                self.notifier.failure(message);
                Err(e)
            }
        }
    }
}
