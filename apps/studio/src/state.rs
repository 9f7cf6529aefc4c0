use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::flow::StepFlow;
use crate::models::TemplateCatalog;
use crate::notify::{Notifier, TracingNotifier};
use crate::remote::{Gateway, HttpResumeService};
use crate::session::{AuthSession, BlobStore, FileBlobStore, ResumeSession};

/// Everything a front end needs, wired together once at startup.
pub struct AppState {
    pub config: Config,
    pub resume: ResumeSession,
    pub auth: AuthSession,
    pub gateway: Gateway,
    pub flow: StepFlow,
    /// Shown until the service's list has been fetched.
    pub catalog: TemplateCatalog,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let store: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(config.state_dir.clone()));
        let service = HttpResumeService::new(&config.api_base_url, config.request_timeout)?;
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
        Ok(Self::assemble(config, store, Gateway::new(Arc::new(service), notifier)))
    }

    /// Wires sessions over `store` and rehydrates them.
    pub fn assemble(config: Config, store: Arc<dyn BlobStore>, gateway: Gateway) -> Self {
        Self {
            resume: ResumeSession::rehydrate(store.clone()),
            auth: AuthSession::rehydrate(store),
            gateway,
            flow: StepFlow::default(),
            catalog: TemplateCatalog::builtin(),
            config,
        }
    }
}
