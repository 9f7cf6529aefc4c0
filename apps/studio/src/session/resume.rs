use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{Education, Experience, PersonalInfo, Project, ResumeDocument, Skills, Step};
use crate::session::persist::{self, BlobStore};

pub const RESUME_STORAGE_KEY: &str = "resume-storage";

/// Sole owner of the in-progress [`ResumeDocument`].
///
/// Every mutator builds a new document from the current one and swaps it in
/// whole, then writes it through to the blob store. Snapshots handed out by
/// [`ResumeSession::snapshot`] never change after the fact.
pub struct ResumeSession {
    doc: Arc<ResumeDocument>,
    store: Arc<dyn BlobStore>,
}

impl ResumeSession {
    /// Fresh, empty session; nothing is written until the first mutation.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            doc: Arc::new(ResumeDocument::default()),
            store,
        }
    }

    /// Restores the last persisted document, falling back to an empty one.
    pub fn rehydrate(store: Arc<dyn BlobStore>) -> Self {
        let doc = match persist::load::<ResumeDocument>(store.as_ref(), RESUME_STORAGE_KEY) {
            Ok(Some(doc)) => {
                info!(
                    "Rehydrated resume (template: {:?}, step: {})",
                    doc.selected_template, doc.current_step
                );
                doc
            }
            Ok(None) => ResumeDocument::default(),
            Err(e) => {
                warn!("Discarding unreadable resume state: {e}");
                ResumeDocument::default()
            }
        };
        Self {
            doc: Arc::new(doc),
            store,
        }
    }

    pub fn snapshot(&self) -> Arc<ResumeDocument> {
        Arc::clone(&self.doc)
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    pub fn selected_template(&self) -> Option<&str> {
        self.doc.selected_template.as_deref()
    }

    pub fn current_step(&self) -> Step {
        self.doc.current_step
    }

    // ── mutators ────────────────────────────────────────────────────────────

    /// Template existence is the caller's concern; any id is accepted.
    pub fn set_selected_template(&mut self, template_id: impl Into<String>) {
        let template_id = template_id.into();
        self.commit(|doc| doc.selected_template = Some(template_id));
    }

    pub fn set_personal_info(&mut self, patch: PersonalInfo) {
        self.commit(|doc| doc.personal_info.merge(patch));
    }

    pub fn add_experience(&mut self, entry: Experience) {
        self.commit(|doc| doc.experiences.push(entry));
    }

    pub fn update_experience(&mut self, index: usize, entry: Experience) -> bool {
        self.commit_if(|doc| replace_at(&mut doc.experiences, index, entry))
    }

    pub fn remove_experience(&mut self, index: usize) -> bool {
        self.commit_if(|doc| remove_at(&mut doc.experiences, index))
    }

    pub fn add_education(&mut self, entry: Education) {
        self.commit(|doc| doc.education.push(entry));
    }

    pub fn update_education(&mut self, index: usize, entry: Education) -> bool {
        self.commit_if(|doc| replace_at(&mut doc.education, index, entry))
    }

    pub fn remove_education(&mut self, index: usize) -> bool {
        self.commit_if(|doc| remove_at(&mut doc.education, index))
    }

    /// Supplied lists replace the stored ones wholesale; omitted lists stay.
    pub fn set_skills(&mut self, patch: Skills) {
        self.commit(|doc| doc.skills.merge(patch));
    }

    pub fn add_project(&mut self, entry: Project) {
        self.commit(|doc| doc.projects.push(entry));
    }

    pub fn update_project(&mut self, index: usize, entry: Project) -> bool {
        self.commit_if(|doc| replace_at(&mut doc.projects, index, entry))
    }

    pub fn remove_project(&mut self, index: usize) -> bool {
        self.commit_if(|doc| remove_at(&mut doc.projects, index))
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        let summary = summary.into();
        self.commit(|doc| doc.summary = summary);
    }

    pub fn set_current_step(&mut self, step: Step) {
        self.commit(|doc| doc.current_step = step);
    }

    /// Drops every section, the template choice and the wizard position.
    pub fn reset_resume(&mut self) {
        self.commit(|doc| *doc = ResumeDocument::default());
        info!("Resume reset to empty state");
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn commit(&mut self, mutate: impl FnOnce(&mut ResumeDocument)) {
        self.commit_if(|doc| {
            mutate(doc);
            true
        });
    }

    /// Applies `mutate` to a copy; swaps and persists only if it reports a change.
    fn commit_if(&mut self, mutate: impl FnOnce(&mut ResumeDocument) -> bool) -> bool {
        let mut next = ResumeDocument::clone(&self.doc);
        if !mutate(&mut next) {
            debug!("Resume mutation was a no-op");
            return false;
        }
        self.doc = Arc::new(next);
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = persist::save(self.store.as_ref(), RESUME_STORAGE_KEY, self.doc.as_ref()) {
            warn!("Failed to persist resume state: {e}");
        }
    }
}

fn replace_at<T>(entries: &mut [T], index: usize, entry: T) -> bool {
    match entries.get_mut(index) {
        Some(slot) => {
            *slot = entry;
            true
        }
        None => false,
    }
}

fn remove_at<T>(entries: &mut Vec<T>, index: usize) -> bool {
    if index < entries.len() {
        entries.remove(index);
        true
    } else {
        false
    }
}
