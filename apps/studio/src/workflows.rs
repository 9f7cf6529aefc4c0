//! Page-level orchestration: the intents behind the template, upload,
//! tailor and preview screens.
//!
//! Each workflow commits what the user already chose (the template) before
//! any remote call, and only moves on to the preview when the call succeeds.
//! A failed call leaves the document as it was after that commit.

use tracing::info;

use crate::errors::AppError;
use crate::flow::Destination;
use crate::models::Step;
use crate::remote::{Gateway, ResumeResult};
use crate::session::ResumeSession;
use crate::upload::ResumeFile;
use crate::validation::{job_description_ready, rules::char_len, JOB_DESCRIPTION_MIN_CHARS};

/// Result of a successful remote workflow.
#[derive(Debug)]
pub struct Completed {
    pub destination: Destination,
    pub result: ResumeResult,
}

/// Template screen "continue": commit the choice and open the editor.
pub fn choose_template(session: &mut ResumeSession, template_id: &str) -> Destination {
    session.set_selected_template(template_id);
    session.set_current_step(Step::first());
    Destination::Editor(Step::first())
}

pub async fn upload_and_reformat(
    session: &mut ResumeSession,
    gateway: &Gateway,
    file: &ResumeFile,
    template_id: &str,
) -> Result<Completed, AppError> {
    session.set_selected_template(template_id);
    let result = gateway.upload_resume(file, template_id).await?;
    info!("Reformatted {} with template {template_id}", file.name);
    Ok(Completed {
        destination: Destination::Preview,
        result,
    })
}

pub async fn tailor_to_job(
    session: &mut ResumeSession,
    gateway: &Gateway,
    file: &ResumeFile,
    job_description: &str,
    template_id: &str,
) -> Result<Completed, AppError> {
    if !job_description_ready(job_description) {
        return Err(AppError::JobDescriptionTooShort {
            min: JOB_DESCRIPTION_MIN_CHARS,
            got: char_len(job_description.trim()),
        });
    }
    session.set_selected_template(template_id);
    let result = gateway
        .tailor_resume(file, job_description, template_id)
        .await?;
    info!("Tailored {} with template {template_id}", file.name);
    Ok(Completed {
        destination: Destination::Preview,
        result,
    })
}

/// Submits the current document (minus the wizard position) for generation.
pub async fn generate_from_session(
    session: &ResumeSession,
    gateway: &Gateway,
) -> Result<Completed, AppError> {
    let snapshot = session.snapshot();
    let payload = snapshot.payload().ok_or(AppError::NoTemplateSelected)?;
    let result = gateway.generate_resume(&payload).await?;
    Ok(Completed {
        destination: Destination::Preview,
        result,
    })
}

/// Preview "start over": wipe the document and go back to template selection.
pub fn start_over(session: &mut ResumeSession) -> Destination {
    session.reset_resume();
    Destination::TemplateSelection
}
