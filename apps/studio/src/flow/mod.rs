//! Step Flow Controller: forward and back movement through the editing wizard.
//!
//! The wizard is a fixed sequence of [`Step`]s. Entering it requires a
//! selected template; advancing past the last step leaves for the preview,
//! retreating before the first leaves for template selection. Every
//! transition that lands on a step is written back into the resume session
//! so a reload resumes where the user left off.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{PersonalInfo, ResumeDocument, Step};
use crate::notify::Notifier;
use crate::session::ResumeSession;
use crate::validation::{
    validate_education_entries, validate_experiences, validate_personal_info, validate_projects,
    validate_skills, ValidationReport,
};

pub const PERSONAL_INFO_SAVED_NOTICE: &str = "Personal information saved!";

/// Where the user ends up after an intent is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "destination", content = "step", rename_all = "snake_case")]
pub enum Destination {
    TemplateSelection,
    Editor(Step),
    Preview,
}

/// Submit guard attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Guard {
    /// Advance unconditionally.
    #[default]
    Open,
    /// Advance only if the step's section passes its schema.
    Schema,
}

#[derive(Debug, Clone)]
pub struct StepFlow {
    guards: [Guard; Step::COUNT],
}

impl Default for StepFlow {
    /// Personal Info is schema-guarded; every other step is open.
    fn default() -> Self {
        Self::open().with_guard(Step::PersonalInfo, Guard::Schema)
    }
}

impl StepFlow {
    /// A flow with no guards at all.
    pub fn open() -> Self {
        Self {
            guards: [Guard::Open; Step::COUNT],
        }
    }

    /// A flow that schema-checks every step.
    pub fn strict() -> Self {
        Self {
            guards: [Guard::Schema; Step::COUNT],
        }
    }

    pub fn with_guard(mut self, step: Step, guard: Guard) -> Self {
        self.guards[step.index()] = guard;
        self
    }

    pub fn guard(&self, step: Step) -> Guard {
        self.guards[step.index()]
    }

    /// Entry point: the persisted step, or template selection if none is chosen.
    pub fn enter(&self, session: &ResumeSession) -> Destination {
        if !session.document().has_template() {
            info!("No template selected; redirecting to template selection");
            return Destination::TemplateSelection;
        }
        Destination::Editor(session.current_step())
    }

    /// Runs the current step's guard and moves forward on success.
    ///
    /// The document is untouched when the guard rejects.
    pub fn advance(&self, session: &mut ResumeSession) -> Result<Destination, ValidationReport> {
        if !session.document().has_template() {
            return Ok(Destination::TemplateSelection);
        }
        let step = session.current_step();
        let report = self.check(step, session.document());
        if !report.passed() {
            debug!("{step} guard rejected: {report}");
            return Err(report);
        }
        Ok(self.step_forward(session, step))
    }

    pub fn retreat(&self, session: &mut ResumeSession) -> Destination {
        if !session.document().has_template() {
            return Destination::TemplateSelection;
        }
        match session.current_step().previous() {
            Some(prev) => {
                session.set_current_step(prev);
                Destination::Editor(prev)
            }
            None => Destination::TemplateSelection,
        }
    }

    /// Merges the form into the stored record, validates the result and
    /// saves it only if it passes.
    ///
    /// On the Personal Info step a save moves on to the next step. On any
    /// other step the wizard stays put. A rejected form leaves the document
    /// untouched.
    pub fn submit_personal_info(
        &self,
        session: &mut ResumeSession,
        form: PersonalInfo,
        notifier: &dyn Notifier,
    ) -> Result<Destination, ValidationReport> {
        if !session.document().has_template() {
            return Ok(Destination::TemplateSelection);
        }
        let mut merged = session.document().personal_info.clone();
        merged.merge(form);
        let report = validate_personal_info(&merged);
        if !report.passed() {
            debug!("Personal info rejected: {report}");
            return Err(report);
        }

        session.set_personal_info(merged);
        notifier.success(PERSONAL_INFO_SAVED_NOTICE);

        let step = session.current_step();
        if step != Step::PersonalInfo {
            return Ok(Destination::Editor(step));
        }
        Ok(self.step_forward(session, step))
    }

    fn check(&self, step: Step, doc: &ResumeDocument) -> ValidationReport {
        match self.guard(step) {
            Guard::Open => ValidationReport::default(),
            Guard::Schema => schema_for(step, doc),
        }
    }

    fn step_forward(&self, session: &mut ResumeSession, from: Step) -> Destination {
        match from.next() {
            Some(next) => {
                session.set_current_step(next);
                Destination::Editor(next)
            }
            None => {
                info!("Wizard complete; heading to preview");
                Destination::Preview
            }
        }
    }
}

fn schema_for(step: Step, doc: &ResumeDocument) -> ValidationReport {
    match step {
        Step::PersonalInfo => validate_personal_info(&doc.personal_info),
        Step::Experience => validate_experiences(&doc.experiences),
        Step::Education => validate_education_entries(&doc.education),
        Step::Skills => validate_skills(&doc.skills),
        Step::Summary => ValidationReport::default(),
        Step::Projects => validate_projects(&doc.projects),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Skills;
    use crate::notify::RecordingNotifier;
    use crate::session::MemoryBlobStore;

    fn session_with_template() -> ResumeSession {
        let mut s = ResumeSession::new(Arc::new(MemoryBlobStore::new()));
        s.set_selected_template("modern");
        s
    }

    fn valid_info() -> PersonalInfo {
        PersonalInfo {
            full_name: Some("Jo Lee".to_string()),
            email: Some("jo@x.com".to_string()),
            phone: Some("5551234567".to_string()),
            location: Some("NY".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_template_redirects_without_entering() {
        let mut s = ResumeSession::new(Arc::new(MemoryBlobStore::new()));
        let flow = StepFlow::default();
        assert_eq!(flow.enter(&s), Destination::TemplateSelection);
        assert_eq!(flow.advance(&mut s), Ok(Destination::TemplateSelection));
        assert_eq!(flow.retreat(&mut s), Destination::TemplateSelection);
        assert_eq!(s.current_step(), Step::PersonalInfo);
    }

    #[test]
    fn test_five_advances_reach_projects_then_preview() {
        let mut s = session_with_template();
        let flow = StepFlow::default();
        assert_eq!(flow.enter(&s), Destination::Editor(Step::PersonalInfo));

        assert_eq!(
            flow.submit_personal_info(&mut s, valid_info(), &RecordingNotifier::new()),
            Ok(Destination::Editor(Step::Experience))
        );
        for expected in [Step::Education, Step::Skills, Step::Summary, Step::Projects] {
            assert_eq!(flow.advance(&mut s), Ok(Destination::Editor(expected)));
        }
        assert_eq!(s.current_step(), Step::Projects);
        assert_eq!(flow.advance(&mut s), Ok(Destination::Preview));
        assert_eq!(s.current_step(), Step::Projects);
    }

    #[test]
    fn test_open_flow_advances_from_fresh_session() {
        let mut s = session_with_template();
        let flow = StepFlow::open();
        for _ in 0..5 {
            assert!(matches!(flow.advance(&mut s), Ok(Destination::Editor(_))));
        }
        assert_eq!(s.current_step(), Step::Projects);
        assert_eq!(flow.advance(&mut s), Ok(Destination::Preview));
    }

    #[test]
    fn test_retreat_from_first_step_exits_to_templates() {
        let mut s = session_with_template();
        let flow = StepFlow::default();
        assert_eq!(flow.retreat(&mut s), Destination::TemplateSelection);
    }

    #[test]
    fn test_retreat_writes_step_back() {
        let mut s = session_with_template();
        s.set_current_step(Step::Skills);
        let flow = StepFlow::default();
        assert_eq!(flow.retreat(&mut s), Destination::Editor(Step::Education));
        assert_eq!(s.current_step(), Step::Education);
    }

    #[test]
    fn test_invalid_personal_info_blocks_and_leaves_document() {
        let mut s = session_with_template();
        let flow = StepFlow::default();
        let before = s.snapshot();

        let form = PersonalInfo {
            full_name: Some("A".to_string()),
            ..valid_info()
        };
        let notes = RecordingNotifier::new();
        let err = flow.submit_personal_info(&mut s, form, &notes).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["fullName"]);
        assert_eq!(*s.snapshot(), *before);
        assert!(notes.notices().is_empty());
    }

    #[test]
    fn test_partial_edit_validates_merged_record() {
        let mut s = session_with_template();
        s.set_personal_info(valid_info());
        let flow = StepFlow::default();
        let notes = RecordingNotifier::new();

        let patch = PersonalInfo {
            phone: Some("5559876543".to_string()),
            ..Default::default()
        };
        assert_eq!(
            flow.submit_personal_info(&mut s, patch, &notes),
            Ok(Destination::Editor(Step::Experience))
        );
        assert_eq!(s.document().personal_info.phone.as_deref(), Some("5559876543"));
        assert_eq!(s.document().personal_info.full_name.as_deref(), Some("Jo Lee"));
        assert_eq!(notes.last().unwrap().message, "Personal information saved!");
    }

    #[test]
    fn test_stored_invalid_field_rejects_without_saving_form() {
        let mut s = session_with_template();
        s.set_personal_info(PersonalInfo {
            linked_in: Some("not a url".to_string()),
            ..Default::default()
        });
        let before = s.snapshot();
        let flow = StepFlow::default();

        let err = flow
            .submit_personal_info(&mut s, valid_info(), &RecordingNotifier::new())
            .unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["linkedIn"]);
        assert_eq!(*s.snapshot(), *before);
        assert_eq!(s.current_step(), Step::PersonalInfo);
    }

    #[test]
    fn test_submit_off_personal_step_saves_without_moving() {
        let mut s = session_with_template();
        s.set_current_step(Step::Skills);
        let flow = StepFlow::default();

        assert_eq!(
            flow.submit_personal_info(&mut s, valid_info(), &RecordingNotifier::new()),
            Ok(Destination::Editor(Step::Skills))
        );
        assert_eq!(s.current_step(), Step::Skills);
        assert_eq!(s.document().personal_info, valid_info());
    }

    #[test]
    fn test_default_guard_blocks_advance_on_empty_personal_info() {
        let mut s = session_with_template();
        let err = StepFlow::default().advance(&mut s).unwrap_err();
        assert_eq!(err.len(), 4);
        assert_eq!(s.current_step(), Step::PersonalInfo);
    }

    #[test]
    fn test_attached_skills_schema_gates_skills_step() {
        let mut s = session_with_template();
        s.set_current_step(Step::Skills);
        let flow = StepFlow::default().with_guard(Step::Skills, Guard::Schema);

        assert!(flow.advance(&mut s).is_err());
        s.set_skills(Skills {
            technical: Some(vec!["Rust".to_string()]),
            soft: Some(vec!["Writing".to_string()]),
        });
        assert_eq!(flow.advance(&mut s), Ok(Destination::Editor(Step::Summary)));
    }

    #[test]
    fn test_strict_flow_summary_always_passes() {
        let mut s = session_with_template();
        s.set_current_step(Step::Summary);
        assert_eq!(
            StepFlow::strict().advance(&mut s),
            Ok(Destination::Editor(Step::Projects))
        );
    }

    #[test]
    fn test_enter_resumes_persisted_step() {
        let store = Arc::new(MemoryBlobStore::new());
        let mut s = ResumeSession::new(store.clone());
        s.set_selected_template("classic");
        s.set_current_step(Step::Education);

        let reloaded = ResumeSession::rehydrate(store);
        assert_eq!(
            StepFlow::default().enter(&reloaded),
            Destination::Editor(Step::Education)
        );
    }
}
