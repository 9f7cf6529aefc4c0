use serde::{Deserialize, Serialize};

use crate::models::step::Step;

/// Contact block. Every field is optional so the record can hold a
/// half-typed draft; the personal info schema decides when it is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl PersonalInfo {
    /// Shallow merge: fields present in `patch` overwrite, absent ones are kept.
    pub fn merge(&mut self, patch: PersonalInfo) {
        let PersonalInfo {
            full_name,
            email,
            phone,
            location,
            linked_in,
            website,
        } = patch;
        merge_field(&mut self.full_name, full_name);
        merge_field(&mut self.email, email);
        merge_field(&mut self.phone, phone);
        merge_field(&mut self.location, location);
        merge_field(&mut self.linked_in, linked_in);
        merge_field(&mut self.website, website);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

/// Skill lists. `None` means "never set"; merging replaces whole lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft: Option<Vec<String>>,
}

impl Skills {
    pub fn merge(&mut self, patch: Skills) {
        merge_field(&mut self.technical, patch.technical);
        merge_field(&mut self.soft, patch.soft);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The in-progress resume: template choice, section data and wizard position.
///
/// `Default` is the documented empty state that `reset_resume` restores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub selected_template: Option<String>,
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub summary: String,
    pub current_step: Step,
}

/// The document as submitted for generation: everything but the wizard position.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePayload<'a> {
    pub template_id: &'a str,
    pub personal_info: &'a PersonalInfo,
    pub experiences: &'a [Experience],
    pub education: &'a [Education],
    pub skills: &'a Skills,
    pub projects: &'a [Project],
    pub summary: &'a str,
}

impl ResumeDocument {
    pub fn has_template(&self) -> bool {
        self.selected_template.is_some()
    }

    /// Builds the generation payload; `None` until a template is chosen.
    pub fn payload(&self) -> Option<ResumePayload<'_>> {
        let template_id = self.selected_template.as_deref()?;
        Some(ResumePayload {
            template_id,
            personal_info: &self.personal_info,
            experiences: &self.experiences,
            education: &self.education,
            skills: &self.skills,
            projects: &self.projects,
            summary: &self.summary,
        })
    }
}

fn merge_field<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if let Some(value) = incoming {
        *slot = Some(value);
    }
}
