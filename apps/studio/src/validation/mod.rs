//! Per-section schemas for resume data.
//!
//! Validation never fails loudly: each schema returns a [`ValidationReport`]
//! listing one human-readable message per offending field, which the
//! calling form renders inline and uses to block submission.

pub mod rules;

use serde::{Deserialize, Serialize};

use crate::models::{Education, Experience, PersonalInfo, Project, Skills};
use rules::{has_min_chars, is_email, is_optional_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
    }

    /// Folds a nested report in, prefixing each field with `prefix.`.
    fn absorb(&mut self, prefix: &str, nested: ValidationReport) {
        self.errors
            .extend(nested.errors.into_iter().map(|e| FieldError {
                field: format!("{prefix}.{}", e.field),
                message: e.message,
            }));
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<_> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

pub fn validate_personal_info(info: &PersonalInfo) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(
        has_min_chars(text(&info.full_name), 2),
        "fullName",
        "Full name must be at least 2 characters",
    );
    report.check(is_email(text(&info.email)), "email", "Invalid email address");
    report.check(
        has_min_chars(text(&info.phone), 10),
        "phone",
        "Phone number must be at least 10 digits",
    );
    report.check(
        has_min_chars(text(&info.location), 2),
        "location",
        "Location is required",
    );
    report.check(
        is_optional_url(info.linked_in.as_deref()),
        "linkedIn",
        "Invalid LinkedIn URL",
    );
    report.check(
        is_optional_url(info.website.as_deref()),
        "website",
        "Invalid website URL",
    );
    report
}

pub fn validate_experience(entry: &Experience) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(
        has_min_chars(&entry.company, 2),
        "company",
        "Company name is required",
    );
    report.check(
        has_min_chars(&entry.position, 2),
        "position",
        "Position is required",
    );
    report.check(
        !entry.start_date.is_empty(),
        "startDate",
        "Start date is required",
    );
    report.check(
        has_min_chars(&entry.description, 10),
        "description",
        "Description must be at least 10 characters",
    );
    report
}

pub fn validate_education(entry: &Education) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(
        has_min_chars(&entry.institution, 2),
        "institution",
        "Institution name is required",
    );
    report.check(has_min_chars(&entry.degree, 2), "degree", "Degree is required");
    report.check(
        has_min_chars(&entry.field, 2),
        "field",
        "Field of study is required",
    );
    report.check(
        !entry.graduation_date.is_empty(),
        "graduationDate",
        "Graduation date is required",
    );
    report
}

pub fn validate_skills(skills: &Skills) -> ValidationReport {
    let mut report = ValidationReport::default();
    let non_empty = |list: &Option<Vec<String>>| list.as_ref().is_some_and(|l| !l.is_empty());
    report.check(
        non_empty(&skills.technical),
        "technical",
        "Add at least one technical skill",
    );
    report.check(
        non_empty(&skills.soft),
        "soft",
        "Add at least one soft skill",
    );
    report
}

pub fn validate_project(entry: &Project) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(
        has_min_chars(&entry.title, 2),
        "title",
        "Project title is required",
    );
    report.check(
        has_min_chars(&entry.description, 10),
        "description",
        "Description must be at least 10 characters",
    );
    report.check(
        !entry.technologies.is_empty(),
        "technologies",
        "Add at least one technology",
    );
    report.check(
        is_optional_url(entry.link.as_deref()),
        "link",
        "Invalid project URL",
    );
    report
}

/// Validates every entry, keying errors as `{section}[{index}].{field}`.
fn validate_each<T>(
    section: &str,
    entries: &[T],
    validate: impl Fn(&T) -> ValidationReport,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (i, entry) in entries.iter().enumerate() {
        report.absorb(&format!("{section}[{i}]"), validate(entry));
    }
    report
}

pub fn validate_experiences(entries: &[Experience]) -> ValidationReport {
    validate_each("experiences", entries, validate_experience)
}

pub fn validate_education_entries(entries: &[Education]) -> ValidationReport {
    validate_each("education", entries, validate_education)
}

pub fn validate_projects(entries: &[Project]) -> ValidationReport {
    validate_each("projects", entries, validate_project)
}

/// Minimum trimmed length a job description must exceed before tailoring.
pub const JOB_DESCRIPTION_MIN_CHARS: usize = 50;

pub fn job_description_ready(job_description: &str) -> bool {
    rules::char_len(job_description.trim()) > JOB_DESCRIPTION_MIN_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn good_experience() -> Experience {
        Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2021-01".to_string(),
            end_date: None,
            current: Some(true),
            description: "Built the billing pipeline".to_string(),
        }
    }

    #[test]
    fn test_personal_info_rejects_bad_sample_with_four_errors() {
        let info = PersonalInfo {
            full_name: s("A"),
            email: s("not-an-email"),
            phone: s("123"),
            location: s(""),
            ..Default::default()
        };
        let r = validate_personal_info(&info);
        assert!(!r.passed());
        assert_eq!(r.len(), 4);
        let fields: Vec<_> = r.fields().collect();
        assert_eq!(fields, vec!["fullName", "email", "phone", "location"]);
        assert_eq!(r.message_for("email"), Some("Invalid email address"));
    }

    #[test]
    fn test_personal_info_accepts_good_sample() {
        let info = PersonalInfo {
            full_name: s("Jo Lee"),
            email: s("jo@x.com"),
            phone: s("5551234567"),
            location: s("NY"),
            ..Default::default()
        };
        assert!(validate_personal_info(&info).passed());
    }

    #[test]
    fn test_personal_info_empty_string_urls_are_not_provided() {
        let info = PersonalInfo {
            full_name: s("Jo Lee"),
            email: s("jo@x.com"),
            phone: s("5551234567"),
            location: s("NY"),
            linked_in: s(""),
            website: s(""),
        };
        assert!(validate_personal_info(&info).passed());
    }

    #[test]
    fn test_personal_info_bad_urls() {
        let info = PersonalInfo {
            full_name: s("Jo Lee"),
            email: s("jo@x.com"),
            phone: s("5551234567"),
            location: s("NY"),
            linked_in: s("linkedin/jolee"),
            website: s("jo lee dot com"),
        };
        let r = validate_personal_info(&info);
        assert_eq!(r.message_for("linkedIn"), Some("Invalid LinkedIn URL"));
        assert_eq!(r.message_for("website"), Some("Invalid website URL"));
    }

    #[test]
    fn test_personal_info_missing_fields_count_as_empty() {
        let r = validate_personal_info(&PersonalInfo::default());
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn test_experience_pass() {
        assert!(validate_experience(&good_experience()).passed());
    }

    #[test]
    fn test_experience_short_description() {
        let entry = Experience {
            description: "Coded".to_string(),
            ..good_experience()
        };
        let r = validate_experience(&entry);
        assert_eq!(r.fields().collect::<Vec<_>>(), vec!["description"]);
    }

    #[test]
    fn test_education_requires_graduation_date() {
        let entry = Education {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            field: "Physics".to_string(),
            graduation_date: String::new(),
            gpa: None,
        };
        let r = validate_education(&entry);
        assert_eq!(
            r.message_for("graduationDate"),
            Some("Graduation date is required")
        );
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_skills_require_both_lists() {
        let r = validate_skills(&Skills {
            technical: Some(vec!["Rust".to_string()]),
            soft: Some(vec![]),
        });
        assert_eq!(r.fields().collect::<Vec<_>>(), vec!["soft"]);
        assert_eq!(validate_skills(&Skills::default()).len(), 2);
    }

    #[test]
    fn test_project_link_optional_but_checked() {
        let mut project = Project {
            title: "Ledger".to_string(),
            description: "Double-entry bookkeeping toy".to_string(),
            technologies: vec!["Rust".to_string()],
            link: None,
        };
        assert!(validate_project(&project).passed());
        project.link = Some("ftp//broken".to_string());
        assert_eq!(
            validate_project(&project).message_for("link"),
            Some("Invalid project URL")
        );
    }

    #[test]
    fn test_collection_errors_are_index_prefixed() {
        let entries = vec![
            good_experience(),
            Experience {
                company: "X".to_string(),
                ..good_experience()
            },
        ];
        let r = validate_experiences(&entries);
        assert_eq!(
            r.fields().collect::<Vec<_>>(),
            vec!["experiences[1].company"]
        );
    }

    #[test]
    fn test_empty_collections_pass() {
        assert!(validate_experiences(&[]).passed());
        assert!(validate_projects(&[]).passed());
        assert!(validate_education_entries(&[]).passed());
    }

    #[test]
    fn test_job_description_readiness() {
        assert!(!job_description_ready(&"x".repeat(50)));
        assert!(job_description_ready(&"x".repeat(51)));
        assert!(!job_description_ready(&format!("   {}   ", "x".repeat(50))));
    }

    #[test]
    fn test_report_display_joins_fields() {
        let r = validate_skills(&Skills::default());
        assert_eq!(
            r.to_string(),
            "technical: Add at least one technical skill; soft: Add at least one soft skill"
        );
    }
}
