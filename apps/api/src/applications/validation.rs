//! Record validation applied at every boundary: form payloads, CSV rows and
//! rows read back from the store. A record is either fully valid or rejected
//! with every violated constraint listed.

use std::fmt;

use serde::Serialize;

use crate::applications::dates::parse_flexible_date;
use crate::models::application::{ApplicationDraft, ApplicationInput, JobApplication, Status};

pub const MIN_TEXT_LEN: usize = 2;
pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a payload that carries no identity (create, import).
pub fn validate_draft(input: &ApplicationInput) -> Result<ApplicationDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let job_title = bounded_text(&mut errors, "job_title", "Job title", input.job_title.as_deref());
    let company_name = bounded_text(
        &mut errors,
        "company_name",
        "Company name",
        input.company_name.as_deref(),
    );
    let date_applied = match non_blank(input.date_applied.as_deref()) {
        None => {
            errors.push("date_applied", "A date of application is required.");
            None
        }
        Some(raw) => {
            let parsed = parse_flexible_date(raw);
            if parsed.is_none() {
                errors.push("date_applied", format!("'{raw}' is not a valid date."));
            }
            parsed
        }
    };
    let status = match non_blank(input.status.as_deref()) {
        None => {
            errors.push("status", "Status is required.");
            None
        }
        Some(raw) => match raw.parse::<Status>() {
            Ok(status) => Some(status),
            Err(e) => {
                errors.push("status", e.to_string());
                None
            }
        },
    };

    let site_applied_on = non_blank(input.site_applied_on.as_deref()).map(str::to_string);
    if let Some(site) = &site_applied_on {
        if site.chars().count() > MAX_TEXT_LEN {
            errors.push(
                "site_applied_on",
                format!("Site must be at most {MAX_TEXT_LEN} characters long."),
            );
        }
    }
    let notes = free_text(input.notes.as_deref());
    let rejection_reason = free_text(input.rejection_reason.as_deref());

    match (job_title, company_name, date_applied, status) {
        (Some(job_title), Some(company_name), Some(date_applied), Some(status))
            if errors.is_empty() =>
        {
            Ok(ApplicationDraft {
                job_title,
                company_name,
                date_applied,
                status,
                site_applied_on,
                notes,
                rejection_reason: rejection_reason_for(status, rejection_reason),
            })
        }
        _ => Err(errors),
    }
}

/// Validates a full record, including its identity.
pub fn validate_application(input: &ApplicationInput) -> Result<JobApplication, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let id = non_blank(input.id.as_deref()).map(str::to_string);
    if id.is_none() {
        errors.push("id", "An identifier is required.");
    }
    let user_id = non_blank(input.user_id.as_deref()).map(str::to_string);
    if user_id.is_none() {
        errors.push("user_id", "An owner identifier is required.");
    }

    let draft = validate_draft(input);
    match (id, user_id, draft) {
        (Some(id), Some(user_id), Ok(draft)) => Ok(JobApplication::from_draft(id, user_id, draft)),
        (_, _, draft) => {
            if let Err(draft_errors) = draft {
                errors.extend(draft_errors);
            }
            Err(errors)
        }
    }
}

/// A rejection reason only survives on rejected applications.
pub fn rejection_reason_for(status: Status, reason: Option<String>) -> Option<String> {
    match status {
        Status::Rejected => reason,
        _ => None,
    }
}

/// Checks that `value` has at least `min` characters after trimming.
pub fn require_min_chars(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
) {
    if value.trim().chars().count() < min {
        errors.push(field, format!("{label} must be at least {min} characters long."));
    }
}

fn bounded_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> Option<String> {
    let value = value.map(str::trim).unwrap_or_default();
    let len = value.chars().count();
    if len < MIN_TEXT_LEN {
        errors.push(
            field,
            format!("{label} must be at least {MIN_TEXT_LEN} characters long."),
        );
        return None;
    }
    if len > MAX_TEXT_LEN {
        errors.push(
            field,
            format!("{label} must be at most {MAX_TEXT_LEN} characters long."),
        );
        return None;
    }
    Some(value.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Blank free text is absent; anything else is kept as entered.
fn free_text(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_input() -> ApplicationInput {
        ApplicationInput {
            job_title: Some("Software Engineer".into()),
            company_name: Some("Tech Solutions Inc.".into()),
            date_applied: Some("2024-07-15".into()),
            status: Some("Interviewing".into()),
            site_applied_on: Some("LinkedIn".into()),
            notes: Some("Second round next week".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepts_valid_input() {
        let draft = validate_draft(&valid_input()).unwrap();
        assert_eq!(draft.job_title, "Software Engineer");
        assert_eq!(draft.date_applied, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(draft.status, Status::Interviewing);
        assert_eq!(draft.site_applied_on.as_deref(), Some("LinkedIn"));
    }

    #[test]
    fn test_free_text_is_kept_as_entered() {
        let input = ApplicationInput {
            status: Some("Rejected".into()),
            notes: Some("  - called twice\n  - no reply\n".into()),
            rejection_reason: Some(" Position filled ".into()),
            ..valid_input()
        };
        let draft = validate_draft(&input).unwrap();
        assert_eq!(draft.notes.as_deref(), Some("  - called twice\n  - no reply\n"));
        assert_eq!(draft.rejection_reason.as_deref(), Some(" Position filled "));

        let blank = ApplicationInput {
            notes: Some(" \n ".into()),
            ..valid_input()
        };
        assert_eq!(validate_draft(&blank).unwrap().notes, None);
    }

    #[test]
    fn test_trims_text_fields() {
        let input = ApplicationInput {
            job_title: Some("  QA Lead  ".into()),
            ..valid_input()
        };
        assert_eq!(validate_draft(&input).unwrap().job_title, "QA Lead");
    }

    #[test]
    fn test_rejects_short_title() {
        let input = ApplicationInput {
            job_title: Some("X".into()),
            ..valid_input()
        };
        let errors = validate_draft(&input).unwrap_err();
        assert!(errors.has_field("job_title"));
        assert_eq!(errors.fields().len(), 1);
        assert_eq!(
            errors.fields()[0].message,
            "Job title must be at least 2 characters long."
        );
    }

    #[test]
    fn test_whitespace_padding_does_not_satisfy_min_length() {
        let input = ApplicationInput {
            company_name: Some("  A  ".into()),
            ..valid_input()
        };
        assert!(validate_draft(&input).unwrap_err().has_field("company_name"));
    }

    #[test]
    fn test_rejects_overlong_company() {
        let input = ApplicationInput {
            company_name: Some("c".repeat(256)),
            ..valid_input()
        };
        let errors = validate_draft(&input).unwrap_err();
        assert!(errors.fields()[0].message.contains("at most 255"));
    }

    #[test]
    fn test_rejects_invalid_status() {
        let input = ApplicationInput {
            status: Some("Ghosted".into()),
            ..valid_input()
        };
        let errors = validate_draft(&input).unwrap_err();
        assert!(errors.has_field("status"));
        assert!(errors.fields()[0].message.contains("Invalid enum value"));
    }

    #[test]
    fn test_missing_date_is_required_error() {
        let input = ApplicationInput {
            date_applied: None,
            ..valid_input()
        };
        let errors = validate_draft(&input).unwrap_err();
        assert_eq!(errors.fields()[0].field, "date_applied");
        assert_eq!(errors.fields()[0].message, "A date of application is required.");
    }

    #[test]
    fn test_reports_every_violation_at_once() {
        let input = ApplicationInput {
            job_title: Some("a".into()),
            company_name: None,
            date_applied: Some("soon".into()),
            status: Some("Maybe".into()),
            ..Default::default()
        };
        let errors = validate_draft(&input).unwrap_err();
        for field in ["job_title", "company_name", "date_applied", "status"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let input = ApplicationInput {
            site_applied_on: Some("   ".into()),
            notes: Some(String::new()),
            ..valid_input()
        };
        let draft = validate_draft(&input).unwrap();
        assert_eq!(draft.site_applied_on, None);
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_rejection_reason_cleared_unless_rejected() {
        let input = ApplicationInput {
            status: Some("Offer".into()),
            rejection_reason: Some("Went with internal candidate".into()),
            ..valid_input()
        };
        assert_eq!(validate_draft(&input).unwrap().rejection_reason, None);

        let input = ApplicationInput {
            status: Some("Rejected".into()),
            rejection_reason: Some("Went with internal candidate".into()),
            ..valid_input()
        };
        assert_eq!(
            validate_draft(&input).unwrap().rejection_reason.as_deref(),
            Some("Went with internal candidate")
        );
    }

    #[test]
    fn test_full_record_requires_identity() {
        let errors = validate_application(&valid_input()).unwrap_err();
        assert!(errors.has_field("id"));
        assert!(errors.has_field("user_id"));

        let input = ApplicationInput {
            id: Some("app-1".into()),
            user_id: Some("user-1".into()),
            ..valid_input()
        };
        let app = validate_application(&input).unwrap();
        assert_eq!(app.id, "app-1");
        assert_eq!(app.user_id, "user-1");
    }

    #[test]
    fn test_require_min_chars() {
        let mut errors = ValidationErrors::default();
        require_min_chars(&mut errors, "currentCv", "CV", "too short", 50);
        assert!(errors.has_field("currentCv"));
    }
}
