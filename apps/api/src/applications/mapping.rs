//! Translation between the in-memory record and the `job_applications` row.

use crate::applications::dates::format_iso;
use crate::applications::validation::{validate_application, ValidationErrors};
use crate::models::application::{ApplicationInput, JobApplication, JobApplicationRow};

pub fn to_row(app: &JobApplication) -> JobApplicationRow {
    JobApplicationRow {
        id: app.id.clone(),
        user_id: app.user_id.clone(),
        job_title: app.job_title.clone(),
        company_name: app.company_name.clone(),
        date_applied: format_iso(app.date_applied),
        status: app.status.as_str().to_string(),
        site_applied_on: app.site_applied_on.clone(),
        notes: app.notes.clone(),
        rejection_reason: app.rejection_reason.clone(),
    }
}

/// Rows are validated like any other input; a row that no longer satisfies
/// the record invariants is an error, not a silently patched record.
pub fn from_row(row: JobApplicationRow) -> Result<JobApplication, ValidationErrors> {
    let input = ApplicationInput {
        id: Some(row.id),
        user_id: Some(row.user_id),
        job_title: Some(row.job_title),
        company_name: Some(row.company_name),
        date_applied: Some(row.date_applied),
        status: Some(row.status),
        site_applied_on: row.site_applied_on,
        notes: row.notes,
        rejection_reason: row.rejection_reason,
    };
    validate_application(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::Status;
    use chrono::NaiveDate;

    fn sample() -> JobApplication {
        JobApplication {
            id: "7c9e6679-7425-40de-944b-e07fc1f90ae7".into(),
            user_id: "0b2f3c9a-1111-4a5b-9c8d-2e3f4a5b6c7d".into(),
            job_title: "Backend Engineer".into(),
            company_name: "Data Systems".into(),
            date_applied: NaiveDate::from_ymd_opt(2024, 6, 18).unwrap(),
            status: Status::Rejected,
            site_applied_on: Some("Company site".into()),
            notes: None,
            rejection_reason: Some("Position filled".into()),
        }
    }

    #[test]
    fn test_row_uses_plain_date_string() {
        let row = to_row(&sample());
        assert_eq!(row.date_applied, "2024-06-18");
        assert_eq!(row.status, "Rejected");
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let app = sample();
        assert_eq!(from_row(to_row(&app)).unwrap(), app);
    }

    #[test]
    fn test_round_trip_across_year_boundary() {
        let app = JobApplication {
            date_applied: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            status: Status::Applied,
            rejection_reason: None,
            ..sample()
        };
        assert_eq!(from_row(to_row(&app)).unwrap(), app);
    }

    #[test]
    fn test_from_row_rejects_corrupt_status() {
        let mut row = to_row(&sample());
        row.status = "Archived".into();
        assert!(from_row(row).unwrap_err().has_field("status"));
    }

    #[test]
    fn test_from_row_drops_stale_rejection_reason() {
        let mut row = to_row(&sample());
        row.status = "Offer".into();
        assert_eq!(from_row(row).unwrap().rejection_reason, None);
    }
}
