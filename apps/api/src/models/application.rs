use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Where an application currently stands. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl Status {
    /// Display order used by tabs, stats and charts.
    pub const ALL: [Status; 4] = [
        Status::Applied,
        Status::Interviewing,
        Status::Offer,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Interviewing => "Interviewing",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid enum value. Expected 'Applied' | 'Interviewing' | 'Offer' | 'Rejected', received '{}'",
            self.0
        )
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(trimmed.to_string()))
    }
}

/// A validated application that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub job_title: String,
    pub company_name: String,
    pub date_applied: NaiveDate,
    pub status: Status,
    pub site_applied_on: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

/// A validated application owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub user_id: String,
    pub job_title: String,
    pub company_name: String,
    pub date_applied: NaiveDate,
    pub status: Status,
    pub site_applied_on: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

impl JobApplication {
    pub fn from_draft(id: String, user_id: String, draft: ApplicationDraft) -> Self {
        Self {
            id,
            user_id,
            job_title: draft.job_title,
            company_name: draft.company_name,
            date_applied: draft.date_applied,
            status: draft.status,
            site_applied_on: draft.site_applied_on,
            notes: draft.notes,
            rejection_reason: draft.rejection_reason,
        }
    }

    pub fn to_draft(&self) -> ApplicationDraft {
        ApplicationDraft {
            job_title: self.job_title.clone(),
            company_name: self.company_name.clone(),
            date_applied: self.date_applied,
            status: self.status,
            site_applied_on: self.site_applied_on.clone(),
            notes: self.notes.clone(),
            rejection_reason: self.rejection_reason.clone(),
        }
    }
}

/// Untyped boundary shape: form payloads, CSV rows and stored rows all pass
/// through this before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub date_applied: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub site_applied_on: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// A row of the `job_applications` table as selected by the store.
/// Identifiers and the date are read back as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: String,
    pub user_id: String,
    pub job_title: String,
    pub company_name: String,
    /// `YYYY-MM-DD`
    pub date_applied: String,
    pub status: String,
    pub site_applied_on: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}
