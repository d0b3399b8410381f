//! CSV and JSON export of the record list.

use serde::Deserialize;
use thiserror::Error;

use crate::applications::dates::format_us;
use crate::models::application::JobApplication;

const CSV_HEADERS: [&str; 7] = [
    "Job Title",
    "Company",
    "Date Applied",
    "Status",
    "Applied On",
    "Notes",
    "Rejection Reason",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "job_applications.csv",
            ExportFormat::Json => "job_applications.json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn render(&self, apps: &[JobApplication]) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Csv => to_csv(apps),
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(apps)?),
        }
    }
}

/// One row per application. Dates are written as `M/D/YYYY` so the file can
/// be imported again unchanged.
pub fn to_csv(apps: &[JobApplication]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for app in apps {
        let date = format_us(app.date_applied);
        writer.write_record([
            app.job_title.as_str(),
            app.company_name.as_str(),
            date.as_str(),
            app.status.as_str(),
            app.site_applied_on.as_deref().unwrap_or_default(),
            app.notes.as_deref().unwrap_or_default(),
            app.rejection_reason.as_deref().unwrap_or_default(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}
