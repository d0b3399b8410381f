//! CSV import with a tolerant header matcher.
//!
//! Each data row is validated on its own: rows that fail are reported with
//! their line number and excluded, the rest are returned for insertion.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use thiserror::Error;

use crate::applications::validation::{validate_draft, FieldError};
use crate::models::application::{ApplicationDraft, ApplicationInput, Status};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required column(s): {0}")]
    MissingColumns(String),

    #[error("CSV file contains no rows")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based line in the file, header included.
    pub line: u64,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub accepted: Vec<ApplicationDraft>,
    pub rejected: Vec<RowError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    JobTitle,
    CompanyName,
    DateApplied,
    Status,
    SiteAppliedOn,
    Notes,
    RejectionReason,
}

impl Column {
    const REQUIRED: [Column; 3] = [Column::JobTitle, Column::CompanyName, Column::DateApplied];

    fn label(&self) -> &'static str {
        match self {
            Column::JobTitle => "Job Title",
            Column::CompanyName => "Company",
            Column::DateApplied => "Date Applied",
            Column::Status => "Status",
            Column::SiteAppliedOn => "Applied On",
            Column::Notes => "Notes",
            Column::RejectionReason => "Rejection Reason",
        }
    }
}

/// Accepts snake_case and human-readable spellings: `Job Title`, `job_title`,
/// `job-title` and `JOB TITLE` all name the same column.
fn match_column(header: &str) -> Option<Column> {
    let normalized: String = header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();

    match normalized.as_str() {
        "job_title" | "title" => Some(Column::JobTitle),
        "company_name" | "company" => Some(Column::CompanyName),
        "date_applied" | "applied_date" | "date" => Some(Column::DateApplied),
        "status" => Some(Column::Status),
        "site_applied_on" | "applied_on" | "site" => Some(Column::SiteAppliedOn),
        "notes" => Some(Column::Notes),
        "rejection_reason" => Some(Column::RejectionReason),
        _ => None,
    }
}

pub fn parse_csv(bytes: &[u8]) -> Result<ImportReport, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let columns: Vec<Option<Column>> = reader.headers()?.iter().map(match_column).collect();

    let missing: Vec<&str> = Column::REQUIRED
        .iter()
        .filter(|required| !columns.contains(&Some(**required)))
        .map(Column::label)
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing.join(", ")));
    }

    let mut report = ImportReport::default();
    let mut seen_rows = 0usize;

    for (index, record) in reader.records().enumerate() {
        // Header is line 1.
        let fallback_line = index as u64 + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                report.rejected.push(RowError {
                    line,
                    errors: vec![FieldError {
                        field: "row".to_string(),
                        message: e.to_string(),
                    }],
                });
                seen_rows += 1;
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }
        seen_rows += 1;

        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);
        let input = row_to_input(&columns, &record);
        match validate_draft(&input) {
            Ok(draft) => report.accepted.push(draft),
            Err(errors) => report.rejected.push(RowError {
                line,
                errors: errors.fields().to_vec(),
            }),
        }
    }

    if seen_rows == 0 {
        return Err(ImportError::Empty);
    }
    Ok(report)
}

fn row_to_input(columns: &[Option<Column>], record: &StringRecord) -> ApplicationInput {
    let mut input = ApplicationInput::default();
    for (column, value) in columns.iter().zip(record.iter()) {
        let Some(column) = column else { continue };
        if value.is_empty() {
            continue;
        }
        let value = Some(value.to_string());
        match column {
            Column::JobTitle => input.job_title = value,
            Column::CompanyName => input.company_name = value,
            Column::DateApplied => input.date_applied = value,
            Column::Status => input.status = value,
            Column::SiteAppliedOn => input.site_applied_on = value,
            Column::Notes => input.notes = value,
            Column::RejectionReason => input.rejection_reason = value,
        }
    }
    if input.status.is_none() {
        input.status = Some(Status::Applied.as_str().to_string());
    }
    input
}
