//! Transient user-facing notifications for command outcomes.

use serde::Serialize;

use crate::dashboard::commands::{Action, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(variant: NoticeVariant, title: &str, description: String) -> Self {
        Self {
            variant,
            title: title.to_string(),
            description,
        }
    }

    pub fn success(transition: &Transition) -> Self {
        match transition {
            Transition::Added { application } => Self::new(
                NoticeVariant::Default,
                "Application Added",
                format!(
                    "Your new application for {} has been added.",
                    application.job_title
                ),
            ),
            Transition::Updated { application } => Self::new(
                NoticeVariant::Default,
                "Application Updated",
                format!(
                    "Details for {} at {} have been saved.",
                    application.job_title, application.company_name
                ),
            ),
            Transition::Removed { ids } if ids.len() == 1 => Self::new(
                NoticeVariant::Default,
                "Application Deleted",
                "Application has been deleted.".to_string(),
            ),
            Transition::Removed { ids } => Self::new(
                NoticeVariant::Default,
                "Applications Deleted",
                format!("{} applications have been deleted.", ids.len()),
            ),
            Transition::Imported {
                applications,
                rejected,
            } => {
                let mut description = format!("{} applications imported.", applications.len());
                if !rejected.is_empty() {
                    description.push_str(&format!(
                        " {} rows were skipped because they were invalid.",
                        rejected.len()
                    ));
                }
                Self::new(NoticeVariant::Default, "Import Complete", description)
            }
        }
    }

    pub fn failure(action: Action) -> Self {
        let description = match action {
            Action::Add => "Failed to add job application.",
            Action::Update => "Failed to update job application.",
            Action::Delete => "Failed to delete job application.",
            Action::DeleteMany => "Failed to delete selected applications.",
            Action::Import => "Failed to import applications.",
        };
        Self::new(NoticeVariant::Destructive, "Error", description.to_string())
    }
}
