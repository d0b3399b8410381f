//! Dashboard orchestration: the record list a client holds, the commands that
//! mutate it and the views derived from it.

pub mod commands;
pub mod export;
pub mod handlers;
pub mod import;
pub mod notices;
pub mod views;

use chrono::NaiveDate;
use tracing::error;

use crate::applications::store::{ApplicationStore, StoreError};
use crate::auth::UserContext;
use crate::models::application::{JobApplication, Status};

use self::commands::{execute, Command, Transition};
use self::notices::Notice;
use self::views::{filter_by_status, summarize, DashboardSummary};

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    applications: Vec<JobApplication>,
}

impl Dashboard {
    pub fn from_applications(applications: Vec<JobApplication>) -> Self {
        Self { applications }
    }

    /// Loads the caller's records once.
    pub async fn seed(store: &dyn ApplicationStore, ctx: &UserContext) -> Result<Self, StoreError> {
        Ok(Self::from_applications(store.list(ctx).await?))
    }

    pub fn applications(&self) -> &[JobApplication] {
        &self.applications
    }

    pub fn apply(&mut self, transition: &Transition) {
        match transition {
            Transition::Added { application } => {
                self.applications.insert(0, application.clone());
            }
            Transition::Updated { application } => {
                if let Some(existing) = self
                    .applications
                    .iter_mut()
                    .find(|a| a.id == application.id)
                {
                    *existing = application.clone();
                }
            }
            Transition::Removed { ids } => {
                self.applications.retain(|a| !ids.contains(&a.id));
            }
            Transition::Imported { applications, .. } => {
                let mut merged = applications.clone();
                merged.append(&mut self.applications);
                self.applications = merged;
            }
        }
    }

    /// Runs `command` against the store and applies its transition on
    /// success. On failure the list is left exactly as it was.
    pub async fn dispatch(
        &mut self,
        command: Command,
        store: &dyn ApplicationStore,
        ctx: &UserContext,
    ) -> Notice {
        let action = command.action();
        match execute(command, store, ctx).await {
            Ok(transition) => {
                self.apply(&transition);
                Notice::success(&transition)
            }
            Err(e) => {
                error!("Dashboard command {action:?} failed: {e}");
                Notice::failure(action)
            }
        }
    }

    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        summarize(&self.applications, today)
    }

    pub fn table(&self, filter: Option<Status>) -> Vec<JobApplication> {
        filter_by_status(&self.applications, filter)
    }
}
