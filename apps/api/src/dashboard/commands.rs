//! Mutations as explicit commands. `execute` performs the remote call and
//! returns the state transition; applying it is the caller's job.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::applications::store::{ApplicationStore, StoreError};
use crate::auth::UserContext;
use crate::dashboard::import::{parse_csv, ImportError, RowError};
use crate::models::application::{ApplicationDraft, JobApplication};

#[derive(Debug, Clone)]
pub enum Command {
    Add(ApplicationDraft),
    Update(JobApplication),
    Delete(String),
    DeleteMany(Vec<String>),
    /// Raw CSV bytes.
    Import(Vec<u8>),
}

/// What a command was trying to do, kept so failures can be reported after
/// the command itself has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Update,
    Delete,
    DeleteMany,
    Import,
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Command::Add(_) => Action::Add,
            Command::Update(_) => Action::Update,
            Command::Delete(_) => Action::Delete,
            Command::DeleteMany(_) => Action::DeleteMany,
            Command::Import(_) => Action::Import,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Added {
        application: JobApplication,
    },
    Updated {
        application: JobApplication,
    },
    Removed {
        ids: Vec<String>,
    },
    Imported {
        applications: Vec<JobApplication>,
        rejected: Vec<RowError>,
    },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub async fn execute(
    command: Command,
    store: &dyn ApplicationStore,
    ctx: &UserContext,
) -> Result<Transition, CommandError> {
    match command {
        Command::Add(draft) => {
            let application = store.create(ctx, &draft).await?;
            Ok(Transition::Added { application })
        }
        Command::Update(application) => {
            let application = store.update(ctx, &application).await?;
            Ok(Transition::Updated { application })
        }
        Command::Delete(id) => {
            store.delete(ctx, &id).await?;
            Ok(Transition::Removed { ids: vec![id] })
        }
        Command::DeleteMany(ids) => {
            // A selection is a set; a repeated id would fail its second delete.
            let mut seen = HashSet::new();
            let ids: Vec<String> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
            store.delete_many(ctx, &ids).await?;
            Ok(Transition::Removed { ids })
        }
        Command::Import(bytes) => {
            let report = parse_csv(&bytes)?;
            let applications = if report.accepted.is_empty() {
                Vec::new()
            } else {
                store.create_many(ctx, &report.accepted).await?
            };
            Ok(Transition::Imported {
                applications,
                rejected: report.rejected,
            })
        }
    }
}
