//! In-memory `ApplicationStore` used by orchestration and router tests.
//! Ownership checks mirror the database policies: other users' rows are
//! invisible.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::applications::store::{ApplicationStore, StoreError};
use crate::auth::UserContext;
use crate::models::application::{ApplicationDraft, JobApplication};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<JobApplication>>,
    failing_ids: Mutex<HashSet<String>>,
    unavailable: Mutex<bool>,
    pub delete_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<JobApplication>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Makes every subsequent delete of `id` fail with a backend error.
    pub fn fail_deletes_of(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn go_offline(&self) {
        *self.unavailable.lock().unwrap() = true;
    }

    pub fn snapshot(&self) -> Vec<JobApplication> {
        self.rows.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn list(&self, ctx: &UserContext) -> Result<Vec<JobApplication>, StoreError> {
        self.check_available()?;
        let mut apps: Vec<JobApplication> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == ctx.user_id)
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
        Ok(apps)
    }

    async fn create(
        &self,
        ctx: &UserContext,
        draft: &ApplicationDraft,
    ) -> Result<JobApplication, StoreError> {
        self.check_available()?;
        let app = JobApplication::from_draft(Uuid::new_v4().to_string(), ctx.user_id.clone(), draft.clone());
        self.rows.lock().unwrap().push(app.clone());
        Ok(app)
    }

    async fn create_many(
        &self,
        ctx: &UserContext,
        drafts: &[ApplicationDraft],
    ) -> Result<Vec<JobApplication>, StoreError> {
        self.check_available()?;
        let created: Vec<JobApplication> = drafts
            .iter()
            .map(|d| JobApplication::from_draft(Uuid::new_v4().to_string(), ctx.user_id.clone(), d.clone()))
            .collect();
        self.rows.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn update(
        &self,
        ctx: &UserContext,
        application: &JobApplication,
    ) -> Result<JobApplication, StoreError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        let existing = rows
            .iter_mut()
            .find(|a| a.id == application.id && a.user_id == ctx.user_id)
            .ok_or_else(|| StoreError::NotFound(application.id.clone()))?;
        *existing = JobApplication {
            user_id: ctx.user_id.clone(),
            ..application.clone()
        };
        Ok(existing.clone())
    }

    async fn delete(&self, ctx: &UserContext, id: &str) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| !(a.id == id && a.user_id == ctx.user_id));
        if rows.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
