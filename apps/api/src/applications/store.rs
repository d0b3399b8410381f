//! Persistence adapter for job applications.
//!
//! Every call receives the caller's `UserContext`. The Postgres store installs
//! the caller's claims on the transaction so that row-level-security policies
//! decide ownership; the explicit `user_id` filters only narrow the scan.

use async_trait::async_trait;
use futures::future::join_all;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::applications::mapping::{from_row, to_row};
use crate::applications::validation::{rejection_reason_for, ValidationErrors};
use crate::auth::UserContext;
use crate::models::application::{ApplicationDraft, JobApplication, JobApplicationRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Job application {0} not found")]
    NotFound(String),

    #[error("Stored row failed validation: {0}")]
    InvalidRow(ValidationErrors),

    #[error("{failed} of {total} operations failed")]
    Batch { failed: usize, total: usize },
}

/// The persistence seam. Carried in `AppState` as `Arc<dyn ApplicationStore>`.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// The caller's applications, most recent `date_applied` first.
    async fn list(&self, ctx: &UserContext) -> Result<Vec<JobApplication>, StoreError>;

    async fn create(
        &self,
        ctx: &UserContext,
        draft: &ApplicationDraft,
    ) -> Result<JobApplication, StoreError>;

    /// Inserts all drafts or none of them.
    async fn create_many(
        &self,
        ctx: &UserContext,
        drafts: &[ApplicationDraft],
    ) -> Result<Vec<JobApplication>, StoreError>;

    async fn update(
        &self,
        ctx: &UserContext,
        application: &JobApplication,
    ) -> Result<JobApplication, StoreError>;

    async fn delete(&self, ctx: &UserContext, id: &str) -> Result<(), StoreError>;

    /// Issues one delete per id concurrently and waits for all of them.
    /// Deletes that succeeded are not rolled back when others fail.
    async fn delete_many(&self, ctx: &UserContext, ids: &[String]) -> Result<(), StoreError> {
        let results = join_all(ids.iter().map(|id| self.delete(ctx, id))).await;

        let mut failed = 0;
        for (id, result) in ids.iter().zip(&results) {
            if let Err(e) = result {
                error!("Failed to delete job application {id}: {e}");
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(StoreError::Batch {
                failed,
                total: ids.len(),
            });
        }
        Ok(())
    }
}

/// Rows per INSERT statement. Postgres caps a statement at 65,535 bind
/// parameters and each row binds 9.
const INSERT_CHUNK_ROWS: usize = 1000;

const SELECT_COLUMNS: &str = "id::text AS id, user_id::text AS user_id, job_title, \
    company_name, date_applied::text AS date_applied, status, site_applied_on, notes, \
    rejection_reason";

/// Postgres-backed store. Expects the schema in `migrations/`.
#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
    role: Option<String>,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool, role: Option<String>) -> Self {
        Self { pool, role }
    }

    /// Opens a transaction that acts on behalf of `ctx`.
    async fn begin_as(&self, ctx: &UserContext) -> Result<Transaction<'static, Postgres>, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
            .bind(ctx.claims.to_string())
            .execute(&mut *tx)
            .await?;

        if let Some(role) = &self.role {
            // SET ROLE takes an identifier, not a bind parameter.
            let stmt = format!("SET LOCAL ROLE {}", quote_ident(role));
            sqlx::query(&stmt).execute(&mut *tx).await?;
        }

        Ok(tx)
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn list(&self, ctx: &UserContext) -> Result<Vec<JobApplication>, StoreError> {
        let mut tx = self.begin_as(ctx).await?;

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM job_applications \
             WHERE user_id = $1::uuid \
             ORDER BY date_applied DESC, created_at DESC"
        );
        let rows = sqlx::query_as::<_, JobApplicationRow>(&sql)
            .bind(&ctx.user_id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Fetched {} job applications for user {}", rows.len(), ctx.user_id);
        rows_to_applications(rows)
    }

    async fn create(
        &self,
        ctx: &UserContext,
        draft: &ApplicationDraft,
    ) -> Result<JobApplication, StoreError> {
        let mut created = self.create_many(ctx, std::slice::from_ref(draft)).await?;
        created
            .pop()
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn create_many(
        &self,
        ctx: &UserContext,
        drafts: &[ApplicationDraft],
    ) -> Result<Vec<JobApplication>, StoreError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.begin_as(ctx).await?;
        let mut inserted = Vec::with_capacity(drafts.len());
        for mut builder in insert_statements(ctx, drafts) {
            let rows = builder
                .build_query_as::<JobApplicationRow>()
                .fetch_all(&mut *tx)
                .await?;
            inserted.extend(rows);
        }
        tx.commit().await?;

        info!("Inserted {} job applications for user {}", inserted.len(), ctx.user_id);
        rows_to_applications(inserted)
    }

    async fn update(
        &self,
        ctx: &UserContext,
        application: &JobApplication,
    ) -> Result<JobApplication, StoreError> {
        let id = parse_id(&application.id)?;
        let row = to_row(application);

        let sql = format!(
            "UPDATE job_applications SET \
                job_title = $1, company_name = $2, date_applied = $3::date, status = $4, \
                site_applied_on = $5, notes = $6, rejection_reason = $7 \
             WHERE id = $8 AND user_id = $9::uuid \
             RETURNING {SELECT_COLUMNS}"
        );

        let mut tx = self.begin_as(ctx).await?;
        let updated = sqlx::query_as::<_, JobApplicationRow>(&sql)
            .bind(row.job_title)
            .bind(row.company_name)
            .bind(row.date_applied)
            .bind(row.status)
            .bind(row.site_applied_on)
            .bind(row.notes)
            .bind(rejection_reason_for(application.status, row.rejection_reason))
            .bind(id)
            .bind(&ctx.user_id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        let updated = updated.ok_or_else(|| StoreError::NotFound(application.id.clone()))?;
        info!("Updated job application {} for user {}", application.id, ctx.user_id);
        from_row(updated).map_err(StoreError::InvalidRow)
    }

    async fn delete(&self, ctx: &UserContext, id: &str) -> Result<(), StoreError> {
        let uuid = parse_id(id)?;

        let mut tx = self.begin_as(ctx).await?;
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND user_id = $2::uuid")
            .bind(uuid)
            .bind(&ctx.user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!("Deleted job application {id} for user {}", ctx.user_id);
        Ok(())
    }
}

/// One INSERT per chunk of drafts. Run them in a single transaction to keep
/// the batch all-or-nothing.
fn insert_statements(
    ctx: &UserContext,
    drafts: &[ApplicationDraft],
) -> Vec<QueryBuilder<'static, Postgres>> {
    drafts
        .chunks(INSERT_CHUNK_ROWS)
        .map(|chunk| {
            let rows: Vec<(Uuid, JobApplicationRow)> = chunk
                .iter()
                .map(|draft| {
                    let id = Uuid::new_v4();
                    let app = JobApplication::from_draft(id.to_string(), ctx.user_id.clone(), draft.clone());
                    (id, to_row(&app))
                })
                .collect();

            let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new(
                "INSERT INTO job_applications \
                 (id, user_id, job_title, company_name, date_applied, status, \
                  site_applied_on, notes, rejection_reason) ",
            );
            builder.push_values(rows, |mut b, (id, row)| {
                b.push_bind(id)
                    .push_bind(row.user_id)
                    .push_unseparated("::uuid")
                    .push_bind(row.job_title)
                    .push_bind(row.company_name)
                    .push_bind(row.date_applied)
                    .push_unseparated("::date")
                    .push_bind(row.status)
                    .push_bind(row.site_applied_on)
                    .push_bind(row.notes)
                    .push_bind(row.rejection_reason);
            });
            builder.push(" RETURNING ");
            builder.push(SELECT_COLUMNS);
            builder
        })
        .collect()
}

fn rows_to_applications(rows: Vec<JobApplicationRow>) -> Result<Vec<JobApplication>, StoreError> {
    rows.into_iter()
        .map(|row| from_row(row).map_err(StoreError::InvalidRow))
        .collect()
}

/// Ids that are not UUIDs cannot name a row.
fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("authenticated"), "\"authenticated\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    fn drafts(n: usize) -> Vec<ApplicationDraft> {
        let draft = ApplicationDraft {
            job_title: "Data Engineer".into(),
            company_name: "Pipelines Inc".into(),
            date_applied: chrono::NaiveDate::from_ymd_opt(2024, 7, 18).unwrap(),
            status: crate::models::application::Status::Applied,
            site_applied_on: None,
            notes: None,
            rejection_reason: None,
        };
        vec![draft; n]
    }

    #[test]
    fn test_large_batches_are_split_under_parameter_limit() {
        let ctx = UserContext::for_user("7c9e6679-7425-40de-944b-e07fc1f90ae7");
        let statements = insert_statements(&ctx, &drafts(2 * INSERT_CHUNK_ROWS + 1));

        assert_eq!(statements.len(), 3);
        let full = statements[0].sql();
        let last_param = 9 * INSERT_CHUNK_ROWS;
        assert!(full.contains(&format!("${last_param})")));
        assert!(!full.contains(&format!("${}", last_param + 1)));
        assert!(last_param < u16::MAX as usize);

        let tail = statements[2].sql();
        assert!(tail.contains("$9)"));
        assert!(!tail.contains("$10"));
        assert!(tail.ends_with(SELECT_COLUMNS));
    }

    #[test]
    fn test_small_batch_is_one_statement() {
        let ctx = UserContext::for_user("7c9e6679-7425-40de-944b-e07fc1f90ae7");
        assert_eq!(insert_statements(&ctx, &drafts(INSERT_CHUNK_ROWS)).len(), 1);
        assert!(insert_statements(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_parse_id_rejects_non_uuid_as_not_found() {
        assert!(matches!(parse_id("42"), Err(StoreError::NotFound(id)) if id == "42"));
        assert!(parse_id("7c9e6679-7425-40de-944b-e07fc1f90ae7").is_ok());
    }
}
