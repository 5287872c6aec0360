use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::job::{JobFilter, NewJob};
use crate::db::models::JobRow;
use crate::db::sql::{JOB_COLUMNS, JobUpdate, push_set_clause, push_where_clause};
use crate::error::{JobError, Result};

/// Repository for Job database operations
///
/// Every method is a self-contained unit of work against the injected pool.
/// `create` runs its company lookup and insert as two separate statements;
/// a company removed in between surfaces as the same validation error.
#[derive(Clone)]
pub struct JobRepository {
    pool: Pool<Postgres>,
}

impl JobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a job for an existing company and return the full record
    pub async fn create(&self, job: &NewJob) -> Result<JobRow> {
        debug!("Creating job: title={}, company={}", job.title, job.company_handle);

        let company: Option<(String,)> =
            sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
                .bind(&job.company_handle)
                .fetch_optional(&self.pool)
                .await?;

        if company.is_none() {
            return Err(JobError::Validation(format!(
                "Company handle does not exist: {}",
                job.company_handle
            )));
        }

        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3::NUMERIC, $4)
            RETURNING id, title, salary, equity::TEXT AS equity, company_handle
            "#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(&job.equity)
        .bind(&job.company_handle)
        .fetch_one(&self.pool)
        .await
        .map_err(company_violation)?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    /// Every job, ordered by title
    pub async fn list_all(&self) -> Result<Vec<JobRow>> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, salary, equity::TEXT AS equity, company_handle
            FROM jobs
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Listed {} jobs", rows.len());
        Ok(rows)
    }

    /// Jobs matching every present criterion, ordered by title
    pub async fn list_filtered(&self, filter: &JobFilter) -> Result<Vec<JobRow>> {
        debug!(
            title = ?filter.title,
            min_salary = ?filter.min_salary,
            has_equity = ?filter.has_equity,
            "Filtering jobs"
        );

        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
        push_where_clause(&mut builder, filter);
        builder.push(" ORDER BY title");

        let rows = builder
            .build_query_as::<JobRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!("Filter matched {} jobs", rows.len());
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<JobRow> {
        sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, salary, equity::TEXT AS equity, company_handle
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(JobError::NotFound(id))
    }

    /// Apply a partial update and return the complete updated record
    ///
    /// Absent fields keep their stored values. An empty update is rejected
    /// before any statement is sent.
    pub async fn update(&self, id: i32, update: &JobUpdate) -> Result<JobRow> {
        if update.is_empty() {
            return Err(JobError::Validation("No data to update".to_string()));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE jobs");
        push_set_clause(&mut builder, update);
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", JOB_COLUMNS));

        debug!("Updating job {}: {:?}", id, update);

        builder
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(company_violation)?
            .ok_or(JobError::NotFound(id))
    }

    pub async fn remove(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(JobError::NotFound(id));
        }

        debug!("Job {} deleted", id);
        Ok(())
    }
}

/// A foreign-key rejection on `jobs` can only come from `company_handle`
fn company_violation(err: sqlx::Error) -> JobError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return JobError::Validation("Company handle does not exist".to_string());
        }
    }
    JobError::Database(err)
}
