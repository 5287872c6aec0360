use sqlx::{Pool, Postgres};
use tracing::info;

use crate::db::job_repository::JobRepository;
use crate::db::models::JobRow;
use crate::db::sql::JobUpdate;
use crate::error::Result;
use super::models::{JobFilter, JobUpdateRequest, NewJob};

/// Job service sitting between the HTTP handlers and the repository
#[derive(Clone)]
pub struct JobService {
    repo: JobRepository,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            repo: JobRepository::new(pool),
        }
    }

    pub async fn create_job(&self, job: &NewJob) -> Result<JobRow> {
        info!("Service: Creating job with title={} for company={}", job.title, job.company_handle);

        let row = self.repo.create(job).await?;

        info!("Service: Job created successfully with id={}", row.id);
        Ok(row)
    }

    /// List jobs, narrowing by whatever criteria are present
    ///
    /// A filter with nothing to narrow takes the unconditional query.
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRow>> {
        let jobs = if filter.is_empty() {
            self.repo.list_all().await?
        } else {
            self.repo.list_filtered(filter).await?
        };

        info!("Service: Returning {} jobs", jobs.len());
        Ok(jobs)
    }

    pub async fn get_job(&self, id: i32) -> Result<JobRow> {
        self.repo.get(id).await
    }

    /// Partial update; the empty case is refused by the repository before
    /// any statement runs.
    pub async fn update_job(&self, id: i32, request: JobUpdateRequest) -> Result<JobRow> {
        let update = JobUpdate::from(request);
        info!("Service: Updating job {}", id);

        let row = self.repo.update(id, &update).await?;

        info!("Service: Job {} updated", id);
        Ok(row)
    }

    pub async fn delete_job(&self, id: i32) -> Result<()> {
        self.repo.remove(id).await?;
        info!("Service: Job {} deleted", id);
        Ok(())
    }
}
