use serde::Serialize;
use crate::db::models::JobRow;

/// Response carrying a single job
#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}

/// Response for job listings
#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobRow>,
}

/// Response for a deleted job
#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}
