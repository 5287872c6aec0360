use actix_web::{
    HttpResponse, delete, get, patch, post,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::{Json, Query};

use crate::error::JobError;
use super::dto::{DeletedResponse, JobResponse, JobsResponse};
use super::models::{JobFilter, JobUpdateRequest, NewJob};
use super::service::JobService;

#[post("")]
async fn create_job(
    service: Data<JobService>,
    job: Json<NewJob>,
) -> Result<HttpResponse, JobError> {
    let job = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(JobResponse { job }))
}

/// GET /jobs?title=&minSalary=&hasEquity=
#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    filter: Query<JobFilter>,
) -> Result<HttpResponse, JobError> {
    let jobs = service.list_jobs(&filter).await?;
    Ok(HttpResponse::Ok().json(JobsResponse { jobs }))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    id: Path<i32>,
) -> Result<HttpResponse, JobError> {
    let job = service.get_job(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[patch("/{id}")]
async fn update_job(
    service: Data<JobService>,
    id: Path<i32>,
    update: Json<JobUpdateRequest>,
) -> Result<HttpResponse, JobError> {
    let job = service
        .update_job(id.into_inner(), update.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    id: Path<i32>,
) -> Result<HttpResponse, JobError> {
    let id = id.into_inner();
    service.delete_job(id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse { deleted: id }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/jobs")
            .service(create_job)
            .service(list_jobs)
            .service(get_job)
            .service(update_job)
            .service(delete_job),
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::api::validation;

    /// Service over a pool that never connects; requests that reach the
    /// database would fail with 500, so a 400 proves early rejection.
    fn offline_service() -> Data<JobService> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("postgres://invalid@127.0.0.1:1/none")
            .unwrap();
        Data::new(JobService::new(pool))
    }

    async fn send(req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(offline_service())
                .app_data(validation::json_config())
                .app_data(validation::query_config())
                .configure(job_config),
        )
        .await;
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, body)
    }

    #[actix_web::test]
    async fn empty_patch_is_bad_request() {
        let (status, body) = send(
            test::TestRequest::patch()
                .uri("/jobs/1")
                .set_json(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["message"], "No data to update");
    }

    #[actix_web::test]
    async fn patch_cannot_change_company() {
        let (status, _) = send(
            test::TestRequest::patch()
                .uri("/jobs/1")
                .set_json(json!({ "companyHandle": "c2" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_rejects_out_of_range_equity() {
        let (status, body) = send(
            test::TestRequest::post().uri("/jobs").set_json(json!({
                "title": "new",
                "salary": 10,
                "equity": "1.5",
                "companyHandle": "c1"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"]["equity"].is_object());
    }

    #[actix_web::test]
    async fn create_requires_company_handle() {
        let (status, _) = send(
            test::TestRequest::post()
                .uri("/jobs")
                .set_json(json!({ "title": "new" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn list_rejects_unknown_filter() {
        let (status, _) = send(test::TestRequest::get().uri("/jobs?handle=c1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn list_rejects_negative_min_salary() {
        let (status, body) = send(test::TestRequest::get().uri("/jobs?minSalary=-5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[actix_web::test]
    async fn list_rejects_non_boolean_equity_flag() {
        let (status, _) = send(test::TestRequest::get().uri("/jobs?hasEquity=maybe")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
