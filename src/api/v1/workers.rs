use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::Paged;
use crate::models::workers::{Worker, WorkerDetail, WorkerFilters};
use crate::usecases::workers;
use axum::Json;
use axum::extract::{Path, Query};

pub async fn search(
    ctx: RequestContext,
    Query(filters): Query<WorkerFilters>,
) -> ServiceResponse<Paged<Worker>> {
    let results = workers::search(&ctx, &filters).await?;
    Ok(Json(results))
}

pub async fn fetch_one(
    ctx: RequestContext,
    Path(user_id): Path<i64>,
) -> ServiceResponse<WorkerDetail> {
    let worker = workers::fetch_one(&ctx, user_id).await?;
    Ok(Json(worker))
}
