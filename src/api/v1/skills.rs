use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::skills::Skill;
use crate::usecases::skills;
use axum::Json;

pub async fn fetch_all(ctx: RequestContext) -> ServiceResponse<Vec<Skill>> {
    let all_skills = skills::fetch_all(&ctx).await?;
    Ok(Json(all_skills))
}
