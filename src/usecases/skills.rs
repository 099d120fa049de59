use crate::common::context::Context;
use crate::common::error::{ServiceResult, unexpected};
use crate::common::redis_json::Json;
use crate::entities::skills::Skill as SkillEntity;
use crate::models::skills::Skill;
use crate::repositories::skills;
use crate::settings::AppSettings;
use redis::AsyncCommands;
use tracing::warn;

const CACHE_KEY: &str = "skilloncall:skills:all";

/// The skill catalogue is administrator-managed reference data; it is served
/// through a read-through redis cache and a cache failure only ever costs the
/// database round-trip, never the request.
pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<Skill>> {
    if let Some(cached) = read_cache(ctx).await {
        return Ok(cached.into_iter().map(Skill::from).collect());
    }

    let all_skills = match skills::fetch_all(ctx).await {
        Ok(all_skills) => all_skills,
        Err(e) => return unexpected(e),
    };
    write_cache(ctx, &all_skills).await;
    Ok(all_skills.into_iter().map(Skill::from).collect())
}

async fn read_cache<C: Context>(ctx: &C) -> Option<Vec<SkillEntity>> {
    let mut redis = match ctx.redis().await {
        Ok(redis) => redis,
        Err(e) => {
            warn!("Skills cache unavailable: {e}");
            return None;
        }
    };
    match redis.get::<_, Option<Json<Vec<SkillEntity>>>>(CACHE_KEY).await {
        Ok(cached) => cached.map(Json::into_inner),
        Err(e) => {
            warn!("Skills cache read failed: {e}");
            None
        }
    }
}

async fn write_cache<C: Context>(ctx: &C, all_skills: &[SkillEntity]) {
    let Ok(mut redis) = ctx.redis().await else {
        return;
    };
    let ttl = AppSettings::get().skills_cache_ttl.as_secs();
    let result: Result<(), _> = redis
        .set_ex(CACHE_KEY, Json(all_skills), ttl)
        .await;
    if let Err(e) = result {
        warn!("Skills cache write failed: {e}");
    }
}
