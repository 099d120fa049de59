use crate::common::context::Context;
use crate::common::error::ServiceResult;
use crate::models::workers::normalize_photo_path;
use crate::repositories::employee_profiles;
use hashbrown::HashSet;
use redis::AsyncCommands;
use tracing::warn;

const KNOWN_GOOD_KEY: &str = "skilloncall:photos:known_good";
const REBUILD_KEY: &str = "skilloncall:photos:known_good:rebuild";

/// Resolves the stored photo paths of one result page. Normalization is pure;
/// existence goes through the known-good set first so only cache misses touch
/// the file store. A photo that cannot be verified resolves to None, never to
/// an error.
pub async fn resolve_batch<C: Context>(
    ctx: &C,
    raw_paths: &[Option<String>],
) -> Vec<Option<String>> {
    let normalized: Vec<Option<String>> = raw_paths
        .iter()
        .map(|raw| raw.as_deref().and_then(normalize_photo_path))
        .collect();

    let mut candidates: Vec<&str> = normalized
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    candidates.sort_unstable();
    if candidates.is_empty() {
        return normalized;
    }

    let mut verified = fetch_known_good(ctx, &candidates).await;
    let mut newly_verified = Vec::new();
    for path in &candidates {
        if verified.contains(*path) {
            continue;
        }
        if ctx.storage().exists(path).await {
            verified.insert((*path).to_string());
            newly_verified.push((*path).to_string());
        }
    }
    remember_known_good(ctx, &newly_verified).await;

    normalized
        .into_iter()
        .map(|path| path.filter(|path| verified.contains(path.as_str())))
        .collect()
}

async fn fetch_known_good<C: Context>(ctx: &C, paths: &[&str]) -> HashSet<String> {
    let mut redis = match ctx.redis().await {
        Ok(redis) => redis,
        Err(e) => {
            warn!("Photo cache unavailable, probing storage directly: {e}");
            return HashSet::new();
        }
    };
    let memberships: Vec<bool> = match redis.smismember(KNOWN_GOOD_KEY, paths).await {
        Ok(memberships) => memberships,
        Err(e) => {
            warn!("Photo cache lookup failed, probing storage directly: {e}");
            return HashSet::new();
        }
    };
    paths
        .iter()
        .zip(memberships)
        .filter_map(|(path, known)| known.then(|| (*path).to_string()))
        .collect()
}

async fn remember_known_good<C: Context>(ctx: &C, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    let Ok(mut redis) = ctx.redis().await else {
        return;
    };
    let result: Result<(), _> = redis.sadd(KNOWN_GOOD_KEY, paths).await;
    if let Err(e) = result {
        warn!("Failed to extend the photo cache: {e}");
    }
}

#[derive(Debug)]
pub struct RebuildSummary {
    pub stored: usize,
    pub verified: usize,
}

/// Full rebuild for the cron: verify every stored path of a listable profile
/// and swap the set in atomically, so readers never see a half-built index.
pub async fn rebuild_known_good<C: Context>(ctx: &C) -> ServiceResult<RebuildSummary> {
    let raw_paths = employee_profiles::fetch_photo_paths(ctx).await?;

    let mut seen = HashSet::new();
    let mut verified = Vec::new();
    for raw in &raw_paths {
        let Some(path) = normalize_photo_path(raw) else {
            continue;
        };
        if !seen.insert(path.clone()) {
            continue;
        }
        if ctx.storage().exists(&path).await {
            verified.push(path);
        }
    }

    let mut redis = ctx.redis().await?;
    let mut pipe = redis::pipe();
    pipe.del(REBUILD_KEY).ignore();
    if verified.is_empty() {
        pipe.del(KNOWN_GOOD_KEY).ignore();
    } else {
        pipe.sadd(REBUILD_KEY, &verified).ignore();
        pipe.cmd("RENAME").arg(REBUILD_KEY).arg(KNOWN_GOOD_KEY).ignore();
    }
    let _: () = pipe.query_async(&mut *redis).await?;

    Ok(RebuildSummary {
        stored: raw_paths.len(),
        verified: verified.len(),
    })
}
