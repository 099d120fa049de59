use crate::common::context::Context;
use crate::common::error::ServiceResult;
use crate::usecases::photos;
use tracing::info;

/// Re-verifies every stored profile photo against the file store and swaps
/// the known-good index, so the search path stays on the cache-hit fast path.
pub async fn refresh_photo_cache<C: Context>(ctx: &C) -> ServiceResult<()> {
    let summary = photos::rebuild_known_good(ctx).await?;
    info!(
        stored = summary.stored,
        verified = summary.verified,
        "Rebuilt the known-good photo index"
    );
    Ok(())
}
