pub mod tasks;

use crate::common::init;
use crate::cron_tasks;
use crate::settings::AppSettings;
use tasks::refresh_photo_cache::refresh_photo_cache;

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let ctx = init::initialize_state(settings).await?;
    cron_tasks! {
        &ctx,
        refresh_photo_cache,
    }
    Ok(())
}
