use skilloncall_service::api;
use skilloncall_service::common::init;
use skilloncall_service::settings::AppSettings;
use skilloncall_service::workers::crons;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        "photo-cache-cron" => crons::photo_cache_cron::serve(settings).await,
        _ => panic!("Unknown app component"),
    }
}
