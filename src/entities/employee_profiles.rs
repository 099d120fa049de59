use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Search projection: one profile joined with its user, selected under
/// explicit aliases so filter joins can never shadow the worker's own columns.
#[derive(Debug, sqlx::FromRow)]
pub struct WorkerRow {
    pub user_id: i64,
    pub profile_id: i64,
    pub display_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub hourly_rate_min: Option<Decimal>,
    pub profile_photo: Option<String>,
    pub profile_created_at: DateTime<Utc>,
}
