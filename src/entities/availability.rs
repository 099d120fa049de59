use chrono::NaiveTime;

/// At most one row per (profile, day) in the active dataset.
#[derive(Debug, sqlx::FromRow)]
pub struct Availability {
    pub id: i64,
    pub employee_profile_id: i64,
    pub day_of_week: i8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}
