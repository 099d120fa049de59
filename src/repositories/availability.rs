use crate::common::context::Context;
use crate::entities::availability::Availability;

const TABLE_NAME: &str = "availabilities";
const READ_FIELDS: &str =
    "id, employee_profile_id, day_of_week, start_time, end_time, is_available";

pub async fn fetch_for_profile<C: Context>(
    ctx: &C,
    profile_id: i64,
) -> sqlx::Result<Vec<Availability>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE employee_profile_id = ? ORDER BY day_of_week"
    );
    sqlx::query_as(QUERY)
        .bind(profile_id)
        .fetch_all(ctx.db())
        .await
}
