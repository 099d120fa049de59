use crate::common::context::Context;
use crate::entities::messages::CounterpartRow;
use crate::entities::users::{User, UserRole};
use sqlx::{MySql, QueryBuilder};

const TABLE_NAME: &str = "users";
const READ_FIELDS: &str = "id, first_name, last_name, email, role, created_at";

pub async fn fetch_one<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<User> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

/// Loads conversation counterparts in one pass: employee users joined with
/// their (possibly missing) profile. Ids that do not resolve to an employee
/// are simply absent from the result.
pub async fn fetch_counterparts<C: Context>(
    ctx: &C,
    user_ids: &[i64],
) -> sqlx::Result<Vec<CounterpartRow>> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query: QueryBuilder<'_, MySql> = QueryBuilder::new(
        "SELECT u.id AS user_id, u.first_name, u.last_name, u.email, \
         ep.display_name, ep.profile_photo, u.created_at AS user_created_at \
         FROM users u \
         LEFT JOIN employee_profiles ep ON ep.user_id = u.id \
         WHERE u.role = ",
    );
    query.push_bind(UserRole::Employee);
    query.push(" AND u.id IN (");
    let mut separated = query.separated(", ");
    for user_id in user_ids {
        separated.push_bind(*user_id);
    }
    query.push(")");
    query.build_query_as().fetch_all(ctx.db()).await
}
