use crate::common::context::Context;
use crate::entities::skills::{ProfileSkillRow, Skill};
use sqlx::{MySql, QueryBuilder};

const TABLE_NAME: &str = "skills";
const READ_FIELDS: &str = "id, name, category";

pub async fn fetch_all<C: Context>(ctx: &C) -> sqlx::Result<Vec<Skill>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " ORDER BY category, name"
    );
    sqlx::query_as(QUERY).fetch_all(ctx.db()).await
}

/// Skills for a whole page of profiles in one query, join table proficiency
/// included.
pub async fn fetch_for_profiles<C: Context>(
    ctx: &C,
    profile_ids: &[i64],
) -> sqlx::Result<Vec<ProfileSkillRow>> {
    if profile_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query: QueryBuilder<'_, MySql> = QueryBuilder::new(
        "SELECT es.employee_profile_id, s.id, s.name, s.category, es.proficiency_level \
         FROM employee_skills es \
         INNER JOIN skills s ON s.id = es.skill_id \
         WHERE es.employee_profile_id IN (",
    );
    let mut separated = query.separated(", ");
    for profile_id in profile_ids {
        separated.push_bind(*profile_id);
    }
    query.push(") ORDER BY s.name");
    query.build_query_as().fetch_all(ctx.db()).await
}
