use crate::common::context::Context;
use crate::entities::employee_profiles::WorkerRow;
use crate::models::workers::{WorkerFilters, WorkerSort};
use sqlx::{MySql, QueryBuilder};

const TABLE_NAME: &str = "employee_profiles";

const WORKER_FIELDS: &str = "u.id AS user_id, ep.id AS profile_id, ep.display_name, \
     u.first_name, u.last_name, u.email, ep.bio, ep.city, ep.province, \
     ep.hourly_rate_min, ep.profile_photo, ep.created_at AS profile_created_at";

/// Only complete employee profiles are ever searchable, before any filter
/// applies.
const SEARCH_BASE: &str = " FROM employee_profiles ep \
     INNER JOIN users u ON u.id = ep.user_id \
     WHERE ep.is_profile_complete IS TRUE AND u.role = 'employee'";

/// A single worker through the same eligibility gate as search, so a profile
/// that cannot be listed cannot be fetched by id either.
pub async fn fetch_worker_by_user_id<C: Context>(
    ctx: &C,
    user_id: i64,
) -> sqlx::Result<WorkerRow> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        WORKER_FIELDS,
        SEARCH_BASE,
        " AND u.id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

pub async fn search_page<C: Context>(
    ctx: &C,
    filters: &WorkerFilters,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<WorkerRow>> {
    let mut query: QueryBuilder<'_, MySql> =
        QueryBuilder::new(const_str::concat!("SELECT ", WORKER_FIELDS, SEARCH_BASE));
    push_filters(&mut query, filters);
    push_order(&mut query, filters.sort);
    query.push(" LIMIT ");
    query.push_bind(limit);
    query.push(" OFFSET ");
    query.push_bind(offset);
    query.build_query_as().fetch_all(ctx.db()).await
}

pub async fn search_count<C: Context>(ctx: &C, filters: &WorkerFilters) -> sqlx::Result<i64> {
    let mut query: QueryBuilder<'_, MySql> =
        QueryBuilder::new(const_str::concat!("SELECT COUNT(*)", SEARCH_BASE));
    push_filters(&mut query, filters);
    query.build_query_scalar().fetch_one(ctx.db()).await
}

/// Every stored photo path of a listable profile, for the cache rebuild cron.
pub async fn fetch_photo_paths<C: Context>(ctx: &C) -> sqlx::Result<Vec<String>> {
    const QUERY: &str = const_str::concat!(
        "SELECT profile_photo FROM ",
        TABLE_NAME,
        " WHERE is_profile_complete IS TRUE AND profile_photo IS NOT NULL"
    );
    sqlx::query_scalar(QUERY).fetch_all(ctx.db()).await
}

/// AND across filter categories, OR within one. Skill and availability
/// predicates go through EXISTS so the page never contains join-duplicated
/// rows.
fn push_filters(query: &mut QueryBuilder<'_, MySql>, filters: &WorkerFilters) {
    if let Some(term) = filters.search_term() {
        let pattern = like_pattern(term);
        query.push(" AND (ep.display_name LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR ep.bio LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR u.first_name LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR u.last_name LIKE ");
        query.push_bind(pattern.clone());
        query.push(
            " OR EXISTS (SELECT 1 FROM employee_skills es \
             INNER JOIN skills s ON s.id = es.skill_id \
             WHERE es.employee_profile_id = ep.id AND s.name LIKE ",
        );
        query.push_bind(pattern);
        query.push("))");
    }

    if let Some(skill_ids) = filters.skill_ids() {
        query.push(
            " AND EXISTS (SELECT 1 FROM employee_skills es \
             WHERE es.employee_profile_id = ep.id AND es.skill_id IN (",
        );
        let mut separated = query.separated(", ");
        for skill_id in skill_ids {
            separated.push_bind(*skill_id);
        }
        query.push("))");
    }

    if let Some(term) = filters.location_term() {
        let pattern = like_pattern(term);
        query.push(" AND (ep.city LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR ep.province LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    if let Some(min_rate) = filters.min_rate {
        query.push(" AND ep.hourly_rate_min >= ");
        query.push_bind(min_rate);
    }

    if let Some(max_rate) = filters.max_rate {
        query.push(" AND ep.hourly_rate_min <= ");
        query.push_bind(max_rate);
    }

    if filters.only_available() {
        query.push(
            " AND EXISTS (SELECT 1 FROM availabilities a \
             WHERE a.employee_profile_id = ep.id AND a.is_available IS TRUE)",
        );
    }
}

/// The sort key always targets ep's own columns so filter joins cannot make
/// it ambiguous; ep.id breaks ties to keep pages stable.
fn push_order(query: &mut QueryBuilder<'_, MySql>, sort: WorkerSort) {
    let order = match sort {
        WorkerSort::Newest => " ORDER BY ep.created_at DESC, ep.id DESC",
        WorkerSort::RateHigh => " ORDER BY ep.hourly_rate_min DESC, ep.id DESC",
        WorkerSort::RateLow => " ORDER BY ep.hourly_rate_min ASC, ep.id ASC",
    };
    query.push(order);
}

fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workers::SkillIds;
    use rust_decimal::Decimal;

    fn search_sql(filters: &WorkerFilters) -> String {
        let mut query: QueryBuilder<'_, MySql> =
            QueryBuilder::new(const_str::concat!("SELECT ", WORKER_FIELDS, SEARCH_BASE));
        push_filters(&mut query, filters);
        push_order(&mut query, filters.sort);
        query.sql().to_string()
    }

    #[test]
    fn bare_search_only_gates_on_completeness() {
        let sql = search_sql(&WorkerFilters::default());
        assert!(sql.contains("ep.is_profile_complete IS TRUE"));
        assert!(sql.contains("ORDER BY ep.created_at DESC"));
        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains("EXISTS"));
    }

    #[test]
    fn all_filter_categories_compose_with_and() {
        let filters = WorkerFilters {
            search: Some("weld".into()),
            skills: Some(SkillIds(vec![1, 2])),
            location: Some("Toronto".into()),
            min_rate: Some(Decimal::new(20, 0)),
            max_rate: Some(Decimal::new(40, 0)),
            availability: Some("available".into()),
            ..Default::default()
        };
        let sql = search_sql(&filters);
        assert!(sql.contains("ep.display_name LIKE"));
        assert!(sql.contains("s.name LIKE"));
        assert!(sql.contains("es.skill_id IN (?, ?)"));
        assert!(sql.contains("ep.city LIKE"));
        assert!(sql.contains("ep.hourly_rate_min >= "));
        assert!(sql.contains("ep.hourly_rate_min <= "));
        assert!(sql.contains("a.is_available IS TRUE"));
    }

    #[test]
    fn rate_sorts_order_by_profile_rate_column() {
        let high = WorkerFilters {
            sort: WorkerSort::RateHigh,
            ..Default::default()
        };
        let low = WorkerFilters {
            sort: WorkerSort::RateLow,
            ..Default::default()
        };
        assert!(search_sql(&high).contains("ORDER BY ep.hourly_rate_min DESC"));
        assert!(search_sql(&low).contains("ORDER BY ep.hourly_rate_min ASC"));
    }

    #[test]
    fn empty_skill_filter_adds_no_clause() {
        let filters = WorkerFilters {
            skills: Some(SkillIds(vec![])),
            ..Default::default()
        };
        assert!(!search_sql(&filters).contains("es.skill_id IN"));
    }
}
