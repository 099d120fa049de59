use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::skills::ProfileSkillRow;
use crate::models::Paged;
use crate::models::workers::{
    AvailabilitySlot, SkillSummary, Worker, WorkerDetail, WorkerFilters,
};
use crate::repositories::{availability, employee_profiles, skills};
use crate::usecases::photos;
use hashbrown::HashMap;
use tracing::debug;

pub const SEARCH_PAGE_SIZE: u32 = 12;

pub async fn search<C: Context>(
    ctx: &C,
    filters: &WorkerFilters,
) -> ServiceResult<Paged<Worker>> {
    let page = filters.page();
    let offset = i64::from(page - 1) * i64::from(SEARCH_PAGE_SIZE);

    let total = match employee_profiles::search_count(ctx, filters).await {
        Ok(total) => total,
        Err(e) => return unexpected(e),
    };
    let rows = match employee_profiles::search_page(
        ctx,
        filters,
        i64::from(SEARCH_PAGE_SIZE),
        offset,
    )
    .await
    {
        Ok(rows) => rows,
        Err(e) => return unexpected(e),
    };
    debug!(total, page, returned = rows.len(), "Worker search");

    let profile_ids: Vec<i64> = rows.iter().map(|row| row.profile_id).collect();
    let mut skills_by_profile =
        group_by_profile(skills::fetch_for_profiles(ctx, &profile_ids).await?);

    let raw_photos: Vec<Option<String>> =
        rows.iter().map(|row| row.profile_photo.clone()).collect();
    let resolved_photos = photos::resolve_batch(ctx, &raw_photos).await;

    let workers = rows
        .into_iter()
        .zip(resolved_photos)
        .map(|(row, photo)| {
            let worker_skills = skills_by_profile.remove(&row.profile_id).unwrap_or_default();
            Worker::from_row(row, worker_skills, photo)
        })
        .collect();
    Ok(Paged::new(total, page, SEARCH_PAGE_SIZE, workers))
}

pub async fn fetch_one<C: Context>(ctx: &C, user_id: i64) -> ServiceResult<WorkerDetail> {
    let row = match employee_profiles::fetch_worker_by_user_id(ctx, user_id).await {
        Ok(row) => row,
        Err(sqlx::Error::RowNotFound) => return Err(AppError::WorkersNotFound),
        Err(e) => return unexpected(e),
    };

    let worker_skills: Vec<SkillSummary> = skills::fetch_for_profiles(ctx, &[row.profile_id])
        .await?
        .into_iter()
        .map(SkillSummary::from)
        .collect();
    let availability: Vec<AvailabilitySlot> =
        availability::fetch_for_profile(ctx, row.profile_id)
            .await?
            .into_iter()
            .map(AvailabilitySlot::from)
            .collect();

    let raw_photo = [row.profile_photo.clone()];
    let photo = photos::resolve_batch(ctx, &raw_photo)
        .await
        .pop()
        .flatten();

    let email = row.email.clone();
    let worker = Worker::from_row(row, worker_skills, photo);
    Ok(WorkerDetail {
        worker,
        email,
        availability,
    })
}

fn group_by_profile(rows: Vec<ProfileSkillRow>) -> HashMap<i64, Vec<SkillSummary>> {
    let mut grouped: HashMap<i64, Vec<SkillSummary>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.employee_profile_id)
            .or_default()
            .push(SkillSummary::from(row));
    }
    grouped
}
