use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::users::UserRole;
use crate::models::conversations::{
    ConversationEmployee, ConversationFilters, ConversationMessage, ConversationSummary,
};
use crate::repositories::messages;
use crate::repositories::users as user_rows;
use crate::usecases::{photos, users};
use hashbrown::HashMap;
use tracing::{debug, warn};

/// One summary per counterpart the employer has message traffic with, newest
/// activity first. Counterparts that no longer resolve to an employee account
/// are dropped without surfacing an error.
pub async fn list<C: Context>(
    ctx: &C,
    employer_id: i64,
    filters: &ConversationFilters,
) -> ServiceResult<Vec<ConversationSummary>> {
    let employer = users::fetch_one(ctx, employer_id).await?;
    if employer.role != UserRole::Employer {
        return Err(AppError::UsersNotAnEmployer);
    }

    let heads = match messages::fetch_conversation_heads(ctx, employer_id).await {
        Ok(heads) => heads,
        Err(e) => return unexpected(e),
    };
    let counterpart_ids: Vec<i64> = heads.iter().map(|head| head.counterpart_id).collect();
    let counterpart_rows = match user_rows::fetch_counterparts(ctx, &counterpart_ids).await {
        Ok(rows) => rows,
        Err(e) => return unexpected(e),
    };

    let raw_photos: Vec<Option<String>> = counterpart_rows
        .iter()
        .map(|row| row.profile_photo.clone())
        .collect();
    let resolved_photos = photos::resolve_batch(ctx, &raw_photos).await;
    let counterparts: HashMap<i64, _> = counterpart_rows
        .into_iter()
        .zip(resolved_photos)
        .map(|(row, photo)| (row.user_id, (row, photo)))
        .collect();

    let mut summaries = Vec::with_capacity(heads.len());
    for head in &heads {
        let Some((row, photo)) = counterparts.get(&head.counterpart_id) else {
            warn!(
                counterpart_id = head.counterpart_id,
                "Dropping conversation with an unresolvable counterpart"
            );
            continue;
        };
        let employee = ConversationEmployee::from_row(row, photo.clone());
        let summary =
            ConversationSummary::from_head(employer_id, head, employee, row.user_created_at);
        if summary.matches(filters) {
            summaries.push(summary);
        }
    }
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    debug!(
        employer_id,
        conversations = summaries.len(),
        "Aggregated conversation list"
    );
    Ok(summaries)
}

/// Full chronological history with the given employee. Fetching a
/// conversation marks everything they sent as read; there is no peek mode.
pub async fn fetch_history<C: Context>(
    ctx: &C,
    employer_id: i64,
    employee_id: i64,
) -> ServiceResult<Vec<ConversationMessage>> {
    let employer = users::fetch_one(ctx, employer_id).await?;
    if employer.role != UserRole::Employer {
        return Err(AppError::UsersNotAnEmployer);
    }
    let employee = users::fetch_one(ctx, employee_id).await?;
    if employee.role != UserRole::Employee {
        return Err(AppError::UsersNotAnEmployee);
    }

    let history = match messages::fetch_between(ctx, employer_id, employee_id).await {
        Ok(history) => history,
        Err(e) => return unexpected(e),
    };
    mark_read(ctx, employer_id, employee_id).await?;

    Ok(history
        .into_iter()
        .map(|message| ConversationMessage::from_entity(message, employer_id))
        .collect())
}

pub async fn send<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
    content: &str,
) -> ServiceResult<()> {
    if sender_id == receiver_id {
        return Err(AppError::MessagesSelfRecipient);
    }
    let sender = users::fetch_one(ctx, sender_id).await?;
    let receiver = users::fetch_one(ctx, receiver_id).await?;
    match messages::send(ctx, &sender, &receiver, content).await {
        Ok(()) => Ok(()),
        Err(e) => unexpected(e),
    }
}

pub async fn mark_read<C: Context>(
    ctx: &C,
    employer_id: i64,
    employee_id: i64,
) -> ServiceResult<u64> {
    match messages::mark_read(ctx, employer_id, employee_id).await {
        Ok(marked) => {
            if marked > 0 {
                debug!(employer_id, employee_id, marked, "Marked messages read");
            }
            Ok(marked)
        }
        Err(e) => unexpected(e),
    }
}

pub async fn unread_total<C: Context>(ctx: &C, employer_id: i64) -> ServiceResult<i64> {
    let employer = users::fetch_one(ctx, employer_id).await?;
    if employer.role != UserRole::Employer {
        return Err(AppError::UsersNotAnEmployer);
    }
    match messages::unread_total(ctx, employer_id).await {
        Ok(unread) => Ok(unread),
        Err(e) => unexpected(e),
    }
}
