use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::conversations::{
    ConversationMessage, ConversationSummary, EmployerArgs, ListConversationsArgs,
    MarkReadResponse, SendMessageArgs, UnreadTotalResponse,
};
use crate::usecases::conversations;
use axum::Json;
use axum::extract::{Path, Query};

pub async fn list(
    ctx: RequestContext,
    Query(args): Query<ListConversationsArgs>,
) -> ServiceResponse<Vec<ConversationSummary>> {
    let filters = args.filters();
    let summaries = conversations::list(&ctx, args.employer_id, &filters).await?;
    Ok(Json(summaries))
}

pub async fn fetch_history(
    ctx: RequestContext,
    Path(employee_id): Path<i64>,
    Query(args): Query<EmployerArgs>,
) -> ServiceResponse<Vec<ConversationMessage>> {
    let history = conversations::fetch_history(&ctx, args.employer_id, employee_id).await?;
    Ok(Json(history))
}

pub async fn mark_read(
    ctx: RequestContext,
    Path(employee_id): Path<i64>,
    Query(args): Query<EmployerArgs>,
) -> ServiceResponse<MarkReadResponse> {
    let marked = conversations::mark_read(&ctx, args.employer_id, employee_id).await?;
    Ok(Json(MarkReadResponse { marked }))
}

pub async fn unread_total(
    ctx: RequestContext,
    Query(args): Query<EmployerArgs>,
) -> ServiceResponse<UnreadTotalResponse> {
    let unread = conversations::unread_total(&ctx, args.employer_id).await?;
    Ok(Json(UnreadTotalResponse { unread }))
}

pub async fn send(
    ctx: RequestContext,
    Json(args): Json<SendMessageArgs>,
) -> ServiceResponse<()> {
    conversations::send(&ctx, args.sender_id, args.receiver_id, &args.content).await?;
    Ok(Json(()))
}
