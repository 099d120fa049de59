use crate::common::context::Context;
use crate::entities::messages::{ConversationHead, Message};
use crate::entities::users::User;

const TABLE_NAME: &str = "messages";
const READ_FIELDS: &str =
    "id, sender_id, receiver_id, sender_role, receiver_role, content, is_read, created_at";

/// One row per counterpart: the latest message of each pair the employer
/// participates in, with the employer-scoped unread count attached. Replaces
/// the per-counterpart round-trips a naive listing would issue.
pub async fn fetch_conversation_heads<C: Context>(
    ctx: &C,
    employer_id: i64,
) -> sqlx::Result<Vec<ConversationHead>> {
    const QUERY: &str = "\
        SELECT heads.counterpart_id, \
               heads.id AS last_message_id, \
               heads.content AS last_content, \
               heads.sender_id AS last_sender_id, \
               heads.created_at AS last_created_at, \
               COALESCE(unread.unread_count, 0) AS unread_count \
        FROM ( \
            SELECT m.id, m.content, m.sender_id, m.created_at, \
                   IF(m.sender_id = ?, m.receiver_id, m.sender_id) AS counterpart_id, \
                   ROW_NUMBER() OVER ( \
                       PARTITION BY IF(m.sender_id = ?, m.receiver_id, m.sender_id) \
                       ORDER BY m.created_at DESC, m.id DESC \
                   ) AS recency \
            FROM messages m \
            WHERE (m.sender_id = ? OR m.receiver_id = ?) \
              AND (m.sender_role = 'employer' OR m.receiver_role = 'employer') \
        ) heads \
        LEFT JOIN ( \
            SELECT sender_id, COUNT(*) AS unread_count \
            FROM messages \
            WHERE receiver_id = ? AND is_read IS FALSE \
            GROUP BY sender_id \
        ) unread ON unread.sender_id = heads.counterpart_id \
        WHERE heads.recency = 1";
    sqlx::query_as(QUERY)
        .bind(employer_id)
        .bind(employer_id)
        .bind(employer_id)
        .bind(employer_id)
        .bind(employer_id)
        .fetch_all(ctx.db())
        .await
}

/// Full history between a pair, oldest first, regardless of direction.
pub async fn fetch_between<C: Context>(
    ctx: &C,
    employer_id: i64,
    employee_id: i64,
) -> sqlx::Result<Vec<Message>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE (sender_id = ? AND receiver_id = ?) \
          OR (sender_id = ? AND receiver_id = ?) \
          ORDER BY created_at ASC, id ASC"
    );
    sqlx::query_as(QUERY)
        .bind(employer_id)
        .bind(employee_id)
        .bind(employee_id)
        .bind(employer_id)
        .fetch_all(ctx.db())
        .await
}

pub async fn send<C: Context>(
    ctx: &C,
    sender: &User,
    receiver: &User,
    content: &str,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (sender_id, receiver_id, sender_role, receiver_role, content, is_read) \
          VALUES (?, ?, ?, ?, ?, FALSE)"
    );
    sqlx::query(QUERY)
        .bind(sender.id)
        .bind(receiver.id)
        .bind(sender.role)
        .bind(receiver.role)
        .bind(content)
        .execute(ctx.db())
        .await?;
    Ok(())
}

/// Flag flip, idempotent under concurrent calls.
pub async fn mark_read<C: Context>(
    ctx: &C,
    employer_id: i64,
    employee_id: i64,
) -> sqlx::Result<u64> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET is_read = TRUE WHERE receiver_id = ? AND sender_id = ? AND is_read IS FALSE"
    );
    let result = sqlx::query(QUERY)
        .bind(employer_id)
        .bind(employee_id)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected())
}

pub async fn unread_total<C: Context>(ctx: &C, receiver_id: i64) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "SELECT COUNT(*) FROM ",
        TABLE_NAME,
        " WHERE receiver_id = ? AND is_read IS FALSE"
    );
    sqlx::query_scalar(QUERY)
        .bind(receiver_id)
        .fetch_one(ctx.db())
        .await
}
