use crate::entities::users::UserRole;
use chrono::{DateTime, Utc};

#[derive(Debug, sqlx::FromRow)]
pub struct Message {
    pub id: u64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub sender_role: UserRole,
    pub receiver_role: UserRole,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// One row per counterpart the employer has traffic with: the newest message
/// of the pair plus the employer-scoped unread count.
#[derive(Debug, sqlx::FromRow)]
pub struct ConversationHead {
    pub counterpart_id: i64,
    pub last_message_id: u64,
    pub last_content: String,
    pub last_sender_id: i64,
    pub last_created_at: DateTime<Utc>,
    pub unread_count: i64,
}

/// Counterpart identity as shown in a conversation list: the user joined with
/// whatever profile fields the summary needs. The profile join is LEFT so a
/// counterpart without an onboarded profile still lists.
#[derive(Debug, sqlx::FromRow)]
pub struct CounterpartRow {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: Option<String>,
    pub profile_photo: Option<String>,
    pub user_created_at: DateTime<Utc>,
}
