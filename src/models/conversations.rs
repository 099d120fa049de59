use crate::entities::messages::{ConversationHead, CounterpartRow, Message};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone)]
pub struct ConversationFilters {
    pub search: Option<String>,
    pub employee: Option<i64>,
}

impl ConversationFilters {
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationEmployee {
    pub user_id: i64,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_photo: Option<String>,
}

impl ConversationEmployee {
    pub fn from_row(row: &CounterpartRow, profile_photo: Option<String>) -> Self {
        let display_name = row
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("{} {}", row.first_name, row.last_name));
        Self {
            user_id: row.user_id,
            display_name,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            profile_photo,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LastMessage {
    pub id: u64,
    pub content: String,
    pub sender_id: i64,
    pub is_from_employer: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConversationSummary {
    pub employee: ConversationEmployee,
    pub last_message: Option<LastMessage>,
    pub unread_count: i64,
    pub updated_at: DateTime<Utc>,
}

impl ConversationSummary {
    /// A pair with no message yet still lists, keyed by when the employee
    /// joined, which orders it after any live conversation.
    pub fn new(
        employee: ConversationEmployee,
        last_message: Option<LastMessage>,
        unread_count: i64,
        employee_created_at: DateTime<Utc>,
    ) -> Self {
        let updated_at = last_message
            .as_ref()
            .map_or(employee_created_at, |message| message.created_at);
        Self {
            employee,
            last_message,
            unread_count,
            updated_at,
        }
    }

    pub fn from_head(
        employer_id: i64,
        head: &ConversationHead,
        employee: ConversationEmployee,
        employee_created_at: DateTime<Utc>,
    ) -> Self {
        let last_message = LastMessage {
            id: head.last_message_id,
            content: head.last_content.clone(),
            sender_id: head.last_sender_id,
            is_from_employer: head.last_sender_id == employer_id,
            created_at: head.last_created_at,
        };
        Self::new(
            employee,
            Some(last_message),
            head.unread_count,
            employee_created_at,
        )
    }

    pub fn matches(&self, filters: &ConversationFilters) -> bool {
        if let Some(employee_id) = filters.employee
            && self.employee.user_id != employee_id
        {
            return false;
        }
        match filters.search_term() {
            None => true,
            Some(term) => {
                contains_ci(&self.employee.display_name, term)
                    || contains_ci(&self.employee.first_name, term)
                    || contains_ci(&self.employee.last_name, term)
                    || contains_ci(&self.employee.email, term)
                    || self
                        .last_message
                        .as_ref()
                        .is_some_and(|message| contains_ci(&message.content, term))
            }
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Serialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub is_from_employer: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn from_entity(message: Message, employer_id: i64) -> Self {
        Self {
            id: message.id,
            is_from_employer: message.sender_id == employer_id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct ListConversationsArgs {
    pub employer_id: i64,
    pub search: Option<String>,
    pub employee: Option<i64>,
}

impl ListConversationsArgs {
    pub fn filters(&self) -> ConversationFilters {
        ConversationFilters {
            search: self.search.clone(),
            employee: self.employee,
        }
    }
}

#[derive(Deserialize)]
pub struct EmployerArgs {
    pub employer_id: i64,
}

#[derive(Deserialize)]
pub struct SendMessageArgs {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub marked: u64,
}

#[derive(Serialize)]
pub struct UnreadTotalResponse {
    pub unread: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn employee(user_id: i64, name: (&str, &str), email: &str) -> ConversationEmployee {
        ConversationEmployee {
            user_id,
            display_name: format!("{} {}", name.0, name.1),
            first_name: name.0.into(),
            last_name: name.1.into(),
            email: email.into(),
            profile_photo: None,
        }
    }

    fn summary(user_id: i64, last_content: Option<&str>) -> ConversationSummary {
        let created_at = Utc.with_ymd_and_hms(2025, 5, 12, 9, 0, 0).unwrap();
        ConversationSummary {
            employee: employee(user_id, ("Maya", "Tremblay"), "maya@example.com"),
            last_message: last_content.map(|content| LastMessage {
                id: 1,
                content: content.into(),
                sender_id: user_id,
                is_from_employer: false,
                created_at,
            }),
            unread_count: 0,
            updated_at: created_at,
        }
    }

    #[test]
    fn search_matches_name_email_or_last_message() {
        let conversation = summary(7, Some("can you start monday?"));

        let by_name = ConversationFilters {
            search: Some("tremblay".into()),
            employee: None,
        };
        let by_email = ConversationFilters {
            search: Some("MAYA@".into()),
            employee: None,
        };
        let by_body = ConversationFilters {
            search: Some("Monday".into()),
            employee: None,
        };
        let no_match = ConversationFilters {
            search: Some("plumber".into()),
            employee: None,
        };

        assert!(conversation.matches(&by_name));
        assert!(conversation.matches(&by_email));
        assert!(conversation.matches(&by_body));
        assert!(!conversation.matches(&no_match));
    }

    #[test]
    fn employee_filter_is_an_exact_id_match() {
        let conversation = summary(7, Some("hello"));
        let matching = ConversationFilters {
            search: None,
            employee: Some(7),
        };
        let other = ConversationFilters {
            search: None,
            employee: Some(8),
        };
        assert!(conversation.matches(&matching));
        assert!(!conversation.matches(&other));
    }

    #[test]
    fn blank_search_matches_everything() {
        let conversation = summary(7, None);
        let blank = ConversationFilters {
            search: Some("   ".into()),
            employee: None,
        };
        assert!(conversation.matches(&blank));
    }

    #[test]
    fn pair_without_messages_sorts_by_employee_creation() {
        let joined = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let conversation = ConversationSummary::new(
            employee(7, ("Maya", "Tremblay"), "maya@example.com"),
            None,
            0,
            joined,
        );
        assert_eq!(conversation.updated_at, joined);
        assert!(conversation.last_message.is_none());
    }

    #[test]
    fn message_direction_is_derived_from_sender() {
        let created_at = Utc.with_ymd_and_hms(2025, 5, 12, 9, 0, 0).unwrap();
        let message = Message {
            id: 3,
            sender_id: 10,
            receiver_id: 20,
            sender_role: crate::entities::users::UserRole::Employer,
            receiver_role: crate::entities::users::UserRole::Employee,
            content: "hi".into(),
            is_read: false,
            created_at,
        };
        let from_employer = ConversationMessage::from_entity(message, 10);
        assert!(from_employer.is_from_employer);
    }
}
