//! Contact messages submitted from the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::constants::{MIN_CONTACT_MESSAGE_LENGTH, MIN_CONTACT_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Unread => "unread",
            ContactStatus::Read => "read",
            ContactStatus::Replied => "replied",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "unread" => Ok(ContactStatus::Unread),
            "read" => Ok(ContactStatus::Read),
            "replied" => Ok(ContactStatus::Replied),
            other => Err(DomainError::validation(
                "status",
                format!("Unknown message status '{}'", other),
            )),
        }
    }
}

impl From<&str> for ContactStatus {
    fn from(s: &str) -> Self {
        ContactStatus::parse(s).unwrap_or(ContactStatus::Unread)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub notes: Option<String>,
    pub replied_by: Option<Uuid>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Only unread messages count towards the dashboard badge
    pub fn needs_attention(&self) -> bool {
        self.status == ContactStatus::Unread
    }

    /// Explicit admin action; a replied message keeps its status.
    pub fn mark_read(&self) -> ContactMessage {
        let status = match self.status {
            ContactStatus::Unread | ContactStatus::Read => ContactStatus::Read,
            ContactStatus::Replied => ContactStatus::Replied,
        };
        ContactMessage {
            status,
            ..self.clone()
        }
    }

    /// Record a reply annotation by `actor`.
    pub fn reply(&self, notes: &str, actor: Uuid, now: DateTime<Utc>) -> DomainResult<ContactMessage> {
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(DomainError::validation("notes", "Reply notes are required"));
        }
        Ok(ContactMessage {
            status: ContactStatus::Replied,
            notes: Some(notes.to_string()),
            replied_by: Some(actor),
            replied_at: Some(now),
            ..self.clone()
        })
    }
}

/// Public contact form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.chars().count() < MIN_CONTACT_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be at least {} characters", MIN_CONTACT_NAME_LENGTH),
            ));
        }

        let email = self.email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(DomainError::validation("email", "Invalid email format"));
        }

        let message = self.message.trim().to_string();
        if message.chars().count() < MIN_CONTACT_MESSAGE_LENGTH {
            return Err(DomainError::validation(
                "message",
                format!(
                    "Message must be at least {} characters",
                    MIN_CONTACT_MESSAGE_LENGTH
                ),
            ));
        }

        Ok(Self {
            name,
            email,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: ContactStatus) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: "Visitor".into(),
            email: "v@example.com".into(),
            message: "Hello there, friends".into(),
            status,
            notes: None,
            replied_by: None,
            replied_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_draft_validates() {
        let d = ContactDraft {
            name: " Visitor ".into(),
            email: "V@Example.com".into(),
            message: "I want to join the organization".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(d.name, "Visitor");
        assert_eq!(d.email, "v@example.com");
    }

    #[test]
    fn test_invalid_fields() {
        let base = ContactDraft {
            name: "Visitor".into(),
            email: "v@example.com".into(),
            message: "I want to join the organization".into(),
        };
        for (draft, field) in [
            (ContactDraft { name: "V".into(), ..base.clone() }, "name"),
            (ContactDraft { email: "nope".into(), ..base.clone() }, "email"),
            (ContactDraft { message: "short".into(), ..base.clone() }, "message"),
        ] {
            assert_eq!(draft.validate().unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for email in ["a@@b.com", "a@b..com", "a@b.c@d.com", "\"@x.co", "a b@x.co"] {
            let draft = ContactDraft {
                name: "Visitor".into(),
                email: email.into(),
                message: "I want to join the organization".into(),
            };
            let err = draft.validate().unwrap_err();
            assert_eq!(err.field(), Some("email"), "accepted {}", email);
        }
    }

    #[test]
    fn test_needs_attention_only_unread() {
        assert!(message(ContactStatus::Unread).needs_attention());
        assert!(!message(ContactStatus::Read).needs_attention());
        assert!(!message(ContactStatus::Replied).needs_attention());
    }

    #[test]
    fn test_mark_read_keeps_replied() {
        assert_eq!(message(ContactStatus::Unread).mark_read().status, ContactStatus::Read);
        assert_eq!(
            message(ContactStatus::Replied).mark_read().status,
            ContactStatus::Replied
        );
    }

    #[test]
    fn test_reply_stamps_actor() {
        let actor = Uuid::new_v4();
        let replied = message(ContactStatus::Read)
            .reply(" Answered by email ", actor, Utc::now())
            .unwrap();
        assert_eq!(replied.status, ContactStatus::Replied);
        assert_eq!(replied.notes.as_deref(), Some("Answered by email"));
        assert_eq!(replied.replied_by, Some(actor));

        assert!(message(ContactStatus::Read).reply("  ", actor, Utc::now()).is_err());
    }
}
