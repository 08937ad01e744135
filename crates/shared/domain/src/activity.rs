//! Activity entity: a showcased event or program.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    MAX_ACTIVITY_CATEGORY_LENGTH, MAX_ACTIVITY_TITLE_LENGTH, MIN_ACTIVITY_DESCRIPTION_LENGTH,
    MIN_ACTIVITY_TITLE_LENGTH,
};
use crate::error::{DomainError, DomainResult};
use crate::upload::ensure_http_url;

/// Publication status of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "active" => Ok(ActivityStatus::Active),
            "inactive" => Ok(ActivityStatus::Inactive),
            other => Err(DomainError::validation(
                "status",
                format!("Unknown activity status '{}'", other),
            )),
        }
    }
}

impl From<&str> for ActivityStatus {
    fn from(s: &str) -> Self {
        ActivityStatus::parse(s).unwrap_or(ActivityStatus::Inactive)
    }
}

/// Activity domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub status: ActivityStatus,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub registration_link: Option<String>,
    pub order_index: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn is_public(&self) -> bool {
        self.status == ActivityStatus::Active
    }
}

/// Canonical ordering: `order_index` ascending, ties broken by recency.
pub fn canonical_order(a: &Activity, b: &Activity) -> Ordering {
    a.order_index
        .cmp(&b.order_index)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Public activities related to `id`, excluding it, in canonical order.
pub fn related(all: &[Activity], id: Uuid, limit: usize) -> Vec<Activity> {
    let mut related: Vec<Activity> = all
        .iter()
        .filter(|a| a.id != id && a.is_public())
        .cloned()
        .collect();
    related.sort_by(canonical_order);
    related.truncate(limit);
    related
}

/// Editable activity fields as submitted by the dashboard form.
///
/// `validate` trims and normalizes the draft; blank optional fields
/// become `None` and blank tags are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub status: ActivityStatus,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub registration_link: Option<String>,
    pub order_index: i32,
}

impl ActivityDraft {
    pub fn validate(self) -> DomainResult<Self> {
        let title = self.title.trim().to_string();
        let title_len = title.chars().count();
        if title_len < MIN_ACTIVITY_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!(
                    "Title must be at least {} characters",
                    MIN_ACTIVITY_TITLE_LENGTH
                ),
            ));
        }
        if title_len > MAX_ACTIVITY_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!(
                    "Title must be at most {} characters",
                    MAX_ACTIVITY_TITLE_LENGTH
                ),
            ));
        }

        let description = self.description.trim().to_string();
        if description.chars().count() < MIN_ACTIVITY_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(
                "description",
                format!(
                    "Description must be at least {} characters",
                    MIN_ACTIVITY_DESCRIPTION_LENGTH
                ),
            ));
        }

        let category = non_blank(self.category);
        if let Some(category) = &category {
            if category.chars().count() > MAX_ACTIVITY_CATEGORY_LENGTH {
                return Err(DomainError::validation(
                    "category",
                    format!(
                        "Category must be at most {} characters",
                        MAX_ACTIVITY_CATEGORY_LENGTH
                    ),
                ));
            }
        }

        let registration_link = non_blank(self.registration_link);
        if let Some(link) = &registration_link {
            ensure_http_url("registration_link", link)?;
        }

        let tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self {
            title,
            description,
            content: non_blank(self.content),
            status: self.status,
            category,
            tags,
            registration_link,
            order_index: self.order_index,
        })
    }
}

/// A new activity must carry a thumbnail; an edit may keep the existing one.
pub fn check_thumbnail(existing_url: Option<&str>, has_new_file: bool) -> DomainResult<()> {
    if has_new_file || existing_url.is_some_and(|u| !u.is_empty()) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "image_file",
            "A thumbnail image is required for a new activity",
        ))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> ActivityDraft {
        ActivityDraft {
            title: "  Coding Camp  ".into(),
            description: "Three days of programming".into(),
            tags: vec!["rust".into(), "  ".into()],
            category: Some("   ".into()),
            ..Default::default()
        }
    }

    fn activity(order_index: i32, age_minutes: i64) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            title: "A".into(),
            description: "Description".into(),
            content: None,
            image_url: None,
            status: ActivityStatus::Active,
            category: None,
            tags: vec![],
            registration_link: None,
            order_index,
            created_by: None,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            updated_by: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_validate_trims_and_normalizes() {
        let d = draft().validate().unwrap();
        assert_eq!(d.title, "Coding Camp");
        assert_eq!(d.tags, vec!["rust".to_string()]);
        assert_eq!(d.category, None);
    }

    #[test]
    fn test_short_title_rejected_with_field() {
        let err = ActivityDraft {
            title: " ab ".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_short_description_rejected() {
        let err = ActivityDraft {
            description: "too short".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }

    #[test]
    fn test_registration_link_must_be_http() {
        let err = ActivityDraft {
            registration_link: Some("javascript:alert(1)".into()),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), Some("registration_link"));

        let ok = ActivityDraft {
            registration_link: Some("https://forms.example.com/x".into()),
            ..draft()
        }
        .validate();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_thumbnail_required_on_create_only() {
        assert!(check_thumbnail(None, false).is_err());
        assert!(check_thumbnail(None, true).is_ok());
        assert!(check_thumbnail(Some("https://cdn/x.png"), false).is_ok());
    }

    #[test]
    fn test_canonical_order_index_then_recency() {
        let mut list = vec![activity(2, 0), activity(1, 10), activity(1, 1)];
        list.sort_by(canonical_order);
        assert_eq!(list[0].order_index, 1);
        assert!(list[0].created_at > list[1].created_at);
        assert_eq!(list[2].order_index, 2);
    }

    #[test]
    fn test_related_excludes_self_and_inactive() {
        let me = activity(0, 0);
        let mut hidden = activity(1, 0);
        hidden.status = ActivityStatus::Inactive;
        let others: Vec<Activity> = (1..=4).map(|i| activity(i, 0)).collect();

        let mut all = vec![me.clone(), hidden.clone()];
        all.extend(others);

        let rel = related(&all, me.id, 3);
        assert_eq!(rel.len(), 3);
        assert!(rel.iter().all(|a| a.id != me.id && a.id != hidden.id));
    }
}
