//! Timeline entity: a dated milestone.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimelineItem {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    /// Comma-separated tags as entered
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimelineItem {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|t| t.split(',').map(str::trim).filter(|t| !t.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// Timeline items are always listed newest date first.
pub fn date_descending(a: &TimelineItem, b: &TimelineItem) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Timeline form input, date as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineDraft {
    pub title: String,
    pub date: String,
    pub description: String,
    pub tags: Option<String>,
}

/// Validated timeline fields ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFields {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub tags: Option<String>,
}

impl TimelineDraft {
    pub fn validate(self) -> DomainResult<TimelineFields> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title", "Title is required"));
        }

        let date = self.date.trim();
        if date.is_empty() {
            return Err(DomainError::validation("date", "Date is required"));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            DomainError::validation("date", "Date must be formatted as YYYY-MM-DD")
        })?;

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(DomainError::validation(
                "description",
                "Description is required",
            ));
        }

        let tags = self
            .tags
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(TimelineFields {
            title,
            date,
            description,
            tags,
        })
    }
}
