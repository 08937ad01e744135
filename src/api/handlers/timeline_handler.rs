//! Dashboard timeline handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::{ConfirmParams, Created};
use domain::{TimelineDraft, TimelineItem};

/// Timeline item fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TimelineRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Launch")]
    pub title: String,
    /// Calendar date, YYYY-MM-DD
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[validate(length(min = 1, message = "Description is required"))]
    #[schema(example = "Kickoff event")]
    pub description: String,
    /// Comma-separated tags
    pub tags: Option<String>,
}

impl From<TimelineRequest> for TimelineDraft {
    fn from(r: TimelineRequest) -> Self {
        TimelineDraft {
            title: r.title,
            date: r.date,
            description: r.description,
            tags: r.tags,
        }
    }
}

/// Create dashboard timeline routes
pub fn timeline_routes() -> Router<AppState> {
    Router::new()
        .route("/timeline", get(list_timeline).post(create_item))
        .route("/timeline/:id", put(update_item).delete(delete_item))
}

/// All timeline items, newest date first
#[utoipa::path(
    get,
    path = "/admin/timeline",
    tag = "Timeline",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Timeline items", body = Vec<TimelineItem>)
    )
)]
pub async fn list_timeline(State(state): State<AppState>) -> AppResult<Json<Vec<TimelineItem>>> {
    let items = state.services.timeline().list().await?;
    Ok(Json(items))
}

/// Add a timeline item
#[utoipa::path(
    post,
    path = "/admin/timeline",
    tag = "Timeline",
    security(("bearer_auth" = [])),
    request_body = TimelineRequest,
    responses(
        (status = 201, description = "Reloaded timeline", body = Vec<TimelineItem>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TimelineRequest>,
) -> AppResult<Created<Vec<TimelineItem>>> {
    let items = state.services.timeline().create(payload.into()).await?;
    Ok(Created(items))
}

/// Overwrite a timeline item
#[utoipa::path(
    put,
    path = "/admin/timeline/{id}",
    tag = "Timeline",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Timeline item ID")),
    request_body = TimelineRequest,
    responses(
        (status = 200, description = "Reloaded timeline", body = Vec<TimelineItem>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TimelineRequest>,
) -> AppResult<Json<Vec<TimelineItem>>> {
    let items = state.services.timeline().update(id, payload.into()).await?;
    Ok(Json(items))
}

/// Permanently delete a timeline item
#[utoipa::path(
    delete,
    path = "/admin/timeline/{id}",
    tag = "Timeline",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Timeline item ID"), ConfirmParams),
    responses(
        (status = 200, description = "Reloaded timeline", body = Vec<TimelineItem>),
        (status = 400, description = "Missing confirm=true"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<Vec<TimelineItem>>> {
    confirm.require()?;
    let items = state.services.timeline().delete(id).await?;
    Ok(Json(items))
}
