//! Public site handlers - no session required.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::ActivityDetail;
use crate::types::{Created, MessageResponse};
use domain::{Activity, ContactDraft, TimelineItem};

/// Contact form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[schema(example = "Rina Putri")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "rina@example.com")]
    pub email: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    #[schema(example = "When does member registration open?")]
    pub message: String,
}

/// Create public routes
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/:id", get(get_activity))
        .route("/timeline", get(list_timeline))
        .route("/contact", post(submit_contact))
}

/// List active activities
#[utoipa::path(
    get,
    path = "/api/activities",
    tag = "Public",
    responses(
        (status = 200, description = "Active activities in display order", body = Vec<Activity>)
    )
)]
pub async fn list_activities(State(state): State<AppState>) -> AppResult<Json<Vec<Activity>>> {
    let activities = state.services.activities().list_public().await?;
    Ok(Json(activities))
}

/// Activity detail with related activities
#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    tag = "Public",
    params(
        ("id" = Uuid, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity and related activities", body = ActivityDetail),
        (status = 404, description = "Activity not found or not active")
    )
)]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ActivityDetail>> {
    let detail = state.services.activities().detail(id).await?;
    Ok(Json(detail))
}

/// Organization timeline, newest first
#[utoipa::path(
    get,
    path = "/api/timeline",
    tag = "Public",
    responses(
        (status = 200, description = "Timeline items by date, newest first", body = Vec<TimelineItem>)
    )
)]
pub async fn list_timeline(State(state): State<AppState>) -> AppResult<Json<Vec<TimelineItem>>> {
    let items = state.services.timeline().list().await?;
    Ok(Json(items))
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Public",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactRequest>,
) -> AppResult<Created<MessageResponse>> {
    state
        .services
        .contacts()
        .submit(ContactDraft {
            name: payload.name,
            email: payload.email,
            message: payload.message,
        })
        .await?;

    Ok(Created(MessageResponse::new(
        "Thank you! Your message has been sent.",
    )))
}
