//! Dashboard inbox handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::services::CurrentAdmin;
use crate::types::ConfirmParams;
use domain::{ContactMessage, ContactStatus};

/// Inbox filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactQuery {
    /// unread, read or replied
    pub status: Option<String>,
}

/// Reply annotation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplyRequest {
    #[validate(length(min = 1, message = "Reply notes are required"))]
    #[schema(example = "Replied by email on Monday")]
    pub notes: String,
}

/// Create dashboard inbox routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", get(list_messages))
        .route("/contact/:id", delete(delete_message))
        .route("/contact/:id/read", post(mark_read))
        .route("/contact/:id/reply", post(reply))
}

/// Contact messages in arrival order
#[utoipa::path(
    get,
    path = "/admin/contact",
    tag = "Contact",
    security(("bearer_auth" = [])),
    params(ContactQuery),
    responses(
        (status = 200, description = "Messages", body = Vec<ContactMessage>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ContactStatus::parse(s).map_err(AppError::from))
        .transpose()?;

    let messages = state.services.contacts().list(status).await?;
    Ok(Json(messages))
}

/// Mark a message as read
#[utoipa::path(
    post,
    path = "/admin/contact/{id}/read",
    tag = "Contact",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Reloaded inbox", body = Vec<ContactMessage>),
        (status = 404, description = "Message not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let messages = state.services.contacts().mark_read(id).await?;
    Ok(Json(messages))
}

/// Record a reply
#[utoipa::path(
    post,
    path = "/admin/contact/{id}/reply",
    tag = "Contact",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = ReplyRequest,
    responses(
        (status = 200, description = "Reloaded inbox", body = Vec<ContactMessage>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn reply(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReplyRequest>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let messages = state
        .services
        .contacts()
        .reply(admin.id(), id, payload.notes)
        .await?;
    Ok(Json(messages))
}

/// Permanently delete a message
#[utoipa::path(
    delete,
    path = "/admin/contact/{id}",
    tag = "Contact",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Message ID"), ConfirmParams),
    responses(
        (status = 200, description = "Reloaded inbox", body = Vec<ContactMessage>),
        (status = 400, description = "Missing confirm=true"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    confirm.require()?;
    let messages = state.services.contacts().delete(id).await?;
    Ok(Json(messages))
}
