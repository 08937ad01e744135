//! Dashboard activity handlers (multipart forms with a thumbnail).

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ImageForm;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::services::CurrentAdmin;
use crate::types::{ConfirmParams, Created};
use domain::{Activity, ActivityDraft, ActivityStatus};

/// Multipart form accepted by create and update
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ActivityForm {
    #[schema(example = "Kajian Rutin")]
    title: String,
    #[schema(example = "Weekly study circle for members")]
    description: String,
    content: Option<String>,
    /// active or inactive
    #[schema(example = "active")]
    status: Option<String>,
    category: Option<String>,
    /// Comma-separated or repeated field
    tags: Option<String>,
    registration_link: Option<String>,
    order_index: Option<i32>,
    /// JPEG, PNG, WebP or GIF up to 2 MB; required on create
    #[schema(value_type = Option<String>, format = Binary)]
    image_file: Option<Vec<u8>>,
}

/// Build a draft from the text fields of a form.
fn draft_from_form(form: &ImageForm) -> AppResult<ActivityDraft> {
    let owned = |name: &str| form.text(name).map(str::to_string);

    let status = match form.text("status").map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => ActivityStatus::parse(s)?,
        None => ActivityStatus::default(),
    };

    let order_index = match form.text("order_index").map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse::<i32>().map_err(|_| {
            AppError::field_validation("order_index", "Order must be a whole number")
        })?,
        None => 0,
    };

    let tags = form
        .all("tags")
        .iter()
        .flat_map(|v| v.split(','))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(ActivityDraft {
        title: owned("title").unwrap_or_default(),
        description: owned("description").unwrap_or_default(),
        content: owned("content"),
        status,
        category: owned("category"),
        tags,
        registration_link: owned("registration_link"),
        order_index,
    })
}

/// Create dashboard activity routes
pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/:id",
            put(update_activity).delete(delete_activity),
        )
}

/// Every activity, active or not
#[utoipa::path(
    get,
    path = "/admin/activities",
    tag = "Activities",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All activities in display order", body = Vec<Activity>)
    )
)]
pub async fn list_activities(State(state): State<AppState>) -> AppResult<Json<Vec<Activity>>> {
    let activities = state.services.activities().list_all().await?;
    Ok(Json(activities))
}

/// Create an activity with its thumbnail
#[utoipa::path(
    post,
    path = "/admin/activities",
    tag = "Activities",
    security(("bearer_auth" = [])),
    request_body(content = ActivityForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Activity created", body = Activity),
        (status = 400, description = "Validation error; nothing uploaded"),
        (status = 502, description = "Upload failed; nothing saved")
    )
)]
pub async fn create_activity(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    mut form: ImageForm,
) -> AppResult<Created<Activity>> {
    let draft = draft_from_form(&form)?;
    let activity = state
        .services
        .activities()
        .create(&admin, draft, form.take_image())
        .await?;
    Ok(Created(activity))
}

/// Overwrite an activity; the thumbnail is optional
#[utoipa::path(
    put,
    path = "/admin/activities/{id}",
    tag = "Activities",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Activity ID")),
    request_body(content = ActivityForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Activity updated", body = Activity),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn update_activity(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut form: ImageForm,
) -> AppResult<Json<Activity>> {
    let draft = draft_from_form(&form)?;
    let activity = state
        .services
        .activities()
        .update(&admin, id, draft, form.take_image())
        .await?;
    Ok(Json(activity))
}

/// Permanently delete an activity
#[utoipa::path(
    delete,
    path = "/admin/activities/{id}",
    tag = "Activities",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Activity ID"), ConfirmParams),
    responses(
        (status = 200, description = "Remaining activities", body = Vec<Activity>),
        (status = 400, description = "Missing confirm=true"),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<Vec<Activity>>> {
    confirm.require()?;
    let activities = state.services.activities().delete(id).await?;
    Ok(Json(activities))
}
