//! Dashboard handlers: own profile, overview and admin management.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::services::{CurrentAdmin, DashboardStats, ProfileListing};
use crate::types::ConfirmParams;
use domain::{Profile, ProfileAction, ProfileStatus, Role};

/// Display name update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNameRequest {
    #[schema(example = "Ahmad Fauzi")]
    pub full_name: String,
}

/// Direct role and/or status edit
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditProfileRequest {
    #[schema(example = "admin")]
    pub role: Option<String>,
    #[schema(example = "active")]
    pub status: Option<String>,
}

/// Admin-management filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    /// user, admin or super_admin
    pub role: Option<String>,
    /// Lifecycle status
    pub status: Option<String>,
    /// Case-insensitive match on name, email or role
    pub search: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_role(value: Option<String>) -> AppResult<Option<Role>> {
    non_blank(value)
        .map(|v| Role::parse(&v).map_err(AppError::from))
        .transpose()
}

fn parse_status(value: Option<String>) -> AppResult<Option<ProfileStatus>> {
    non_blank(value)
        .map(|v| ProfileStatus::parse(&v).map_err(AppError::from))
        .transpose()
}

/// Create dashboard routes (gated)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/dashboard", get(dashboard))
        .route("/profiles", get(list_profiles))
        .route("/profiles/pending", get(list_pending))
        .route(
            "/profiles/:id",
            get(get_profile).patch(edit_profile).delete(delete_profile),
        )
        .route("/profiles/:id/approve", post(approve_profile))
        .route("/profiles/:id/reject", post(reject_profile))
        .route("/profiles/:id/suspend", post(suspend_profile))
        .route("/profiles/:id/reactivate", post(reactivate_profile))
}

/// Current admin profile
#[utoipa::path(
    get,
    path = "/admin/me",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current admin profile", body = Profile),
        (status = 401, description = "No session"),
        (status = 403, description = "Access denied")
    )
)]
pub async fn get_me(Extension(admin): Extension<CurrentAdmin>) -> Json<Profile> {
    Json(admin.profile)
}

/// Update own display name
#[utoipa::path(
    put,
    path = "/admin/me",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    request_body = UpdateNameRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_me(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateNameRequest>,
) -> AppResult<Json<Profile>> {
    let profile = state
        .services
        .admins()
        .update_own_name(admin.id(), payload.full_name)
        .await?;
    Ok(Json(profile))
}

/// Dashboard overview statistics
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overview statistics", body = DashboardStats)
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.dashboard().stats().await?;
    Ok(Json(stats))
}

/// Registrations awaiting approval
#[utoipa::path(
    get,
    path = "/admin/profiles/pending",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending registrations", body = Vec<Profile>)
    )
)]
pub async fn list_pending(State(state): State<AppState>) -> AppResult<Json<Vec<Profile>>> {
    let profiles = state.services.admins().list_pending().await?;
    Ok(Json(profiles))
}

/// Filtered profile listing with counts
#[utoipa::path(
    get,
    path = "/admin/profiles",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(ProfileQuery),
    responses(
        (status = 200, description = "Profiles with role and status counts", body = ProfileListing),
        (status = 400, description = "Unknown role or status filter")
    )
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Json<ProfileListing>> {
    let role = parse_role(query.role)?;
    let status = parse_status(query.status)?;

    let listing = state
        .services
        .admins()
        .list(role, status, non_blank(query.search))
        .await?;
    Ok(Json(listing))
}

/// One profile
#[utoipa::path(
    get,
    path = "/admin/profiles/{id}",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    let profile = state.services.admins().get(id).await?;
    Ok(Json(profile))
}

async fn act(
    state: &AppState,
    admin: &CurrentAdmin,
    id: Uuid,
    action: ProfileAction,
) -> AppResult<Json<Profile>> {
    let profile = state.services.admins().apply(admin.id(), id, action).await?;
    Ok(Json(profile))
}

/// Approve a registration
#[utoipa::path(
    post,
    path = "/admin/profiles/{id}/approve",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Profile is active; repeat calls are no-ops", body = Profile),
        (status = 404, description = "Profile not found"),
        (status = 409, description = "Profile cannot be approved from its status")
    )
)]
pub async fn approve_profile(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    act(&state, &admin, id, ProfileAction::Approve).await
}

/// Reject a registration
#[utoipa::path(
    post,
    path = "/admin/profiles/{id}/reject",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Profile rejected", body = Profile),
        (status = 403, description = "Cannot reject your own account"),
        (status = 409, description = "Profile cannot be rejected from its status")
    )
)]
pub async fn reject_profile(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    act(&state, &admin, id, ProfileAction::Reject).await
}

/// Suspend an active admin
#[utoipa::path(
    post,
    path = "/admin/profiles/{id}/suspend",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Profile suspended", body = Profile),
        (status = 403, description = "Cannot suspend your own account"),
        (status = 409, description = "Profile cannot be suspended from its status")
    )
)]
pub async fn suspend_profile(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    act(&state, &admin, id, ProfileAction::Suspend).await
}

/// Return a suspended or inactive admin to active
#[utoipa::path(
    post,
    path = "/admin/profiles/{id}/reactivate",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Profile active", body = Profile),
        (status = 409, description = "Profile cannot be reactivated from its status")
    )
)]
pub async fn reactivate_profile(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    act(&state, &admin, id, ProfileAction::Reactivate).await
}

/// Edit role and/or status
#[utoipa::path(
    patch,
    path = "/admin/profiles/{id}",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID")),
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Unknown role or status"),
        (status = 403, description = "Cannot demote or deactivate your own account")
    )
)]
pub async fn edit_profile(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EditProfileRequest>,
) -> AppResult<Json<Profile>> {
    let role = parse_role(payload.role)?;
    let status = parse_status(payload.status)?;

    let profile = state
        .services
        .admins()
        .edit(admin.id(), id, role, status)
        .await?;
    Ok(Json(profile))
}

/// Soft delete (suspend) an admin
#[utoipa::path(
    delete,
    path = "/admin/profiles/{id}",
    tag = "Admin Management",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Identity ID"), ConfirmParams),
    responses(
        (status = 200, description = "Profile suspended", body = Profile),
        (status = 400, description = "Missing confirm=true"),
        (status = 403, description = "Cannot delete your own account")
    )
)]
pub async fn delete_profile(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<Profile>> {
    confirm.require()?;
    let profile = state.services.admins().soft_delete(admin.id(), id).await?;
    Ok(Json(profile))
}
