//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::BearerToken;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{LoginResponse, Registration, SessionResponse};
use crate::types::{Created, MessageResponse};
use domain::Profile;

/// Admin self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    #[schema(example = "Ahmad Fauzi")]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "secret", min_length = 6)]
    pub password: String,
    #[schema(example = "secret")]
    pub confirm_password: String,
    /// Why the registrant needs dashboard access
    #[validate(length(min = 1, message = "Reason is required"))]
    #[schema(example = "testing")]
    pub reason: String,
}

/// Password login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// One-time code request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OtpRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// One-time code verification
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub code: String,
}

/// New password for the current session
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[schema(min_length = 6)]
    pub password: String,
    pub confirm_password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/otp", post(send_otp))
        .route("/otp/verify", post(verify_otp))
        .route("/password", post(update_password))
        .route("/logout", post(logout))
}

/// Register a pending admin account
#[utoipa::path(
    post,
    path = "/admin/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered; awaiting approval", body = Profile),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<Profile>> {
    let profile = state
        .services
        .auth()
        .register(Registration {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
            confirm_password: payload.confirm_password,
            reason: payload.reason,
        })
        .await?;

    Ok(Created(profile))
}

/// Sign in to the dashboard
#[utoipa::path(
    post,
    path = "/admin/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Invalid credentials or unconfirmed email"),
        (status = 403, description = "Account not approved, not active, or not an admin")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .services
        .auth()
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(response))
}

/// E-mail a one-time login code
#[utoipa::path(
    post,
    path = "/admin/auth/otp",
    tag = "Authentication",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "Code sent", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth().send_otp(payload.email).await?;
    Ok(Json(MessageResponse::new(
        "A login code has been sent to your email",
    )))
}

/// Exchange a one-time code for a session
#[utoipa::path(
    post,
    path = "/admin/auth/otp/verify",
    tag = "Authentication",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Session for updating the password", body = SessionResponse),
        (status = 400, description = "Invalid or expired code")
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyOtpRequest>,
) -> AppResult<Json<SessionResponse>> {
    let session = state
        .services
        .auth()
        .verify_otp(payload.email, payload.code)
        .await?;

    Ok(Json(session))
}

/// Change the password of the current session
#[utoipa::path(
    post,
    path = "/admin/auth/password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated; session ended", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "No session")
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .auth()
        .update_password(&token, payload.password, payload.confirm_password)
        .await?;

    Ok(Json(MessageResponse::new(
        "Password updated. Please log in with your new password",
    )))
}

/// Sign out
#[utoipa::path(
    post,
    path = "/admin/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "No session")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth().logout(&token).await?;
    Ok(Json(MessageResponse::new("Signed out")))
}
