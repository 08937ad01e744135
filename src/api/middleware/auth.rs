//! Auth gate middleware for the admin dashboard.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use domain::AccessDenial;

/// Access token presented in the Authorization header.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(AppError::AccessDenied(AccessDenial::NoSession))
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(&parts.headers).map(BearerToken)
    }
}

/// Auth gate middleware.
///
/// Runs the full gate on every admin request and injects the admitted
/// `CurrentAdmin` into the request extensions.
pub async fn admin_gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let admin = state.services.gate().authorize(&token).await?;

    request.extensions_mut().insert(admin);

    Ok(next.run(request).await)
}
