//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    activity_routes, admin_routes, auth_routes, contact_routes, public_routes, timeline_routes,
    upload_routes,
};
use super::middleware::{admin_gate_middleware, rate_limit_auth_middleware, rate_limit_middleware};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::MAX_MULTIPART_BODY_BYTES;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no rate limiting)
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public site
        .nest(
            "/api",
            public_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            )),
        )
        // Sign-in, registration and recovery (stricter rate limiting)
        .nest(
            "/admin/auth",
            auth_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_auth_middleware,
            )),
        )
        // Dashboard, every route behind the auth gate
        .nest(
            "/admin",
            admin_routes()
                .merge(activity_routes())
                .merge(timeline_routes())
                .merge(contact_routes())
                .merge(upload_routes())
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    admin_gate_middleware,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_middleware,
                ))
                .layer(DefaultBodyLimit::max(MAX_MULTIPART_BODY_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "KKMI Al-Khawarizmi site API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    redis: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_check<E: std::fmt::Display>(check: Option<Result<(), E>>) -> Self {
        match check {
            None => ServiceStatus {
                status: "disabled",
                error: None,
            },
            Some(Ok(())) => ServiceStatus {
                status: "healthy",
                error: None,
            },
            Some(Err(e)) => ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }
}

/// Health check covering the database and Redis
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_check = match state.database.as_ref() {
        Some(db) => Some(db.ping().await),
        None => None,
    };
    let redis_check = match state.cache.as_ref() {
        Some(cache) => Some(cache.ping().await),
        None => None,
    };

    let database = ServiceStatus::from_check(db_check);
    let redis = ServiceStatus::from_check(redis_check);

    let degraded = database.status == "unhealthy" || redis.status == "unhealthy";

    let response = HealthResponse {
        status: if degraded { "degraded" } else { "healthy" },
        services: ServiceHealth { database, redis },
    };

    let status_code = if degraded {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status_code, Json(response))
}
