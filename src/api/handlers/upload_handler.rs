//! Standalone image upload.

use axum::{
    extract::{Extension, State},
    routing::post,
    Router,
};
use utoipa::ToSchema;

use crate::api::extractors::ImageForm;
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::services::{CurrentAdmin, UploadedImage};
use crate::types::Created;

/// Multipart form with a single image
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    /// JPEG, PNG, WebP or GIF up to 2 MB
    #[schema(value_type = String, format = Binary)]
    image_file: Vec<u8>,
}

pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads/image", post(upload_image))
}

/// Upload an image and get its public URL
#[utoipa::path(
    post,
    path = "/admin/uploads/image",
    tag = "Uploads",
    security(("bearer_auth" = [])),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Stored image", body = UploadedImage),
        (status = 400, description = "Missing, oversized or unsupported file"),
        (status = 502, description = "Storage rejected the upload")
    )
)]
pub async fn upload_image(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    mut form: ImageForm,
) -> AppResult<Created<UploadedImage>> {
    let image = form
        .take_image()
        .ok_or_else(|| AppError::field_validation("image_file", "Select an image to upload"))?;

    let uploaded = state
        .services
        .uploads()
        .upload_image(&admin.access_token, image)
        .await?;
    Ok(Created(uploaded))
}
