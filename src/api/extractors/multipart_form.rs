//! Multipart form extractor for forms carrying an optional image file.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use std::collections::HashMap;

use crate::errors::AppError;
use crate::services::ImageUpload;

/// Text fields plus at most one file part.
///
/// A file input left empty by the browser arrives as a zero-length part
/// and is treated as no file at all.
#[derive(Debug, Default)]
pub struct ImageForm {
    fields: HashMap<String, Vec<String>>,
    pub image: Option<ImageUpload>,
}

impl ImageForm {
    /// First value of a text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value of a repeated text field
    pub fn all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Take the file out of the form
    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }
}

#[async_trait]
impl<S> FromRequest<S> for ImageForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut form = ImageForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;

                if bytes.is_empty() {
                    continue;
                }
                if form.image.is_some() {
                    return Err(AppError::field_validation(
                        name,
                        "Only one image file can be uploaded at a time",
                    ));
                }
                form.image = Some(ImageUpload::new(file_name, content_type, bytes.to_vec()));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.fields.entry(name).or_default().push(value);
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
impl ImageForm {
    pub(crate) fn from_parts(fields: Vec<(&str, &str)>, image: Option<ImageUpload>) -> Self {
        let mut form = ImageForm {
            image,
            ..Default::default()
        };
        for (name, value) in fields {
            form.fields
                .entry(name.to_string())
                .or_default()
                .push(value.to_string());
        }
        form
    }
}
