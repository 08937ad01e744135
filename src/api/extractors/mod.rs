//! Custom request extractors.

mod multipart_form;
mod validated_json;

pub use multipart_form::ImageForm;
pub use validated_json::ValidatedJson;
