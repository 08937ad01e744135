//! Shared request and response types.

mod query;
mod response;

pub use query::ConfirmParams;
pub use response::{Created, MessageResponse};
