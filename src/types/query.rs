//! Query parameter types shared across endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::{AppError, AppResult};

/// Explicit confirmation required by every DELETE endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmParams {
    /// Must be `true`; deletes are irreversible
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmParams {
    /// Refuse the call unless the client confirmed it
    pub fn require(&self) -> AppResult<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::field_validation(
                "confirm",
                "Deletion is permanent. Repeat the request with confirm=true",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_confirmation_is_rejected() {
        assert!(ConfirmParams::default().require().is_err());
        assert!(ConfirmParams { confirm: true }.require().is_ok());
    }
}
