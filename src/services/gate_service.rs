//! Auth gate - the single guard every admin request passes through.
//!
//! Session lookup, profile lookup and the access rule are evaluated on
//! every call; nothing is cached between requests.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::infra::{IdentityProvider, ProfileRepository, UnitOfWork};
use domain::{check_access, AccessDenial, Profile};

/// Admin admitted by the gate, available to downstream handlers.
#[derive(Clone, Debug)]
pub struct CurrentAdmin {
    pub profile: Profile,
    pub access_token: String,
}

impl CurrentAdmin {
    pub fn id(&self) -> Uuid {
        self.profile.id
    }
}

#[async_trait]
pub trait GateService: Send + Sync {
    /// Admit the bearer of `access_token` to the dashboard or deny with a reason.
    async fn authorize(&self, access_token: &str) -> AppResult<CurrentAdmin>;
}

/// Load the profile behind an identity and evaluate the access rule.
///
/// Profile-fetch failures deny access like any other failed clause.
pub(crate) async fn admit(profiles: &dyn ProfileRepository, identity_id: Uuid) -> AppResult<Profile> {
    let profile = match profiles.find_by_id(identity_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            tracing::error!(%identity_id, "Identity has no profile row");
            return Err(AppError::AccessDenied(AccessDenial::ProfileMissing));
        }
        Err(e) => {
            tracing::error!(%identity_id, error = ?e, "Profile lookup failed");
            return Err(AppError::AccessDenied(AccessDenial::NoSession));
        }
    };

    check_access(&profile).map_err(|denial| {
        tracing::warn!(
            %identity_id,
            role = %profile.role,
            status = %profile.status,
            is_approved = profile.is_approved,
            code = denial.code(),
            "Dashboard access denied"
        );
        AppError::AccessDenied(denial)
    })?;

    Ok(profile)
}

/// Sign out a session left behind by a denial. Failures are only logged.
pub(crate) async fn force_sign_out(identity: &dyn IdentityProvider, access_token: &str) {
    if let Err(e) = identity.sign_out(access_token).await {
        tracing::warn!(error = %e, "Sign-out after denial failed");
    }
}

pub struct AccessGate<U: UnitOfWork> {
    uow: Arc<U>,
    identity: Arc<dyn IdentityProvider>,
}

impl<U: UnitOfWork> AccessGate<U> {
    pub fn new(uow: Arc<U>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { uow, identity }
    }
}

#[async_trait]
impl<U: UnitOfWork> GateService for AccessGate<U> {
    async fn authorize(&self, access_token: &str) -> AppResult<CurrentAdmin> {
        let user = self.identity.get_user(access_token).await.map_err(|e| {
            tracing::debug!(error = %e, "Session rejected by identity store");
            AppError::AccessDenied(AccessDenial::NoSession)
        })?;

        match admit(self.uow.profiles().as_ref(), user.id).await {
            Ok(profile) => Ok(CurrentAdmin {
                profile,
                access_token: access_token.to_string(),
            }),
            Err(e) => {
                force_sign_out(self.identity.as_ref(), access_token).await;
                Err(e)
            }
        }
    }
}
