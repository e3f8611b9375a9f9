//! Port for the backend authentication endpoints.

use crate::{
    api::ApiResult,
    session::domain::{AuthGrant, Credentials, Registration, UserProfile},
};
use async_trait::async_trait;

/// Authentication backend contract.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::api::ApiError::Unauthorized`] for bad credentials.
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant>;

    /// Creates an account and signs it in.
    async fn register(&self, registration: &Registration) -> ApiResult<AuthGrant>;

    /// Invalidates the current token on the backend.
    async fn logout(&self) -> ApiResult<()>;

    /// Returns the profile of the token holder.
    async fn profile(&self) -> ApiResult<UserProfile>;
}
