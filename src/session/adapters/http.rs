//! HTTP adapter for the authentication endpoints.

use crate::{
    api::{ApiClient, ApiResult, Method},
    session::{
        domain::{AuthGrant, Credentials, Registration, UserProfile},
        ports::AuthApi,
    },
};
use async_trait::async_trait;
use serde::Deserialize;

/// Authentication backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    /// Creates the adapter on top of a shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// `GET /auth/profile` answers either `{user}` or the bare profile.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileBody {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        self.client
            .send_json(Method::POST, "auth/login", credentials)
            .await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<AuthGrant> {
        self.client
            .send_json(Method::POST, "auth/register", registration)
            .await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.client.send_empty(Method::POST, "auth/logout").await
    }

    async fn profile(&self) -> ApiResult<UserProfile> {
        let body: ProfileBody = self.client.get("auth/profile", &[]).await?;
        Ok(match body {
            ProfileBody::Wrapped { user } | ProfileBody::Bare(user) => user,
        })
    }
}
