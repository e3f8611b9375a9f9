//! Bearer-authenticated HTTP client shared by every HTTP adapter.

use super::{ApiError, ApiResult, decode_ack, decode_envelope};
use crate::{config::ClientConfig, session::SessionHandle};
use reqwest::{Method, RequestBuilder, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// HTTP client for the task backend.
///
/// The bearer token is read from the injected [`SessionHandle`] for every
/// request, so a login or logout through the same handle takes effect on the
/// next call. No retries are attempted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the base URL is not an
    /// `http://` or `https://` URL, or [`ApiError::Transport`] when the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ApiResult<Self> {
        let base_url = normalise_base_url(&config.api_base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
            session,
        })
    }

    /// Returns the normalised base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the session handle this client reads its token from.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Joins a path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request, attaching `Authorization: Bearer` when a session
    /// token is present.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(path));
        let token = self.session.token();
        if let Some(found) = token {
            return builder.bearer_auth(found.expose());
        }
        builder
    }

    /// Sends a `GET` request and unwraps the envelope payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or decoding failures.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let builder = self.request(Method::GET, path).query(query);
        let (status, body) = self.execute(builder, &Method::GET, path).await?;
        decode_envelope(status, &body)
    }

    /// Sends a JSON body and unwraps the envelope payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or decoding failures.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(method.clone(), path).json(body);
        let (status, bytes) = self.execute(builder, &method, path).await?;
        decode_envelope(status, &bytes)
    }

    /// Sends a JSON body and only checks that the backend accepted it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or status failures, or when the
    /// envelope reports `success: false`.
    pub async fn send_ack<B>(&self, method: Method, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let builder = self.request(method.clone(), path).json(body);
        let (status, bytes) = self.execute(builder, &method, path).await?;
        decode_ack(status, &bytes)
    }

    /// Sends a bodiless request and only checks that the backend accepted it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send_ack`].
    pub async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        let builder = self.request(method.clone(), path);
        let (status, bytes) = self.execute(builder, &method, path).await?;
        decode_ack(status, &bytes)
    }

    /// Sends a multipart form and unwraps the envelope payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or decoding failures.
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let builder = self.request(method.clone(), path).multipart(form);
        let (status, bytes) = self.execute(builder, &method, path).await?;
        decode_envelope(status, &bytes)
    }

    async fn execute(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ApiResult<(u16, Vec<u8>)> {
        debug!(%method, path, authenticated = self.session.is_authenticated(), "sending api request");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(%method, path, status, bytes = body.len(), "received api response");
        Ok((status, body.to_vec()))
    }
}

/// Trims and validates a base URL.
///
/// # Errors
///
/// Returns [`ApiError::InvalidBaseUrl`] for anything but an `http://` or
/// `https://` URL with a host part.
pub fn normalise_base_url(raw: &str) -> ApiResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match host {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ApiError::InvalidBaseUrl(raw.to_owned())),
    }
}
