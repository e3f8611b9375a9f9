//! The `{success, data, message}` envelope wrapped around every response.

use super::{ApiError, ApiResult, error::mentions_token};
use serde::{
    Deserialize,
    de::{DeserializeOwned, IgnoredAny},
};

/// Response envelope used by the backend.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Outcome flag; absent means success.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Payload.
    pub data: Option<T>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Alternative message field used by some error responses.
    #[serde(default)]
    pub error: Option<String>,
}

const fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Decodes a response body and returns the envelope payload.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for 401 responses,
/// [`ApiError::Status`] for other non-2xx responses,
/// [`ApiError::Rejected`] when `success` is false,
/// [`ApiError::MissingData`] when `data` is absent, and
/// [`ApiError::Decode`] when the body is not a valid envelope.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> ApiResult<T> {
    check_status(status, body)?;
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    if !envelope.success {
        return Err(rejection(&envelope));
    }
    envelope.data.ok_or(ApiError::MissingData)
}

/// Decodes a response body whose payload is not needed.
///
/// # Errors
///
/// Same as [`decode_envelope`], except that a missing `data` field or an
/// empty body is accepted.
pub fn decode_ack(status: u16, body: &[u8]) -> ApiResult<()> {
    check_status(status, body)?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    let envelope: Envelope<IgnoredAny> =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    if !envelope.success {
        return Err(rejection(&envelope));
    }
    Ok(())
}

fn check_status(status: u16, body: &[u8]) -> ApiResult<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_slice::<Envelope<IgnoredAny>>(body)
        .ok()
        .map_or_else(
            || String::from_utf8_lossy(body).trim().to_owned(),
            |envelope| envelope.message_or(""),
        );
    if status == 401 {
        return Err(ApiError::Unauthorized(message));
    }
    Err(ApiError::Status { status, message })
}

fn rejection<T>(envelope: &Envelope<T>) -> ApiError {
    let message = envelope.message_or("request was not successful");
    if mentions_token(&message) {
        return ApiError::Unauthorized(message);
    }
    ApiError::Rejected(message)
}
