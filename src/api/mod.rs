//! HTTP plumbing shared by the backend adapters.
//!
//! Every response from the backend is wrapped in a `{success, data, message}`
//! envelope. [`ApiClient`] attaches the bearer token of the current session
//! and unwraps that envelope; the adapters in each context only map paths and
//! payloads.

mod client;
mod envelope;
mod error;

pub use client::{ApiClient, normalise_base_url};
pub use envelope::{Envelope, decode_ack, decode_envelope};
pub use error::{ApiError, ApiResult};
pub use reqwest::Method;
