//! Multipart encoding for task uploads.

use crate::{
    api::{ApiError, ApiResult},
    task::domain::UploadFile,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

/// Form field carrying uploaded files.
pub(super) const ATTACHMENT_FIELD: &str = "attachments";

/// Flattens a JSON-serialisable body into text fields.
///
/// Strings are sent as-is; arrays, numbers, and booleans as their JSON text.
pub(super) fn text_fields<B: Serialize>(body: &B) -> ApiResult<Form> {
    let value = serde_json::to_value(body).map_err(|err| ApiError::Encode(err.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::Encode("multipart body must be an object".to_owned()));
    };
    Ok(fields
        .into_iter()
        .fold(Form::new(), |form, (key, field)| match field {
            Value::Null => form,
            Value::String(text) => form.text(key, text),
            other => form.text(key, other.to_string()),
        }))
}

/// Appends one file part per upload.
pub(super) fn with_files(form: Form, files: &[UploadFile]) -> ApiResult<Form> {
    files.iter().try_fold(form, |form, file| {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mimetype)?;
        Ok(form.part(ATTACHMENT_FIELD, part))
    })
}
