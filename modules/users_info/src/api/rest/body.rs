use anyhow::{anyhow, Context};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};

use serde_json::Value;

use crate::api::rest::error::ApiError;
use crate::contract::model::UserDraft;

/// Lenient JSON body for create/update.
///
/// A missing body, a non-JSON content type or a JSON array all yield an
/// empty draft, which the validator then reports as missing fields. A JSON
/// body must be an object or an array: a bare scalar, a body that does not
/// parse and one over the configured size limit are internal errors.
#[derive(Debug)]
pub struct UserBody(pub UserDraft);

fn is_json_content_type(value: &str) -> bool {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        // Bodies of other media types are never read
        if !is_json {
            return Ok(Self(UserDraft::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
        if bytes.is_empty() {
            return Ok(Self(UserDraft::default()));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .context("request body is not valid JSON")
            .map_err(ApiError::Internal)?;
        match value {
            Value::Object(_) | Value::Array(_) => Ok(Self(UserDraft::from_json(value))),
            other => Err(ApiError::Internal(anyhow!(
                "JSON body must be an object or an array, got {other}"
            ))),
        }
    }
}
