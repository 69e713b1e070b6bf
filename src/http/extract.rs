//! Request body extractor accepting JSON or URL-encoded forms.

use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::error::{Result, SnowNotesError};

/// Body decoded from `application/json` or
/// `application/x-www-form-urlencoded`. Any other content type, or none,
/// yields `T::default()`, the same as an empty object.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else if content_type.starts_with("application/json") || content_type.contains("+json") {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else {
            Ok(Payload(T::default()))
        }
    }
}

/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text to store for `field`. Falsy values give `None`; arrays and objects
/// have no text form.
pub fn text_of(field: &str, value: &Value) -> Result<Option<String>> {
    if !truthy(value) {
        return Ok(None);
    }
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(SnowNotesError::UnsupportedValue(field.to_string())),
    }
}
