//! Request body extraction for the callback endpoints.
//!
//! Streaming servers post either JSON or URL-encoded forms. The body is
//! decoded according to `Content-Type`; a body of any other type, a missing
//! content type, an empty body, or a JSON value that is not an object is
//! treated as an empty record.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::AppError;

/// Callback body decoded from JSON or a URL-encoded form
#[derive(Debug, Clone)]
pub struct CallbackBody<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl<T, S> FromRequest<S> for CallbackBody<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(req.headers()) {
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state).await?;
                Ok(Self(decode_json(&bytes)?))
            }
            BodyKind::Other => {
                debug!(
                    content_type = ?req.headers().get(CONTENT_TYPE),
                    "unsupported body type, treating as empty"
                );
                Ok(Self(T::default()))
            }
        }
    }
}

/// Decode a JSON body. Only an object carries fields; anything else leaves
/// every field absent.
fn decode_json<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(serde_json::from_value(Value::Object(map))?),
        other => {
            debug!(body = %other, "non-object JSON body, treating as empty");
            Ok(T::default())
        }
    }
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(mime) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
    else {
        return BodyKind::Other;
    };

    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}
