//! Wire records exchanged with the calling streaming server.
//!
//! Every field of an inbound request is optional: the caller may omit any of
//! them, or send them with an unexpected JSON type, and the gateway still
//! answers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity handed out by `logIn` for every caller.
pub const PLACEHOLDER_USERNAME: &str = "streamUsername";
pub const PLACEHOLDER_PASSWORD: &str = "streamPassword";
pub const PLACEHOLDER_STREAM_ID: &str = "streamID";

/// Login request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub password: Option<String>,
}

/// Login response carrying the placeholder stream identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub username: String,
    pub password: String,
    #[serde(rename = "streamID")]
    pub stream_id: String,
}

impl LoginResponse {
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            username: PLACEHOLDER_USERNAME.to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
            stream_id: PLACEHOLDER_STREAM_ID.to_string(),
        }
    }
}

/// Credentials the streaming server forwards when a client connects or
/// disconnects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    /// Raw requested role, kept as sent so unknown values can be logged.
    /// Only a JSON string can name a role.
    #[serde(rename = "type")]
    pub client_type: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub password: Option<String>,
    #[serde(rename = "streamID", deserialize_with = "lenient_string")]
    pub stream_id: Option<String>,
    /// Only read when token mode is enabled
    #[serde(deserialize_with = "lenient_string")]
    pub token: Option<String>,
    /// Application context path of the connecting client
    #[serde(deserialize_with = "lenient_string")]
    pub scope: Option<String>,
}

pub type ValidationRequest = CredentialsRequest;
pub type InvalidationRequest = CredentialsRequest;

impl CredentialsRequest {
    #[must_use]
    pub fn role(&self) -> ClientRole {
        ClientRole::parse(self.client_type.as_ref().and_then(Value::as_str))
    }

    /// `type` as it should appear in logs: strings bare, other JSON values
    /// in their JSON form.
    #[must_use]
    pub fn client_type_label(&self) -> Option<String> {
        self.client_type.as_ref().map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Accept any JSON value for a field that is only ever logged. Strings are
/// taken as is, `null` is absent, anything else keeps its JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Role a client asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    /// Sends media into a stream
    Publisher,
    /// Receives media from a stream
    Subscriber,
    Websocket,
    /// Missing, empty, or unknown type
    Unrecognized,
}

impl ClientRole {
    /// Exact, case-sensitive match on the wire value.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("publisher") => Self::Publisher,
            Some("subscriber") => Self::Subscriber,
            Some("websocket") => Self::Websocket,
            _ => Self::Unrecognized,
        }
    }
}

/// Decision returned by `validateCredentials`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ValidationResponse")]
pub enum ValidationOutcome {
    /// Allowed, with the configured resource URL (possibly empty)
    Allowed { url: String },
    AllowedNoResource,
    Denied,
}

impl ValidationOutcome {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// JSON shape of a validation decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<ValidationOutcome> for ValidationResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Allowed { url } => Self {
                result: true,
                url: Some(url),
            },
            ValidationOutcome::AllowedNoResource => Self {
                result: true,
                url: None,
            },
            ValidationOutcome::Denied => Self {
                result: false,
                url: None,
            },
        }
    }
}

/// Invalidation acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationResponse {
    pub result: bool,
}

impl InvalidationResponse {
    #[must_use]
    pub const fn acknowledged() -> Self {
        Self { result: true }
    }
}
