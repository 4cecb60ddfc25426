//! Credential gateway
//!
//! Answers the three round-trip callbacks of a streaming server. The
//! decision for `validate_credentials` depends only on the requested role;
//! usernames, passwords, stream IDs and tokens are logged and never checked.
//!
//! Credential events go to the [`CREDENTIALS_TARGET`] target. Absent fields
//! are logged as `undefined`.

use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::logging::CREDENTIALS_TARGET;
use crate::models::{
    ClientRole, CredentialsRequest, InvalidationRequest, InvalidationResponse, LoginRequest,
    LoginResponse, ValidationOutcome, ValidationRequest,
};

/// Stateless stub validator shared by every request handler
#[derive(Debug, Clone)]
pub struct CredentialGateway {
    url_resource: String,
    use_token: bool,
}

impl CredentialGateway {
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            url_resource: config.url_resource.clone(),
            use_token: config.use_token,
        }
    }

    #[must_use]
    pub fn url_resource(&self) -> &str {
        &self.url_resource
    }

    #[must_use]
    pub const fn use_token(&self) -> bool {
        self.use_token
    }

    /// Issue the placeholder stream identity, whatever was submitted.
    #[must_use]
    pub fn log_in(&self, req: &LoginRequest) -> LoginResponse {
        info!(
            target: CREDENTIALS_TARGET,
            operation = "logIn",
            username = shown(req.username.as_deref()),
            password = shown(req.password.as_deref()),
            "logIn called"
        );

        LoginResponse::placeholder()
    }

    /// Decide whether a client may proceed in the role it asked for.
    #[must_use]
    pub fn validate_credentials(&self, req: &ValidationRequest) -> ValidationOutcome {
        self.log_credentials("validateCredentials", req);

        match req.role() {
            ClientRole::Publisher | ClientRole::Websocket => ValidationOutcome::Allowed {
                url: self.url_resource.clone(),
            },
            ClientRole::Subscriber => ValidationOutcome::AllowedNoResource,
            ClientRole::Unrecognized => {
                let client_type = req.client_type_label();
                warn!(
                    target: CREDENTIALS_TARGET,
                    client_type = shown(client_type.as_deref()),
                    "invalid type supplied"
                );
                ValidationOutcome::Denied
            }
        }
    }

    /// Acknowledge the end of a session. No session state is held, so there
    /// is nothing to tear down.
    #[must_use]
    pub fn invalidate_credentials(&self, req: &InvalidationRequest) -> InvalidationResponse {
        self.log_credentials("invalidateCredentials", req);

        InvalidationResponse::acknowledged()
    }

    fn log_credentials(&self, operation: &'static str, req: &CredentialsRequest) {
        let client_type = req.client_type_label();
        let client_type = shown(client_type.as_deref());
        let username = shown(req.username.as_deref());
        let password = shown(req.password.as_deref());
        let stream_id = shown(req.stream_id.as_deref());
        let scope = shown(req.scope.as_deref());

        if self.use_token {
            info!(
                target: CREDENTIALS_TARGET,
                operation,
                client_type,
                username,
                password,
                stream_id,
                scope,
                token = shown(req.token.as_deref()),
                "{operation} called"
            );
        } else {
            info!(
                target: CREDENTIALS_TARGET,
                operation,
                client_type,
                username,
                password,
                stream_id,
                scope,
                "{operation} called"
            );
        }
    }
}

fn shown(value: Option<&str>) -> &str {
    value.unwrap_or("undefined")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn gateway(url_resource: &str) -> CredentialGateway {
        CredentialGateway::new(&GatewayConfig {
            url_resource: url_resource.to_string(),
            use_token: false,
        })
    }

    fn request(client_type: Option<&str>) -> CredentialsRequest {
        CredentialsRequest {
            client_type: client_type.map(|t| Value::String(t.to_string())),
            username: Some("alice".to_string()),
            password: Some("secret".to_string()),
            stream_id: Some("stream1".to_string()),
            token: None,
            scope: Some("/live".to_string()),
        }
    }

    #[test]
    fn test_log_in_ignores_input() {
        let gw = gateway("");
        let anonymous = gw.log_in(&LoginRequest::default());
        let named = gw.log_in(&LoginRequest {
            username: Some("bob".to_string()),
            password: Some("hunter2".to_string()),
        });

        assert_eq!(anonymous, LoginResponse::placeholder());
        assert_eq!(named, anonymous);
    }

    #[test]
    fn test_publisher_and_websocket_get_resource_url() {
        let gw = gateway("rtmp://edge.example.com/live");

        for kind in ["publisher", "websocket"] {
            assert_eq!(
                gw.validate_credentials(&request(Some(kind))),
                ValidationOutcome::Allowed {
                    url: "rtmp://edge.example.com/live".to_string()
                }
            );
        }
    }

    #[test]
    fn test_empty_resource_url_is_still_returned() {
        let gw = gateway("");
        assert_eq!(
            gw.validate_credentials(&request(Some("publisher"))),
            ValidationOutcome::Allowed { url: String::new() }
        );
    }

    #[test]
    fn test_subscriber_allowed_without_resource() {
        let gw = gateway("rtmp://edge.example.com/live");
        assert_eq!(
            gw.validate_credentials(&request(Some("subscriber"))),
            ValidationOutcome::AllowedNoResource
        );
    }

    #[test]
    fn test_unrecognized_types_denied() {
        let gw = gateway("");
        for kind in [Some("admin"), Some(""), Some("SUBSCRIBER"), None] {
            let outcome = gw.validate_credentials(&request(kind));
            assert_eq!(outcome, ValidationOutcome::Denied, "type {kind:?}");
            assert!(!outcome.is_allowed());
        }
    }

    #[test]
    fn test_credentials_never_checked() {
        let gw = gateway("");
        let mut req = request(Some("subscriber"));
        req.username = None;
        req.password = Some(String::new());
        req.stream_id = None;

        assert!(gw.validate_credentials(&req).is_allowed());
    }

    #[test]
    fn test_token_mode_does_not_change_decision() {
        let plain = gateway("url");
        let tokened = CredentialGateway::new(&GatewayConfig {
            url_resource: "url".to_string(),
            use_token: true,
        });
        assert!(tokened.use_token());

        for kind in [Some("publisher"), Some("subscriber"), Some("websocket"), Some("x"), None] {
            let mut req = request(kind);
            req.token = Some("opaque".to_string());
            assert_eq!(plain.validate_credentials(&req), tokened.validate_credentials(&req));
            assert_eq!(plain.invalidate_credentials(&req), tokened.invalidate_credentials(&req));
        }
    }

    #[test]
    fn test_non_string_type_denied() {
        let gw = gateway("url");
        let mut req = request(None);
        req.client_type = Some(Value::from(5));

        assert_eq!(gw.validate_credentials(&req), ValidationOutcome::Denied);
    }

    #[test]
    fn test_absent_fields_logged_as_undefined() {
        assert_eq!(shown(None), "undefined");
        assert_eq!(shown(Some("")), "");
        assert_eq!(shown(Some("s1")), "s1");
    }

    #[test]
    fn test_invalidate_always_acknowledges() {
        let gw = gateway("");
        for kind in [Some("publisher"), Some("subscriber"), Some("admin"), None] {
            assert_eq!(
                gw.invalidate_credentials(&request(kind)),
                InvalidationResponse { result: true }
            );
        }
    }

    #[test]
    fn test_repeated_calls_are_idempotent() {
        let gw = gateway("url");
        let req = request(Some("publisher"));

        let first = gw.validate_credentials(&req);
        for _ in 0..3 {
            assert_eq!(gw.validate_credentials(&req), first);
            assert_eq!(gw.invalidate_credentials(&req), InvalidationResponse::acknowledged());
        }
    }
}
