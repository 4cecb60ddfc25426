// Round-trip authentication callback handlers

use axum::{extract::State, Json};
use streamauth_core::models::{
    InvalidationRequest, InvalidationResponse, LoginRequest, LoginResponse, ValidationOutcome,
    ValidationRequest,
};

use super::{AppState, CallbackBody};

/// Issue the placeholder stream identity
pub async fn log_in(
    State(state): State<AppState>,
    CallbackBody(req): CallbackBody<LoginRequest>,
) -> Json<LoginResponse> {
    Json(state.gateway.log_in(&req))
}

/// Decide whether a client may connect in the requested role
///
/// An unrecognized role is answered with `{"result":false}` and status 200.
pub async fn validate_credentials(
    State(state): State<AppState>,
    CallbackBody(req): CallbackBody<ValidationRequest>,
) -> Json<ValidationOutcome> {
    Json(state.gateway.validate_credentials(&req))
}

/// Acknowledge that a client session ended
pub async fn invalidate_credentials(
    State(state): State<AppState>,
    CallbackBody(req): CallbackBody<InvalidationRequest>,
) -> Json<InvalidationResponse> {
    Json(state.gateway.invalidate_credentials(&req))
}
