// Module: http
// JSON/form callback endpoints invoked by the streaming server

pub mod credentials;
pub mod error;
pub mod extract;
pub mod health;
pub mod landing;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use streamauth_core::CredentialGateway;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use extract::CallbackBody;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<CredentialGateway>,
}

/// Create the HTTP router with all routes
pub fn create_router(gateway: Arc<CredentialGateway>) -> Router {
    let state = AppState { gateway };

    Router::new()
        .merge(health::create_health_router())
        .route("/", get(landing::index))
        // Round-trip authentication callbacks
        .route("/logIn", post(credentials::log_in))
        .route("/validateCredentials", post(credentials::validate_credentials))
        .route("/invalidateCredentials", post(credentials::invalidate_credentials))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
