//! HTTP surface of the mock round-trip authentication backend.

pub mod http;

pub use http::{create_router, AppState};
