//! Core of the mock round-trip authentication backend.
//!
//! A streaming server calls out to this service before and after a client
//! session to ask whether a publisher or subscriber may proceed. Nothing is
//! actually authenticated: the decision depends only on the requested role.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};
pub use gateway::CredentialGateway;
