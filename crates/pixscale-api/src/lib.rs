//! Pixscale API Library
//!
//! HTTP handlers, request validation and application setup for the image
//! rescaling service.

pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
mod telemetry;
pub mod validation;

// Re-exports
pub use error::{ErrorResponse, HttpAppError, MessageResponse};
pub use state::AppState;
