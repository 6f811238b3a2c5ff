//! Request-scoped services

pub mod pipeline;
pub mod publisher;

pub use pipeline::process_upload;
pub use publisher::{ImagePublisher, PublishedImage};
