//! Pixscale Processing Library
//!
//! Decodes uploaded images, rescales them by a [`ScaleFactor`] and re-encodes
//! the result as JPEG.

pub mod error;
pub mod image;

pub use error::{ScaleError, TransformError};
pub use crate::image::{ImageTransformer, ScaleFactor, TransformedImage};
