//! Image processing module
//!
//! - [`ScaleFactor`]: validated multiplier and its canonical text form
//! - [`ImageTransformer`]: decode, resize, JPEG encode

pub mod scale;
pub mod transformer;

pub use scale::ScaleFactor;
pub use transformer::{ImageTransformer, TransformedImage};
