/// Errors raised while turning an upload into a rescaled JPEG
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Undecodable image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Scaled image would be empty ({width}x{height})")]
    EmptyOutput { width: u32, height: u32 },

    #[error("Scaled image would be too large ({width}x{height})")]
    OutputTooLarge { width: u32, height: u32 },

    #[error("Encode failure: {0}")]
    Encode(#[source] image::ImageError),
}

/// A `scale` value that cannot be used
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("Invalid scale: could not convert {0:?} to a number")]
    Unparseable(String),

    #[error("Invalid scale: {0} must be a positive finite number")]
    OutOfRange(f64),
}
