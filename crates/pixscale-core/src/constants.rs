//! Shared constants

/// Bucket that processed images are written to unless `STORAGE_BUCKET` overrides it.
pub const DEFAULT_BUCKET: &str = "lab-2";
