//! Object name derivation and validation shared by all backends.

use crate::traits::{StorageError, StorageResult};
use std::fmt::Display;

/// Split a filename into `(stem, extension)`.
///
/// The extension starts at the last `.` of the final path component and keeps
/// the dot. Dots that only lead the component do not start an extension, so
/// `.bashrc` has none. Joining the two halves always gives back the input.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let name_start = filename.rfind('/').map_or(0, |i| i + 1);

    match filename.rfind('.') {
        Some(dot) if dot >= name_start => {
            if filename[name_start..dot].bytes().any(|b| b != b'.') {
                filename.split_at(dot)
            } else {
                (filename, "")
            }
        }
        _ => (filename, ""),
    }
}

/// Object name for an upload: `{stem}_{scale}{extension}`.
///
/// No uniqueness token is added; the same filename and scale always map to
/// the same object.
pub fn derive_object_name(filename: &str, scale: impl Display) -> String {
    let (stem, extension) = split_extension(filename);
    format!("{}_{}{}", stem, scale, extension)
}

/// Reject names that are empty, could escape the bucket, or that a backend
/// would have to rewrite.
///
/// Every accepted name is stored byte for byte by all backends: `/` separates
/// non-empty segments, and no segment is `.`, `..` or holds control characters.
pub fn validate_object_name(object_name: &str) -> StorageResult<()> {
    if object_name.is_empty() {
        return Err(StorageError::InvalidKey("object name is empty".to_string()));
    }

    if object_name.starts_with('/') || object_name.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(format!(
            "{} escapes the bucket",
            object_name
        )));
    }

    if object_name
        .split('/')
        .any(|part| part.is_empty() || part == ".")
    {
        return Err(StorageError::InvalidKey(format!(
            "{:?} has an empty or \".\" path segment",
            object_name
        )));
    }

    if object_name.chars().any(|c| c.is_ascii_control()) {
        return Err(StorageError::InvalidKey(format!(
            "{:?} contains control characters",
            object_name
        )));
    }

    Ok(())
}
