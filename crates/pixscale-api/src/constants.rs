//! API constants

/// Route that accepts uploads
pub const PROCESS_IMAGE_PATH: &str = "/process-image";

pub const HEALTH_PATH: &str = "/health";

/// Multipart field that carries the uploaded image
pub const FILE_FIELD: &str = "file";

pub const SUCCESS_MESSAGE: &str = "Image processed and uploaded successfully!";

pub const NO_FILE_PART: &str = "No file part";

pub const NO_SELECTED_FILE: &str = "No selected file";
