//! Request validation
//!
//! Turns the query string and multipart body of an upload into an
//! [`UploadRequest`], or a client error. Nothing here looks at the image
//! bytes themselves; undecodable uploads are caught by the transformer.

use axum::extract::multipart::{Field, Multipart};
use bytes::Bytes;
use pixscale_core::AppError;
use pixscale_processing::ScaleFactor;
use serde::Deserialize;

use crate::constants::{FILE_FIELD, NO_FILE_PART, NO_SELECTED_FILE};

#[derive(Debug, Default, Deserialize)]
pub struct ScaleQuery {
    pub scale: Option<String>,
}

/// A validated upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub scale: ScaleFactor,
    /// Original filename as sent by the client, never empty
    pub filename: String,
    pub data: Bytes,
}

/// Parse the `scale` query parameter, falling back to the default when absent.
pub fn parse_scale(raw: Option<&str>) -> Result<ScaleFactor, AppError> {
    match raw {
        None => Ok(ScaleFactor::default()),
        Some(value) => value
            .parse::<ScaleFactor>()
            .map_err(|e| AppError::InvalidInput(e.to_string())),
    }
}

/// A part counts as a file part only when its Content-Disposition carries a
/// filename, even an empty one; without it the part is a plain form field.
fn is_file_part(field: &Field<'_>) -> bool {
    field.file_name().is_some()
}

/// Find the first file part named `file` and read it.
///
/// Returns `(filename, bytes)`. Other fields are skipped.
pub async fn read_file_part(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) || !is_file_part(&field) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::InvalidInput(NO_SELECTED_FILE.to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        return Ok((filename, data));
    }

    Err(AppError::InvalidInput(NO_FILE_PART.to_string()))
}

/// Validate a whole upload: scale first, then the file part.
pub async fn validate_upload(
    query: &ScaleQuery,
    multipart: Option<Multipart>,
) -> Result<UploadRequest, AppError> {
    let scale = parse_scale(query.scale.as_deref())?;

    let multipart =
        multipart.ok_or_else(|| AppError::InvalidInput(NO_FILE_PART.to_string()))?;
    let (filename, data) = read_file_part(multipart).await?;

    Ok(UploadRequest {
        scale,
        filename,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::header::CONTENT_TYPE;
    use pixscale_core::ErrorMetadata;

    const BOUNDARY: &str = "pixscale-boundary";

    /// Multipart extractor over a body with one part per `(disposition, data)`.
    async fn multipart(parts: &[(&str, &str)]) -> Multipart {
        let mut body = String::new();
        for (disposition, data) in parts {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\n\r\n{data}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let request = Request::builder()
            .method("POST")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    async fn read_err(parts: &[(&str, &str)]) -> String {
        read_file_part(multipart(parts).await)
            .await
            .unwrap_err()
            .client_message()
    }

    #[tokio::test]
    async fn test_reads_first_file_part() {
        let form = multipart(&[
            (r#"form-data; name="note""#, "hello"),
            (r#"form-data; name="file"; filename="cat.png""#, "first"),
            (r#"form-data; name="file"; filename="dog.png""#, "second"),
        ])
        .await;

        let (filename, data) = read_file_part(form).await.unwrap();
        assert_eq!(filename, "cat.png");
        assert_eq!(data, Bytes::from_static(b"first"));
    }

    #[tokio::test]
    async fn test_empty_filename_is_no_selected_file() {
        let err = read_err(&[(r#"form-data; name="file"; filename="""#, "x")]).await;
        assert_eq!(err, NO_SELECTED_FILE);
    }

    #[tokio::test]
    async fn test_file_field_without_filename_is_no_file_part() {
        let err = read_err(&[(r#"form-data; name="file""#, "x")]).await;
        assert_eq!(err, NO_FILE_PART);

        let err = read_err(&[(r#"form-data; name="file"; x-filename-hint="cat.png""#, "x")]).await;
        assert_eq!(err, NO_FILE_PART);
    }

    #[tokio::test]
    async fn test_extended_filename_is_never_an_empty_selection() {
        let form = multipart(&[(r#"form-data; name="file"; filename*=UTF-8''cat.png"#, "x")]).await;

        match read_file_part(form).await {
            Ok((filename, _)) => assert!(filename.ends_with("cat.png"), "{filename:?}"),
            Err(err) => assert_eq!(err.client_message(), NO_FILE_PART),
        }
    }

    #[test]
    fn test_missing_scale_defaults_to_quarter() {
        assert_eq!(parse_scale(None).unwrap(), ScaleFactor::DEFAULT);
    }

    #[test]
    fn test_valid_scale() {
        assert_eq!(parse_scale(Some("0.5")).unwrap().value(), 0.5);
        assert_eq!(parse_scale(Some("3")).unwrap().to_string(), "3.0");
    }

    #[test]
    fn test_invalid_scale_is_client_error() {
        for raw in ["abc", "", "0", "-1", "nan"] {
            let err = parse_scale(Some(raw)).unwrap_err();
            assert_eq!(err.http_status_code(), 400, "{raw:?}");
            assert!(err.client_message().starts_with("Invalid scale"), "{raw:?}");
        }
    }
}
