mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{file_form, jpeg_dimensions, png_image};
use helpers::storage::FailingStorage;
use helpers::{setup_test_app, setup_test_app_with_limit, setup_test_app_with_storage};
use pixscale_api::{ErrorResponse, MessageResponse};
use std::sync::Arc;

#[tokio::test]
async fn test_process_image_default_scale() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .multipart(file_form("photo.png", png_image(400, 200)))
        .await;

    response.assert_status(StatusCode::OK);
    let body: MessageResponse = response.json();
    assert_eq!(body.message, "Image processed and uploaded successfully!");

    let stored = app.stored_object("photo_0.25.png").await;
    assert_eq!(jpeg_dimensions(&stored), (100, 50));
}

#[tokio::test]
async fn test_process_image_custom_scale() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .add_query_param("scale", "0.5")
        .multipart(file_form("cat.png", png_image(333, 101)))
        .await;

    response.assert_status(StatusCode::OK);
    let stored = app.stored_object("cat_0.5.png").await;
    assert_eq!(jpeg_dimensions(&stored), (166, 50));
}

#[tokio::test]
async fn test_integral_scale_keeps_decimal_in_name() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .add_query_param("scale", "2")
        .multipart(file_form("icon.v2.png", png_image(10, 6)))
        .await;

    response.assert_status(StatusCode::OK);
    let stored = app.stored_object("icon.v2_2.0.png").await;
    assert_eq!(jpeg_dimensions(&stored), (20, 12));
}

#[tokio::test]
async fn test_filename_without_extension() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .multipart(file_form("README", png_image(40, 40)))
        .await;

    response.assert_status(StatusCode::OK);
    assert!(app.storage.exists("README_0.25").await.unwrap());
}

#[tokio::test]
async fn test_same_name_overwrites_previous_object() {
    let app = setup_test_app().await;

    for (width, height) in [(400, 200), (80, 40)] {
        app.client()
            .post("/process-image")
            .multipart(file_form("photo.png", png_image(width, height)))
            .await
            .assert_status(StatusCode::OK);
    }

    let stored = app.stored_object("photo_0.25.png").await;
    assert_eq!(jpeg_dimensions(&stored), (20, 10));
}

#[tokio::test]
async fn test_missing_file_part() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("other", "value");
    let response = app.client().post("/process-image").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "No file part");
}

#[tokio::test]
async fn test_file_field_without_filename_is_not_a_file_part() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("file", "just text");
    let response = app.client().post("/process-image").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "No file part");
}

#[tokio::test]
async fn test_empty_filename() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .multipart(file_form("", png_image(40, 40)))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "No selected file");
}

#[tokio::test]
async fn test_body_that_is_not_multipart() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .text("not a form")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "No file part");
}

#[tokio::test]
async fn test_invalid_scale() {
    let app = setup_test_app().await;

    for scale in ["abc", "0", "-1"] {
        let response = app
            .client()
            .post("/process-image")
            .add_query_param("scale", scale)
            .multipart(file_form("photo.png", png_image(40, 40)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string(), "scale {scale:?}");
    }

    assert!(!app.storage.exists("photo_0.25.png").await.unwrap());
}

#[tokio::test]
async fn test_invalid_scale_is_reported_before_missing_file() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .add_query_param("scale", "abc")
        .multipart(MultipartForm::new().add_text("other", "value"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert!(body.error.starts_with("Invalid scale"));
}

#[tokio::test]
async fn test_undecodable_image() {
    let app = setup_test_app().await;

    let part = Part::bytes(bytes::Bytes::from_static(b"this is not an image"))
        .file_name("notes.png")
        .mime_type("image/png");
    let response = app
        .client()
        .post("/process-image")
        .multipart(MultipartForm::new().add_part("file", part))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert!(!body.error.is_empty());
    assert!(!app.storage.exists("notes_0.25.png").await.unwrap());
}

#[tokio::test]
async fn test_scaled_to_nothing_is_server_error() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/process-image")
        .multipart(file_form("tiny.png", png_image(3, 3)))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!app.storage.exists("tiny_0.25.png").await.unwrap());
}

#[tokio::test]
async fn test_storage_failure() {
    let app = setup_test_app_with_storage(Arc::new(FailingStorage), 16 * 1024 * 1024);

    let response = app
        .client()
        .post("/process-image")
        .multipart(file_form("photo.png", png_image(400, 200)))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error, "Failed to upload image: connection refused");
}

#[tokio::test]
async fn test_upload_over_size_limit() {
    let app = setup_test_app_with_limit(1024).await;

    let response = app
        .client()
        .post("/process-image")
        .multipart(file_form("big.png", vec![0u8; 8 * 1024]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(!app.storage.exists("big_0.25.png").await.unwrap());
}
