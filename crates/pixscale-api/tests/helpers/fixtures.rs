use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// PNG with a gradient so the encoder has something to compress
pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer
}

/// Form with a single `file` part
pub fn file_form(filename: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type("image/png");
    MultipartForm::new().add_part("file", part)
}

/// Assert that `data` is a JPEG and return its dimensions
pub fn jpeg_dimensions(data: &[u8]) -> (u32, u32) {
    assert_eq!(
        image::guess_format(data).expect("stored object has no known format"),
        ImageFormat::Jpeg
    );
    image::load_from_memory(data)
        .expect("stored object should decode")
        .dimensions()
}
