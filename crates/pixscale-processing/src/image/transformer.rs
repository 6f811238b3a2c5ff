//! Image transformer - decode, rescale, re-encode as JPEG

use crate::error::TransformError;
use crate::image::scale::ScaleFactor;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView};
use std::io::Cursor;

/// JPEG quality used for every output
pub const JPEG_QUALITY: u8 = 75;

/// Content type of every output
pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";

/// JPEG cannot store a side longer than this.
const MAX_JPEG_DIMENSION: u32 = 65_535;

/// Upper bound on output pixels, to keep a large scale factor from
/// exhausting memory.
const MAX_OUTPUT_PIXELS: u64 = 100_000_000;

const RESAMPLING_FILTER: FilterType = FilterType::CatmullRom;

/// Encoded result of a rescale
#[derive(Debug, Clone)]
pub struct TransformedImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
}

impl TransformedImage {
    /// Encoded size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Stateless image transformer
pub struct ImageTransformer;

impl ImageTransformer {
    /// Output dimensions for an input of `width` x `height`: each side is
    /// `floor(side * scale)`, with no rounding and no minimum.
    pub fn target_dimensions(width: u32, height: u32, scale: ScaleFactor) -> (u32, u32) {
        (scale.apply(width), scale.apply(height))
    }

    /// Decode `data`, rescale it by `scale` and encode the result as JPEG.
    ///
    /// CPU bound; async callers should run it on a blocking thread.
    pub fn rescale(data: &[u8], scale: ScaleFactor) -> Result<TransformedImage, TransformError> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TransformError::Decode(image::ImageError::IoError(e)))?
            .decode()
            .map_err(TransformError::Decode)?;

        let (width, height) = img.dimensions();
        let (new_width, new_height) = Self::target_dimensions(width, height, scale);

        if new_width == 0 || new_height == 0 {
            return Err(TransformError::EmptyOutput {
                width: new_width,
                height: new_height,
            });
        }

        if new_width > MAX_JPEG_DIMENSION
            || new_height > MAX_JPEG_DIMENSION
            || u64::from(new_width) * u64::from(new_height) > MAX_OUTPUT_PIXELS
        {
            return Err(TransformError::OutputTooLarge {
                width: new_width,
                height: new_height,
            });
        }

        tracing::debug!(
            width,
            height,
            new_width,
            new_height,
            scale = %scale,
            "Resizing image"
        );

        let resized = img.resize_exact(new_width, new_height, RESAMPLING_FILTER);
        let data = Self::encode_jpeg(flatten_for_jpeg(resized))?;

        tracing::debug!(
            new_width,
            new_height,
            size_bytes = data.len(),
            "Encoded rescaled image as JPEG"
        );

        Ok(TransformedImage {
            data,
            width: new_width,
            height: new_height,
            content_type: OUTPUT_CONTENT_TYPE,
        })
    }

    fn encode_jpeg(img: DynamicImage) -> Result<Bytes, TransformError> {
        let (width, height) = img.dimensions();
        let estimated_size = (width as usize * height as usize) / 4;
        let mut buffer = Vec::with_capacity(estimated_size);

        let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
        img.write_with_encoder(encoder)
            .map_err(TransformError::Encode)?;

        Ok(Bytes::from(buffer))
    }
}

/// JPEG holds 8-bit luma or RGB only: drop alpha and reduce bit depth.
fn flatten_for_jpeg(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            DynamicImage::ImageLuma8(img.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}
