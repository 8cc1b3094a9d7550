//! Image re-encoding.
//!
//! Decodes with a guessed format and re-encodes to the target: JPEG and WebP
//! take a lossy quality in [0, 1], PNG is lossless.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageFormat};
use std::io::Cursor;

use renamix_core::AppError;

use crate::convert::TargetFormat;

pub fn convert_image(data: &[u8], target: TargetFormat, quality: f32) -> Result<Bytes, AppError> {
    let img = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| AppError::ImageProcessing(format!("Failed to read image: {}", e)))?
        .decode()
        .map_err(|e| AppError::ImageProcessing(format!("Failed to decode image: {}", e)))?;

    let quality = quality.clamp(0.0, 1.0);

    match target {
        TargetFormat::Jpeg => {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            let mut buffer = Vec::new();
            let mut encoder =
                JpegEncoder::new_with_quality(Cursor::new(&mut buffer), jpeg_quality(quality));
            encoder
                .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| AppError::ImageProcessing(format!("JPEG encoding failed: {}", e)))?;
            Ok(Bytes::from(buffer))
        }
        TargetFormat::Png => {
            let mut buffer = Vec::new();
            img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
                .map_err(|e| AppError::ImageProcessing(format!("PNG encoding failed: {}", e)))?;
            Ok(Bytes::from(buffer))
        }
        TargetFormat::WebP => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
            let webp_data = encoder.encode(quality * 100.0);
            Ok(Bytes::copy_from_slice(&webp_data))
        }
        other => Err(AppError::ImageProcessing(format!(
            "{} is not an image target",
            other
        ))),
    }
}

/// Map a [0, 1] quality to the JPEG encoder's 1-100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    ((quality * 100.0).round() as u8).clamp(1, 100)
}
