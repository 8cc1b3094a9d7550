//! Conversion dispatch and the supported-pair lookup.

use bytes::Bytes;

use renamix_core::AppError;

use crate::{document, image};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Default re-encoding quality when the caller does not specify one.
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Formats a conversion can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Pdf,
    Docx,
    Jpeg,
    Png,
    WebP,
}

impl TargetFormat {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(TargetFormat::Pdf),
            "docx" => Ok(TargetFormat::Docx),
            "jpeg" | "jpg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            "webp" => Ok(TargetFormat::WebP),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown target format: {}",
                s
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Pdf => "pdf",
            TargetFormat::Docx => "docx",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::WebP => "webp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            TargetFormat::Pdf => "application/pdf",
            TargetFormat::Docx => DOCX_CONTENT_TYPE,
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Png => "image/png",
            TargetFormat::WebP => "image/webp",
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Conversion request parameters.
#[derive(Debug, Clone, Copy)]
pub struct ConversionOptions {
    pub target: TargetFormat,
    /// Re-encoding quality in [0, 1]; only meaningful for image targets.
    pub quality: f32,
}

impl ConversionOptions {
    pub fn new(target: TargetFormat) -> Self {
        Self {
            target,
            quality: DEFAULT_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }
}

/// A successful conversion result.
#[derive(Debug, Clone)]
pub struct Converted {
    pub data: Bytes,
    pub content_type: String,
    pub extension: &'static str,
}

/// Which conversions are offered for a content type. Pure lookup: unknown
/// types get an empty list, never an error.
pub fn supported_conversions(content_type: &str) -> Vec<TargetFormat> {
    match content_type {
        "application/pdf" => vec![TargetFormat::Docx],
        DOCX_CONTENT_TYPE => vec![TargetFormat::Pdf],
        "image/jpeg" => vec![TargetFormat::Png, TargetFormat::WebP],
        "image/png" => vec![TargetFormat::Jpeg, TargetFormat::WebP],
        "image/webp" => vec![TargetFormat::Jpeg, TargetFormat::Png],
        _ => Vec::new(),
    }
}

/// Convert `data` to the requested target format.
///
/// Rejects unsupported (source, target) pairs with
/// [`AppError::UnsupportedConversion`]; callers must not fall back silently.
pub async fn convert(
    content_type: &str,
    data: &[u8],
    options: &ConversionOptions,
) -> Result<Converted, AppError> {
    if !supported_conversions(content_type).contains(&options.target) {
        return Err(AppError::UnsupportedConversion {
            from: content_type.to_string(),
            to: options.target.extension().to_string(),
        });
    }

    tracing::debug!(
        from = content_type,
        to = %options.target,
        size_bytes = data.len(),
        "Converting file"
    );

    let data = match (content_type, options.target) {
        ("application/pdf", TargetFormat::Docx) => document::pdf_to_docx(data)?,
        (DOCX_CONTENT_TYPE, TargetFormat::Pdf) => document::docx_to_pdf(data)?,
        // The lookup above only lets image sources through to image targets.
        (_, target) => image::convert_image(data, target, options.quality)?,
    };

    Ok(Converted {
        data,
        content_type: options.target.content_type().to_string(),
        extension: options.target.extension(),
    })
}

/// Suggested name for a converted artifact: the final extension replaced
/// with the target's (appended when the name has none).
pub fn converted_name(name: &str, target: TargetFormat) -> String {
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    format!("{}.{}", stem, target.extension())
}
