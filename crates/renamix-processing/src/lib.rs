//! Format conversion for the Renamix pipeline.
//!
//! Supported pairs: PDF → DOCX (text re-flow), DOCX → PDF (plain-text
//! render), and re-encoding between JPEG/PNG/WebP with a quality parameter.
//! Anything else fails with an explicit unsupported-conversion error.

pub mod convert;
pub mod document;
pub mod image;

pub use convert::{
    convert, converted_name, supported_conversions, ConversionOptions, Converted, TargetFormat,
    DOCX_CONTENT_TYPE,
};
