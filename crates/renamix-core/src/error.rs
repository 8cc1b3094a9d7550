//! Error types module
//!
//! All errors are unified under the `AppError` enum, which can represent
//! naming, conversion, and other domain-specific failures. Services that do
//! not need matchable variants use `anyhow::Result` and convert at the
//! boundary.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Document processing error: {0}")]
    DocumentProcessing(String),

    #[error("Naming error: {0}")]
    Naming(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for detailed error reporting
    pub fn error_type(&self) -> &str {
        match self {
            AppError::UnsupportedConversion { .. } => "UnsupportedConversion",
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::DocumentProcessing(_) => "DocumentProcessing",
            AppError::Naming(_) => "Naming",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Whether the record this error is attached to can still be retried by
    /// the user (unsupported pairs never succeed on retry).
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AppError::UnsupportedConversion { .. })
    }

    /// Get detailed error information including the error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}
