//! Renamix Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Renamix components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::AppError;
pub use models::{FileRecord, FileStatus, NamingConfig, NamingMode, RawFile};
