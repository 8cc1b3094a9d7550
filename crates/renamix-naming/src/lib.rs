//! Naming strategies for the Renamix pipeline.
//!
//! A [`NameResolver`] turns a file record plus the active [`NamingConfig`]
//! into a candidate filename, either deterministically (token pattern) or by
//! consulting a [`ContentAnalyzer`]. Resolution never hard-fails: analyzer
//! errors and timeouts fall back to the pattern algorithm.
//!
//! [`NamingConfig`]: renamix_core::NamingConfig

pub mod analyzer;
pub mod claude;
pub mod keyword;
pub mod pattern;
pub mod resolver;

pub use analyzer::ContentAnalyzer;
pub use claude::ClaudeAnalyzer;
pub use keyword::KeywordAnalyzer;
pub use pattern::{resolve_pattern, sanitize_base_name, TokenContext};
pub use resolver::{NameResolver, NameSource};
