//! The Renamix pipeline: record store, orchestrator, and batch export.
//!
//! [`Pipeline`] drives each added file through upload → processing → naming
//! → completed/error, with per-record failure isolation. [`FileStore`] is
//! the single piece of shared mutable state; [`Exporter`] bundles completed
//! records into an archive or triggers sequential individual downloads.
//!
//! ```no_run
//! use std::sync::Arc;
//! use renamix_core::PipelineConfig;
//! use renamix_naming::{KeywordAnalyzer, NameResolver};
//! use renamix_pipeline::{FileStore, LogNotifier, Pipeline};
//!
//! let settings = PipelineConfig::from_env();
//! let resolver = NameResolver::with_analyzer(
//!     Arc::new(KeywordAnalyzer::new()),
//!     settings.analyzer_timeout,
//! );
//! let pipeline = Pipeline::new(
//!     Arc::new(FileStore::new()),
//!     Arc::new(resolver),
//!     Arc::new(LogNotifier),
//!     settings,
//! );
//! ```

pub mod export;
pub mod notify;
pub mod pipeline;
pub mod store;

pub use export::{DownloadSink, ExportMode, Exporter};
pub use notify::{LogNotifier, NoticeLevel, Notifier};
pub use pipeline::Pipeline;
pub use store::FileStore;
