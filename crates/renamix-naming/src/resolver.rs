//! Name resolution: analyzer dispatch, timeout, and deterministic fallback.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use renamix_core::constants::DEFAULT_ANALYZER_TIMEOUT_SECS;
use renamix_core::{FileRecord, NamingConfig, NamingMode};

use crate::analyzer::ContentAnalyzer;
use crate::pattern::{extension_suffix, resolve_pattern, sanitize_base_name, TokenContext};

/// Anything that can produce a candidate name for a record.
///
/// The orchestrator depends on this seam; [`NameResolver`] is the production
/// implementation and never returns an error.
#[async_trait]
pub trait NameSource: Send + Sync {
    async fn resolve(
        &self,
        record: &FileRecord,
        config: &NamingConfig,
        ctx: &TokenContext,
    ) -> Result<String>;
}

/// Resolves names per the active configuration.
///
/// In ContentAnalysis mode the analyzer is consulted for supported content
/// types, wrapped in a timeout; any failure falls back to the token-pattern
/// algorithm with the default template, so resolution never hard-fails.
pub struct NameResolver {
    analyzer: Option<Arc<dyn ContentAnalyzer>>,
    analyzer_timeout: Duration,
}

impl NameResolver {
    /// Pattern-only resolver (no analyzer attached).
    pub fn new() -> Self {
        Self {
            analyzer: None,
            analyzer_timeout: Duration::from_secs(DEFAULT_ANALYZER_TIMEOUT_SECS),
        }
    }

    pub fn with_analyzer(analyzer: Arc<dyn ContentAnalyzer>, timeout: Duration) -> Self {
        Self {
            analyzer: Some(analyzer),
            analyzer_timeout: timeout,
        }
    }

    /// Resolve a candidate name. Pure with respect to the record; the caller
    /// assigns the result.
    pub async fn resolve_name(
        &self,
        record: &FileRecord,
        config: &NamingConfig,
        ctx: &TokenContext,
    ) -> String {
        if config.mode == NamingMode::ContentAnalysis {
            if let Some(suggestion) = self.try_analyze(record).await {
                let base = sanitize_base_name(&suggestion);
                return format!("{}{}", base, extension_suffix(&record.original_name));
            }
            // Fallback uses the default template, not the configured pattern.
            return resolve_pattern(None, record, ctx);
        }

        resolve_pattern(config.pattern.as_deref(), record, ctx)
    }

    async fn try_analyze(&self, record: &FileRecord) -> Option<String> {
        let analyzer = self.analyzer.as_ref()?;
        if !analyzer.supports(&record.content_type) {
            return None;
        }

        match tokio::time::timeout(
            self.analyzer_timeout,
            analyzer.analyze(&record.source_content, &record.content_type),
        )
        .await
        {
            Ok(Ok(suggestion)) => Some(suggestion),
            Ok(Err(e)) => {
                tracing::warn!(
                    analyzer = analyzer.name(),
                    file = %record.original_name,
                    error = %e,
                    "Content analysis failed, falling back to pattern naming"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    analyzer = analyzer.name(),
                    file = %record.original_name,
                    timeout_ms = self.analyzer_timeout.as_millis() as u64,
                    "Content analysis timed out, falling back to pattern naming"
                );
                None
            }
        }
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameSource for NameResolver {
    async fn resolve(
        &self,
        record: &FileRecord,
        config: &NamingConfig,
        ctx: &TokenContext,
    ) -> Result<String> {
        Ok(self.resolve_name(record, config, ctx).await)
    }
}
