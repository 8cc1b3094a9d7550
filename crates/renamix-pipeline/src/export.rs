//! Batch export: ZIP archive or sequential individual downloads.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use renamix_core::{FileRecord, PipelineConfig};

use crate::notify::{NoticeLevel, Notifier};
use crate::store::FileStore;

/// How a selection leaves the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// One compressed container holding every selected record.
    Archive,
    /// One download operation per record, sequential.
    Individual,
}

/// "Give me a downloadable handle for these bytes with this name" — the
/// file-system-access collaborator.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn deliver(&self, name: &str, content_type: &str, data: Bytes) -> Result<()>;
}

pub struct Exporter {
    store: Arc<FileStore>,
    sink: Arc<dyn DownloadSink>,
    notifier: Arc<dyn Notifier>,
    settings: PipelineConfig,
}

impl Exporter {
    pub fn new(
        store: Arc<FileStore>,
        sink: Arc<dyn DownloadSink>,
        notifier: Arc<dyn Notifier>,
        settings: PipelineConfig,
    ) -> Self {
        Self {
            store,
            sink,
            notifier,
            settings,
        }
    }

    /// Export the selected records. Fire-and-forget: the outcome is
    /// reported through the notifier, never the return value. Only
    /// Completed records are eligible; an empty eligible set is an advisory
    /// notice and performs no I/O.
    pub async fn export(&self, selected: &[Uuid], mode: ExportMode) {
        let records: Vec<FileRecord> = selected
            .iter()
            .filter_map(|id| self.store.get(*id))
            .filter(|r| r.is_completed())
            .collect();

        if records.is_empty() {
            self.notifier
                .notify(NoticeLevel::Info, "No completed files selected for export");
            return;
        }

        let outcome = match mode {
            ExportMode::Archive => self.export_archive(&records).await,
            ExportMode::Individual => self.export_individual(&records).await,
        };

        match outcome {
            Ok(()) => self
                .notifier
                .notify(NoticeLevel::Success, "Files downloaded successfully"),
            Err(e) => {
                tracing::error!(error = %e, mode = ?mode, "Export failed");
                self.notifier.notify(
                    NoticeLevel::Error,
                    "Failed to export files. Try downloading them individually.",
                );
            }
        }
    }

    async fn export_archive(&self, records: &[FileRecord]) -> Result<()> {
        let archive = self.build_archive(records).await?;
        let name = format!("renamed_files_{}.zip", Utc::now().date_naive().format("%Y-%m-%d"));
        self.sink
            .deliver(&name, "application/zip", Bytes::from(archive))
            .await
            .context("Failed to deliver archive")
    }

    /// Build the ZIP in bounded batches with a cooperative yield between
    /// them, so a large selection does not monopolize the executor.
    async fn build_archive(&self, records: &[FileRecord]) -> Result<Vec<u8>> {
        let batch = self.settings.archive_batch_size.max(1);

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644);

            for (i, record) in records.iter().enumerate() {
                if i > 0 && i % batch == 0 {
                    tokio::task::yield_now().await;
                }

                let entry_name = sanitize_archive_filename(
                    record.export_name(),
                    &format!("unnamed_{}", record.id),
                );
                zip.start_file(&entry_name, options)
                    .with_context(|| format!("Failed to add file to ZIP: {}", entry_name))?;
                zip.write_all(record.export_content())
                    .with_context(|| format!("Failed to write file data to ZIP: {}", entry_name))?;
            }

            zip.finish().context("Failed to finalize ZIP archive")?;
        }

        Ok(buffer)
    }

    async fn export_individual(&self, records: &[FileRecord]) -> Result<()> {
        for record in records {
            tokio::time::sleep(self.settings.download_delay).await;
            self.sink
                .deliver(
                    record.export_name(),
                    record.export_content_type(),
                    record.export_content().clone(),
                )
                .await
                .with_context(|| format!("Failed to download {}", record.export_name()))?;
        }
        Ok(())
    }
}

/// Sanitize a filename for an archive entry to prevent path traversal.
/// Extracts only the base name (strips path components like `../`).
fn sanitize_archive_filename(filename: &str, fallback: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}
