//! Pipeline orchestrator.
//!
//! Drives each newly added file through upload simulation → processing →
//! naming → completed/error, strictly sequentially within a batch: a later
//! record does not start before the earlier one reaches a terminal state.
//! An error in one record never aborts the rest of the batch.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use renamix_core::{AppError, FileRecord, FileStatus, NamingConfig, PipelineConfig, RawFile};
use renamix_naming::{NameSource, TokenContext};
use renamix_processing::{convert, converted_name, supported_conversions, ConversionOptions};

use crate::notify::{NoticeLevel, Notifier};
use crate::store::FileStore;

/// Two-slot naming-configuration history: the active config plus a snapshot
/// of the one immediately prior, enabling a single-level undo.
#[derive(Debug, Clone, Default)]
struct ConfigState {
    current: NamingConfig,
    previous: Option<NamingConfig>,
}

pub struct Pipeline {
    store: Arc<FileStore>,
    namer: Arc<dyn NameSource>,
    notifier: Arc<dyn Notifier>,
    settings: PipelineConfig,
    config: Mutex<ConfigState>,
}

impl Pipeline {
    pub fn new(
        store: Arc<FileStore>,
        namer: Arc<dyn NameSource>,
        notifier: Arc<dyn Notifier>,
        settings: PipelineConfig,
    ) -> Self {
        Self {
            store,
            namer,
            notifier,
            settings,
            config: Mutex::new(ConfigState::default()),
        }
    }

    pub fn store(&self) -> &Arc<FileStore> {
        &self.store
    }

    pub fn naming_config(&self) -> NamingConfig {
        self.lock_config().current.clone()
    }

    /// Replace the active naming configuration, snapshotting the prior one
    /// for undo.
    pub fn set_naming_config(&self, new: NamingConfig) {
        let mut state = self.lock_config();
        state.previous = Some(state.current.clone());
        state.current = new;
    }

    /// Revert the last configuration change and re-apply naming to all
    /// records. Returns false (doing nothing) when there is no snapshot.
    /// The undone config lands in the snapshot slot, so a second undo swaps
    /// back.
    pub async fn undo_naming_config(&self) -> bool {
        let restored = {
            let mut state = self.lock_config();
            match state.previous.take() {
                Some(previous) => {
                    let undone = std::mem::replace(&mut state.current, previous);
                    state.previous = Some(undone);
                    true
                }
                None => false,
            }
        };

        if restored {
            self.apply_config_to_all().await;
        }
        restored
    }

    /// Accept a batch of raw files and process them sequentially. Returns
    /// the new record ids in intake order; by the time this resolves, every
    /// surviving record is Completed or Error.
    pub async fn add_files(&self, raw: Vec<RawFile>) -> Vec<Uuid> {
        if raw.is_empty() {
            return Vec::new();
        }

        let records: Vec<FileRecord> = raw.into_iter().map(FileRecord::from_raw).collect();
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        self.store.add(records);

        let mut failures = 0usize;
        for id in &ids {
            if !self.process_record(*id).await {
                failures += 1;
            }
        }

        if failures == 0 {
            self.notifier
                .notify(NoticeLevel::Success, "All files processed successfully");
        }

        ids
    }

    /// Recompute names for every record in the store with the active
    /// configuration, regardless of status. Each record's naming call
    /// tolerates failure independently.
    pub async fn apply_config_to_all(&self) {
        let config = self.naming_config();
        for id in self.store.ids() {
            let Some(record) = self.store.get(id) else {
                continue;
            };
            let ctx = TokenContext::new(Utc::now().date_naive(), self.store.next_counter());
            match self.namer.resolve(&record, &config, &ctx).await {
                Ok(name) => {
                    self.store.update(id, |r| {
                        r.current_name = Some(name);
                        r.status = FileStatus::Completed;
                        r.error_message = None;
                    });
                }
                Err(e) => {
                    tracing::error!(file = %record.original_name, error = %e, "Re-naming failed");
                    self.store.update(id, |r| {
                        r.status = FileStatus::Error;
                        r.error_message = Some(format!("Failed to process file: {}", e));
                    });
                }
            }
        }
    }

    pub fn rename_file(&self, id: Uuid, new_name: &str) {
        self.store.rename(id, new_name);
    }

    pub fn undo_rename(&self, id: Uuid) {
        self.store.undo_rename(id);
    }

    pub fn remove_file(&self, id: Uuid) {
        self.store.remove(id);
    }

    /// Convert one record's source content to the target format, updating
    /// the record on the outcome. Unsupported pairs are rejected before the
    /// record is touched.
    pub async fn convert_file(&self, id: Uuid, options: ConversionOptions) {
        let Some(record) = self.store.get(id) else {
            self.notifier
                .notify(NoticeLevel::Error, "File no longer exists");
            return;
        };

        if !supported_conversions(&record.content_type).contains(&options.target) {
            let err = AppError::UnsupportedConversion {
                from: record.content_type.clone(),
                to: options.target.extension().to_string(),
            };
            self.notifier.notify(
                NoticeLevel::Error,
                &format!("Failed to convert {}: {}", record.original_name, err),
            );
            return;
        }

        let cancel = self.store.cancel_token(id);
        self.store.update(id, |r| r.status = FileStatus::Processing);

        let result = convert(&record.content_type, &record.source_content, &options).await;

        // The record may have been removed while the conversion ran.
        if cancel.map(|t| t.is_cancelled()).unwrap_or(true) || !self.store.contains(id) {
            return;
        }

        match result {
            Ok(converted) => {
                let new_name = converted_name(record.export_name(), options.target);
                self.store.update(id, |r| {
                    r.status = FileStatus::Completed;
                    r.converted_content = Some(converted.data);
                    r.converted_content_type = Some(converted.content_type);
                    r.current_name = Some(new_name);
                    r.error_message = None;
                });
                self.notifier.notify(
                    NoticeLevel::Success,
                    &format!("Successfully converted {}", record.original_name),
                );
            }
            Err(e) => {
                tracing::error!(file = %record.original_name, error = %e, "Conversion failed");
                // Previously converted content stays untouched.
                self.store.update(id, |r| {
                    r.status = FileStatus::Error;
                    r.error_message = Some(format!("Conversion failed: {}", e));
                });
                self.notifier.notify(
                    NoticeLevel::Error,
                    &format!("Failed to convert {}", record.original_name),
                );
            }
        }
    }

    /// Drive one record to a terminal state. Returns false when the record
    /// ended in Error; removal mid-flight counts as success (nothing to
    /// report).
    async fn process_record(&self, id: Uuid) -> bool {
        let Some(cancel) = self.store.cancel_token(id) else {
            return true;
        };

        // Upload phase: progress ticks until 100.
        loop {
            match self.store.get(id) {
                Some(record) if record.progress >= 100 => break,
                Some(_) => {}
                None => return true,
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(%id, "Upload cancelled by removal");
                    return true;
                }
                _ = tokio::time::sleep(self.settings.upload_tick) => {}
            }

            let increment = self.settings.upload_increment;
            if !self.store.update(id, |r| {
                r.progress = r.progress.saturating_add(increment).min(100);
            }) {
                return true;
            }
        }

        self.store.update(id, |r| {
            r.progress = 100;
            r.status = FileStatus::Processing;
        });

        // Naming phase.
        let Some(record) = self.store.get(id) else {
            return true;
        };
        let config = self.naming_config();
        let ctx = TokenContext::new(Utc::now().date_naive(), self.store.next_counter());
        let result = self.namer.resolve(&record, &config, &ctx).await;

        // Suppress stale updates if the record went away during resolution.
        if cancel.is_cancelled() || !self.store.contains(id) {
            return true;
        }

        match result {
            Ok(name) => {
                self.store.update(id, |r| {
                    r.current_name = Some(name);
                    r.status = FileStatus::Completed;
                    r.error_message = None;
                });
                true
            }
            Err(e) => {
                tracing::error!(file = %record.original_name, error = %e, "Failed to process file");
                self.store.update(id, |r| {
                    r.status = FileStatus::Error;
                    r.error_message = Some(format!("Failed to process file: {}", e));
                });
                self.notifier.notify(
                    NoticeLevel::Error,
                    &format!("Failed to process {}", record.original_name),
                );
                false
            }
        }
    }

    fn lock_config(&self) -> std::sync::MutexGuard<'_, ConfigState> {
        self.config.lock().unwrap_or_else(|e| e.into_inner())
    }
}
