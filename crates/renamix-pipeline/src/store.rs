//! The file record store.
//!
//! Insertion-ordered collection keyed by record id. All mutation goes
//! through the contract methods here; each holds the lock only across a
//! synchronous critical section, so mutations are atomic and immediately
//! visible to every reader. Mutating an absent id is a no-op (resilience
//! over strict invariants); adding a duplicate id is a programming error.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use renamix_core::FileRecord;

struct Entry {
    record: FileRecord,
    /// Cancelled when the record is removed; in-flight work for the record
    /// selects on this and drops pending updates.
    cancel: CancellationToken,
}

#[derive(Default)]
pub struct FileStore {
    entries: Mutex<Vec<Entry>>,
    counter: AtomicU32,
}

fn lock_entries(entries: &Mutex<Vec<Entry>>) -> std::sync::MutexGuard<'_, Vec<Entry>> {
    // A poisoned lock only means a panic elsewhere; the data is still usable.
    entries.lock().unwrap_or_else(|e| e.into_inner())
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records at the end, preserving the given order.
    pub fn add(&self, records: Vec<FileRecord>) {
        let mut entries = lock_entries(&self.entries);
        for record in records {
            assert!(
                !entries.iter().any(|e| e.record.id == record.id),
                "duplicate record id {}",
                record.id
            );
            entries.push(Entry {
                record,
                cancel: CancellationToken::new(),
            });
        }
    }

    /// Apply a mutation to exactly one record. Returns false (and does
    /// nothing) when the id is absent.
    pub fn update<F>(&self, id: Uuid, mutation: F) -> bool
    where
        F: FnOnce(&mut FileRecord),
    {
        let mut entries = lock_entries(&self.entries);
        match entries.iter_mut().find(|e| e.record.id == id) {
            Some(entry) => {
                mutation(&mut entry.record);
                true
            }
            None => false,
        }
    }

    /// Delete the record and cancel its outstanding work. Safe if absent.
    pub fn remove(&self, id: Uuid) {
        let mut entries = lock_entries(&self.entries);
        if let Some(pos) = entries.iter().position(|e| e.record.id == id) {
            let entry = entries.remove(pos);
            entry.cancel.cancel();
        }
    }

    /// Assign a new name, pushing the prior one onto the record's history.
    /// Blank names are rejected as a no-op.
    pub fn rename(&self, id: Uuid, new_name: &str) {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            tracing::debug!(%id, "Ignoring rename to a blank name");
            return;
        }
        self.update(id, |record| {
            let prior = record.export_name().to_string();
            record.name_history.push(prior);
            record.current_name = Some(new_name.to_string());
        });
    }

    /// Pop the last history entry back into current_name. No-op when the
    /// history is empty.
    pub fn undo_rename(&self, id: Uuid) {
        self.update(id, |record| {
            if let Some(previous) = record.name_history.pop() {
                record.current_name = Some(previous);
            }
        });
    }

    pub fn get(&self, id: Uuid) -> Option<FileRecord> {
        lock_entries(&self.entries)
            .iter()
            .find(|e| e.record.id == id)
            .map(|e| e.record.clone())
    }

    pub fn contains(&self, id: Uuid) -> bool {
        lock_entries(&self.entries)
            .iter()
            .any(|e| e.record.id == id)
    }

    /// All records in insertion order.
    pub fn snapshot(&self) -> Vec<FileRecord> {
        lock_entries(&self.entries)
            .iter()
            .map(|e| e.record.clone())
            .collect()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        lock_entries(&self.entries)
            .iter()
            .map(|e| e.record.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cancellation token tied to a record's lifetime.
    pub fn cancel_token(&self, id: Uuid) -> Option<CancellationToken> {
        lock_entries(&self.entries)
            .iter()
            .find(|e| e.record.id == id)
            .map(|e| e.cancel.clone())
    }

    /// Next value for the `{counter}` naming token. Monotonic per store, so
    /// values never collide within a batch.
    pub fn next_counter(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}
