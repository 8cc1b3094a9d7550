use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::OCTET_STREAM;

/// Lifecycle state of a file record.
///
/// Status is monotonic within a processing run, except that Completed may
/// transition back to Processing when a record is re-converted or renamed in
/// bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileStatus::Uploading => "uploading",
            FileStatus::Processing => "processing",
            FileStatus::Completed => "completed",
            FileStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// A raw input file accepted at intake.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl RawFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        let content_type = content_type.into();
        Self {
            name: name.into(),
            // Browsers hand over an empty type for unknown files.
            content_type: if content_type.is_empty() {
                OCTET_STREAM.to_string()
            } else {
                content_type
            },
            data,
        }
    }
}

/// One file tracked through upload, naming, conversion, and export.
///
/// Not a serde DTO: the record owns binary payload handles and lives only in
/// the store.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: Uuid,
    /// The name as provided by the user. Immutable.
    pub original_name: String,
    /// Most recently assigned name, if any.
    pub current_name: Option<String>,
    /// Previous current_name values, oldest first. Grows on rename, pops on
    /// undo.
    pub name_history: Vec<String>,
    pub status: FileStatus,
    /// Only meaningful while status is Uploading; reaches 100 before the
    /// transition to Processing.
    pub progress: u8,
    pub content_type: String,
    pub size_bytes: u64,
    /// Present only when status is Error.
    pub error_message: Option<String>,
    /// Original payload. Never mutated.
    pub source_content: Bytes,
    /// Output of the last successful conversion, if any.
    pub converted_content: Option<Bytes>,
    pub converted_content_type: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl FileRecord {
    /// Create a record at intake: Uploading, progress 0.
    pub fn from_raw(raw: RawFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_name: raw.name,
            current_name: None,
            name_history: Vec::new(),
            status: FileStatus::Uploading,
            progress: 0,
            content_type: raw.content_type,
            size_bytes: raw.data.len() as u64,
            error_message: None,
            source_content: raw.data,
            converted_content: None,
            converted_content_type: None,
            added_at: Utc::now(),
        }
    }

    /// The name a download or archive entry should carry.
    pub fn export_name(&self) -> &str {
        self.current_name.as_deref().unwrap_or(&self.original_name)
    }

    /// The bytes a download or archive entry should carry: converted output
    /// when present, the original payload otherwise.
    pub fn export_content(&self) -> &Bytes {
        self.converted_content
            .as_ref()
            .unwrap_or(&self.source_content)
    }

    /// The content type matching [`export_content`](Self::export_content).
    pub fn export_content_type(&self) -> &str {
        self.converted_content_type
            .as_deref()
            .unwrap_or(&self.content_type)
    }

    pub fn is_completed(&self) -> bool {
        self.status == FileStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FileRecord {
        FileRecord::from_raw(RawFile::new(
            "report.pdf",
            "application/pdf",
            Bytes::from_static(b"%PDF-1.4"),
        ))
    }

    #[test]
    fn test_from_raw_initial_state() {
        let rec = record();
        assert_eq!(rec.status, FileStatus::Uploading);
        assert_eq!(rec.progress, 0);
        assert_eq!(rec.original_name, "report.pdf");
        assert_eq!(rec.current_name, None);
        assert!(rec.name_history.is_empty());
        assert_eq!(rec.size_bytes, 8);
        assert_eq!(rec.content_type, "application/pdf");
    }

    #[test]
    fn test_empty_content_type_defaults_to_octet_stream() {
        let raw = RawFile::new("blob", "", Bytes::from_static(b"x"));
        assert_eq!(raw.content_type, OCTET_STREAM);
    }

    #[test]
    fn test_export_name_falls_back_to_original() {
        let mut rec = record();
        assert_eq!(rec.export_name(), "report.pdf");
        rec.current_name = Some("2026_report.pdf".to_string());
        assert_eq!(rec.export_name(), "2026_report.pdf");
    }

    #[test]
    fn test_export_content_prefers_converted() {
        let mut rec = record();
        assert_eq!(rec.export_content(), &rec.source_content.clone());
        assert_eq!(rec.export_content_type(), "application/pdf");

        rec.converted_content = Some(Bytes::from_static(b"PK"));
        rec.converted_content_type = Some("application/zip".to_string());
        assert_eq!(rec.export_content(), &Bytes::from_static(b"PK"));
        assert_eq!(rec.export_content_type(), "application/zip");
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&FileStatus::Uploading).unwrap(),
            "\"uploading\""
        );
        let status: FileStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, FileStatus::Error);
    }
}
