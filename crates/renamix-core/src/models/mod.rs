pub mod file_record;
pub mod naming;

pub use file_record::{FileRecord, FileStatus, RawFile};
pub use naming::{NamingConfig, NamingMode};
