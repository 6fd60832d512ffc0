//! Structured event log kept in a bounded local store, optionally forwarded
//! entry by entry to a remote HTTP collector.

pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_store;
pub mod remote;
pub mod storage;

pub use config::RemoteConfig;
pub use error::{LogbookError, Result};
pub use log_entry::{LogEntry, LogLevel, Meta};
pub use log_store::{LogStore, MAX_LOG_ENTRIES, STORAGE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
