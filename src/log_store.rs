//! Bounded local log collection with optional forwarding to a remote collector.
//!
//! Every operation goes straight to the backing [`KeyValueStore`]; nothing is
//! cached in memory. Appends are an unsynchronized read-modify-write of the
//! whole collection, so overlapping `log` calls can lose an entry.

use crate::config::RemoteConfig;
use crate::error::Result;
use crate::log_entry::{LogEntry, Meta};
use crate::remote::RemoteSink;
use crate::storage::KeyValueStore;
use log::{error, info, warn};

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "app_logs_v1";

/// Most recent entries kept after each append.
pub const MAX_LOG_ENTRIES: usize = 2000;

pub struct LogStore<S> {
    storage: S,
    remote: Option<RemoteSink>,
    key: String,
    max_entries: usize,
}

impl<S: KeyValueStore> LogStore<S> {
    pub fn new(storage: S, remote: RemoteConfig) -> Self {
        Self {
            storage,
            remote: RemoteSink::from_config(&remote),
            key: STORAGE_KEY.to_string(),
            max_entries: MAX_LOG_ENTRIES,
        }
    }

    pub fn with_capacity(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Record an entry.
    ///
    /// Forwards it to the collector when one is configured, then appends it
    /// locally. Never fails: a delivery failure is recorded under
    /// `meta.serverError`, a storage failure only skips the append.
    pub async fn log(
        &self,
        level: impl Into<String>,
        action: impl Into<String>,
        meta: Option<Meta>,
    ) -> LogEntry {
        let mut entry = LogEntry::new(level, action, meta.unwrap_or_default());

        if let Some(ref remote) = self.remote {
            if let Err(e) = remote.send(&entry).await {
                warn!("Failed to send log to server {}: {}", remote.url(), e);
                entry.mark_server_error(e.to_string());
            }
        }

        if let Err(e) = self.append(&entry) {
            error!("Failed to persist log entry: {}", e);
        }

        let meta = serde_json::to_string(&entry.meta).unwrap_or_default();
        if entry.is_error() {
            error!("[{}] {} {}", entry.timestamp, entry.action, meta);
        } else {
            info!("[{}] {} {}", entry.timestamp, entry.action, meta);
        }

        entry
    }

    /// All stored entries, oldest first. Empty if nothing is stored or the
    /// stored value cannot be read.
    pub fn get_logs(&self) -> Vec<LogEntry> {
        match self.read_all() {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to read stored logs: {}", e);
                Vec::new()
            }
        }
    }

    pub fn clear_logs(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            error!("Failed to clear stored logs: {}", e);
        }
    }

    fn read_all(&self) -> Result<Vec<LogEntry>> {
        match self.storage.get(&self.key)? {
            // A stored `null` counts as an empty collection.
            Some(raw) => {
                let entries: Option<Vec<LogEntry>> = serde_json::from_str(&raw)?;
                Ok(entries.unwrap_or_default())
            }
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.push(entry.clone());

        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }

        let serialized = serde_json::to_string(&entries)?;
        self.storage.set(&self.key, &serialized)
    }
}
