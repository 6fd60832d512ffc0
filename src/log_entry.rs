use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata attached to an entry.
pub type Meta = Map<String, Value>;

/// Key added to `meta` when forwarding to the collector fails.
pub const SERVER_ERROR_KEY: &str = "serverError";

/// Suggested levels. The store accepts any string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp, millisecond precision
    #[serde(rename = "ts")]
    pub timestamp: String,
    pub level: String,
    pub action: String,
    #[serde(default)]
    pub meta: Meta,
}

impl LogEntry {
    /// Build an entry stamped with the current time.
    pub fn new(level: impl Into<String>, action: impl Into<String>, meta: Meta) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level: level.into(),
            action: action.into(),
            meta,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error.as_str()
    }

    pub fn server_error(&self) -> Option<&str> {
        self.meta.get(SERVER_ERROR_KEY).and_then(|v| v.as_str())
    }

    pub(crate) fn mark_server_error(&mut self, description: String) {
        self.meta
            .insert(SERVER_ERROR_KEY.to_string(), Value::String(description));
    }
}
