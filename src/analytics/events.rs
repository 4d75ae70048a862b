//! Request events, one JSONL line per handled HTTP request.
//!
//! Log file: `~/.fundadmin/requests.jsonl` (configurable via
//! `[logging] path`). Writes are best-effort; a failed write never fails
//! the request that produced it.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{self, schema::LoggingConfig};

// ---------------------------------------------------------------------------
// Event entry
// ---------------------------------------------------------------------------

/// What the request did, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A page (HTML or JSON view) was rendered.
    View,
    /// A navigation control was activated.
    Navigate,
    /// A form was submitted.
    Submit,
    /// Anything else: API metadata, health, not found.
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEvent {
    pub timestamp: String,
    /// First eight characters of the session id.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session: Option<String>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub action: Action,
    /// Page slug the request rendered or targeted.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub page: Option<String>,
    /// `"accepted"` or `"rejected"` for submissions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub outcome: Option<String>,
    pub duration_ms: u64,
}

impl RequestEvent {
    pub fn new(method: &str, path: &str, status: u16, action: Action) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            session: None,
            method: method.to_string(),
            path: path.to_string(),
            status,
            action,
            page: None,
            outcome: None,
            duration_ms: 0,
        }
    }
}

/// Shorten a session id for logging.
pub fn session_prefix(id: &str) -> String {
    id.chars().take(8).collect()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Append `event` to the configured log, if logging is enabled.
pub fn record(logging: &LoggingConfig, event: &RequestEvent) {
    if !logging.enabled {
        return;
    }
    if let Some(path) = config::expand_home(&logging.path) {
        let _ = append_event(&path, event);
    }
}

fn append_event(path: &Path, event: &RequestEvent) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Path of the request log for the given settings.
pub fn log_path(logging: &LoggingConfig) -> Option<PathBuf> {
    config::expand_home(&logging.path)
}

/// Read every event in `path`, skipping malformed lines. A missing file
/// reads as empty.
pub fn read_all(path: &Path) -> Vec<RequestEvent> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RequestEvent>(&line).ok())
        .collect()
}

/// Events from the last `days` days, or all of them when `days` is `None`.
pub fn read_since_days(path: &Path, days: Option<u32>) -> Vec<RequestEvent> {
    let events = read_all(path);

    let Some(days) = days else {
        return events;
    };

    let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();
    events
        .into_iter()
        .filter(|e| e.timestamp >= cutoff)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn logging_at(path: &Path) -> LoggingConfig {
        LoggingConfig {
            enabled: true,
            path: path.to_string_lossy().into_owned(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("requests.jsonl");
        let logging = logging_at(&path);

        let mut event = RequestEvent::new("POST", "/submit/investor-onboarding", 200, Action::Submit);
        event.page = Some("investor-onboarding".to_string());
        event.outcome = Some("rejected".to_string());
        record(&logging, &event);
        record(&logging, &RequestEvent::new("GET", "/", 200, Action::View));

        let events = read_all(&path);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, Action::Submit);
        assert_eq!(events[0].outcome.as_deref(), Some("rejected"));
        assert_eq!(events[1].page, None);
    }

    #[test]
    fn disabled_logging_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.jsonl");
        let logging = LoggingConfig {
            enabled: false,
            ..logging_at(&path)
        };
        record(&logging, &RequestEvent::new("GET", "/", 200, Action::View));
        assert!(!path.exists());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.jsonl");
        let good = serde_json::to_string(&RequestEvent::new("GET", "/", 200, Action::View)).unwrap();
        fs::write(&path, format!("not json\n{good}\n{{}}\n")).unwrap();
        assert_eq!(read_all(&path).len(), 1);
    }

    #[test]
    fn day_window_filters_old_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.jsonl");
        let logging = logging_at(&path);
        let mut old = RequestEvent::new("GET", "/", 200, Action::View);
        old.timestamp = "2000-01-01T00:00:00+00:00".to_string();
        record(&logging, &old);
        record(&logging, &RequestEvent::new("GET", "/", 200, Action::View));

        assert_eq!(read_since_days(&path, None).len(), 2);
        assert_eq!(read_since_days(&path, Some(7)).len(), 1);
    }

    #[test]
    fn session_prefix_truncates() {
        assert_eq!(session_prefix("0123456789abcdef"), "01234567");
        assert_eq!(session_prefix("abc"), "abc");
    }
}
