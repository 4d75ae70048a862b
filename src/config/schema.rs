/// Configuration schema and defaults for the dashboard server.
///
/// Defines the TOML-serializable configuration structure with the
/// `[server]`, `[sample]`, `[sessions]` and `[logging]` sections. Every
/// field has a built-in default; users only set what they want to change.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// Maps directly to `~/.fundadmin/config.toml` and `.fundadmin.toml`.
/// Missing sections and fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundAdminConfig {
    pub server: ServerConfig,
    pub sample: SampleConfig,
    pub sessions: SessionsConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8501".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [sample]
// ---------------------------------------------------------------------------

/// Sample data generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Seed for the performance-series jitter. Unset means a fresh
    /// entropy-seeded generator per process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// [sessions]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Seconds of inactivity after which a session reverts to a fresh one.
    pub idle_timeout_secs: i64,
    /// Upper bound on tracked sessions; the least recently seen is evicted.
    pub max_sessions: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 3600,
            max_sessions: 1024,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Console verbosity of the request log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// No per-request console output.
    Quiet,
    /// One line per request.
    #[default]
    Info,
    /// Adds session id and timing.
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether request events are appended to the JSONL log.
    pub enabled: bool,
    /// Path to the request log. `~` is expanded to the home directory.
    pub path: String,
    /// Console verbosity: `"quiet"`, `"info"`, `"debug"`.
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.fundadmin/requests.jsonl".to_string(),
            level: LogLevel::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl FundAdminConfig {
    /// The annotated default config written by `fundadmin config init`.
    pub fn default_toml() -> String {
        r#"# fundadmin Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (FUNDADMIN_*)
#   2. Project config (.fundadmin.toml in current directory)
#   3. User global config (~/.fundadmin/config.toml)
#   4. Built-in defaults

[server]
addr = "127.0.0.1:8501"
open_browser = true

[sample]
# seed = 42           # Fix the performance-chart jitter sequence

[sessions]
idle_timeout_secs = 3600
max_sessions = 1024

[logging]
enabled = true
path = "~/.fundadmin/requests.jsonl"
level = "info"        # quiet | info | debug
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
