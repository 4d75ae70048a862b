/// Configuration system for the dashboard.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::FundAdminConfig::default()`]
/// 2. **User global config**: `~/.fundadmin/config.toml`
/// 3. **Project local config**: `.fundadmin.toml` in the current directory
/// 4. **Environment variables**: `FUNDADMIN_*` overrides (highest precedence)
///
/// Later layers replace earlier ones. Missing sections in a TOML file fall
/// back to defaults.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::{FundAdminConfig, LogLevel};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars.
pub fn load() -> FundAdminConfig {
    load_layers(
        &[global_config_path(), project_config_path()],
        |key| std::env::var(key).ok(),
    )
}

/// Merge the given TOML files in order, then apply environment overrides
/// read through `env`.
pub fn load_layers<F>(paths: &[Option<PathBuf>], env: F) -> FundAdminConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = FundAdminConfig::default();

    for path in paths {
        if let Some(layer) = load_toml_file(path.as_deref()) {
            config = layer;
        }
    }

    apply_env_overrides(&mut config, env);
    config
}

/// Load a TOML config file if it exists.
///
/// Malformed files are ignored so a bad edit never keeps the dashboard
/// from starting.
fn load_toml_file(path: Option<&Path>) -> Option<FundAdminConfig> {
    let content = fs::read_to_string(path?).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.fundadmin/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fundadmin").join("config.toml"))
}

/// `.fundadmin.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".fundadmin.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Some(rest) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            dirs::home_dir().map(|home| home.join(rest))
        }
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `FUNDADMIN_ADDR`: listen address
/// - `FUNDADMIN_OPEN_BROWSER`: open a browser on start (`1`/`true`/`yes`/`on`)
/// - `FUNDADMIN_SEED`: fixed sample-data seed
/// - `FUNDADMIN_SESSION_TIMEOUT_SECS`: session idle timeout
/// - `FUNDADMIN_LOG`: request log enabled
/// - `FUNDADMIN_LOG_PATH`: request log path
/// - `FUNDADMIN_LOG_LEVEL`: `quiet`, `info`, `debug`
fn apply_env_overrides<F>(config: &mut FundAdminConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env("FUNDADMIN_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = env("FUNDADMIN_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = env("FUNDADMIN_SEED")
        && let Ok(seed) = val.trim().parse::<u64>()
    {
        config.sample.seed = Some(seed);
    }
    if let Some(val) = env("FUNDADMIN_SESSION_TIMEOUT_SECS")
        && let Ok(secs) = val.trim().parse::<i64>()
    {
        config.sessions.idle_timeout_secs = secs;
    }
    if let Some(val) = env("FUNDADMIN_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Some(val) = env("FUNDADMIN_LOG_PATH")
        && !val.is_empty()
    {
        config.logging.path = val;
    }
    if let Some(val) = env("FUNDADMIN_LOG_LEVEL")
        && let Some(level) = parse_level(&val)
    {
        config.logging.level = level;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_level(val: &str) -> Option<LogLevel> {
    match val.to_ascii_lowercase().as_str() {
        "quiet" | "off" | "none" => Some(LogLevel::Quiet),
        "info" => Some(LogLevel::Info),
        "debug" | "verbose" => Some(LogLevel::Debug),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.fundadmin/config.toml`.
///
/// Fails if the file exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    write_default_config(&path, force)?;
    Ok(path)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, FundAdminConfig::default_toml()).context("failed to write config file")?;
    Ok(())
}

/// Set a single dotted key (e.g. `server.addr`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_in(&path, key, value)
}

fn set_config_value_in(path: &Path, key: &str, value: &str) -> Result<()> {
    let source = if path.exists() {
        fs::read_to_string(path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&FundAdminConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&source).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;

    // Refuse to write a file that would no longer load.
    let _: FundAdminConfig = toml::from_str(&output)
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")?;
    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be 'section.field', got '{key}'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        // Optional keys (e.g. `sample.seed`) are absent until first set.
        None => infer_toml_value(raw_value),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

fn infer_toml_value(raw: &str) -> toml::Value {
    if let Ok(n) = raw.parse::<i64>() {
        toml::Value::Integer(n)
    } else if let Ok(f) = raw.parse::<f64>() {
        toml::Value::Float(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else {
        toml::Value::String(raw.to_string())
    }
}

/// Overwrite the global config with defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
