//! Application configuration.
//!
//! Values come from environment variables (optionally seeded from a `.env`
//! file) with sensible defaults; command-line flags override them later.

use std::path::Path;

/// Default origin of the database viewer service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const ENV_BASE_URL: &str = "VIEWER_BASE_URL";
const ENV_ALERT_ON_ERROR: &str = "VIEWER_ALERT_ON_ERROR";
const ENV_BUSY_ON_LISTINGS: &str = "VIEWER_BUSY_ON_LISTINGS";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Name used in log lines.
    pub service: String,
    /// Origin of the remote service; the REST resource lives under `/database/`.
    pub base_url: String,
    /// Surface failures to the user as alerts, not only in the log.
    pub alert_on_error: bool,
    /// Raise the busy indicator for listing calls as well.
    pub busy_on_listings: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: "viewer".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            alert_on_error: true,
            busy_on_listings: false,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration and tags it with a service name.
    pub fn load_with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::load()
        }
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup(ENV_BASE_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        Self {
            service: defaults.service,
            base_url,
            alert_on_error: parse_flag(lookup(ENV_ALERT_ON_ERROR), defaults.alert_on_error),
            busy_on_listings: parse_flag(lookup(ENV_BUSY_ON_LISTINGS), defaults.busy_on_listings),
        }
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            tracing::warn!(value = %v, "unrecognised boolean, using default");
            default
        }
        None => default,
    }
}

/// Load a `.env` file from the working directory (best-effort, no error if missing).
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

fn load_dotenv_from(path: &Path) {
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            // Only set if not already set by the environment
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}
