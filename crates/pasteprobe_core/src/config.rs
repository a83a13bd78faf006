//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const SERVER_ENV: &str = "PASTEPROBE_SERVER";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PASTEPROBE_TIMEOUT_SECS";

/// Runtime configuration shared by the GUI and CLI front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: normalize_server(DEFAULT_SERVER_URL.to_string()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`ClientConfig`] with defaults applied when env vars are
    /// missing, blank, or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: env::var(SERVER_ENV)
                .ok()
                .and_then(non_blank)
                .map(normalize_server)
                .unwrap_or(defaults.server),
            timeout: env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Apply an explicit server override (e.g. a CLI flag); blank values are ignored.
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(server) = server.and_then(non_blank) {
            self.server = normalize_server(server);
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a server URL: `http://localhost` becomes `127.0.0.1` and
/// trailing slashes are dropped. Unparsable input is returned unchanged.
pub fn normalize_server(server: String) -> String {
    let Ok(mut url) = reqwest::Url::parse(&server) else {
        return server;
    };
    let is_plain_localhost =
        url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
    if is_plain_localhost && url.set_host(Some("127.0.0.1")).is_err() {
        return server;
    }
    let mut normalized = url.to_string();
    while normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment; missing or unrecognized is `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}
