// * Runtime settings resolved from the process environment
// * Every key is optional; unset keys fall back to config::constants

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_UPSTREAM_URL, DEFAULT_USER_AGENT, FETCH_TIMEOUT_SECS,
    MIN_FILLED_CELLS,
};
use crate::refinery::columns::PositionalLayout;

pub const ENV_UPSTREAM_URL: &str = "LINEUP_UPSTREAM_URL";
pub const ENV_LISTEN_ADDR: &str = "LINEUP_LISTEN_ADDR";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "LINEUP_FETCH_TIMEOUT_SECS";
pub const ENV_MIN_FILLED_CELLS: &str = "LINEUP_MIN_FILLED_CELLS";
pub const ENV_POSITIONAL_LAYOUT: &str = "LINEUP_POSITIONAL_LAYOUT";
pub const ENV_USER_AGENT: &str = "LINEUP_USER_AGENT";
pub const ENV_LOG_FORMAT: &str = "LINEUP_LOG_FORMAT";

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub upstream_url: Url,
    pub listen_addr: SocketAddr,
    pub fetch_timeout: Duration,
    pub min_filled_cells: usize,
    pub positional_layout: PositionalLayout,
    pub user_agent: String,
    pub log_format: LogFormat,
}

impl Settings {
    /// Reads settings from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup (tests inject a map here)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let upstream_raw = get(ENV_UPSTREAM_URL).unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_url = Url::parse(&upstream_raw)
            .map_err(|e| invalid(ENV_UPSTREAM_URL, &upstream_raw, e.to_string()))?;
        if !matches!(upstream_url.scheme(), "http" | "https") {
            return Err(invalid(ENV_UPSTREAM_URL, &upstream_raw, "scheme must be http or https"));
        }

        let listen_raw = get(ENV_LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid(ENV_LISTEN_ADDR, &listen_raw, e.to_string()))?;

        let fetch_timeout = match get(ENV_FETCH_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|e| invalid(ENV_FETCH_TIMEOUT_SECS, &raw, e.to_string()))?;
                if secs == 0 {
                    return Err(invalid(ENV_FETCH_TIMEOUT_SECS, &raw, "must be positive"));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(FETCH_TIMEOUT_SECS),
        };

        let min_filled_cells = match get(ENV_MIN_FILLED_CELLS) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| invalid(ENV_MIN_FILLED_CELLS, &raw, e.to_string()))?,
            None => MIN_FILLED_CELLS,
        };

        let positional_layout = match get(ENV_POSITIONAL_LAYOUT) {
            Some(raw) => PositionalLayout::from_name(&raw).ok_or_else(|| {
                invalid(
                    ENV_POSITIONAL_LAYOUT,
                    &raw,
                    "expected with-operation or without-operation",
                )
            })?,
            None => PositionalLayout::default(),
        };

        let log_format = match get(ENV_LOG_FORMAT).as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => return Err(invalid(ENV_LOG_FORMAT, other, "expected json or pretty")),
        };

        Ok(Self {
            upstream_url,
            listen_addr,
            fetch_timeout,
            min_filled_cells,
            positional_layout,
            user_agent: get(ENV_USER_AGENT).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            log_format,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}
