//! Server configuration.
//!
//! The listen port comes from the single optional positional argument. The bind
//! host and the path of a YAML settings file come from the environment:
//!
//! ```bash
//! RAWHTTP_HOST=0.0.0.0 RAWHTTP_SETTINGS=./rawhttp.yaml rawhttp 9000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::http::headers::HeaderMap;
use crate::http::value::HeaderValue;

pub const DEFAULT_PORT: u16 = 8080;
/// Ports below this are rejected in favour of [`DEFAULT_PORT`].
pub const MIN_PORT: u16 = 1024;
pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const HOST_ENV: &str = "RAWHTTP_HOST";
pub const SETTINGS_ENV: &str = "RAWHTTP_SETTINGS";

#[derive(Debug, Clone, Parser)]
#[command(name = "rawhttp", about = "Minimal HTTP/1.1 server on raw TCP")]
pub struct Cli {
    /// Port to listen on
    #[arg(value_name = "PORT")]
    pub port: Option<String>,
}

/// Falls back to [`DEFAULT_PORT`] when the argument is missing, unparsable or
/// below [`MIN_PORT`].
pub fn resolve_port(arg: Option<&str>) -> u16 {
    arg.and_then(|raw| raw.trim().parse::<u16>().ok())
        .filter(|port| *port >= MIN_PORT)
        .unwrap_or(DEFAULT_PORT)
}

/// Connection-lifecycle settings.
///
/// Loaded once at start-up and shared between connections as a read-only
/// snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds to wait for the first request on a new connection.
    pub timeout_secs: u64,
    /// Seconds to wait for the next request on a kept-alive connection.
    pub keep_alive_timeout_secs: u64,
    /// Requests allowed after the first one before the connection is closed.
    /// Negative disables the cap.
    pub keep_alive_max: i64,
    /// Granularity of the idle and keep-alive timers, in milliseconds.
    pub tick_ms: u64,
    pub allowed_methods: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            keep_alive_timeout_secs: 5,
            keep_alive_max: -1,
            tick_ms: 1000,
            allowed_methods: ["OPTIONS", "GET", "HEAD", "POST"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Settings {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml).context("invalid settings")?;

        if settings.tick_ms == 0 {
            anyhow::bail!("tick_ms must be greater than zero");
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn keep_alive_timeout(&self) -> Duration {
        Duration::from_secs(self.keep_alive_timeout_secs)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Whether the connection must close after `requests` have been served.
    pub fn keep_alive_exhausted(&self, requests: u64) -> bool {
        u64::try_from(self.keep_alive_max).is_ok_and(|max| requests > max)
    }

    pub fn allows(&self, method: &str) -> bool {
        self.allowed_methods
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(method))
    }

    /// Header set every response starts from.
    pub fn default_headers(&self) -> HeaderMap {
        let mut keep_alive = format!("timeout={}", self.keep_alive_timeout_secs);
        if self.keep_alive_max >= 0 {
            keep_alive.push_str(&format!(",max={}", self.keep_alive_max));
        }

        let mut headers = HeaderMap::new();
        headers.insert("Access-Control-Allow-Origin", "*");
        headers.insert("Connection", "keep-alive");
        headers.insert("Keep-Alive", keep_alive);
        headers
    }

    pub fn allow_header(&self) -> HeaderValue {
        HeaderValue::from_list(self.allowed_methods.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub settings: Settings,
}

impl Config {
    /// Loads configuration from the command line and the environment.
    pub fn load() -> anyhow::Result<Self> {
        let cli = Cli::parse();
        let host = std::env::var(HOST_ENV).ok();
        let settings_path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
        Self::from_parts(cli, host, settings_path.as_deref())
    }

    pub fn from_parts(cli: Cli, host: Option<String>, settings_path: Option<&Path>) -> anyhow::Result<Self> {
        let settings = match settings_path {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        Ok(Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: resolve_port(cli.port.as_deref()),
            settings,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
