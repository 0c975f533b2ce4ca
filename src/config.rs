//! Connection configuration with optional persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kodi::KodiError;

const CONFIG_DIR: &str = "kodi-remote";
const CONFIG_FILE: &str = "config.json";

/// How to reach the Kodi web server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KodiConfig {
  /// Host name or address of the Kodi box.
  #[serde(default = "default_host")]
  pub host: String,

  /// Web server port (Settings -> Services -> Webserver).
  #[serde(default = "default_port")]
  pub port: u16,

  /// Per-request timeout in seconds.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,

  /// User-Agent header sent with every request.
  #[serde(default = "default_user_agent")]
  pub user_agent: String,
}

fn default_host() -> String {
  "localhost".to_string()
}

fn default_port() -> u16 {
  8080
}

fn default_timeout_secs() -> u64 {
  5
}

fn default_user_agent() -> String {
  format!("kodi-remote/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for KodiConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      timeout_secs: default_timeout_secs(),
      user_agent: default_user_agent(),
    }
  }
}

impl KodiConfig {
  /// Config for a host and port, other settings at their defaults.
  pub fn new(host: impl Into<String>, port: u16) -> Self {
    Self {
      host: host.into(),
      port,
      ..Self::default()
    }
  }

  /// Validate configuration values.
  pub fn validate(&self) -> Result<(), KodiError> {
    if self.host.trim().is_empty() {
      return Err(KodiError::InvalidConfig("Host cannot be empty".to_string()));
    }
    if self.port == 0 {
      return Err(KodiError::InvalidConfig("Port cannot be 0".to_string()));
    }
    if self.timeout_secs < 1 || self.timeout_secs > 300 {
      return Err(KodiError::InvalidConfig(
        "Timeout must be between 1 and 300 seconds".to_string(),
      ));
    }
    Ok(())
  }

  /// The JSON-RPC endpoint URL. IPv6 literals are bracketed.
  pub fn endpoint(&self) -> String {
    let host = self.host.trim();
    if host.contains(':') && !host.starts_with('[') {
      format!("http://[{}]:{}/jsonrpc", host, self.port)
    } else {
      format!("http://{}:{}/jsonrpc", host, self.port)
    }
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// Default config file location, if the platform has a config directory.
  pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
  }

  /// Read a config from a JSON file.
  pub fn load(path: &Path) -> Result<Self, KodiError> {
    let text = std::fs::read_to_string(path)?;
    let config: KodiConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
  }

  /// Read the config at `path`, falling back to defaults when the file does not exist.
  pub fn load_or_default(path: Option<&Path>) -> Result<Self, KodiError> {
    match path {
      Some(path) if path.exists() => Self::load(path),
      Some(path) => {
        log::debug!("No config at {}, using defaults", path.display());
        Ok(Self::default())
      }
      None => Ok(Self::default()),
    }
  }
}
