use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::TransferOptions;

/// Blog URL probe settings (`[probe]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Seconds allowed for the TCP/TLS connect phase of each probe.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole probe, redirects included.
    pub timeout_secs: u64,
    /// Maximum redirects followed per probe.
    pub max_redirects: u32,
    /// Optional User-Agent override.
    pub user_agent: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

impl ProbeConfig {
    pub fn transfer_options(&self) -> TransferOptions {
        let mut opts = TransferOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
            ..TransferOptions::default()
        };
        if let Some(ua) = &self.user_agent {
            opts.user_agent = ua.clone();
        }
        opts
    }
}

/// Ghost admin API settings (`[api]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// OAuth client id of the Ghost admin client.
    pub client_id: String,
    /// API root relative to the blog URL.
    pub api_path: String,
    /// Seconds allowed for each API call.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            client_id: "ghost-admin".to_string(),
            api_path: "ghost/api/v0.1/".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            ..TransferOptions::default()
        }
    }
}

/// Global configuration loaded from `~/.config/spectre/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpectreConfig {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("spectre")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SpectreConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SpectreConfig> {
    if !path.exists() {
        let default_cfg = SpectreConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("writing default config to {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: SpectreConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
