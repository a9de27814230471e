//! Configuration management
//!
//! Precedence (highest first):
//! 1. `MPD_HOST` / `MPD_PORT` (the variables other MPD clients honour)
//! 2. `MPD_REMOTE__ADDRESS`, `MPD_REMOTE__GREETING_PREFIX`
//! 3. `config.{toml,json,yaml}` in the config directory
//! 4. Defaults (`localhost:6600`, greeting `OK MPD `)

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::protocol::DEFAULT_GREETING_PREFIX;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6600;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Server address as `host:port`
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_greeting_prefix")]
    pub greeting_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            greeting_prefix: default_greeting_prefix(),
        }
    }
}

fn default_address() -> String {
    format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT)
}

fn default_greeting_prefix() -> String {
    DEFAULT_GREETING_PREFIX.to_string()
}

/// Config directory: `MPD_REMOTE_CONFIG_DIR`, else `$XDG_CONFIG_HOME/mpd-remote`,
/// else `~/.config/mpd-remote`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MPD_REMOTE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|base| base.join("mpd-remote"))
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Apply `MPD_HOST` / `MPD_PORT` to an already layered `host:port` address.
///
/// Each variable replaces only its own half. `MPD_HOST` may carry a
/// `password@` prefix meant for other clients; it is stripped.
fn apply_mpd_env(address: &str, host: Option<&str>, port: Option<u16>) -> String {
    let (base_host, base_port) = match address.rsplit_once(':') {
        Some((h, p)) => (h, p.parse().unwrap_or(DEFAULT_PORT)),
        None => (address, DEFAULT_PORT),
    };

    let host = host
        .map(|h| h.rsplit_once('@').map_or(h, |(_, host)| host))
        .filter(|h| !h.is_empty())
        .unwrap_or(if base_host.is_empty() { DEFAULT_HOST } else { base_host });

    format!("{}:{}", host, port.unwrap_or(base_port))
}

pub fn load_config() -> Result<ClientConfig> {
    let config_dir = get_config_dir();

    let config = ::config::Config::builder()
        .set_default("address", default_address())?
        .set_default("greeting_prefix", default_greeting_prefix())?
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                .required(false),
        )
        .add_source(
            ::config::Environment::with_prefix("MPD_REMOTE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;
    let mut config: ClientConfig = config.try_deserialize()?;

    let mpd_host = std::env::var("MPD_HOST").ok();
    let mpd_port = std::env::var("MPD_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok());
    if mpd_host.is_some() || mpd_port.is_some() {
        config.address = apply_mpd_env(&config.address, mpd_host.as_deref(), mpd_port);
    }

    tracing::debug!(address = %config.address, "Configuration loaded");
    Ok(config)
}
