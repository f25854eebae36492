// src/config.rs

//! Manages server configuration: loading, resolving defaults, and validation.

use crate::core::handler::security::DEFAULT_MAX_PAYLOAD_SIZE;
use crate::core::protocol::frame_codec::{DEFAULT_DELIMITER, DEFAULT_MAX_BUFFER_SIZE};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tracing::warn;

/// Which message handler the pipeline runs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Execute protocol commands.
    #[default]
    Command,
    /// Echo every message back with a suffix.
    Echo,
}

/// Where the file commands read and write.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
        }
    }
}

fn default_root_dir() -> String {
    ".".to_string()
}

/// The accounts `AUTH` accepts.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthConfig {
    /// username -> password
    #[serde(default = "default_users")]
    pub users: HashMap<String, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
        }
    }
}

fn default_users() -> HashMap<String, String> {
    [("admin", "password123"), ("user1", "securePass"), ("guest", "12345")]
        .into_iter()
        .map(|(user, pass)| (user.to_string(), pass.to_string()))
        .collect()
}

/// A raw representation of the config file before validation and resolution.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_max_clients")]
    max_clients: usize,
    #[serde(default = "default_delimiter")]
    delimiter: char,
    #[serde(default = "default_max_payload_size")]
    max_payload_size: usize,
    #[serde(default = "default_max_buffer_size")]
    max_buffer_size: usize,
    #[serde(default)]
    handler: HandlerKind,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    auth: AuthConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    12345
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_clients() -> usize {
    1000
}
fn default_delimiter() -> char {
    DEFAULT_DELIMITER as char
}
fn default_max_payload_size() -> usize {
    DEFAULT_MAX_PAYLOAD_SIZE
}
fn default_max_buffer_size() -> usize {
    DEFAULT_MAX_BUFFER_SIZE
}

/// Represents the final, validated server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Live connection ceiling; also the size of the authentication window.
    pub max_clients: usize,
    /// The single ASCII byte that terminates every frame.
    pub delimiter: char,
    /// Frames with a larger payload are dropped by the security policy.
    pub max_payload_size: usize,
    /// Connections that buffer more than this without a delimiter are closed.
    pub max_buffer_size: usize,
    #[serde(default)]
    pub handler: HandlerKind,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_clients: default_max_clients(),
            delimiter: default_delimiter(),
            max_payload_size: default_max_payload_size(),
            max_buffer_size: default_max_buffer_size(),
            handler: HandlerKind::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid configuration in '{path}'"))
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let raw_config: RawConfig =
            toml::from_str(contents).context("Failed to parse configuration TOML")?;

        let config = Config {
            host: raw_config.host,
            port: raw_config.port,
            log_level: raw_config.log_level,
            max_clients: raw_config.max_clients,
            delimiter: raw_config.delimiter,
            max_payload_size: raw_config.max_payload_size,
            max_buffer_size: raw_config.max_buffer_size,
            handler: raw_config.handler,
            storage: raw_config.storage,
            auth: raw_config.auth,
        };

        config.validate()?;
        Ok(config)
    }

    /// The delimiter as the byte the codec scans for.
    pub fn delimiter_byte(&self) -> u8 {
        // `validate` guarantees an ASCII delimiter; fall back to the default otherwise.
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(DEFAULT_DELIMITER)
    }

    /// Validates the resolved configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }
        if self.max_clients == 0 {
            return Err(anyhow!("max_clients cannot be 0"));
        }
        if !self.delimiter.is_ascii() {
            return Err(anyhow!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ));
        }
        if self.max_payload_size == 0 {
            return Err(anyhow!("max_payload_size cannot be 0"));
        }
        if self.max_buffer_size < self.max_payload_size {
            return Err(anyhow!(
                "max_buffer_size ({}) cannot be smaller than max_payload_size ({})",
                self.max_buffer_size,
                self.max_payload_size
            ));
        }
        if self.auth.users.is_empty() {
            return Err(anyhow!("auth.users must define at least one account"));
        }
        if self.storage.root_dir.trim().is_empty() {
            return Err(anyhow!("storage.root_dir cannot be empty"));
        }

        if self.handler == HandlerKind::Command && self.delimiter == ',' {
            warn!(
                "delimiter ',' is also an argument separator; multi-argument commands must use ';'"
            );
        }
        Ok(())
    }
}
