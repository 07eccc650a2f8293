//! Configuration types for Rolegate
//!
//! Loaded once at process start and injected into the components that need
//! it. Environment variables are read first; if `ROLEGATE_CONFIG` names a
//! YAML file, its fields override them.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const ENV_TOKEN_SECRET: &str = "ROLEGATE_TOKEN_SECRET";
pub const ENV_TOKEN_TTL: &str = "ROLEGATE_TOKEN_TTL";
pub const ENV_BIND: &str = "ROLEGATE_BIND";
pub const ENV_DATA_FILE: &str = "ROLEGATE_DATA_FILE";
pub const ENV_CONFIG_FILE: &str = "ROLEGATE_CONFIG";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9091";
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;
/// Upper bound on token lifetime (one year)
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Secret used to sign bearer tokens
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);

impl TokenSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenSecret([REDACTED])")
    }
}

/// Everything the authorization core consumes: a signing secret and a TTL
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: TokenSecret,
    pub token_ttl: chrono::Duration,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// JSON snapshot file; `None` keeps everything in memory
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Token TTL as written in YAML: plain seconds or a suffixed string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TtlValue {
    Seconds(u64),
    Text(String),
}

/// Raw settings before validation; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverride {
    token_secret: Option<String>,
    token_ttl: Option<TtlValue>,
    bind_addr: Option<String>,
    data_file: Option<PathBuf>,
}

impl ConfigOverride {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            token_secret: lookup(ENV_TOKEN_SECRET),
            token_ttl: lookup(ENV_TOKEN_TTL).map(TtlValue::Text),
            bind_addr: lookup(ENV_BIND),
            data_file: lookup(ENV_DATA_FILE).map(PathBuf::from),
        }
    }

    fn merge(&mut self, other: ConfigOverride) {
        if other.token_secret.is_some() {
            self.token_secret = other.token_secret;
        }
        if other.token_ttl.is_some() {
            self.token_ttl = other.token_ttl;
        }
        if other.bind_addr.is_some() {
            self.bind_addr = other.bind_addr;
        }
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
    }

    fn finish(self) -> Result<AppConfig> {
        let secret = self
            .token_secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing {
                key: "token_secret",
            })?;

        let token_ttl = match self.token_ttl {
            None => chrono::Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            Some(TtlValue::Seconds(secs)) => ttl_from_secs(secs)?,
            Some(TtlValue::Text(text)) => parse_ttl(&text)?,
        };

        let bind = self
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                key: "bind_addr",
                reason: format!("'{}': {}", bind, e),
            }
        })?;

        Ok(AppConfig {
            auth: AuthConfig {
                token_secret: TokenSecret::new(secret),
                token_ttl,
            },
            server: ServerConfig { bind_addr },
            storage: StorageConfig {
                data_file: self.data_file,
            },
        })
    }
}

impl AppConfig {
    /// Load from environment, then apply the YAML file named by `ROLEGATE_CONFIG`
    pub fn from_env_or_yaml() -> Result<Self> {
        let mut raw = ConfigOverride::from_lookup(|key| std::env::var(key).ok());
        if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
            raw.merge(read_yaml(Path::new(&path))?);
        }
        raw.finish()
    }

    /// Load from an arbitrary key lookup (environment-shaped)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        ConfigOverride::from_lookup(lookup).finish()
    }

    /// Parse a YAML document on its own, without consulting the environment
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: ConfigOverride = serde_yaml::from_str(contents)?;
        raw.finish()
    }
}

fn read_yaml(path: &Path) -> Result<ConfigOverride> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn ttl_from_secs(secs: u64) -> Result<chrono::Duration> {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    if secs <= 0 || secs > MAX_TOKEN_TTL_SECS {
        return Err(ConfigError::Invalid {
            key: "token_ttl",
            reason: format!("must be between 1 and {} seconds", MAX_TOKEN_TTL_SECS),
        });
    }
    Ok(chrono::Duration::seconds(secs))
}

/// Parse a token TTL: `"90"`, `"90s"`, `"15m"`, `"1h"` or `"7d"`.
pub fn parse_ttl(text: &str) -> Result<chrono::Duration> {
    let text = text.trim();
    let invalid = || ConfigError::Invalid {
        key: "token_ttl",
        reason: format!("'{}' is not a duration like 90, 15m or 1h", text),
    };

    let (digits, unit) = match text.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&text[..idx], c),
        Some(_) => (text, 's'),
        None => return Err(invalid()),
    };

    let value: u64 = digits.trim().parse().map_err(|_| invalid())?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return Err(invalid()),
    };

    ttl_from_secs(value.saturating_mul(multiplier))
}
