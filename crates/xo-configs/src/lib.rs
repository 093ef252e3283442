//! # xo-configs
//!
//! Layered settings for the xrponline server:
//! built-in defaults → optional `xrponline.toml` → `XO__*` environment
//! variables (`XO__SERVER__PORT=8080`, `XO__ADMIN__PASSWORD_HASH=...`).
//! A `.env` file in the working directory is loaded first when present.

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "xrponline";
const ENV_PREFIX: &str = "XO";
const ENV_SEPARATOR: &str = "__";

const DEFAULT_TRADES_URL: &str = "https://data.xrplf.org/v1/iou/exchanges/r3q4Hhc7pSc4rGNMc1mLkzQECW4bhTnPVp_5852504F6E6C696E650000000000000000000000/XRP?limit=10&descending=true";
const DEFAULT_TRADES_SELLER: &str = "rQJwonL7jgjHqEfMSYQmvV8RHyjRn1XM3f";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub presence: PresenceSettings,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub admin: AdminSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Reported by `GET /system/version`.
    pub version: String,
}

/// The two presence windows are independent on purpose: the sweep bounds
/// how long an entry survives in the store, the read window bounds what
/// `GET /presence` returns.
#[derive(Debug, Deserialize)]
pub struct PresenceSettings {
    pub sweep_ms: i64,
    pub window_ms: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamSettings {
    pub timeout_ms: u64,
    pub tenor_key: Option<SecretString>,
    pub trades_url: String,
    pub trades_seller: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminSettings {
    /// Argon2 PHC string. Unset leaves admin routes open.
    pub password_hash: Option<SecretString>,
}

impl Settings {
    /// Loads `.env`, then the default file and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("ignoring unreadable .env file: {e}"),
        }
        Self::from_sources(Some(DEFAULT_CONFIG_FILE), None)
    }

    /// `env` replaces the process environment when given.
    pub fn from_sources(
        file: Option<&str>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 80_i64)?
            .set_default("server.version", env!("CARGO_PKG_VERSION"))?
            .set_default("presence.sweep_ms", 10_000_i64)?
            .set_default("presence.window_ms", 300_000_i64)?
            .set_default("upstream.timeout_ms", 5_000_i64)?
            .set_default("upstream.trades_url", DEFAULT_TRADES_URL)?
            .set_default("upstream.trades_seller", DEFAULT_TRADES_SELLER)?;

        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.presence.sweep_ms <= 0 {
            return Err(SettingsError::Invalid("presence.sweep_ms must be positive".into()));
        }
        if self.presence.window_ms <= 0 {
            return Err(SettingsError::Invalid("presence.window_ms must be positive".into()));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(SettingsError::Invalid("upstream.timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
