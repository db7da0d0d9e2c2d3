//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory, or at the path in
//! `HOMEDASH_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use homedash_adapter_mqtt::MqttConfig;
use homedash_domain::error::ValidationError;
use homedash_domain::mapping::{DeviceMapping, MappingEntry, TargetKind};
use homedash_domain::reconciler::MatchPolicy;

/// Config file looked up when `HOMEDASH_CONFIG` is unset.
const DEFAULT_PATH: &str = "homedash.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Broker connection settings.
    pub mqtt: MqttConfig,
    /// Reconciliation and transcript settings.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Auto-refresh interval of the status page.
    pub refresh_seconds: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Which mapping entries a notification updates.
    pub match_policy: MatchPolicy,
    /// Maximum transcript length.
    pub chat_capacity: usize,
    /// Capacity of the event bus feeding SSE clients.
    pub event_capacity: usize,
    /// Device name fragment → dashboard target table, in match order.
    pub mapping: Vec<MappingConfig>,
}

/// One `[[dashboard.mapping]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingConfig {
    pub key: String,
    pub target: String,
    /// Inferred from `target` when omitted.
    #[serde(default)]
    pub kind: Option<TargetKind>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HOMEDASH_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("HOMEDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("HOMEDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("HOMEDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = lookup("HOMEDASH_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(port) = lookup("HOMEDASH_MQTT_PORT").and_then(|val| val.parse().ok()) {
            self.mqtt.broker_port = port;
        }
        if let Some(val) = lookup("HOMEDASH_TOPIC_PREFIX") {
            self.mqtt.topic_prefix = val;
        }
        if let Some(val) = lookup("HOMEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "broker port must be non-zero".to_string(),
            ));
        }
        if self.mqtt.broker_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "broker host must not be empty".to_string(),
            ));
        }
        if !self.mqtt.topic_prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "topic prefix {:?} must end with '/'",
                self.mqtt.topic_prefix
            )));
        }
        self.dashboard.build_mapping()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DashboardConfig {
    /// Turn the configured table into a validated [`DeviceMapping`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mapping`] for a blank key or target, or an
    /// empty table.
    pub fn build_mapping(&self) -> Result<DeviceMapping, ConfigError> {
        let entries = self
            .mapping
            .iter()
            .map(|entry| {
                let kind = entry
                    .kind
                    .unwrap_or_else(|| TargetKind::infer(entry.target.trim()));
                MappingEntry::with_kind(&entry.key, &entry.target, kind)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DeviceMapping::new(entries)?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            refresh_seconds: 5,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            chat_capacity: 200,
            event_capacity: 256,
            mapping: DeviceMapping::default()
                .iter()
                .map(|entry| MappingConfig {
                    key: entry.match_key().to_string(),
                    target: entry.target_id().to_string(),
                    kind: Some(entry.kind()),
                })
                .collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedashd=info,homedash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The device mapping table is unusable.
    #[error("invalid device mapping")]
    Mapping(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
