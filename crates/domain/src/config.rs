use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub zone: ZoneConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seeds: SeedsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,
}

/// The DNS zone this server is authoritative for. `suffix` is stripped from
/// query names to recover the email domain; the rest feeds the zone SOA.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    #[serde(default = "default_zone_suffix")]
    pub suffix: String,
    #[serde(default = "default_primary_ns")]
    pub primary_ns: String,
    #[serde(default = "default_hostmaster")]
    pub hostmaster: String,
    #[serde(default = "default_soa_serial")]
    pub serial: u32,
    #[serde(default = "default_soa_refresh")]
    pub refresh: u32,
    #[serde(default = "default_soa_retry")]
    pub retry: u32,
    #[serde(default = "default_soa_expire")]
    pub expire: u32,
    #[serde(default = "default_soa_minimum")]
    pub minimum: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_idle_timeout_days")]
    pub idle_timeout_days: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Per-query request/response events at info level. Heavy under load.
    #[serde(default = "default_true")]
    pub query_events: bool,
}

/// Operator-seeded permanent verdicts, applied at startup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SeedsConfig {
    #[serde(default)]
    pub valid: Vec<String>,
    #[serde(default)]
    pub invalid: Vec<String>,
}

fn default_bind_address() -> String { "0.0.0.0".to_string() }
fn default_dns_port() -> u16 { 53 }
fn default_zone_suffix() -> String { "web.webless.org".to_string() }
fn default_primary_ns() -> String { "ns1.webless.org".to_string() }
fn default_hostmaster() -> String { "hostmaster.webless.org".to_string() }
fn default_soa_serial() -> u32 { 2026010100 }
fn default_soa_refresh() -> u32 { 3600 }
fn default_soa_retry() -> u32 { 1800 }
fn default_soa_expire() -> u32 { 604_800 }
fn default_soa_minimum() -> u32 { 60 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string()
}
fn default_cache_max_entries() -> usize { 1_000_000 }
fn default_idle_timeout_days() -> u64 { 30 }
fn default_sweep_interval_secs() -> u64 { 3600 }
fn default_log_level() -> String { "info".to_string() }
fn default_true() -> bool { true }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            suffix: default_zone_suffix(),
            primary_ns: default_primary_ns(),
            hostmaster: default_hostmaster(),
            serial: default_soa_serial(),
            refresh: default_soa_refresh(),
            retry: default_soa_retry(),
            expire: default_soa_expire(),
            minimum: default_soa_minimum(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
            idle_timeout_days: default_idle_timeout_days(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            query_events: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. webless-dns.toml in current directory
    /// 3. /etc/webless-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("webless-dns.toml").exists() {
            Self::from_file("webless-dns.toml")?
        } else if std::path::Path::new("/etc/webless-dns/config.toml").exists() {
            Self::from_file("/etc/webless-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize_zone();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Zone names compare case-insensitively and never carry the root dot
    /// internally.
    fn normalize_zone(&mut self) {
        for name in [
            &mut self.zone.suffix,
            &mut self.zone.primary_ns,
            &mut self.zone.hostmaster,
        ] {
            *name = name.trim_end_matches('.').to_ascii_lowercase();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.zone.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "Zone suffix cannot be empty".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "Cache capacity cannot be 0".to_string(),
            ));
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache sweep interval cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Configuration validation error: {0}")]
    Validation(String),
}
