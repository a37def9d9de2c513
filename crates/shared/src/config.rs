//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend API configuration.
    pub backend: BackendConfig,
    /// HTTP client configuration.
    pub http: HttpConfig,
    /// Movement cache configuration.
    pub cache: CacheConfig,
    /// Search input configuration.
    pub search: SearchConfig,
    /// Movement listing configuration.
    pub movements: MovementsConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (no trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// Selected company, sent as `X-Empresa-Id` when positive.
    #[serde(default)]
    pub company_id: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            company_id: None,
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Movement cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for a cached range, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Maximum number of ranges kept at once.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

fn default_ttl() -> u64 {
    300 // 5 minutes
}

fn default_max_entries() -> u64 {
    100
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

/// Search input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed search is issued, in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_debounce() -> u64 {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}

/// Upstream that movement listings are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementSourceKind {
    /// Omie ERP.
    #[default]
    Omie,
    /// BomControle.
    BomControle,
}

/// Movement listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MovementsConfig {
    /// Rows per displayed page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Rows requested when filling the cache for a range.
    #[serde(default = "default_fetch_page_size")]
    pub fetch_page_size: u32,
    /// Upstream to read from.
    #[serde(default)]
    pub source: MovementSourceKind,
}

fn default_page_size() -> u32 {
    50
}

fn default_fetch_page_size() -> u32 {
    500
}

impl Default for MovementsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            fetch_page_size: default_fetch_page_size(),
            source: MovementSourceKind::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FINNZA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
