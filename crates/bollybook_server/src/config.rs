//! Server configuration.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from bollybook.toml)
//! - User override (./bollybook.toml)
//! - Environment variables (`CORS_ORIGINS`, `LLM_API_KEY` or
//!   `EMERGENT_LLM_KEY`, `LLM_BASE_URL`, `LLM_MODEL`, `DATABASE_URL`,
//!   `DB_NAME`)

use bollybook_error::{BollybookResult, ConfigError};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG: &str = include_str!("../bollybook.toml");

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Allowed origins, comma-separated; `*` allows any
    pub cors_origins: String,
    /// Largest accepted request body, in megabytes
    pub max_upload_mb: usize,
}

impl ServerConfig {
    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Trimmed, non-empty origins.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Body limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Where uploads and rendered books are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Raw uploaded files
    pub upload_dir: PathBuf,
    /// Rendered downloads
    pub output_dir: PathBuf,
}

/// LLM endpoint and generation limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat-completions endpoint prefix
    pub base_url: String,
    /// Bearer credential
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Limit for a single LLM call
    pub request_timeout_secs: u64,
    /// Limit for a whole book
    pub book_timeout_secs: u64,
    /// Chapters generated at once
    pub chapter_concurrency: usize,
}

impl LlmConfig {
    /// Per-call timeout; zero disables it.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Per-book timeout; zero disables it.
    pub fn book_timeout(&self) -> Option<Duration> {
        (self.book_timeout_secs > 0).then(|| Duration::from_secs(self.book_timeout_secs))
    }
}

/// PostgreSQL settings. Without a URL the in-memory store is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL
    #[serde(default)]
    pub url: Option<String>,
    /// Database name, replacing the one in `url` when set
    #[serde(default)]
    pub name: Option<String>,
    /// Maximum pooled connections
    pub pool_size: u32,
}

impl DatabaseConfig {
    /// The URL to connect to, with `name` substituted as the database.
    ///
    /// # Examples
    ///
    /// ```
    /// use bollybook_server::DatabaseConfig;
    ///
    /// let config = DatabaseConfig {
    ///     url: Some("postgres://u:p@db:5432/postgres?sslmode=disable".to_string()),
    ///     name: Some("bollybook".to_string()),
    ///     pool_size: 10,
    /// };
    /// assert_eq!(
    ///     config.connection_url().unwrap(),
    ///     "postgres://u:p@db:5432/bollybook?sslmode=disable"
    /// );
    /// ```
    pub fn connection_url(&self) -> Option<String> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty())?;
        let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) else {
            return Some(url.to_string());
        };

        let (base, query) = match url.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (url, None),
        };
        let authority = base.find("://").map_or(0, |i| i + 3);
        let base = match base[authority..].find('/') {
            Some(i) => &base[..authority + i],
            None => base,
        };

        let mut composed = format!("{}/{}", base, name.trim());
        if let Some(query) = query {
            composed.push('?');
            composed.push_str(query);
        }
        Some(composed)
    }
}

/// Caption endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Scheme and host serving `/api/timedtext`
    pub base_url: String,
    /// Caption language
    pub language: String,
}

/// Log output settings. Levels come from `RUST_LOG`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// Complete server configuration.
///
/// # Example
///
/// ```no_run
/// use bollybook_server::BollybookConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BollybookConfig::load()?;
/// println!("listening on {}", config.server.bind_address());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BollybookConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// File locations
    pub storage: StorageConfig,
    /// LLM endpoint
    pub llm: LlmConfig,
    /// Persistence
    pub database: DatabaseConfig,
    /// Transcript endpoint
    pub transcript: TranscriptConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl BollybookConfig {
    /// Load from `.env`, the bundled defaults, `./bollybook.toml` and the
    /// process environment.
    pub fn load() -> BollybookResult<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();
        Self::load_with(Some(Path::new("bollybook.toml")), |key| {
            std::env::var(key).ok()
        })
    }

    /// Load with an explicit user file and environment lookup.
    ///
    /// The user file is optional and silently skipped if it does not exist.
    pub fn load_with<F>(user_file: Option<&Path>, env: F) -> BollybookResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let api_key = env("LLM_API_KEY").or_else(|| env("EMERGENT_LLM_KEY"));
        let overrides = [
            ("server.cors_origins", env("CORS_ORIGINS")),
            ("llm.api_key", api_key),
            ("llm.base_url", env("LLM_BASE_URL")),
            ("llm.model", env("LLM_MODEL")),
            ("database.url", env("DATABASE_URL")),
            ("database.name", env("DB_NAME")),
        ];
        for (key, value) in overrides {
            builder = builder.set_override_option(key, value).map_err(|e| {
                ConfigError::new(format!("Invalid override for {}: {}", key, e))
            })?;
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        Ok(config)
    }
}
