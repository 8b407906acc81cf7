use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub images: ImageSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    /// Token verification configuration
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default derived via field defaults

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        // Server validations
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.server.body_limit_bytes == 0 {
            return Err("server.body_limit_bytes must be > 0".into());
        }
        // Upstream validations
        if url::Url::parse(&self.upstream.base_url).is_err() {
            return Err("upstream.base_url must be a valid URL".into());
        }
        if self.upstream.request_timeout_ms == 0 {
            return Err("upstream.request_timeout_ms must be > 0".into());
        }
        if self.upstream.list_limit == 0 {
            return Err("upstream.list_limit must be > 0".into());
        }
        // Image base validations
        if self.images.primary_base.is_empty() || self.images.alternate_base.is_empty() {
            return Err("images.primary_base and images.alternate_base must not be empty".into());
        }
        // Auth validation - a signing secret is required
        if self.auth.secret.is_empty() {
            return Err("auth.secret must not be empty".into());
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    4000
}
fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    /// Base URL of the public Pokémon API.
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout_ms")]
    pub request_timeout_ms: u64,
    /// How many species names the index fan-out requests. Covers every
    /// published Pokémon as of generation nine.
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

fn default_upstream_base_url() -> String {
    "https://pokeapi.co/api/v2".into()
}
fn default_upstream_timeout_ms() -> u64 {
    30_000
}
fn default_list_limit() -> u32 {
    1025
}

impl UpstreamSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            request_timeout_ms: default_upstream_timeout_ms(),
            list_limit: default_list_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Artwork base for ids below the alternate floor.
    #[serde(default = "default_primary_image_base")]
    pub primary_base: String,
    /// Artwork base for ids the primary set does not cover.
    #[serde(default = "default_alternate_image_base")]
    pub alternate_base: String,
}

fn default_primary_image_base() -> String {
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork".into()
}
fn default_alternate_image_base() -> String {
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/home".into()
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            primary_base: default_primary_image_base(),
            alternate_base: default_alternate_image_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Which persistence backend holds documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthSettings {
    /// Shared HS256 signing secret. Must be provided; there is no
    /// usable default.
    #[serde(default)]
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                // Try default root-level file
                let default_path = PathBuf::from("rotomdex.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., ROTOMDEX__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("ROTOMDEX")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}
