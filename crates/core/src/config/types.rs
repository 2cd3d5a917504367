use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3001
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// JSON file loaded into the catalog when it is empty at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_path: None,
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("catalog.db")
}

/// Cross-origin configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origin of the browser client (e.g. "http://localhost:5173").
    /// No CORS headers are sent when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

/// How static files are served.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetMode {
    /// Artwork only; the frontend is served by its own dev server.
    #[default]
    Development,
    /// Artwork plus the built frontend with SPA fallback.
    Production,
}

/// Static asset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    #[serde(default)]
    pub mode: AssetMode,
    /// Directory holding artwork images.
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,
    /// URL prefix artwork is served under.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Built frontend, required in production mode.
    #[serde(default)]
    pub frontend_dir: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            mode: AssetMode::default(),
            dir: default_assets_dir(),
            url_prefix: default_url_prefix(),
            frontend_dir: None,
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("public/images")
}

fn default_url_prefix() -> String {
    "/images".to_string()
}

/// Browser client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Base URL of the query service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL relative artwork paths resolve against.
    /// Defaults to the API base URL plus the artwork prefix.
    #[serde(default)]
    pub asset_base_url: Option<String>,
    /// Quiet period before an incremental search is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            asset_base_url: None,
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

impl Config {
    /// Base URL for relative artwork paths, always ending in `/`.
    pub fn asset_base_url(&self) -> String {
        let base = match &self.browser.asset_base_url {
            Some(url) => url.clone(),
            None => format!(
                "{}{}",
                self.browser.api_base_url.trim_end_matches('/'),
                self.assets.url_prefix
            ),
        };
        if base.ends_with('/') {
            base
        } else {
            format!("{}/", base)
        }
    }
}
