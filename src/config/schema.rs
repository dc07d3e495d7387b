//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub stub: StubConfig,
}

/// Remote authentication endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_authenticate_path")]
    pub authenticate_path: String,

    /// Request timeout, enforced by the HTTP client
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_authenticate_path() -> String {
    "/authenticate".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            authenticate_path: default_authenticate_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Full URL of the authentication endpoint
    pub fn authenticate_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.authenticate_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

/// Cookie jar location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./.authjar/cookies.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Development authentication endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubConfig {
    #[serde(default = "default_stub_host")]
    pub host: String,

    #[serde(default = "default_stub_port")]
    pub port: u16,

    /// HMAC secret used to sign issued tokens
    #[serde(default = "default_stub_secret")]
    pub secret: String,

    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    #[serde(default)]
    pub users: Vec<StubUser>,
}

fn default_stub_host() -> String {
    "127.0.0.1".to_string()
}

fn default_stub_port() -> u16 {
    8080
}

fn default_stub_secret() -> String {
    "authjar-stub-secret-change-me".to_string()
}

fn default_token_ttl_secs() -> i64 {
    3600
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            host: default_stub_host(),
            port: default_stub_port(),
            secret: default_stub_secret(),
            token_ttl_secs: default_token_ttl_secs(),
            users: Vec::new(),
        }
    }
}

/// An account known to the development endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubUser {
    pub username: String,
    pub password: String,

    #[serde(default)]
    pub roles: Vec<String>,
}

impl StubConfig {
    /// Find a user by username
    pub fn get_user(&self, username: &str) -> Option<&StubUser> {
        self.users.iter().find(|u| u.username == username)
    }
}
