//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "authjar.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "AUTHJAR_CONFIG";

/// Load configuration from `$AUTHJAR_CONFIG`, or the nearest authjar.toml
pub fn load_config() -> Result<Config> {
    let config_path = match env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => find_config_file()?,
    };
    load_config_from_path(&config_path)
}

/// Load configuration, falling back to defaults when no file exists
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        other => other,
    }
}

/// Load configuration from a specific path.
///
/// A missing file is `ConfigNotFound`; a file that exists but cannot be
/// read is a `Config` error naming the path.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::ConfigNotFound,
        _ => Error::Config(format!("Cannot read {}: {}", path.display(), e)),
    })?;

    let config: Config = toml::from_str(&interpolate_env_vars(&content))?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Nearest authjar.toml in the current directory or one of its parents
fn find_config_file() -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
        .ok_or(Error::ConfigNotFound)
}

/// Expand `${VAR}` and `${VAR:-default}`. Unset variables without a default
/// expand to an empty string and are logged.
fn interpolate_env_vars(content: &str) -> String {
    // Constant pattern; a failure here is a bug, not bad input
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        match (env::var(var_name), caps.get(2)) {
            (Ok(value), _) => value,
            (Err(_), Some(default)) => default.as_str().to_string(),
            (Err(_), None) => {
                tracing::warn!("Environment variable {} is not set", var_name);
                String::new()
            }
        }
    })
    .into_owned()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# authjar configuration

[api]
base_url = "${AUTHJAR_API_URL:-http://127.0.0.1:8080}"
authenticate_path = "/authenticate"
timeout_secs = 30

[store]
path = "./.authjar/cookies.json"

# Development authentication endpoint ('authjar serve-stub')
[stub]
host = "127.0.0.1"
port = 8080
secret = "${AUTHJAR_STUB_SECRET:-authjar-stub-secret-change-me}"
token_ttl_secs = 3600

[[stub.users]]
username = "admin"
password = "admin"
roles = ["ROLE_ADMIN", "ROLE_USER"]

[[stub.users]]
username = "user"
password = "user"
roles = ["ROLE_USER"]
"#
}
