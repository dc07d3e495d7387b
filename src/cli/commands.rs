//! CLI command implementations

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;

use crate::auth::{decode_unverified_claims, HttpAuthApi, SessionManager};
use crate::cli::{
    error, info, print_claims, print_session_table, success, warn, OutputFormat, SessionReport,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::store::FileCookieStore;
use crate::stub;

/// Initialize a new authjar.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'authjar serve-stub' for a local endpoint, then 'authjar login'");

    Ok(())
}

/// Log in and store the session
pub async fn login(username: Option<String>, password: Option<String>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let manager = session_manager(&config)?;
    let theme = ColorfulTheme::default();

    let username = match username {
        Some(username) => username,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Authenticating against {}", config.api.authenticate_url()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = manager.authenticate(&username, &password).await;
    spinner.finish_and_clear();

    match result {
        Ok(session) => {
            success(&format!("Logged in as {}", session.username));
            if session.is_admin() {
                info("This account has admin rights");
            }
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

/// Show the current session
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = config::load_config_or_default()?;
    let manager = session_manager(&config)?;

    let Some(session) = manager.current_session()? else {
        info("Not logged in. Run 'authjar login' first");
        return Ok(());
    };

    match format {
        OutputFormat::Table => {
            print_session_table(&session);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&SessionReport::from(&session))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&SessionReport::from(&session))?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// Delete the stored session
pub async fn logout() -> Result<()> {
    let config = config::load_config_or_default()?;
    let manager = session_manager(&config)?;

    manager.clear_session()?;
    success("Logged out");

    Ok(())
}

/// Print the claims of a token
pub async fn decode(token: &str) -> Result<()> {
    match decode_unverified_claims(token) {
        Ok(claims) => {
            print_claims(&claims);
            if let Err(e) = claims.to_user() {
                warn(&format!("Token cannot be used for login: {}", e));
            }
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to decode token: {}", e));
            Err(e.into())
        }
    }
}

/// Run the development authentication endpoint
pub async fn serve_stub(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default()?;

    if config.stub.users.is_empty() {
        warn("No [[stub.users]] configured; every login will be rejected");
    }

    let host = host.unwrap_or_else(|| config.stub.host.clone());
    let port = port.unwrap_or(config.stub.port);

    info(&format!("Serving POST /authenticate on http://{}:{}", host, port));
    stub::run_server(config, &host, port).await?;

    Ok(())
}

fn session_manager(config: &Config) -> Result<SessionManager<FileCookieStore, HttpAuthApi>> {
    let store = FileCookieStore::new(&config.store.path);
    let api = HttpAuthApi::new(&config.api)?;
    Ok(SessionManager::new(store, api))
}
