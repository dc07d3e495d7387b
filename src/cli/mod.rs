//! CLI interface for authjar

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "authjar")]
#[command(author = "Krakaw")]
#[command(version = "0.1.0")]
#[command(about = "Client-side token sessions kept in a cookie jar", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new authjar.toml configuration file
    Init,

    /// Log in against the authentication endpoint and store the session
    Login {
        /// Username (prompted for when omitted)
        #[arg(short, long, env = "AUTHJAR_USERNAME")]
        username: Option<String>,

        /// Password (prompted for when omitted)
        #[arg(short, long, env = "AUTHJAR_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show the currently authenticated user
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete the stored session
    Logout,

    /// Decode a token's claims without verifying its signature
    Decode {
        /// The token to decode
        token: String,
    },

    /// Run the development authentication endpoint
    ServeStub {
        /// Host to bind to (defaults to the config value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
