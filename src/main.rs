use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authjar::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authjar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { username, password } => cli::commands::login(username, password).await,
        Commands::Whoami { format } => cli::commands::whoami(format).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Decode { token } => cli::commands::decode(&token).await,
        Commands::ServeStub { host, port } => cli::commands::serve_stub(host, port).await,
    }
}
