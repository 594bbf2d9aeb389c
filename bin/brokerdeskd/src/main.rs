//! `brokerdeskd` — the brokerdesk server binary.
//!
//! Usage:
//!   brokerdeskd [-c <context-name-or-path>] [--listen <addr>]
//!
//! The context name resolves to `/etc/brokerdesk/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly. With no `-c`,
//! built-in defaults apply (data under `./data`).

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use bc::BcModule;
use brokerdesk_core::Module;
use brokerdesk_sql::{SQLStore, SqliteStore};
use job::JobModule;

use config::ServerConfig;

/// Brokerdesk server.
#[derive(Parser, Debug)]
#[command(name = "brokerdeskd", about = "Brokerdesk record-keeping server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:5001")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };

    // Initialize the document store (shared by all modules).
    std::fs::create_dir_all(&server_config.storage.data_dir)?;
    let db: Arc<dyn SQLStore> = Arc::new(
        SqliteStore::open(&server_config.db_path())
            .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?,
    );

    // Construct modules; each initializes its own collection schema.
    let job_module = JobModule::new(Arc::clone(&db))?;
    let bc_module = BcModule::new(Arc::clone(&db))?;

    let modules: Vec<Box<dyn Module>> = vec![Box::new(job_module), Box::new(bc_module)];
    let mut module_routes = Vec::with_capacity(modules.len());
    for module in &modules {
        info!("{} module initialized", module.name());
        module_routes.push(module.routes());
    }

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("brokerdeskd listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
