use std::sync::Arc;

use tracing::info;

use retromail::{Config, Database, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.validate()?;

    // Initialize logging
    if let Err(e) = retromail::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        retromail::logging::init_console_only(&config.logging.level);
    }

    info!("retromail - webmail backend");

    let db = Database::open(&config.database.path).await?;
    info!("Database ready at {}", config.database.path);

    let server = WebServer::new(&config.server, Arc::new(db), config.provision.clone())?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await?;
    Ok(())
}
