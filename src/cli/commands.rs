//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::cli::{error, info, success, warn};
use crate::config::{self, loader};

/// Initialize a new armory.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("armory.toml");

    if config_path.exists() {
        warn("armory.toml already exists");
        return Ok(());
    }

    let content = loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created armory.toml");
    info("Edit the configuration file and run 'armory serve' to start the server");

    Ok(())
}

/// Run the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config()?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}", host, port));

    if let Err(e) = crate::api::run_server(config, &host, port).await {
        error(&format!("Server failed: {}", e));
        return Err(e.into());
    }

    Ok(())
}
