//! Glean MCP server
//!
//! Exposes Glean search and chat as MCP tools over stdio.
//!
//! ## Tools
//!
//! - `glean_search` - search company content across connected datasources
//! - `glean_chat` - ask Glean's AI assistant a question
//!
//! ## Configuration
//!
//! - `GLEAN_SUBDOMAIN` - instance subdomain (required)
//! - `GLEAN_API_TOKEN` - REST API bearer token (required)
//! - `GLEAN_ACT_AS` - identity to act as (optional, needs a global token)

use anyhow::Result;
use glean_api::{GleanClient, GleanConfig};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::sync::Arc;

mod format;
mod schema;
mod server;
mod tools;

use server::GleanServer;

#[tokio::main]
async fn main() {
    // Logging to stderr only (stdout carries the MCP protocol).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run().await {
        log::error!("glean-mcp failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = GleanConfig::from_env()?;
    log::info!("Starting Glean MCP server for instance '{}'", config.subdomain);

    let client = GleanClient::new(&config);
    let service = GleanServer::new(Arc::new(client));
    let server = service.serve(stdio()).await?;

    // Serve until the client disconnects.
    server.waiting().await?;

    log::info!("Glean MCP server stopped");
    Ok(())
}
