//! Figma MCP Server
//!
//! A Model Context Protocol server that exposes the Figma REST API to
//! agentic clients like Claude Desktop and Cursor.
//!
//! # Usage
//!
//! ```bash
//! figma-mcp [--config-dir <path>] [--base-url <url>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `figma_mcp=info`)
//! - `FIGMA_MCP_CONFIG_DIR`: Same as `--config-dir`
//! - `FIGMA_API_BASE_URL`: Same as `--base-url`
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use figma_api::BASE_URL;
use figma_config::CredentialStore;
use figma_mcp::{FigmaContext, FigmaMcpServer};

/// MCP server for the Figma REST API
#[derive(Parser)]
#[command(name = "figma-mcp")]
#[command(about = "MCP server for the Figma REST API")]
#[command(version)]
struct Args {
    /// Directory holding config.json (default: ~/.mcp-figma)
    #[arg(long, env = "FIGMA_MCP_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Figma API base URL
    #[arg(long, env = "FIGMA_API_BASE_URL", default_value = BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("figma_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let store = match args.config_dir {
        Some(dir) => CredentialStore::with_config_dir(dir),
        None => CredentialStore::new()?,
    };

    tracing::info!(config = ?store.path(), "Starting figma-mcp server");

    let ctx = FigmaContext::with_base_url(store, args.base_url)?;
    let mut server = FigmaMcpServer::new(ctx);
    server.run().await?;

    tracing::info!("figma-mcp server stopped");
    Ok(())
}
