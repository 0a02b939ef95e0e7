//! outline-mcp: MCP server exposing Outline documents and comments.
//!
//! # Usage
//!
//! ```bash
//! OUTLINE_API_KEY=... outline-mcp --stdio
//! ```
//!
//! `OUTLINE_API_URL` points the server at a self-hosted instance. A `.env`
//! file in the working directory is read first.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;

use outline_mcp::config::Config;
use outline_mcp::logger::{self, LogMode};
use outline_mcp::server::OutlineServerHandler;

#[derive(Debug, Parser)]
#[command(name = "outline-mcp", version, about = "MCP server for the Outline API")]
struct Cli {
    /// Wrap diagnostics as JSON-RPC lines on stderr so stdout stays protocol-only.
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => {
            logger::write_fatal(&format!("Failed to load .env file: {}", e));
            return ExitCode::FAILURE;
        }
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            logger::write_fatal(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init(LogMode::from_stdio_flag(cli.stdio)) {
        logger::write_fatal(&format!("Failed to initialize logging: {}", e));
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::write_fatal(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    let handler =
        OutlineServerHandler::from_config(&config).context("Failed to create server handler")?;

    tracing::debug!("Serving on stdio");

    let service = handler
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;

    service.waiting().await?;

    tracing::debug!("Server shutdown complete");
    Ok(())
}
