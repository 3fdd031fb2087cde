//! Quorum MCP Server
//!
//! A Model Context Protocol server that lets AI agents prepare Merkle voting
//! governance deployments on Soroban.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use quorum_mcp::{McpServer, ServerConfig};

/// Quorum MCP Server - Merkle voter trees for Soroban governance
#[derive(Parser, Debug)]
#[command(name = "quorum-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transport mechanism to use
    #[arg(short, long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// Log level (overridden by RUST_LOG when set)
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Accept any string as a voter or admin address
    #[arg(long)]
    lenient_addresses: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output (for Claude Desktop, VS Code, etc.)
    Stdio,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::from(args.log_level).into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Quorum MCP Server v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if args.lenient_addresses {
        config.validate_addresses = false;
    }
    info!(
        "Address validation {}, max {} voters",
        if config.validate_addresses { "on" } else { "off" },
        config.max_voters
    );

    let server = McpServer::with_config(config);

    match args.transport {
        Transport::Stdio => server.run_stdio().await?,
    }

    Ok(())
}
