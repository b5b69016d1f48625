//! Research MCP Server - Entry Point
//!
//! Provides both stdio and HTTP transports.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use research_mcp::{ResearchClient, TopicStore, config::Config, config::storage, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "research-mcp")]
#[command(about = "MCP server for arXiv paper search with a local per-topic cache")]
#[command(version)]
struct Cli {
    /// Directory holding one sub-directory of stored papers per topic
    #[arg(long, default_value = storage::DEFAULT_PAPERS_DIR, env = "RESEARCH_PAPERS_DIR")]
    papers_dir: PathBuf,

    /// Value of the UUID cookie sent to JSTOR search services
    #[arg(long, env = "JSTOR_SEARCH_UUID")]
    search_uuid: Option<String>,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output
    #[default]
    Stdio,
    /// Streamable HTTP
    Http,
}

/// Logs always go to stderr; stdout carries the stdio protocol.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        papers_dir = %cli.papers_dir.display(),
        "Starting research MCP server"
    );

    let config = Config::new(cli.papers_dir, cli.search_uuid);
    let client = ResearchClient::new(&config)?;
    let store = TopicStore::new(&config.papers_dir);
    let server = McpServer::new(client, store);

    match cli.transport {
        Transport::Stdio => {
            server.run_stdio().await?;
        }
        Transport::Http => {
            tracing::info!(port = cli.port, "Running in HTTP mode");
            server.run_http(cli.port).await?;
        }
    }

    Ok(())
}
