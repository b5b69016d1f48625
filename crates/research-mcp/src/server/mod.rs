//! MCP server implementation.
//!
//! Provides both stdio (for desktop hosts) and HTTP transports over one
//! shared dispatcher.

pub mod protocol;
pub mod stdio;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::client::ResearchClient;
use crate::store::TopicStore;
use crate::tools::{self, ToolContext};

pub use protocol::{JsonRpcRequest, JsonRpcResponse, ServerState};

/// MCP server for the research tools and paper resources.
pub struct McpServer {
    state: Arc<ServerState>,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(client: ResearchClient, store: TopicStore) -> Self {
        let ctx = ToolContext::new(Arc::new(client), Arc::new(store));
        let tools = tools::register_all_tools();

        Self { state: Arc::new(ServerState::new(tools, ctx)) }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.state.tools.len());

        stdio::run_stdio(&self.state).await
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in HTTP mode on port {}", port);
        tracing::info!("Registered {} tools", self.state.tools.len());

        let router = transport::create_router(Arc::clone(&self.state));
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.state.tools.len()).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
