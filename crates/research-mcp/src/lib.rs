//! Research MCP Server
//!
//! A Model Context Protocol (MCP) server that searches arXiv, caches paper
//! metadata on disk partitioned by topic, and forwards searches to JSTOR.
//!
//! # Features
//!
//! - **Topic store**: search results merged into `<papers_dir>/<topic>/papers_info.json`
//! - **Lookup**: find a stored paper by id across every topic
//! - **Resources**: `papers://folders` and `papers://{topic}` as Markdown
//! - **Passthroughs**: JSTOR hybrid/semantic/lexical/basic/grouped search, Cedar metadata
//!
//! # Example
//!
//! ```no_run
//! use research_mcp::{config::Config, store::TopicStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = TopicStore::new(&config.papers_dir);
//!
//!     let listing = research_mcp::resources::list_topics(&store).await?;
//!     println!("{listing}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod formatters;
pub mod models;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod store;
pub mod tools;

pub use client::ResearchClient;
pub use config::Config;
pub use error::{ClientError, StoreError, ToolError};
pub use store::{Lookup, TopicStore};
