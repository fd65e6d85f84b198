use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Question answering over a document corpus", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Run the MCP server over stdio
    Mcp,
    /// Run a single search and print the outcome
    Search {
        query: String,
        #[arg(short = 'd', long = "document")]
        documents: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}
