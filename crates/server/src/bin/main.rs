//! Binary entry point for the rootgrep MCP server.

use clap::Parser;
use rmcp::ServiceExt;
use rootgrep::SearchServer;

/// Rootgrep MCP server: text search scoped to client workspace roots.
#[derive(Parser)]
#[command(name = "rootgrep", version, about)]
struct Cli {
    /// Search engine executable to invoke (a name on PATH or a full path).
    #[arg(long, value_name = "PROGRAM", default_value = "rg")]
    engine: std::path::PathBuf,
}

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }
    let cli = Cli::parse();
    let server = SearchServer::new(cli.engine);
    let transport = rmcp::transport::stdio();
    server
        .serve(transport)
        .await
        .expect("failed to start server")
        .waiting()
        .await
        .expect("server error");
}
