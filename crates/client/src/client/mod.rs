//! MCP client connection handling for stdio and remote transports.

use crate::error::Error;
use rmcp::{
    RoleClient, ServiceExt,
    service::RunningService,
    transport::{TokioChildProcess, streamable_http_client::StreamableHttpClientTransportConfig},
};
use std::path::PathBuf;
use tokio::process::Command;

mod roots;

pub use roots::RootsClient;

/// Handle to a connected rootgrep server.
pub type Connection = RunningService<RoleClient, RootsClient>;

/// Parsed target for connecting to an MCP server.
pub enum Target {
    /// Remote server at the given URL.
    Remote { url: String, auth: Option<String> },
    /// Stdio server launched by a command.
    Stdio { program: String, args: Vec<String> },
}

impl Target {
    /// Parse CLI target arguments into a [`Target`].
    ///
    /// If the first element starts with `http://` or `https://`, treat it as
    /// a remote URL. Otherwise treat the entire vec as a stdio command.
    pub fn parse(target: Vec<String>, auth: Option<String>) -> Self {
        let first = &target[0];
        if first.starts_with("http://") || first.starts_with("https://") {
            Target::Remote {
                url: first.clone(),
                auth,
            }
        } else {
            Target::Stdio {
                program: first.clone(),
                args: target[1..].to_vec(),
            }
        }
    }
}

/// Connect to a rootgrep server, granting `roots` to it for the session.
pub async fn connect(target: Target, roots: Vec<PathBuf>) -> Result<Connection, Error> {
    let handler = RootsClient::new(roots);
    match target {
        Target::Remote { url, auth } => {
            let config = StreamableHttpClientTransportConfig {
                uri: url.into(),
                ..Default::default()
            };
            let config = if let Some(token) = auth {
                config.auth_header(token)
            } else {
                config
            };
            let transport = rmcp::transport::StreamableHttpClientTransport::from_config(config);
            let service = handler.serve(transport).await?;
            Ok(service)
        }
        Target::Stdio { program, args } => {
            let mut cmd = Command::new(&program);
            cmd.args(&args);
            let transport = TokioChildProcess::new(cmd)?;
            let service = handler.serve(transport).await?;
            Ok(service)
        }
    }
}
