//! [`RootsClient`] handler that grants workspace roots to the server.

use rmcp::{
    ClientHandler, RoleClient,
    model::{ClientCapabilities, ClientInfo, ErrorData, Implementation, ListRootsResult},
    service::RequestContext,
};
use serde_json::json;
use std::path::PathBuf;

/// Client handler serving a fixed directory list as `file://` roots.
///
/// The server treats the client as the authority on which directories are
/// searchable, so every `roots/list` request is answered from this list.
#[derive(Debug, Clone)]
pub struct RootsClient {
    roots: Vec<PathBuf>,
}

impl RootsClient {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        // Relative directories resolve here, against the client's own cwd;
        // the peer only ever sees absolute URIs.
        let roots = roots
            .into_iter()
            .map(|dir| std::path::absolute(&dir).unwrap_or(dir))
            .collect();
        Self { roots }
    }
}

impl ClientHandler for RootsClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo {
            capabilities: ClientCapabilities::builder()
                .enable_roots()
                .enable_roots_list_changed()
                .build(),
            client_info: Implementation {
                name: "rootgrep-client".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn list_roots(
        &self,
        _context: RequestContext<RoleClient>,
    ) -> Result<ListRootsResult, ErrorData> {
        let roots: Vec<_> = self
            .roots
            .iter()
            .map(|dir| {
                json!({
                    "uri": format!("file://{}", dir.display()),
                    "name": dir.file_name().map(|n| n.to_string_lossy().into_owned()),
                })
            })
            .collect();
        tracing::debug!(count = roots.len(), "serving roots/list");
        serde_json::from_value(json!({ "roots": roots }))
            .map_err(|e| ErrorData::internal_error(e.to_string(), None))
    }
}
