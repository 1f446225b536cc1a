//! MCP server for root-scoped text search.
//!
//! Searches are delegated to an external line-oriented engine and confined
//! to the workspace roots granted by the connected client. While the client
//! grants no roots, only explicit-path searches are possible.

use rmcp::{
    Peer, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    service::NotificationContext,
    tool_handler,
};

pub mod engine;
pub mod error;
pub mod roots;
pub mod scope;
pub mod tools;

use engine::SearchEngine;
use roots::{Root, RootRegistry, RootSource};

/// MCP search server scoped to client-granted roots.
#[derive(Debug)]
pub struct SearchServer {
    pub(crate) registry: RootRegistry,
    pub(crate) engine: SearchEngine,
    pub(crate) tool_router: ToolRouter<Self>,
}

/// The connected client is the root authority: one `roots/list` round trip,
/// best-effort.
impl RootSource for Peer<RoleServer> {
    type Error = rmcp::ServiceError;

    async fn list_roots(&self) -> Result<Vec<Root>, Self::Error> {
        let result = Peer::list_roots(self).await?;
        Ok(result.roots.into_iter().map(Root::from).collect())
    }
}

impl From<rmcp::model::Root> for Root {
    fn from(root: rmcp::model::Root) -> Self {
        Self {
            uri: root.uri,
            name: root.name,
        }
    }
}

#[tool_handler]
impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "rootgrep".into(),
                title: Some("Rootgrep Search Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Text search over the workspace roots granted by the client. \
                 Use `search` for pattern queries and `refresh_roots` to re-read \
                 the granted roots."
                    .into(),
            ),
        }
    }

    async fn on_initialized(&self, context: NotificationContext<RoleServer>) {
        // Roots-capable clients get registered before their first search.
        self.registry.refresh(&context.peer).await;
    }

    async fn on_roots_list_changed(&self, context: NotificationContext<RoleServer>) {
        self.registry.refresh(&context.peer).await;
    }
}
