//! Tool surface for the search server.

use crate::SearchServer;
use crate::engine::{MatchRecord, SearchEngine, SearchOptions};
use crate::error::SearchError;
use crate::roots::{Root, RootRegistry, RootSource};
use crate::scope::{self, Target};
use rmcp::{
    Peer, RoleServer,
    handler::server::wrapper::Parameters,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

fn default_max_results() -> u32 {
    1000
}

fn default_max_matched_files() -> u32 {
    100
}

/// Parameters for the `search` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Regular expression to search for; passed to the engine verbatim.
    pub pattern: String,
    /// Explicit file or directory to search instead of the granted roots.
    #[serde(default)]
    pub path: Option<String>,
    /// Name of a single granted root to search.
    #[serde(default)]
    pub root_name: Option<String>,
    /// Match case exactly; by default the search is case-insensitive.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Lines of context to include around each match.
    #[serde(default)]
    pub context_lines: u32,
    /// Maximum number of matches to report.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Maximum number of files with matches.
    #[serde(default = "default_max_matched_files")]
    pub max_matched_files: u32,
}

/// One resolved search target reported back to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedPath {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_name: Option<String>,
}

impl From<Target> for ResolvedPath {
    fn from(target: Target) -> Self {
        Self {
            path: target.path.display().to_string(),
            root_name: target.root_name,
        }
    }
}

/// Payload of a successful `search` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    pattern: String,
    resolved_paths: Vec<ResolvedPath>,
    matches: Vec<MatchRecord>,
    total_matches: usize,
    available_root_count: usize,
}

/// Payload of a `refresh_roots` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRootsResult {
    available_roots: Vec<Root>,
    total_roots: usize,
}

#[tool_router]
impl SearchServer {
    /// Create a server that invokes the given engine program.
    pub fn new(engine_program: impl Into<std::path::PathBuf>) -> Self {
        Self {
            registry: RootRegistry::new(),
            engine: SearchEngine::new(engine_program),
            tool_router: Self::tool_router(),
        }
    }

    /// Full search flow: validate, resolve the scope, invoke, adapt.
    ///
    /// Generic over the root source so tests can drive it without a live
    /// protocol peer.
    async fn run_search<S: RootSource>(
        &self,
        source: &S,
        params: SearchParams,
    ) -> Result<SearchResult, SearchError> {
        if params.pattern.trim().is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        // Empty strings behave like absent selectors.
        let path = params.path.as_deref().filter(|p| !p.is_empty());
        let root_name = params.root_name.as_deref().filter(|n| !n.is_empty());
        let targets = scope::resolve_scope(&self.registry, source, path, root_name).await?;

        let options = SearchOptions {
            pattern: params.pattern.clone(),
            case_sensitive: params.case_sensitive,
            context_lines: params.context_lines,
            max_results: params.max_results,
            max_matched_files: params.max_matched_files,
        };
        let matches = self.engine.run(&options, &targets).await?;

        Ok(SearchResult {
            pattern: params.pattern,
            resolved_paths: targets.into_iter().map(ResolvedPath::from).collect(),
            total_matches: matches.len(),
            matches,
            available_root_count: self.registry.len().await,
        })
    }

    /// Search file contents within the granted roots or an explicit path.
    #[tool(
        description = "Search file contents for a regex pattern, scoped to the workspace roots granted by the client or to an explicit path"
    )]
    async fn search(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<String, String> {
        let result = self
            .run_search(&peer, params)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
    }

    /// Re-query the client for its current roots.
    #[tool(description = "Refresh the set of workspace roots granted by the client")]
    async fn refresh_roots(&self, peer: Peer<RoleServer>) -> Result<String, String> {
        let roots = self.registry.refresh(&peer).await;
        let result = RefreshRootsResult {
            total_roots: roots.len(),
            available_roots: roots,
        };
        serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
    }
}
