//! Root registry: the set of client-granted root directories.
//!
//! Roots arrive wholesale from the connected client; the registry replaces
//! its entire set on every refresh and never edits an individual root. The
//! set bounds what the search tools may touch, with one escape hatch: while
//! no roots are registered, an explicit path may be searched unchecked.

use crate::error::SearchError;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tokio::sync::RwLock;

/// A client-granted root directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Root {
    /// `file://`-prefixed absolute path as supplied by the client.
    pub uri: String,
    /// Optional human-readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Root {
    /// Filesystem path of this root, with the `file://` scheme stripped.
    pub fn path(&self) -> &Path {
        Path::new(strip_file_scheme(&self.uri))
    }
}

/// Source of the authorized root set.
///
/// One operation: list the roots currently granted. The live implementation
/// asks the connected protocol peer; tests substitute fixed lists. Failures
/// never propagate past [`RootRegistry::refresh`], which logs them and
/// empties the set.
pub trait RootSource: Send + Sync {
    /// Failure detail, used for logging only.
    type Error: std::fmt::Display + Send;

    /// Fetch the current root list from the authority.
    fn list_roots(&self) -> impl Future<Output = Result<Vec<Root>, Self::Error>> + Send;
}

/// Holds the current authorized-root set.
#[derive(Debug, Default)]
pub struct RootRegistry {
    roots: RwLock<Vec<Root>>,
}

impl RootRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with whatever the source currently grants.
    ///
    /// Best-effort: on failure the set becomes empty and the error is only
    /// logged, since a search with an explicit path can still proceed.
    /// Returns the new set.
    pub async fn refresh<S: RootSource>(&self, source: &S) -> Vec<Root> {
        let roots = match source.list_roots().await {
            Ok(roots) => {
                tracing::debug!(count = roots.len(), "refreshed roots");
                roots
            }
            Err(e) => {
                tracing::warn!("root refresh failed: {e}");
                Vec::new()
            }
        };
        *self.roots.write().await = roots.clone();
        roots
    }

    /// The last-known set, without refreshing.
    pub async fn current(&self) -> Vec<Root> {
        self.roots.read().await.clone()
    }

    /// Number of registered roots.
    pub async fn len(&self) -> usize {
        self.roots.read().await.len()
    }

    /// Whether no roots are registered.
    pub async fn is_empty(&self) -> bool {
        self.roots.read().await.is_empty()
    }

    /// Whether `candidate` falls under at least one registered root.
    ///
    /// Always false for an empty registry; callers decide whether emptiness
    /// means "unconstrained" or "nothing searchable".
    pub async fn is_within_any_root(&self, candidate: &Path) -> bool {
        self.find_containing(candidate).await.is_some()
    }

    /// The first registered root whose path contains `candidate`.
    pub async fn find_containing(&self, candidate: &Path) -> Option<Root> {
        let candidate = normalize(candidate);
        self.roots
            .read()
            .await
            .iter()
            .find(|root| candidate.starts_with(normalize(root.path())))
            .cloned()
    }

    /// Look up a root by its exact name.
    ///
    /// The error carries every known name so the caller can correct the
    /// request without a second round trip.
    pub async fn resolve_by_name(&self, name: &str) -> Result<Root, SearchError> {
        let roots = self.roots.read().await;
        roots
            .iter()
            .find(|root| root.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| SearchError::RootNotFound {
                name: name.to_string(),
                known: roots.iter().filter_map(|r| r.name.clone()).collect(),
            })
    }
}

/// Strip a leading `file://` scheme, leaving the filesystem path.
fn strip_file_scheme(uri: &str) -> &str {
    uri.strip_prefix("file://").unwrap_or(uri)
}

/// Lexically normalize a path: absolute against the working directory, `.`
/// and `..` segments folded, trailing separators dropped.
///
/// No filesystem access: symlinks stay unresolved and the path need not
/// exist. Both sides of every containment check go through here, so the
/// comparison is component-wise (`/root-2` is not under `/root`) and
/// insensitive to trailing-slash differences.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
