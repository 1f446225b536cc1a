//! Scope resolution: turn a request's scope selectors into validated targets.
//!
//! Precedence: explicit `path`, then `rootName`, then all registered roots,
//! then one lazy refresh before giving up. Every accepted target has been
//! existence-checked and, while any roots are registered, boundary-checked.

use crate::error::SearchError;
use crate::roots::{RootRegistry, RootSource, normalize};
use std::path::{Path, PathBuf};

/// A validated search target with root provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Normalized filesystem path handed to the engine.
    pub path: PathBuf,
    /// Name of the registered root this target fell under, if any.
    pub root_name: Option<String>,
}

/// Resolve the scope selectors of a request into concrete targets.
///
/// `source` is only consulted when no selector is given and the registry is
/// empty: a single best-effort refresh before failing with
/// [`SearchError::NoSearchPaths`].
pub async fn resolve_scope<S: RootSource>(
    registry: &RootRegistry,
    source: &S,
    path: Option<&str>,
    root_name: Option<&str>,
) -> Result<Vec<Target>, SearchError> {
    let targets: Vec<Target> = if let Some(path) = path {
        let path = normalize(Path::new(path));
        let root_name = registry.find_containing(&path).await.and_then(|r| r.name);
        vec![Target { path, root_name }]
    } else if let Some(name) = root_name {
        let root = registry.resolve_by_name(name).await?;
        vec![Target {
            path: normalize(root.path()),
            root_name: root.name,
        }]
    } else {
        if registry.is_empty().await {
            // Pick up roots granted after startup before declaring failure.
            registry.refresh(source).await;
        }
        let roots = registry.current().await;
        if roots.is_empty() {
            return Err(SearchError::NoSearchPaths);
        }
        roots
            .into_iter()
            .map(|root| Target {
                path: normalize(root.path()),
                root_name: root.name,
            })
            .collect()
    };

    let enforce_bounds = !registry.is_empty().await;
    for target in &targets {
        if !tokio::fs::try_exists(&target.path).await.unwrap_or(false) {
            return Err(SearchError::PathNotFound(target.path.clone()));
        }
        if enforce_bounds && !registry.is_within_any_root(&target.path).await {
            return Err(SearchError::PathOutsideRoots(target.path.clone()));
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roots::Root;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts how often the authority is consulted.
    struct CountingSource {
        roots: Vec<Root>,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(roots: Vec<Root>) -> Self {
            Self {
                roots,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RootSource for CountingSource {
        type Error = String;

        async fn list_roots(&self) -> Result<Vec<Root>, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.roots.clone())
        }
    }

    fn file_root(dir: &Path, name: &str) -> Root {
        Root {
            uri: format!("file://{}", dir.display()),
            name: Some(name.into()),
        }
    }

    async fn registry_with(roots: Vec<Root>) -> RootRegistry {
        let registry = RootRegistry::new();
        registry.refresh(&CountingSource::new(roots)).await;
        registry
    }

    #[tokio::test]
    async fn explicit_path_wins_over_root_name() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_with(vec![file_root(dir.path(), "work")]).await;
        let source = CountingSource::new(vec![]);

        let inside = dir.path().join("sub");
        std::fs::create_dir(&inside).unwrap();
        // The bogus root name must not even be looked up.
        let targets = resolve_scope(
            &registry,
            &source,
            Some(inside.to_str().unwrap()),
            Some("no-such-root"),
        )
        .await
        .expect("explicit path should win");

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].path, normalize(&inside));
        assert_eq!(targets[0].root_name.as_deref(), Some("work"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn named_root_resolves_to_its_path() {
        let alpha = tempfile::tempdir().unwrap();
        let beta = tempfile::tempdir().unwrap();
        let registry = registry_with(vec![
            file_root(alpha.path(), "alpha"),
            file_root(beta.path(), "beta"),
        ])
        .await;
        let source = CountingSource::new(vec![]);

        let targets = resolve_scope(&registry, &source, None, Some("beta"))
            .await
            .expect("named root should resolve");

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].path, normalize(beta.path()));
        assert_eq!(targets[0].root_name.as_deref(), Some("beta"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_root_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_with(vec![file_root(dir.path(), "alpha")]).await;
        let source = CountingSource::new(vec![]);

        let err = resolve_scope(&registry, &source, None, Some("beta"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::RootNotFound { .. }));
    }

    #[tokio::test]
    async fn no_selector_targets_all_roots_in_order() {
        let alpha = tempfile::tempdir().unwrap();
        let beta = tempfile::tempdir().unwrap();
        let registry = registry_with(vec![
            file_root(alpha.path(), "alpha"),
            file_root(beta.path(), "beta"),
        ])
        .await;
        let source = CountingSource::new(vec![]);

        let targets = resolve_scope(&registry, &source, None, None)
            .await
            .expect("all-roots scope should resolve");

        let names: Vec<_> = targets
            .iter()
            .map(|t| t.root_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn empty_registry_refreshes_once_then_fails() {
        let registry = RootRegistry::new();
        let source = CountingSource::new(vec![]);

        let err = resolve_scope(&registry, &source, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NoSearchPaths));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn lazy_refresh_picks_up_new_roots() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RootRegistry::new();
        let source = CountingSource::new(vec![file_root(dir.path(), "late")]);

        let targets = resolve_scope(&registry, &source, None, None)
            .await
            .expect("refresh should supply roots");

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].root_name.as_deref(), Some("late"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn missing_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_with(vec![file_root(dir.path(), "work")]).await;
        let source = CountingSource::new(vec![]);

        let absent = dir.path().join("does-not-exist");
        let err = resolve_scope(&registry, &source, Some(absent.to_str().unwrap()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::PathNotFound(_)));
    }

    #[tokio::test]
    async fn outside_path_rejected_unless_registry_empty() {
        let root_dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let source = CountingSource::new(vec![]);

        let registry = registry_with(vec![file_root(root_dir.path(), "work")]).await;
        let err = resolve_scope(
            &registry,
            &source,
            Some(outside.path().to_str().unwrap()),
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SearchError::PathOutsideRoots(_)));

        // Same path passes once no roots constrain the search.
        let empty = RootRegistry::new();
        let targets = resolve_scope(
            &empty,
            &source,
            Some(outside.path().to_str().unwrap()),
            None,
        )
        .await
        .expect("empty registry leaves explicit paths unchecked");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].root_name, None);
    }
}
