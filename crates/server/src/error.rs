//! Error kinds for scope resolution and engine invocation.
//!
//! Everything here is recoverable: errors are rendered into the tool
//! response at the request boundary, never allowed to take the process down.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors surfaced to the caller of a search request.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The requested root name is not registered.
    #[error("root '{}' not found; known roots: [{}]", .name, .known.join(", "))]
    RootNotFound {
        /// Name the caller asked for.
        name: String,
        /// Names of all currently registered roots.
        known: Vec<String>,
    },

    /// The client granted no roots and the request named no explicit path.
    #[error("no search paths available: no roots are registered and no explicit path was given")]
    NoSearchPaths,

    /// A candidate search path does not exist on disk.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// A candidate search path lies outside every registered root.
    #[error("path outside registered roots: {0}")]
    PathOutsideRoots(PathBuf),

    /// The engine process could not be started at all.
    #[error("failed to launch search engine '{program}': {source}")]
    EngineLaunch {
        /// Program that was invoked.
        program: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but exited with a failure status.
    #[error("search engine failed ({status}): {stderr}")]
    EngineFailure {
        /// Exit status reported by the operating system.
        status: ExitStatus,
        /// Everything the engine wrote to stderr.
        stderr: String,
    },

    /// The search pattern was empty or whitespace.
    #[error("search pattern must not be empty")]
    EmptyPattern,
}
