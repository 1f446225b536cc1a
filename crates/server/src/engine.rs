//! Search engine invocation and output adaptation.
//!
//! The engine is an external executable speaking a line-oriented protocol:
//! one JSON record per line, tagged by a `type` field. Only `match` records
//! survive adaptation; begin/end/summary records and malformed fragments
//! are dropped.

use crate::error::SearchError;
use crate::scope::Target;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// One match record emitted by the engine, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchRecord(pub Value);

/// Options applied to a single engine invocation.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Pattern handed to the engine verbatim; regex metacharacters pass
    /// through without escaping.
    pub pattern: String,
    /// Match case exactly instead of the default case-insensitive mode.
    pub case_sensitive: bool,
    /// Context lines to request around each match.
    pub context_lines: u32,
    /// Cap on the total number of reported matches.
    pub max_results: u32,
    /// Cap on the number of files with matches.
    pub max_matched_files: u32,
}

/// Invokes the external search engine.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    program: PathBuf,
}

impl SearchEngine {
    /// Engine invoking the given program (a name on `PATH` or a full path).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run one search over `targets` and adapt the engine's output.
    ///
    /// Both output streams are buffered in full before parsing; no timeout
    /// is imposed here. Exit codes 0 (matches) and 1 (no matches) count as
    /// success; anything else surfaces the engine's stderr.
    pub async fn run(
        &self,
        options: &SearchOptions,
        targets: &[Target],
    ) -> Result<Vec<MatchRecord>, SearchError> {
        let args = build_args(options, targets);
        tracing::debug!(program = %self.program.display(), ?args, "invoking search engine");
        // The child must not read this process's stdin, which carries the
        // protocol stream; tokio's output() pipes only stdout and stderr.
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SearchError::EngineLaunch {
                program: self.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(0) | Some(1) => {}
            _ => {
                return Err(SearchError::EngineFailure {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(collect_matches(&stdout))
    }
}

/// Build the engine argument vector in its fixed order: base output flags,
/// conditional options, the pattern, then every target path.
pub(crate) fn build_args(options: &SearchOptions, targets: &[Target]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--json".into(), "--no-heading".into()];
    if !options.case_sensitive {
        args.push("--ignore-case".into());
    }
    if options.context_lines > 0 {
        args.push(format!("--context={}", options.context_lines).into());
    }
    if options.max_results > 0 {
        args.push(format!("--max-results={}", options.max_results).into());
    }
    if options.max_matched_files > 0 {
        args.push(format!("--max-matched-files={}", options.max_matched_files).into());
    }
    args.push(options.pattern.clone().into());
    args.extend(targets.iter().map(|t| t.path.clone().into_os_string()));
    args
}

/// Parse newline-delimited records lazily, dropping blank and malformed lines.
fn parse_records(stdout: &str) -> impl Iterator<Item = Value> + '_ {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
}

/// Keep the records tagged `"match"`, in emission order.
pub(crate) fn collect_matches(stdout: &str) -> Vec<MatchRecord> {
    parse_records(stdout)
        .filter(|record| record.get("type").and_then(Value::as_str) == Some("match"))
        .map(MatchRecord)
        .collect()
}
