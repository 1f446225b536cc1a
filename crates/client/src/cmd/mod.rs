//! Command-line interface for driving a rootgrep server.

use crate::{
    client::{Target, connect},
    error::Error,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

pub mod call;

/// Drive a rootgrep server, granting workspace roots from the command line.
#[derive(Parser, Debug)]
#[command(name = "rootgrep-client", version, about)]
pub struct App {
    /// Target MCP server: a URL (http/https) for remote servers,
    /// or a command for stdio servers.
    ///
    /// Use `--` before commands with flags:
    ///   rootgrep-client --root . -- rootgrep --engine rg search 'fn main'
    #[arg(required = true, num_args = 1..)]
    pub target: Vec<String>,

    /// Bearer token for authenticating with remote servers.
    #[arg(long = "auth", value_name = "TOKEN")]
    pub auth: Option<String>,

    /// Directory to grant as a workspace root. Repeatable.
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tools exposed by the server.
    Tool,
    /// Search file contents within the granted roots.
    Search {
        /// Regular expression to search for.
        pattern: String,

        /// Search this file or directory instead of the granted roots.
        #[arg(long)]
        path: Option<String>,

        /// Search only the granted root with this name.
        #[arg(long = "root-name", value_name = "NAME")]
        root_name: Option<String>,

        /// Match case exactly instead of searching case-insensitively.
        #[arg(long)]
        case_sensitive: bool,

        /// Lines of context to include around each match.
        #[arg(long, value_name = "N", default_value_t = 0)]
        context: u32,

        /// Maximum number of matches to report.
        #[arg(long, value_name = "N", default_value_t = 1000)]
        max_results: u32,

        /// Maximum number of files with matches.
        #[arg(long, value_name = "N", default_value_t = 100)]
        max_matched_files: u32,
    },
    /// Ask the server to re-read the granted roots.
    Refresh,
    /// Call a tool with arguments.
    Call {
        /// Name of the tool to call.
        name: String,

        /// Tool arguments as JSON key=value pairs (e.g. key1=value1 key2=value2).
        /// Values are parsed as JSON; plain strings are treated as JSON strings.
        #[arg(value_name = "KEY=VALUE")]
        args: Vec<String>,
    },
}

impl App {
    /// Parse CLI arguments and execute the corresponding command.
    pub async fn run() -> Result<(), Error> {
        let app = App::parse();
        let target = Target::parse(app.target, app.auth);
        let service = connect(target, app.roots).await?;

        match app.command {
            Command::Tool => {
                let tools = service.peer().list_all_tools().await?;
                println!("{}", serde_json::to_string_pretty(&tools)?);
            }
            Command::Search {
                pattern,
                path,
                root_name,
                case_sensitive,
                context,
                max_results,
                max_matched_files,
            } => {
                let mut args = serde_json::Map::new();
                args.insert("pattern".into(), json!(pattern));
                if let Some(path) = path {
                    args.insert("path".into(), json!(path));
                }
                if let Some(name) = root_name {
                    args.insert("rootName".into(), json!(name));
                }
                args.insert("caseSensitive".into(), json!(case_sensitive));
                args.insert("contextLines".into(), json!(context));
                args.insert("maxResults".into(), json!(max_results));
                args.insert("maxMatchedFiles".into(), json!(max_matched_files));

                let result = call::call_tool(&service, "search".into(), Some(args)).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Command::Refresh => {
                let result = call::call_tool(&service, "refresh_roots".into(), None).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Command::Call { name, args } => {
                let result = call::call(&service, name, args).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }

        service.cancel().await.ok();
        Ok(())
    }
}
