//! Command line client for the rootgrep MCP server.
//!
//! Doubles as the roots authority: directories passed via `--root` are
//! served to the connected server as `file://` workspace roots.

pub mod client;
pub mod cmd;
pub mod error;
