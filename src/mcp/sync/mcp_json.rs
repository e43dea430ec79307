use serde_json::{Map, Value};
use std::path::Path;

use crate::app_config::ServerRecord;
use crate::config::write_json_file;
use crate::error::AppError;

use super::super::helpers::{entries_by_name, standard_entry};

/// Write a dedicated MCP-only file: `{ <root_key>: { name: entry } }`.
///
/// Whatever the file held before is discarded.
pub fn write_full_replace(
    servers: &[ServerRecord],
    path: &Path,
    root_key: &str,
) -> Result<(), AppError> {
    let mut root = Map::new();
    root.insert(root_key.to_string(), entries_by_name(servers, standard_entry));
    write_json_file(path, &Value::Object(root))
}

/// `{"mcpServers": {...}}` files (Claude Desktop, Cursor, Windsurf, Cline, ...)
pub fn sync_to_mcp_json(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    write_full_replace(servers, path, "mcpServers")
}

/// VS Code `mcp.json`, which keys its servers under `servers`
pub fn sync_to_vscode(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    write_full_replace(servers, path, "servers")
}
