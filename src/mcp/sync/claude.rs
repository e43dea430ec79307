use serde_json::{json, Map, Value};
use std::path::Path;

use crate::app_config::ServerRecord;
use crate::error::AppError;

use super::super::helpers::{entries_by_name, standard_entry};
use super::settings::merge_settings_key;

/// Claude Code entry: the standard shape with a leading `type` discriminator.
pub fn claude_code_entry(server: &ServerRecord) -> Value {
    let mut entry = Map::new();
    entry.insert("type".into(), json!(server.kind().as_str()));
    if let Value::Object(rest) = standard_entry(server) {
        entry.extend(rest);
    }
    Value::Object(entry)
}

/// Project servers into `mcpServers` of `~/.claude.json` or a project `.mcp.json`.
///
/// `~/.claude.json` also holds Claude Code's own state, so only `mcpServers` is replaced.
pub fn sync_to_claude_code(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    merge_settings_key(path, "mcpServers", entries_by_name(servers, claude_code_entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn entries_are_typed() {
        let stdio = ServerRecord::stdio("fs", "npx", vec!["-y".into()], BTreeMap::new());
        assert_eq!(
            claude_code_entry(&stdio),
            json!({"type": "stdio", "command": "npx", "args": ["-y"]})
        );
        let http = ServerRecord::http("api", "https://x/mcp", BTreeMap::new());
        assert_eq!(
            claude_code_entry(&http),
            json!({"type": "http", "url": "https://x/mcp"})
        );
    }

    #[test]
    fn keeps_claude_state_and_drops_old_servers() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(".claude.json");
        fs::write(
            &path,
            r#"{"numStartups": 42, "projects": {"/w": {"allowedTools": []}}, "mcpServers": {"stale": {"command": "old"}}}"#,
        )
        .expect("seed");

        let servers = vec![ServerRecord::stdio("fs", "npx", vec![], BTreeMap::new())];
        sync_to_claude_code(&servers, &path).expect("sync");

        let v: Value = serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(v["numStartups"], json!(42));
        assert_eq!(v["projects"], json!({"/w": {"allowedTools": []}}));
        assert_eq!(v["mcpServers"], json!({"fs": {"type": "stdio", "command": "npx"}}));
    }
}
