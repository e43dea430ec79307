use serde_json::{json, Map, Value};
use std::path::Path;

use crate::app_config::{ServerRecord, ServerTransport};
use crate::error::AppError;

use super::super::helpers::{entries_by_name, string_map_value};
use super::settings::merge_settings_key;

/// OpenCode entry.
///
/// - stdio → `type: "local"`, `command` is one array (command then args), env lives in `environment`
/// - http → `type: "remote"`, `url`, `headers`
pub fn opencode_entry(server: &ServerRecord) -> Value {
    let mut entry = Map::new();
    match &server.transport {
        ServerTransport::Stdio { command, args, env } => {
            let mut argv = Vec::with_capacity(args.len() + 1);
            argv.push(command.clone());
            argv.extend(args.iter().cloned());
            entry.insert("type".into(), json!("local"));
            entry.insert("command".into(), json!(argv));
            if !env.is_empty() {
                entry.insert("environment".into(), string_map_value(env));
            }
        }
        ServerTransport::Http { url, headers } => {
            entry.insert("type".into(), json!("remote"));
            entry.insert("url".into(), json!(url));
            if !headers.is_empty() {
                entry.insert("headers".into(), string_map_value(headers));
            }
        }
    }
    Value::Object(entry)
}

/// Project servers into the `mcp` key of `opencode.json`
pub fn sync_to_opencode(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    merge_settings_key(path, "mcp", entries_by_name(servers, opencode_entry))
}
