use serde_json::{json, Map, Value};
use std::path::Path;

use crate::app_config::{ServerRecord, ServerTransport};
use crate::error::AppError;

use super::super::helpers::{entries_by_name, string_map_value};
use super::settings::merge_settings_key;

/// Zed `context_servers` entry.
///
/// stdio servers nest under `command: { path, args, env }`; every entry carries an
/// empty `settings` object.
pub fn zed_entry(server: &ServerRecord) -> Value {
    let mut entry = Map::new();
    match &server.transport {
        ServerTransport::Stdio { command, args, env } => {
            let mut cmd = Map::new();
            cmd.insert("path".into(), json!(command));
            if !args.is_empty() {
                cmd.insert("args".into(), json!(args));
            }
            if !env.is_empty() {
                cmd.insert("env".into(), string_map_value(env));
            }
            entry.insert("command".into(), Value::Object(cmd));
        }
        ServerTransport::Http { url, headers } => {
            entry.insert("url".into(), json!(url));
            if !headers.is_empty() {
                entry.insert("headers".into(), string_map_value(headers));
            }
        }
    }
    entry.insert("settings".into(), json!({}));
    Value::Object(entry)
}

/// Project servers into `context_servers` of Zed's `settings.json`
pub fn sync_to_zed(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    merge_settings_key(path, "context_servers", entries_by_name(servers, zed_entry))
}
