use serde_json::{json, Map, Value};
use std::path::Path;

use crate::app_config::{ServerRecord, ServerTransport};
use crate::error::AppError;

use super::super::helpers::string_map_value;
use super::settings::merge_settings_key;

/// Continue entry: `{ name, transport: { type, ... } }`, with http servers spoken to over SSE.
pub fn continue_entry(server: &ServerRecord) -> Value {
    let mut transport = Map::new();
    match &server.transport {
        ServerTransport::Stdio { command, args, env } => {
            transport.insert("type".into(), json!("stdio"));
            transport.insert("command".into(), json!(command));
            if !args.is_empty() {
                transport.insert("args".into(), json!(args));
            }
            if !env.is_empty() {
                transport.insert("env".into(), string_map_value(env));
            }
        }
        ServerTransport::Http { url, headers } => {
            transport.insert("type".into(), json!("sse"));
            transport.insert("url".into(), json!(url));
            if !headers.is_empty() {
                transport.insert("headers".into(), string_map_value(headers));
            }
        }
    }
    json!({ "name": server.name, "transport": Value::Object(transport) })
}

/// Project servers into the `mcpServers` array of `~/.continue/config.json`
pub fn sync_to_continue(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    let entries: Vec<Value> = servers.iter().map(continue_entry).collect();
    merge_settings_key(path, "mcpServers", Value::Array(entries))
}
