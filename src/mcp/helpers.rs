use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::app_config::{ServerRecord, ServerTransport};

/// String map as a JSON object; keys come out sorted.
pub fn string_map_value(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// The common `mcpServers` entry shape: `command`/`args`/`env` or `url`/`headers`.
///
/// Empty args, env and headers are left out entirely.
pub fn standard_entry(server: &ServerRecord) -> Value {
    let mut entry = Map::new();
    match &server.transport {
        ServerTransport::Stdio { command, args, env } => {
            entry.insert("command".into(), json!(command));
            if !args.is_empty() {
                entry.insert("args".into(), json!(args));
            }
            if !env.is_empty() {
                entry.insert("env".into(), string_map_value(env));
            }
        }
        ServerTransport::Http { url, headers } => {
            entry.insert("url".into(), json!(url));
            if !headers.is_empty() {
                entry.insert("headers".into(), string_map_value(headers));
            }
        }
    }
    Value::Object(entry)
}

/// Object keyed by server name, entries built by `entry`, in input order.
pub fn entries_by_name(servers: &[ServerRecord], entry: impl Fn(&ServerRecord) -> Value) -> Value {
    let mut out = Map::new();
    for server in servers {
        out.insert(server.name.clone(), entry(server));
    }
    Value::Object(out)
}
