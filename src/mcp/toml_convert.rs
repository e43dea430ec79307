use std::collections::BTreeMap;
use toml_edit::{Array, InlineTable, Item, Table};

use crate::app_config::{ServerRecord, ServerTransport};

/// String map → inline table (`{ A = "1", B = "2" }`), keys in sorted order.
fn string_map_inline(map: &BTreeMap<String, String>) -> InlineTable {
    let mut inline = InlineTable::new();
    for (k, v) in map {
        inline.insert(k, v.as_str().into());
    }
    inline
}

/// Convert a server record into a Codex `[mcp_servers.<name>]` table.
///
/// - stdio: `command`, `args`, `env`
/// - http: `url`, `http_headers`
///
/// Empty args, env and headers produce no key at all.
pub fn server_to_toml_table(server: &ServerRecord) -> Table {
    let mut t = Table::new();

    match &server.transport {
        ServerTransport::Stdio { command, args, env } => {
            t["command"] = toml_edit::value(command.as_str());

            if !args.is_empty() {
                let mut arr = Array::default();
                for a in args {
                    arr.push(a.as_str());
                }
                t["args"] = Item::Value(toml_edit::Value::Array(arr));
            }

            if !env.is_empty() {
                t["env"] = Item::Value(toml_edit::Value::InlineTable(string_map_inline(env)));
            }
        }
        ServerTransport::Http { url, headers } => {
            t["url"] = toml_edit::value(url.as_str());

            if !headers.is_empty() {
                t["http_headers"] =
                    Item::Value(toml_edit::Value::InlineTable(string_map_inline(headers)));
            }
        }
    }

    t
}
