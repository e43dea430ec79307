use std::fs;

use mcpr_lib::{AppError, McpService, ServerRecord};
use serde_json::{json, Value};

#[path = "support.rs"]
mod support;
use support::{api_server, fs_server, Sandbox};

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read output")).expect("parse output")
}

#[test]
fn stdio_server_merges_next_to_existing_settings() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    let settings = sandbox.home.join(".gemini").join("settings.json");
    sandbox.write(&settings, r#"{"theme":"dark"}"#);

    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");
    let report =
        McpService::sync_client(&state, &mut store, "gemini", None, false).expect("sync gemini");

    assert_eq!(report.path, settings);
    let text = fs::read_to_string(&settings).expect("read settings");
    let value: Value = serde_json::from_str(&text).expect("parse settings");
    assert_eq!(
        value,
        json!({
            "theme": "dark",
            "mcpServers": {"fs": {"command": "npx", "args": ["-y", "pkg", "/tmp"]}}
        })
    );
    let keys: Vec<&String> = value.as_object().expect("object").keys().collect();
    assert_eq!(keys, ["theme", "mcpServers"]);
}

#[test]
fn http_server_appends_codex_section_and_keeps_other_lines() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    let config = sandbox.home.join(".codex").join("config.toml");
    sandbox.write(&config, "model = \"gpt-4\"\n");

    McpService::add_server(&state, &mut store, api_server()).expect("add api");
    McpService::sync_client(&state, &mut store, "codex", None, false).expect("sync codex");

    let text = fs::read_to_string(&config).expect("read config.toml");
    assert!(text.starts_with("model = \"gpt-4\"\n"), "{text}");
    let parsed: toml::Table = toml::from_str(&text).expect("valid toml");
    assert_eq!(parsed["model"].as_str(), Some("gpt-4"));
    let api = parsed["mcp_servers"]["api"].as_table().expect("api section");
    assert_eq!(api["url"].as_str(), Some("https://x/mcp"));
    assert_eq!(
        api["http_headers"]["Authorization"].as_str(),
        Some("Bearer t")
    );
    assert!(api.get("type").is_none());
    assert!(text.find("model").expect("model") < text.find("[mcp_servers.api]").expect("section"));
}

#[test]
fn every_client_is_idempotent() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");
    McpService::add_server(&state, &mut store, api_server()).expect("add api");

    for client in McpService::list_clients(&state) {
        let first = McpService::sync_client(&state, &mut store, client.name, None, false)
            .unwrap_or_else(|e| panic!("first sync of {}: {e}", client.name));
        let before = fs::read(&first.path).expect("read first");
        McpService::sync_client(&state, &mut store, client.name, None, false)
            .unwrap_or_else(|e| panic!("second sync of {}: {e}", client.name));
        let after = fs::read(&first.path).expect("read second");
        assert_eq!(before, after, "{} output changed on resync", client.name);
    }
    assert_eq!(store.list_synced_clients().len(), 13);
}

#[test]
fn merge_clients_keep_foreign_keys() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");

    let cases = [
        ("claude-code", sandbox.home.join(".claude.json"), "mcpServers"),
        ("gemini", sandbox.home.join(".gemini/settings.json"), "mcpServers"),
        ("zed", sandbox.home.join(".config/zed/settings.json"), "context_servers"),
        ("opencode", sandbox.home.join(".config/opencode/opencode.json"), "mcp"),
        ("continue", sandbox.home.join(".continue/config.json"), "mcpServers"),
    ];
    for (client, path, key) in cases {
        let seed = json!({
            "theme": "dark",
            "nested": {"a": [1, 2, {"b": null}]},
            key: {"stale": {"command": "old"}}
        });
        sandbox.write(&path, &seed.to_string());

        McpService::sync_client(&state, &mut store, client, None, false)
            .unwrap_or_else(|e| panic!("sync {client}: {e}"));

        let out = read_json(&path);
        assert_eq!(out["theme"], seed["theme"], "{client}");
        assert_eq!(out["nested"], seed["nested"], "{client}");
        assert!(out[key].get("stale").is_none(), "{client} kept a stale entry");
    }
}

#[test]
fn synced_section_holds_exactly_the_input_servers() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    let path = sandbox.home.join(".claude.json");
    sandbox.write(
        &path,
        r#"{"mcpServers":{"old":{"command":"x"},"fs":{"command":"y"}},"projects":{}}"#,
    );

    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");
    McpService::add_server(&state, &mut store, api_server()).expect("add api");
    McpService::sync_client(&state, &mut store, "claude-code", None, false).expect("sync");

    let out = read_json(&path);
    let names: Vec<&String> = out["mcpServers"].as_object().expect("object").keys().collect();
    assert_eq!(names, ["fs", "api"]);
    assert_eq!(out["mcpServers"]["fs"]["command"], json!("npx"));
    assert_eq!(
        out["mcpServers"]["api"],
        json!({"type": "http", "url": "https://x/mcp", "headers": {"Authorization": "Bearer t"}})
    );
    assert_eq!(out["projects"], json!({}));
}

#[test]
fn codex_sections_are_replaced_wholesale() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    let config = sandbox.home.join(".codex").join("config.toml");
    sandbox.write(
        &config,
        "# my codex config\nmodel = \"o3\"\n\n[mcp_servers.old]\ncommand = \"old\"\n\n[profiles.fast]\nmodel = \"o4-mini\"\n",
    );

    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");
    McpService::sync_client(&state, &mut store, "codex", None, false).expect("sync");

    let text = fs::read_to_string(&config).expect("read");
    assert!(text.contains("# my codex config"));
    assert!(!text.contains("[mcp_servers.old]"));
    let parsed: toml::Table = toml::from_str(&text).expect("valid toml");
    assert_eq!(parsed["profiles"]["fast"]["model"].as_str(), Some("o4-mini"));
    let servers = parsed["mcp_servers"].as_table().expect("servers");
    assert_eq!(servers.keys().collect::<Vec<_>>(), ["fs"]);
    assert_eq!(
        servers["fs"]["args"].as_array().expect("args").len(),
        3
    );
}

#[test]
fn malformed_client_file_is_left_untouched() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    let path = sandbox.home.join(".claude.json");
    sandbox.write(&path, "{not json");

    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");
    let err = McpService::sync_client(&state, &mut store, "claude-code", None, false)
        .expect_err("parse failure");

    assert!(matches!(err, AppError::Client { ref client, .. } if client == "Claude Code"));
    assert_eq!(fs::read_to_string(&path).expect("read"), "{not json");
    assert!(store.list_synced_clients().is_empty());
}

#[test]
fn local_sync_targets_the_project_directory() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");

    let report =
        McpService::sync_client(&state, &mut store, "vscode", None, true).expect("sync vscode");
    assert_eq!(report.path, sandbox.cwd.join(".vscode").join("mcp.json"));
    let out = read_json(&report.path);
    assert_eq!(out["servers"]["fs"]["command"], json!("npx"));

    let err = McpService::sync_client(&state, &mut store, "claude-desktop", None, true)
        .expect_err("no local config");
    assert!(matches!(err, AppError::UnsupportedOperation(_)));
}

#[test]
fn explicit_subset_survives_resync() {
    let sandbox = Sandbox::new();
    let state = sandbox.state();
    let mut store = sandbox.global_store();
    McpService::add_server(&state, &mut store, fs_server()).expect("add fs");
    McpService::add_server(&state, &mut store, api_server()).expect("add api");
    McpService::sync_client(&state, &mut store, "cursor", Some(vec!["api".into()]), false)
        .expect("sync subset");

    let extra = ServerRecord::stdio("git", "uvx", vec!["mcp-server-git".into()], Default::default());
    let report = McpService::add_server(&state, &mut store, extra).expect("add git");
    assert!(report.is_success());

    let out = read_json(&sandbox.home.join(".cursor/mcp.json"));
    let names: Vec<&String> = out["mcpServers"].as_object().expect("object").keys().collect();
    assert_eq!(names, ["api"]);
}
