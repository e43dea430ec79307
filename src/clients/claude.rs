use std::path::PathBuf;

use super::{app_support_join, cwd_join, home_join, ClientDescriptor};
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::{sync_to_claude_code, sync_to_mcp_json};

/// Claude Desktop config (`<app support>/Claude/claude_desktop_config.json`)
fn desktop_config_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    app_support_join(env, &["Claude", "claude_desktop_config.json"])
}

/// Claude Code user config (`~/.claude.json`)
fn code_config_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    home_join(env, &[".claude.json"])
}

/// Claude Code project config (`./.mcp.json`)
fn code_local_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    Ok(cwd_join(env, &[".mcp.json"]))
}

pub(super) fn desktop() -> ClientDescriptor {
    ClientDescriptor {
        name: "claude-desktop",
        display_name: "Claude Desktop",
        global_path: desktop_config_path,
        local_path: None,
        adapter: sync_to_mcp_json,
    }
}

pub(super) fn code() -> ClientDescriptor {
    ClientDescriptor {
        name: "claude-code",
        display_name: "Claude Code",
        global_path: code_config_path,
        local_path: Some(code_local_path),
        adapter: sync_to_claude_code,
    }
}
