//! VS Code itself plus the extensions that keep their MCP file in VS Code's global storage.

use std::path::PathBuf;

use super::{app_support_join, cwd_join, ClientDescriptor};
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::{sync_to_mcp_json, sync_to_vscode};

/// `<app support>/Code/User/<parts...>`
fn code_user_join(env: &HostEnv, parts: &[&str]) -> Result<PathBuf, AppError> {
    let mut full = vec!["Code", "User"];
    full.extend_from_slice(parts);
    app_support_join(env, &full)
}

fn vscode_global_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    code_user_join(env, &["mcp.json"])
}

fn vscode_local_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    Ok(cwd_join(env, &[".vscode", "mcp.json"]))
}

fn cline_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    code_user_join(
        env,
        &[
            "globalStorage",
            "saoudrizwan.claude-dev",
            "settings",
            "cline_mcp_settings.json",
        ],
    )
}

fn kilo_code_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    code_user_join(
        env,
        &[
            "globalStorage",
            "kilocode.kilo-code",
            "settings",
            "mcp_settings.json",
        ],
    )
}

fn kilo_code_local_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    Ok(cwd_join(env, &[".kilocode", "mcp.json"]))
}

fn zencoder_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    code_user_join(
        env,
        &["globalStorage", "zencoderAI.zencoder", "mcp_settings.json"],
    )
}

pub(super) fn descriptor() -> ClientDescriptor {
    ClientDescriptor {
        name: "vscode",
        display_name: "VS Code (Copilot)",
        global_path: vscode_global_path,
        local_path: Some(vscode_local_path),
        adapter: sync_to_vscode,
    }
}

pub(super) fn cline() -> ClientDescriptor {
    ClientDescriptor {
        name: "cline",
        display_name: "Cline",
        global_path: cline_path,
        local_path: None,
        adapter: sync_to_mcp_json,
    }
}

pub(super) fn kilo_code() -> ClientDescriptor {
    ClientDescriptor {
        name: "kilo-code",
        display_name: "Kilo Code",
        global_path: kilo_code_path,
        local_path: Some(kilo_code_local_path),
        adapter: sync_to_mcp_json,
    }
}

pub(super) fn zencoder() -> ClientDescriptor {
    ClientDescriptor {
        name: "zencoder",
        display_name: "ZenCoder",
        global_path: zencoder_path,
        local_path: None,
        adapter: sync_to_mcp_json,
    }
}
