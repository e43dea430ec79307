use std::path::PathBuf;

use super::{app_support_join, cwd_join, ClientDescriptor};
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::sync_to_mcp_json;

fn global_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    app_support_join(
        env,
        &["Windsurf", "User", "globalStorage", "windsurf.mcp", "mcp.json"],
    )
}

fn local_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    Ok(cwd_join(env, &[".windsurf", "mcp.json"]))
}

pub(super) fn descriptor() -> ClientDescriptor {
    ClientDescriptor {
        name: "windsurf",
        display_name: "Windsurf",
        global_path,
        local_path: Some(local_path),
        adapter: sync_to_mcp_json,
    }
}
