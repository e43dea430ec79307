use std::path::PathBuf;

use super::{cwd_join, home_join, ClientDescriptor};
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::sync_to_mcp_json;

fn global_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    home_join(env, &[".cursor", "mcp.json"])
}

fn local_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    Ok(cwd_join(env, &[".cursor", "mcp.json"]))
}

pub(super) fn descriptor() -> ClientDescriptor {
    ClientDescriptor {
        name: "cursor",
        display_name: "Cursor",
        global_path,
        local_path: Some(local_path),
        adapter: sync_to_mcp_json,
    }
}
