use std::path::PathBuf;

use super::{home_join, ClientDescriptor};
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::sync_to_zed;

/// Zed reads `~/.config/zed/settings.json` on every platform
fn global_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    home_join(env, &[".config", "zed", "settings.json"])
}

pub(super) fn descriptor() -> ClientDescriptor {
    ClientDescriptor {
        name: "zed",
        display_name: "Zed",
        global_path,
        local_path: None,
        adapter: sync_to_zed,
    }
}
