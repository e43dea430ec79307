use std::path::PathBuf;

use super::{home_join, ClientDescriptor};
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::sync_to_continue;

fn global_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    home_join(env, &[".continue", "config.json"])
}

pub(super) fn descriptor() -> ClientDescriptor {
    ClientDescriptor {
        name: "continue",
        display_name: "Continue",
        global_path,
        local_path: None,
        adapter: sync_to_continue,
    }
}
