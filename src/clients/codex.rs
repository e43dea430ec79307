use std::path::PathBuf;

use super::ClientDescriptor;
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::sync_to_codex;

/// `$CODEX_HOME/config.toml`, falling back to `~/.codex/config.toml`
fn global_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    let codex_home = match &env.codex_home {
        Some(dir) => dir.clone(),
        None => env.home_dir()?.join(".codex"),
    };
    Ok(codex_home.join("config.toml"))
}

pub(super) fn descriptor() -> ClientDescriptor {
    ClientDescriptor {
        name: "codex",
        display_name: "Codex (OpenAI)",
        global_path,
        local_path: None,
        adapter: sync_to_codex,
    }
}
