#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mcpr_lib::{AppState, ConfigStore, HostEnv, HostOs, ServerRecord};
use tempfile::TempDir;

/// Isolated home and project directories; removed on drop.
pub struct Sandbox {
    _root: TempDir,
    pub home: PathBuf,
    pub cwd: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create sandbox");
        let home = root.path().join("home");
        let cwd = root.path().join("work").join("proj");
        std::fs::create_dir_all(&home).expect("create sandbox home");
        std::fs::create_dir_all(&cwd).expect("create sandbox cwd");
        Self {
            _root: root,
            home,
            cwd,
        }
    }

    /// Linux path rules regardless of the host running the tests.
    pub fn env(&self) -> HostEnv {
        let mut env = HostEnv::with_dirs(&self.home, &self.cwd);
        env.os = HostOs::Linux;
        env
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.env())
    }

    pub fn global_store(&self) -> ConfigStore {
        ConfigStore::load_for_write(&self.env(), false).expect("load global store")
    }

    pub fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("seed file");
    }
}

pub fn fs_server() -> ServerRecord {
    ServerRecord::stdio(
        "fs",
        "npx",
        vec!["-y".into(), "pkg".into(), "/tmp".into()],
        BTreeMap::new(),
    )
}

pub fn api_server() -> ServerRecord {
    let mut headers = BTreeMap::new();
    headers.insert("Authorization".to_string(), "Bearer t".to_string());
    ServerRecord::http("api", "https://x/mcp", headers)
}
