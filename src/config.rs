use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Project-local store file, searched for in the working directory and its ancestors.
pub const LOCAL_CONFIG_FILE_NAME: &str = "mcpr.json";

/// Host operating system, as far as path rules care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Windows,
    Linux,
    Other(String),
}

impl HostOs {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => HostOs::MacOs,
            "windows" => HostOs::Windows,
            "linux" => HostOs::Linux,
            other => HostOs::Other(other.to_string()),
        }
    }
}

/// Snapshot of every environment input the path rules consume.
///
/// Captured once per invocation so that resolvers stay pure functions of it.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
    pub os: HostOs,
    /// `APPDATA`, only consulted on Windows.
    pub app_data: Option<PathBuf>,
    /// `CODEX_HOME`, overrides `~/.codex`.
    pub codex_home: Option<PathBuf>,
    /// `MCPR_CONFIG_DIR`, overrides `~/.config/mcpr`.
    pub config_dir_override: Option<PathBuf>,
}

impl HostEnv {
    pub fn detect() -> Result<Self, AppError> {
        let cwd = std::env::current_dir().map_err(|e| AppError::IoContext {
            context: "failed to read the current directory".to_string(),
            source: e,
        })?;
        Ok(Self {
            home: dirs::home_dir(),
            cwd,
            os: HostOs::current(),
            app_data: env_path("APPDATA"),
            codex_home: env_path("CODEX_HOME"),
            config_dir_override: env_path("MCPR_CONFIG_DIR"),
        })
    }

    /// Environment rooted at explicit directories, with no overrides set.
    pub fn with_dirs(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
            cwd: cwd.into(),
            os: HostOs::current(),
            app_data: None,
            codex_home: None,
            config_dir_override: None,
        }
    }

    pub fn home_dir(&self) -> Result<&Path, AppError> {
        self.home.as_deref().ok_or(AppError::HomeDirUnavailable)
    }

    /// Per-user application data root used by desktop editors.
    pub fn app_support_dir(&self) -> Result<PathBuf, AppError> {
        let home = self.home_dir()?;
        match &self.os {
            HostOs::MacOs => Ok(home.join("Library").join("Application Support")),
            HostOs::Windows => Ok(self
                .app_data
                .clone()
                .unwrap_or_else(|| home.join("AppData").join("Roaming"))),
            HostOs::Linux => Ok(home.join(".config")),
            HostOs::Other(name) => Err(AppError::UnsupportedPlatform(name.clone())),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
}

/// Global store directory (`~/.config/mcpr` unless overridden)
pub fn get_app_config_dir(env: &HostEnv) -> Result<PathBuf, AppError> {
    if let Some(custom) = &env.config_dir_override {
        return Ok(custom.clone());
    }
    Ok(env.home_dir()?.join(".config").join("mcpr"))
}

/// Global store file path
pub fn get_app_config_path(env: &HostEnv) -> Result<PathBuf, AppError> {
    Ok(get_app_config_dir(env)?.join("config.json"))
}

/// Nearest `mcpr.json` in `start` or any of its ancestors.
pub fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Read a text file, treating a missing file as `None`.
pub fn read_text_file_opt(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::io(path, e)),
    }
}

/// Write pretty-printed JSON, creating parent directories as needed.
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), AppError> {
    let json =
        serde_json::to_string_pretty(data).map_err(|e| AppError::JsonSerialize { source: e })?;
    atomic_write(path, json.as_bytes())
}

pub fn write_text_file(path: &Path, data: &str) -> Result<(), AppError> {
    atomic_write(path, data.as_bytes())
}

/// Write to a sibling temp file, then rename over the target so readers never see a half-written file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AppError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| AppError::io(&parent, e))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::InvalidInput(format!("not a file path: {}", path.display())))?
        .to_string_lossy()
        .to_string();
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp = parent.join(format!(".{file_name}.tmp.{ts}"));

    let result = replace_with_temp(path, &tmp, data);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn replace_with_temp(path: &Path, tmp: &Path, data: &[u8]) -> Result<(), AppError> {
    write_and_sync(tmp, data).map_err(|e| AppError::io(tmp, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = fs::metadata(path) {
            let perm = meta.permissions().mode();
            let _ = fs::set_permissions(tmp, fs::Permissions::from_mode(perm));
        }
    }

    // rename onto an existing file fails on Windows
    #[cfg(windows)]
    {
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }

    fs::rename(tmp, path).map_err(|e| AppError::IoContext {
        context: format!("failed to replace {} with {}", path.display(), tmp.display()),
        source: e,
    })
}

fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(data)?;
    f.sync_all()
}
