use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{kind} '{name}' not found{hint}")]
    NotFound {
        kind: &'static str,
        name: String,
        hint: String,
    },
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },
    #[error("{0}")]
    UnsupportedOperation(String),
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine the home directory")]
    HomeDirUnavailable,
    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),
    #[error("no servers configured. Add a server first")]
    EmptyInput,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to sync to {client}: {source}")]
    Client {
        client: String,
        #[source]
        source: Box<AppError>,
    },
    #[error("synced {succeeded}/{total} client(s); failures: {}", .errors.join("; "))]
    ResyncFailed {
        succeeded: usize,
        total: usize,
        errors: Vec<String>,
    },
}

impl AppError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.as_ref().display().to_string(),
            message: source.to_string(),
        }
    }

    pub fn toml(path: impl AsRef<Path>, source: toml_edit::TomlError) -> Self {
        Self::Parse {
            path: path.as_ref().display().to_string(),
            message: source.to_string(),
        }
    }

    pub fn server_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "server",
            name: name.into(),
            hint: String::new(),
        }
    }

    /// Unknown client; the message lists every client that is registered.
    pub fn client_not_found(name: impl Into<String>, known: &[&str]) -> Self {
        Self::NotFound {
            kind: "client",
            name: name.into(),
            hint: format!(". Supported clients: {}", known.join(", ")),
        }
    }

    pub fn synced_client_not_found(name: &str, local: bool) -> Self {
        let hint = if local { " (local)" } else { "" };
        Self::NotFound {
            kind: "synced client",
            name: name.to_string(),
            hint: format!("{hint} in the sync list"),
        }
    }

    pub fn client(display_name: &str, source: AppError) -> Self {
        Self::Client {
            client: display_name.to_string(),
            source: Box::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
