use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{
    find_config_in_parents, get_app_config_path, read_text_file_opt, write_json_file, HostEnv,
    LOCAL_CONFIG_FILE_NAME,
};
use crate::error::AppError;
use crate::mcp::validate_server_record;

/// Transport-specific half of a server definition.
///
/// Tagged by `type` in the stored document, so a record can never carry both
/// stdio and http fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerTransport {
    Stdio {
        command: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        env: BTreeMap<String, String>,
    },
    Http {
        url: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerKind {
    Stdio,
    Http,
}

impl ServerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerKind::Stdio => "stdio",
            ServerKind::Http => "http",
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named MCP server definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub name: String,
    #[serde(flatten)]
    pub transport: ServerTransport,
}

impl ServerRecord {
    pub fn stdio(
        name: impl Into<String>,
        command: impl Into<String>,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            transport: ServerTransport::Stdio {
                command: command.into(),
                args,
                env,
            },
        }
    }

    pub fn http(
        name: impl Into<String>,
        url: impl Into<String>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            transport: ServerTransport::Http {
                url: url.into(),
                headers,
            },
        }
    }

    pub fn kind(&self) -> ServerKind {
        match self.transport {
            ServerTransport::Stdio { .. } => ServerKind::Stdio,
            ServerTransport::Http { .. } => ServerKind::Http,
        }
    }
}

/// Default name for a stdio server: the basename of its command.
pub fn derive_stdio_name(command: &str) -> String {
    let trimmed = command.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(command)
        .to_string()
}

/// Default name for an http server: the URL host without port.
pub fn derive_http_name(raw: &str) -> String {
    if let Ok(parsed) = url::Url::parse(raw) {
        if let Some(host) = parsed.host_str() {
            return host.to_string();
        }
    }
    let rest = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let host = rest.split('/').next().unwrap_or(rest);
    host.split(':').next().unwrap_or(host).to_string()
}

/// Parse `KEY=VALUE` pairs; the first `=` splits, entries without one are skipped.
pub fn parse_key_value_pairs<I, S>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .filter_map(|pair| {
            let (k, v) = pair.as_ref().split_once('=')?;
            Some((k.to_string(), v.to_string()))
        })
        .collect()
}

/// Bookkeeping for a sync that happened, replayed by "resync all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedClientRecord {
    pub name: String,
    pub local: bool,
    /// Explicit server subset; `None` means every server at resync time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<String>>,
}

impl SyncedClientRecord {
    /// The restricted subset, treating an empty list the same as unset.
    pub fn restricted_servers(&self) -> Option<&[String]> {
        self.servers.as_deref().filter(|s| !s.is_empty())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The canonical server list plus synced-client bookkeeping, bound to the file it lives in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(default, deserialize_with = "null_as_empty")]
    servers: Vec<ServerRecord>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    synced_clients: Vec<SyncedClientRecord>,
    #[serde(skip)]
    path: PathBuf,
}

impl ConfigStore {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Nearest `mcpr.json` up the directory tree, else the global store path.
    pub fn resolve_read_path(env: &HostEnv) -> Result<PathBuf, AppError> {
        if let Some(local) = find_config_in_parents(&env.cwd) {
            log::debug!("using project config {}", local.display());
            return Ok(local);
        }
        get_app_config_path(env)
    }

    /// Where a mutation should be persisted.
    ///
    /// With `prefer_local` and no existing project file, the file is created in the
    /// working directory rather than searched for further up.
    pub fn resolve_write_path(env: &HostEnv, prefer_local: bool) -> Result<PathBuf, AppError> {
        if !prefer_local {
            return get_app_config_path(env);
        }
        Ok(find_config_in_parents(&env.cwd).unwrap_or_else(|| env.cwd.join(LOCAL_CONFIG_FILE_NAME)))
    }

    /// Load from `path`; a missing file yields an empty store bound to it.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let Some(content) = read_text_file_opt(&path)? else {
            log::debug!("no config at {}, starting empty", path.display());
            return Ok(Self::empty(path));
        };
        let mut store: ConfigStore =
            serde_json::from_str(&content).map_err(|e| AppError::json(&path, e))?;
        store.path = path;
        Ok(store)
    }

    /// Load the store the read path resolves to.
    pub fn load_default(env: &HostEnv) -> Result<Self, AppError> {
        Self::load(Self::resolve_read_path(env)?)
    }

    /// Load the store a mutation should go to.
    pub fn load_for_write(env: &HostEnv, prefer_local: bool) -> Result<Self, AppError> {
        Self::load(Self::resolve_write_path(env, prefer_local)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn save(&self) -> Result<(), AppError> {
        write_json_file(&self.path, self)?;
        log::debug!("saved config to {}", self.path.display());
        Ok(())
    }

    pub fn add_server(&mut self, record: ServerRecord) -> Result<(), AppError> {
        if self.servers.iter().any(|s| s.name == record.name) {
            return Err(AppError::AlreadyExists {
                kind: "server",
                name: record.name,
            });
        }
        validate_server_record(&record)?;
        self.servers.push(record);
        Ok(())
    }

    pub fn remove_server(&mut self, name: &str) -> Result<ServerRecord, AppError> {
        let idx = self
            .servers
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| AppError::server_not_found(name))?;
        Ok(self.servers.remove(idx))
    }

    pub fn get_server(&self, name: &str) -> Result<&ServerRecord, AppError> {
        self.servers
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AppError::server_not_found(name))
    }

    pub fn list_servers(&self) -> &[ServerRecord] {
        &self.servers
    }

    pub fn add_or_update_synced_client(
        &mut self,
        name: &str,
        local: bool,
        servers: Option<Vec<String>>,
    ) {
        if let Some(existing) = self
            .synced_clients
            .iter_mut()
            .find(|sc| sc.name == name && sc.local == local)
        {
            existing.servers = servers;
            return;
        }
        self.synced_clients.push(SyncedClientRecord {
            name: name.to_string(),
            local,
            servers,
        });
    }

    /// Returns whether a record was removed; an absent key is not an error.
    pub fn remove_synced_client(&mut self, name: &str, local: bool) -> bool {
        let before = self.synced_clients.len();
        self.synced_clients
            .retain(|sc| !(sc.name == name && sc.local == local));
        before != self.synced_clients.len()
    }

    pub fn get_synced_client(&self, name: &str, local: bool) -> Option<&SyncedClientRecord> {
        self.synced_clients
            .iter()
            .find(|sc| sc.name == name && sc.local == local)
    }

    pub fn list_synced_clients(&self) -> &[SyncedClientRecord] {
        &self.synced_clients
    }
}
