// ============================================================================
// Client Registry - every supported MCP client and where its config lives
// ============================================================================

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::ServerRecord;
use crate::config::HostEnv;
use crate::error::AppError;
use crate::mcp::SyncFn;

mod claude;
mod codex;
mod continue_dev;
mod cursor;
mod gemini;
mod opencode;
mod vscode;
mod windsurf;
mod zed;

/// Produces a config file path from the host environment.
pub type PathResolver = fn(&HostEnv) -> Result<PathBuf, AppError>;

/// Static description of one client application.
#[derive(Debug, Clone, Copy)]
pub struct ClientDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub global_path: PathResolver,
    /// `None` when the client has no project-local config.
    pub local_path: Option<PathResolver>,
    pub adapter: SyncFn,
}

impl ClientDescriptor {
    pub fn supports_local(&self) -> bool {
        self.local_path.is_some()
    }

    /// Rejects project-local operations on clients that only have a global config.
    pub fn ensure_scope(&self, local: bool) -> Result<(), AppError> {
        if local && !self.supports_local() {
            return Err(AppError::UnsupportedOperation(format!(
                "{} does not support local config",
                self.display_name
            )));
        }
        Ok(())
    }

    pub fn resolve_path(&self, env: &HostEnv, local: bool) -> Result<PathBuf, AppError> {
        self.ensure_scope(local)?;
        match self.local_path.filter(|_| local) {
            Some(resolve) => resolve(env),
            None => (self.global_path)(env),
        }
    }

    /// Resolve the target path and run the adapter; returns the path written.
    ///
    /// Adapter failures are prefixed with the display name.
    pub fn sync(
        &self,
        servers: &[ServerRecord],
        env: &HostEnv,
        local: bool,
    ) -> Result<PathBuf, AppError> {
        let path = self.resolve_path(env, local)?;
        self.write(servers, &path)?;
        Ok(path)
    }

    fn write(&self, servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
        (self.adapter)(servers, path).map_err(|e| AppError::client(self.display_name, e))
    }
}

/// Every built-in client, in the order they are registered.
pub fn builtin_clients() -> Vec<ClientDescriptor> {
    vec![
        claude::desktop(),
        claude::code(),
        cursor::descriptor(),
        windsurf::descriptor(),
        zed::descriptor(),
        opencode::descriptor(),
        vscode::cline(),
        vscode::descriptor(),
        continue_dev::descriptor(),
        codex::descriptor(),
        gemini::descriptor(),
        vscode::kilo_code(),
        vscode::zencoder(),
    ]
}

/// Name-keyed table of client descriptors.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: IndexMap<&'static str, ClientDescriptor>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in builtin_clients() {
            registry.register(descriptor);
        }
        registry
    }

    /// Insert a descriptor; a later registration under the same name wins.
    pub fn register(&mut self, descriptor: ClientDescriptor) {
        if self.clients.insert(descriptor.name, descriptor).is_some() {
            log::debug!("client '{}' registered twice, keeping the last", descriptor.name);
        }
    }

    pub fn get(&self, name: &str) -> Result<&ClientDescriptor, AppError> {
        self.clients
            .get(name)
            .ok_or_else(|| AppError::client_not_found(name, &self.names()))
    }

    /// Every descriptor, sorted by name.
    pub fn list(&self) -> Vec<&ClientDescriptor> {
        let mut clients: Vec<_> = self.clients.values().collect();
        clients.sort_unstable_by_key(|c| c.name);
        clients
    }

    /// Sorted client names.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.clients.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

static REGISTRY: Lazy<Arc<ClientRegistry>> = Lazy::new(|| Arc::new(ClientRegistry::builtin()));

/// Process-wide built-in registry; assembled on first use and never mutated afterwards.
pub fn shared_registry() -> Arc<ClientRegistry> {
    Arc::clone(&REGISTRY)
}

fn cwd_join(env: &HostEnv, parts: &[&str]) -> PathBuf {
    parts.iter().fold(env.cwd.clone(), |p, part| p.join(part))
}

fn home_join(env: &HostEnv, parts: &[&str]) -> Result<PathBuf, AppError> {
    Ok(parts
        .iter()
        .fold(env.home_dir()?.to_path_buf(), |p, part| p.join(part)))
}

fn app_support_join(env: &HostEnv, parts: &[&str]) -> Result<PathBuf, AppError> {
    Ok(parts
        .iter()
        .fold(env.app_support_dir()?, |p, part| p.join(part)))
}
