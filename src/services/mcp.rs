use std::path::PathBuf;

use crate::app_config::{ConfigStore, ServerRecord, SyncedClientRecord};
use crate::clients::ClientDescriptor;
use crate::error::AppError;
use crate::store::AppState;

/// Result of projecting servers into one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub client: String,
    pub display_name: String,
    pub local: bool,
    pub path: PathBuf,
    pub servers: Vec<String>,
}

#[derive(Debug)]
pub struct ResyncFailure {
    pub client: String,
    pub local: bool,
    pub error: AppError,
}

impl ResyncFailure {
    fn describe(&self) -> String {
        let scope = if self.local { " (local)" } else { "" };
        format!("{}{scope}: {}", self.client, self.error)
    }
}

/// Outcome of replaying every synced-client record.
#[derive(Debug, Default)]
pub struct ResyncReport {
    pub succeeded: Vec<SyncReport>,
    pub failed: Vec<ResyncFailure>,
}

impl ResyncReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Collapse failures into one `ResyncFailed` error; successful writes stay applied.
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(AppError::ResyncFailed {
            succeeded: self.succeeded.len(),
            total: self.total(),
            errors: self.failed.iter().map(ResyncFailure::describe).collect(),
        })
    }
}

#[derive(Debug)]
pub enum SyncOutcome {
    Client(SyncReport),
    All(ResyncReport),
}

pub struct McpService;

impl McpService {
    /// Add a server, persist the store, then refresh every synced client.
    pub fn add_server(
        state: &AppState,
        store: &mut ConfigStore,
        record: ServerRecord,
    ) -> Result<ResyncReport, AppError> {
        let name = record.name.clone();
        let kind = record.kind();
        store.add_server(record)?;
        store.save()?;
        log::info!("added {kind} server '{name}' to {}", store.path().display());
        Ok(Self::resync_all(state, store))
    }

    /// Remove a server, persist the store, then refresh every synced client.
    pub fn remove_server(
        state: &AppState,
        store: &mut ConfigStore,
        name: &str,
    ) -> Result<ResyncReport, AppError> {
        store.remove_server(name)?;
        store.save()?;
        log::info!("removed server '{name}' from {}", store.path().display());
        Ok(Self::resync_all(state, store))
    }

    pub fn get_server<'a>(store: &'a ConfigStore, name: &str) -> Result<&'a ServerRecord, AppError> {
        store.get_server(name)
    }

    pub fn list_servers(store: &ConfigStore) -> &[ServerRecord] {
        store.list_servers()
    }

    pub fn list_clients(state: &AppState) -> Vec<&ClientDescriptor> {
        state.registry.list()
    }

    pub fn get_client<'a>(state: &'a AppState, name: &str) -> Result<&'a ClientDescriptor, AppError> {
        state.registry.get(name)
    }

    /// Sync one client, or replay every recorded sync when `client` is `None`.
    pub fn sync(
        state: &AppState,
        store: &mut ConfigStore,
        client: Option<&str>,
        servers: Option<Vec<String>>,
        local: bool,
    ) -> Result<SyncOutcome, AppError> {
        match client {
            Some(name) => Self::sync_client(state, store, name, servers, local).map(SyncOutcome::Client),
            None => Self::resync_all(state, store).into_result().map(SyncOutcome::All),
        }
    }

    /// Project servers into one client and remember the sync for later replays.
    ///
    /// `servers: None` syncs every stored server, now and on every resync.
    pub fn sync_client(
        state: &AppState,
        store: &mut ConfigStore,
        client_name: &str,
        servers: Option<Vec<String>>,
        local: bool,
    ) -> Result<SyncReport, AppError> {
        let client = state.registry.get(client_name)?;
        let selected = resolve_servers(store, servers.as_deref())?;
        let report = write_client(state, client, &selected, local)?;

        store.add_or_update_synced_client(client_name, local, servers);
        store.save()?;
        Ok(report)
    }

    /// Replay every synced-client record.
    ///
    /// A failing record is logged and collected; the rest of the batch still runs.
    pub fn resync_all(state: &AppState, store: &ConfigStore) -> ResyncReport {
        let mut report = ResyncReport::default();
        let records = store.list_synced_clients();
        if records.is_empty() {
            log::debug!("no synced clients to refresh");
            return report;
        }

        for record in records {
            match resync_record(state, store, record) {
                Ok(done) => report.succeeded.push(done),
                Err(error) => {
                    log::warn!("resync of '{}' failed: {error}", record.name);
                    report.failed.push(ResyncFailure {
                        client: record.name.clone(),
                        local: record.local,
                        error,
                    });
                }
            }
        }

        log::info!(
            "synced {}/{} client(s)",
            report.succeeded.len(),
            report.total()
        );
        report
    }

    /// Forget a synced client. The client's own file is left as it is.
    ///
    /// A local removal on a client without local config is rejected before the lookup.
    pub fn remove_synced_client(
        state: &AppState,
        store: &mut ConfigStore,
        client_name: &str,
        local: bool,
    ) -> Result<(), AppError> {
        state.registry.get(client_name)?.ensure_scope(local)?;
        if !store.remove_synced_client(client_name, local) {
            return Err(AppError::synced_client_not_found(client_name, local));
        }
        store.save()?;
        log::info!("removed '{client_name}' from the sync list");
        Ok(())
    }
}

/// Explicit names in the given order, or every stored server.
fn resolve_servers(
    store: &ConfigStore,
    names: Option<&[String]>,
) -> Result<Vec<ServerRecord>, AppError> {
    let selected: Vec<ServerRecord> = match names.filter(|n| !n.is_empty()) {
        Some(names) => names
            .iter()
            .map(|name| store.get_server(name).cloned())
            .collect::<Result<_, _>>()?,
        None => store.list_servers().to_vec(),
    };
    if selected.is_empty() {
        return Err(AppError::EmptyInput);
    }
    Ok(selected)
}

fn write_client(
    state: &AppState,
    client: &ClientDescriptor,
    servers: &[ServerRecord],
    local: bool,
) -> Result<SyncReport, AppError> {
    let path = client.sync(servers, &state.env, local)?;
    log::info!(
        "synced {} server(s) to {} at {}",
        servers.len(),
        client.display_name,
        path.display()
    );
    Ok(SyncReport {
        client: client.name.to_string(),
        display_name: client.display_name.to_string(),
        local,
        path,
        servers: servers.iter().map(|s| s.name.clone()).collect(),
    })
}

fn resync_record(
    state: &AppState,
    store: &ConfigStore,
    record: &SyncedClientRecord,
) -> Result<SyncReport, AppError> {
    let client = state.registry.get(&record.name)?;
    let selected = resolve_servers(store, record.restricted_servers())?;
    write_client(state, client, &selected, record.local)
}
