use std::sync::Arc;

use crate::clients::{shared_registry, ClientRegistry};
use crate::config::HostEnv;
use crate::error::AppError;

/// Everything a command needs besides the config store itself.
#[derive(Debug, Clone)]
pub struct AppState {
    pub env: HostEnv,
    pub registry: Arc<ClientRegistry>,
}

impl AppState {
    /// State for the current process: detected environment, built-in clients.
    pub fn detect() -> Result<Self, AppError> {
        Ok(Self::new(HostEnv::detect()?))
    }

    pub fn new(env: HostEnv) -> Self {
        Self {
            env,
            registry: shared_registry(),
        }
    }

    pub fn with_registry(env: HostEnv, registry: ClientRegistry) -> Self {
        Self {
            env,
            registry: Arc::new(registry),
        }
    }
}
