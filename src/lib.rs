mod app_config;
mod clients;
mod config;
mod error;
pub mod mcp;
mod services;
mod store;

pub use app_config::{
    derive_http_name, derive_stdio_name, parse_key_value_pairs, ConfigStore, ServerKind,
    ServerRecord, ServerTransport, SyncedClientRecord,
};
pub use clients::{builtin_clients, shared_registry, ClientDescriptor, ClientRegistry, PathResolver};
pub use config::{
    atomic_write, find_config_in_parents, get_app_config_dir, get_app_config_path, HostEnv,
    HostOs, LOCAL_CONFIG_FILE_NAME,
};
pub use error::AppError;
pub use mcp::SyncFn;
pub use services::{McpService, ResyncFailure, ResyncReport, SyncOutcome, SyncReport};
pub use store::AppState;
