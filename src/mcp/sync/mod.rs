// ============================================================================
// MCP Sync Module - per-client format adapters
// ============================================================================
//
// Every adapter takes the full list of servers to write plus the destination
// path, and is idempotent: the same input yields byte-identical output.

use std::path::Path;

use crate::app_config::ServerRecord;
use crate::error::AppError;

mod claude;
mod codex;
mod continue_dev;
mod gemini;
mod mcp_json;
mod opencode;
mod settings;
mod zed;

pub use claude::*;
pub use codex::*;
pub use continue_dev::*;
pub use gemini::*;
pub use mcp_json::*;
pub use opencode::*;
pub use settings::*;
pub use zed::*;

/// Format adapter signature shared by every client.
pub type SyncFn = fn(&[ServerRecord], &Path) -> Result<(), AppError>;
