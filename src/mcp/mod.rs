// ============================================================================
// MCP Module - projecting server records into client config files
// ============================================================================

mod helpers;
mod toml_convert;
mod validation;
pub mod sync;

pub use sync::*;
pub use validation::validate_server_record;
