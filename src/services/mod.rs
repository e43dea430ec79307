pub mod mcp;

pub use mcp::{McpService, ResyncFailure, ResyncReport, SyncOutcome, SyncReport};
