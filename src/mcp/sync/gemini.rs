use serde_json::Value;
use std::path::Path;

use crate::app_config::ServerRecord;
use crate::error::AppError;

use super::super::helpers::{entries_by_name, standard_entry};
use super::settings::merge_settings_key;

/// Gemini CLI entry: the standard shape, no `type` field.
pub fn gemini_entry(server: &ServerRecord) -> Value {
    standard_entry(server)
}

/// Project servers into `mcpServers` of `~/.gemini/settings.json`, keeping other settings
pub fn sync_to_gemini(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    merge_settings_key(path, "mcpServers", entries_by_name(servers, gemini_entry))
}
