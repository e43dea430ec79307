use crate::app_config::{ServerRecord, ServerTransport};
use crate::error::AppError;

/// Basic validation: non-empty name, and the required field of the declared transport.
pub fn validate_server_record(record: &ServerRecord) -> Result<(), AppError> {
    if record.name.trim().is_empty() {
        return Err(AppError::InvalidInput("server name must not be empty".into()));
    }

    match &record.transport {
        ServerTransport::Stdio { command, env, .. } => {
            if command.trim().is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "stdio server '{}' is missing a command",
                    record.name
                )));
            }
            if env.keys().any(|k| k.trim().is_empty()) {
                return Err(AppError::InvalidInput(format!(
                    "stdio server '{}' has an empty environment variable name",
                    record.name
                )));
            }
        }
        ServerTransport::Http { url, headers } => {
            if url.trim().is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "http server '{}' is missing a url",
                    record.name
                )));
            }
            if headers.keys().any(|k| k.trim().is_empty()) {
                return Err(AppError::InvalidInput(format!(
                    "http server '{}' has an empty header name",
                    record.name
                )));
            }
        }
    }
    Ok(())
}
