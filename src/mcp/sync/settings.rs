use serde_json::{Map, Value};
use std::path::Path;

use crate::config::{read_text_file_opt, write_json_file};
use crate::error::AppError;

/// Read a JSON settings file as an ordered object.
///
/// A missing or blank file is an empty object; any other top-level value is a parse error.
pub fn read_settings_object(path: &Path) -> Result<Map<String, Value>, AppError> {
    let Some(text) = read_text_file_opt(path)? else {
        return Ok(Map::new());
    };
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&text).map_err(|e| AppError::json(path, e))? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Parse {
            path: path.display().to_string(),
            message: "top-level value must be a JSON object".into(),
        }),
    }
}

/// Replace exactly one top-level key of a settings file, keeping every other key as it was.
///
/// Existing keys keep their position; a new key is appended at the end.
pub fn merge_settings_key(path: &Path, key: &str, value: Value) -> Result<(), AppError> {
    let mut root = read_settings_object(path)?;
    root.insert(key.to_string(), value);
    write_json_file(path, &Value::Object(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn merge_keeps_foreign_keys_and_their_order() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"zeta": 1, "mcpServers": {"old": {}}, "alpha": {"nested": [1, 2, {"deep": null}]}}"#,
        )
        .expect("seed");

        merge_settings_key(&path, "mcpServers", json!({"new": {"command": "x"}})).expect("merge");

        let root = read_settings_object(&path).expect("read back");
        let keys: Vec<_> = root.keys().cloned().collect();
        assert_eq!(keys, ["zeta", "mcpServers", "alpha"]);
        assert_eq!(root["zeta"], json!(1));
        assert_eq!(root["alpha"], json!({"nested": [1, 2, {"deep": null}]}));
        assert_eq!(root["mcpServers"], json!({"new": {"command": "x"}}));
    }

    #[test]
    fn missing_or_blank_file_starts_empty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("a").join("settings.json");
        assert!(read_settings_object(&path).expect("missing").is_empty());

        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "  \n").expect("seed blank");
        assert!(read_settings_object(&path).expect("blank").is_empty());
    }

    #[test]
    fn non_object_root_is_rejected_and_file_left_alone() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2]").expect("seed");

        let err = merge_settings_key(&path, "mcpServers", json!({})).expect_err("array root");
        assert!(matches!(err, AppError::Parse { .. }));
        assert_eq!(fs::read_to_string(&path).expect("read"), "[1, 2]");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ \"a\": ").expect("seed");
        assert!(matches!(
            read_settings_object(&path),
            Err(AppError::Parse { .. })
        ));
    }
}
