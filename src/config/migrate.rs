//! Bring an existing `config.json` up to date with the current defaults.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Add every key present in the default configuration but missing from the
/// file at `path`. Existing values are never touched.
///
/// Returns the dotted names of the keys that were added. The file is only
/// rewritten when at least one key was missing.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut current: Value = serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))?;

    let defaults = serde_json::to_value(Config::default())
        .map_err(|e| AppError::Config(format!("failed to serialize defaults: {e}")))?;

    let (Some(cur_map), Some(def_map)) = (current.as_object_mut(), defaults.as_object()) else {
        return Err(AppError::Config(format!(
            "{} must contain a JSON object",
            path.display()
        )));
    };

    let mut added = Vec::new();
    merge_missing(cur_map, def_map, "", &mut added);

    if added.is_empty() {
        info("Configuration file is complete.");
        return Ok(added);
    }

    let serialized = serde_json::to_string_pretty(&current)
        .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))?;
    fs::write(path, serialized)?;

    for key in &added {
        success(format!("Added missing key '{key}'"));
    }

    Ok(added)
}

fn merge_missing(
    target: &mut Map<String, Value>,
    defaults: &Map<String, Value>,
    prefix: &str,
    added: &mut Vec<String>,
) {
    for (key, def_val) in defaults {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), def_val.clone());
                added.push(dotted);
            }
            Some(Value::Object(sub)) => {
                if let Value::Object(def_sub) = def_val {
                    merge_missing(sub, def_sub, &dotted, added);
                }
            }
            Some(_) => {}
        }
    }
}
