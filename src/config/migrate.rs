//! Config file maintenance: detect fields missing from an older file and
//! fill them with defaults without touching what the operator already set.

use super::Config;
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Fields every current config file is expected to carry.
pub const EXPECTED_FIELDS: [&str; 5] = ["database", "bind", "mode", "assets_dir", "log_filter"];

/// Return the expected fields that are absent from the YAML file at `path`.
pub fn missing_fields(path: &Path) -> io::Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| io::Error::other(format!("parse error: {}", e)))?;

    let Some(map) = yaml.as_mapping() else {
        return Ok(EXPECTED_FIELDS.to_vec());
    };

    Ok(EXPECTED_FIELDS
        .iter()
        .copied()
        .filter(|f| !map.contains_key(*f))
        .collect())
}

/// Add any missing fields with their default values.
///   Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn migrate_config_file(path: &Path) -> io::Result<bool> {
    let missing = missing_fields(path)?;
    if missing.is_empty() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| io::Error::other(format!("parse error: {}", e)))?;

    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;

    if !yaml.is_mapping() {
        yaml = Value::Mapping(Default::default());
    }

    if let (Some(map), Some(def)) = (yaml.as_mapping_mut(), defaults.as_mapping()) {
        for field in missing {
            let key = Value::String(field.to_string());
            if let Some(v) = def.get(&key) {
                map.insert(key, v.clone());
            }
        }
    }

    let serialized = serde_yaml::to_string(&yaml)
        .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
    fs::write(path, serialized)?;

    Ok(true)
}
