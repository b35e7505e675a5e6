use anyhow::{Context, Result};
use serde_json::Value;
use std::{fs, path::Path};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Read a JSON document from disk.
pub fn load_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Shallow-merge `overlay` onto `base`. Non-object overlays are ignored.
pub fn merge_overrides(base: &mut Value, overlay: &Value) {
    let Value::Object(extra) = overlay else {
        return;
    };
    if !base.is_object() {
        *base = Value::Object(serde_json::Map::new());
    }
    if let Value::Object(target) = base {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
}
