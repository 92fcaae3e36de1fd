//! Layered session configuration.
//!
//! A session is configured by one or more YAML documents (JSON is a YAML
//! subset and loads the same way) merged in order: earlier files are the
//! base, later files override. The merged document is hashed over its
//! canonical JSON form so a session can log exactly which effective
//! configuration it ran with.
//!
//! Keys consumed by the session:
//!
//! | Pointer                   | Required | Meaning                       |
//! |---------------------------|----------|-------------------------------|
//! | `/catalog/retailers_csv`  | yes      | retailers CSV path            |
//! | `/catalog/categories_csv` | yes      | categories CSV path           |
//! | `/catalog/products_csv`   | yes      | products CSV path             |
//! | `/sink/path`              | yes      | submission JSONL path         |
//! | `/session/device_label`   | no       | label echoed into logs        |

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Result of a layered load: the merged document plus its provenance
/// hash.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

/// Read and merge YAML documents from disk, in order.
pub fn load_layered(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw = fs::read_to_string(p).with_context(|| format!("failed to read config: {p}"))?;
        docs.push(raw);
    }
    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_from_strings(&doc_refs)
}

/// Merge YAML documents already in memory, in order: earlier docs are
/// base, later docs override (maps merge recursively, everything else
/// replaces).
pub fn load_layered_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Typed view of the keys the session actually reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub retailers_csv: PathBuf,
    pub categories_csv: PathBuf,
    pub products_csv: PathBuf,
    pub sink_path: PathBuf,
    pub device_label: Option<String>,
}

impl SessionConfig {
    /// Extract the session keys from a merged config document.
    ///
    /// Missing or non-string required keys are errors naming the JSON
    /// pointer, so a misconfigured session fails with an exact location.
    pub fn from_value(config: &Value) -> Result<Self> {
        Ok(Self {
            retailers_csv: require_str(config, "/catalog/retailers_csv")?.into(),
            categories_csv: require_str(config, "/catalog/categories_csv")?.into(),
            products_csv: require_str(config, "/catalog/products_csv")?.into(),
            sink_path: require_str(config, "/sink/path")?.into(),
            device_label: optional_str(config, "/session/device_label"),
        })
    }
}

fn require_str(config: &Value, pointer: &str) -> Result<String> {
    match config.pointer(pointer) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(other) => bail!("config key {pointer} must be a non-empty string, got: {other}"),
        None => bail!("config key {pointer} is missing"),
    }
}

fn optional_str(config: &Value, pointer: &str) -> Option<String> {
    match config.pointer(pointer) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

/// Compact JSON with recursively sorted keys, so the hash does not depend
/// on the key order of the source documents.
fn canonicalize_json(v: &Value) -> Result<String> {
    let sorted = sort_keys(v);
    serde_json::to_string(&sorted).context("canonical json serialize failed")
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
