//! Code-to-label lookup tables.
//!
//! Submissions store compact codes (`"VA"`, `12`, `"StructuredActivity"`)
//! that mean little to a language model. The mapping document translates
//! them into the wording clinicians use. Lookups never fail: a code with no
//! entry is returned unchanged.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::CoreError;

/// A single code → label table.
pub type LabelMap = HashMap<String, String>;

/// All lookup tables, one per coded field family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingTable {
    pub contributing_factors_map: LabelMap,
    pub behaviour_map: LabelMap,
    pub antecedent_map: LabelMap,
    pub intervention_map: LabelMap,
    pub abc_severity_map: LabelMap,
    pub abs_scale_map: LabelMap,
}

impl MappingTable {
    /// Parse a mapping document. Every section must be present.
    pub fn from_json_str(contents: &str) -> Result<Self, CoreError> {
        serde_json::from_str(contents).map_err(|e| CoreError::MappingParse(e.to_string()))
    }

    /// Load the mapping document from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::MappingNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::MappingRead {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_json_str(&contents)?;

        info!(
            path = %path.display(),
            behaviours = table.behaviour_map.len(),
            antecedents = table.antecedent_map.len(),
            interventions = table.intervention_map.len(),
            "loaded mapping table"
        );

        Ok(table)
    }
}

/// Translate one coded value through `map`.
///
/// Strings and numbers are looked up by their text form, so the integer
/// antecedent `12` matches the key `"12"`. Anything without an entry, and
/// any non-scalar value, comes back as it went in.
pub fn lookup(map: &LabelMap, value: &Value) -> Value {
    let key = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return value.clone(),
    };

    match map.get(&key) {
        Some(label) => Value::String(label.clone()),
        None => value.clone(),
    }
}
