//! Turn persisted submissions into plain key/value records with coded
//! fields replaced by labels.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::mapping::{LabelMap, MappingTable, lookup};
use crate::models::submission::{AbcSubmission, AbsSubmission, OasmnrSubmission};

/// A submission flattened into field name → display value.
pub type NormalizedSubmission = Map<String, Value>;

/// Implemented by every submission projection that can be normalized.
pub trait Normalize: Serialize {
    /// Rewrite coded fields of an already flattened record in place.
    fn relabel(fields: &mut NormalizedSubmission, table: &MappingTable);
}

impl Normalize for OasmnrSubmission {
    fn relabel(fields: &mut NormalizedSubmission, table: &MappingTable) {
        if let Some(Value::Array(factors)) = fields.get_mut("contributing_factors") {
            for factor in factors.iter_mut() {
                *factor = lookup(&table.contributing_factors_map, factor);
            }
        }

        relabel_field(fields, "behaviour", &table.behaviour_map);
        relabel_field(fields, "antecedent", &table.antecedent_map);
        relabel_field(fields, "intervention", &table.intervention_map);
    }
}

impl Normalize for AbcSubmission {
    fn relabel(fields: &mut NormalizedSubmission, table: &MappingTable) {
        relabel_field(fields, "severity", &table.abc_severity_map);
    }
}

impl Normalize for AbsSubmission {
    fn relabel(fields: &mut NormalizedSubmission, table: &MappingTable) {
        for name in AbsSubmission::SCALE_FIELDS {
            relabel_field(fields, name, &table.abs_scale_map);
        }
    }
}

fn relabel_field(fields: &mut NormalizedSubmission, name: &str, map: &LabelMap) {
    if let Some(value) = fields.get_mut(name) {
        *value = lookup(map, value);
    }
}

/// Flatten and relabel a batch of submissions, preserving order.
pub fn normalize<T: Normalize>(
    records: &[T],
    table: &MappingTable,
) -> Result<Vec<NormalizedSubmission>, CoreError> {
    records
        .iter()
        .map(|record| {
            let mut fields = match serde_json::to_value(record)? {
                Value::Object(fields) => fields,
                other => return Err(CoreError::NotAnObject(other.to_string())),
            };
            T::relabel(&mut fields, table);
            Ok(fields)
        })
        .collect()
}
