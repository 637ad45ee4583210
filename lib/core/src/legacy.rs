//! Solr's JSON field type format
//!
//! The JSON variant of a field type (as used by the Schema API) still names
//! its stages `indexAnalyzer`, `queryAnalyzer`, `multiTermAnalyzer` and
//! `analyzer`, element names that the XML format has long replaced with
//! `<analyzer type="...">`. These functions translate between that shape and
//! [`FieldTypeDefinition`], whose stages carry their kind explicitly.

use crate::model::{Analyzer, AnalyzerKind, FieldTypeDefinition};
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// Convert a definition into the JSON field type format.
///
/// Only one stage per kind fits the format. If a definition carries more,
/// the last one wins.
pub fn to_legacy_json(definition: &FieldTypeDefinition) -> Result<Map<String, Value>> {
    let mut object = Map::new();
    object.insert("name".to_string(), Value::String(definition.name.clone()));
    for (key, value) in &definition.attributes {
        object.insert(key.clone(), value.clone());
    }

    for analyzer in &definition.analyzers {
        let mut stage = match serde_json::to_value(analyzer) {
            Ok(Value::Object(stage)) => stage,
            Ok(other) => return Err(Error::Encode(format!("analyzer serialized as {}", other))),
            Err(e) => return Err(Error::Encode(e.to_string())),
        };
        stage.remove("type");

        let key = analyzer.kind.legacy_key();
        if object.insert(key.to_string(), Value::Object(stage)).is_some() {
            warn!(
                field_type = %definition.name,
                key,
                "field type has more than one analyzer of the same kind, keeping the last"
            );
        }
    }

    Ok(object)
}

/// Convert a JSON field type object back into a definition.
///
/// Stages are appended in the order their keys appear. Keys that are absent
/// or empty (`null`, `false`, `0`, `""`, `[]`, `{}`) are skipped, so definitions with only a bare `analyzer` are
/// fine. An `analyzers` list already in the object is kept in front.
pub fn from_legacy_json(object: Map<String, Value>) -> Result<FieldTypeDefinition> {
    let mut rest = Map::new();
    let mut stages = Vec::new();

    for (key, value) in object {
        match AnalyzerKind::from_legacy_key(&key) {
            Some(kind) => {
                if is_empty_stage(&value) {
                    continue;
                }
                let mut analyzer: Analyzer = serde_json::from_value(value)?;
                analyzer.kind = kind;
                stages.push(analyzer);
            }
            None => {
                rest.insert(key, value);
            }
        }
    }

    let mut definition: FieldTypeDefinition = serde_json::from_value(Value::Object(rest))?;
    definition.analyzers.extend(stages);
    Ok(definition)
}

/// Parse JSON text in the field type format.
pub fn from_legacy_json_str(text: &str) -> Result<FieldTypeDefinition> {
    let object: Map<String, Value> = serde_json::from_str(text)?;
    from_legacy_json(object)
}

fn is_empty_stage(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
