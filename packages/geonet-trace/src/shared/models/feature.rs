//! Feature classes, feature records and materialized feature sets

use crate::shared::models::element::FeatureType;
use crate::shared::models::geometry::{Geometry, SpatialReference};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Attribute value of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Double(f64),
    Text(String),
}

impl FieldValue {
    /// Integer reading, accepting whole doubles and numeric text
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Double(v) if v.fract() == 0.0 => Some(*v as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Double(v) => Some(*v),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Null => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Integer(v) => json!(v),
            FieldValue::Double(v) => json!(v),
            FieldValue::Text(s) => json!(s),
        }
    }
}

/// Schema of a network feature class
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureClassInfo {
    pub class_id: i32,
    pub name: String,
    pub feature_type: FeatureType,
    pub oid_field: String,
    pub shape_field: String,
    /// All field names, OID and shape included
    pub fields: Vec<String>,
}

impl FeatureClassInfo {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    /// Canonical spelling of `name` in this class
    pub fn canonical_field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}

/// One feature read through a cursor
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub oid: i32,
    pub attributes: BTreeMap<String, FieldValue>,
    pub geometry: Option<Geometry>,
}

/// Field list of a feature query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubFields {
    All,
    Only(Vec<String>),
}

impl SubFields {
    pub fn includes(&self, field: &str) -> bool {
        match self {
            SubFields::All => true,
            SubFields::Only(fields) => fields.iter().any(|f| f.eq_ignore_ascii_case(field)),
        }
    }
}

/// Features of one class returned by a trace
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub class_id: i32,
    pub class_name: String,
    pub fields: Vec<String>,
    pub spatial_reference: SpatialReference,
    pub features: Vec<FeatureRecord>,
}

impl FeatureSet {
    pub fn oids(&self) -> Vec<i32> {
        self.features.iter().map(|f| f.oid).collect()
    }

    /// Record set JSON: field list plus one entry per feature
    pub fn to_json(&self) -> Value {
        let fields: Vec<Value> = self.fields.iter().map(|name| json!({ "name": name })).collect();
        let features: Vec<Value> = self
            .features
            .iter()
            .map(|feature| {
                let attributes: Map<String, Value> = feature
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                let mut entry = Map::new();
                entry.insert("attributes".into(), Value::Object(attributes));
                if let Some(geometry) = &feature.geometry {
                    entry.insert("geometry".into(), geometry.to_json(None));
                }
                Value::Object(entry)
            })
            .collect();

        json!({
            "displayFieldName": self.class_name,
            "classId": self.class_id,
            "spatialReference": self.spatial_reference.to_json(),
            "fields": fields,
            "features": features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_integer_readings() {
        assert_eq!(FieldValue::Integer(3).as_i64(), Some(3));
        assert_eq!(FieldValue::Double(4.0).as_i64(), Some(4));
        assert_eq!(FieldValue::Double(4.5).as_i64(), None);
        assert_eq!(FieldValue::Text(" 7 ".into()).as_i64(), Some(7));
        assert_eq!(FieldValue::Null.as_i64(), None);
    }

    #[test]
    fn test_sub_fields_case_insensitive() {
        let fields = SubFields::Only(vec!["OBJECTID".into(), "Shape".into()]);
        assert!(fields.includes("objectid"));
        assert!(fields.includes("SHAPE"));
        assert!(!fields.includes("DIAMETER"));
        assert!(SubFields::All.includes("anything"));
    }
}
