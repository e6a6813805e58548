//! Materializer inputs and outputs

use crate::shared::models::{FeatureClassInfo, FeatureSet, SubFields};
use serde_json::Value;

/// Field selection of a request: `*` or a comma separated list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutFields {
    All,
    Fields(Vec<String>),
}

impl Default for OutFields {
    fn default() -> Self {
        OutFields::All
    }
}

impl OutFields {
    pub fn parse(input: &str) -> Self {
        let fields: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect();
        if fields.is_empty() || fields.first().map(String::as_str) == Some("*") {
            OutFields::All
        } else {
            OutFields::Fields(fields)
        }
    }

    /// Query fields for `class`
    ///
    /// Requested fields missing from the class are dropped; the OID and shape
    /// fields are always added to an explicit list.
    pub fn sub_fields(&self, class: &FeatureClassInfo) -> SubFields {
        match self {
            OutFields::All => SubFields::All,
            OutFields::Fields(requested) => {
                let mut fields: Vec<String> = Vec::with_capacity(requested.len() + 2);
                for name in requested {
                    if let Some(canonical) = class.canonical_field(name) {
                        if !fields.iter().any(|f| f == canonical) {
                            fields.push(canonical.to_string());
                        }
                    }
                }
                for required in [&class.oid_field, &class.shape_field] {
                    if !fields.iter().any(|f| f.eq_ignore_ascii_case(required)) {
                        fields.push(required.clone());
                    }
                }
                SubFields::Only(fields)
            }
        }
    }
}

/// Feature sets for the requested categories
///
/// `None` means the category was not requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializedResult {
    pub edges: Option<Vec<FeatureSet>>,
    pub junctions: Option<Vec<FeatureSet>>,
}

impl MaterializedResult {
    pub fn edges_json(&self) -> Option<Value> {
        self.edges.as_ref().map(|sets| feature_sets_json(sets))
    }

    pub fn junctions_json(&self) -> Option<Value> {
        self.junctions.as_ref().map(|sets| feature_sets_json(sets))
    }
}

pub fn feature_sets_json(sets: &[FeatureSet]) -> Value {
    Value::Array(sets.iter().map(FeatureSet::to_json).collect())
}
