//! Network weights

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

wire_enum! {
    /// Declared numeric type of a network weight
    pub enum WeightType {
        Null => "esriWTNull",
        Single => "esriWTSingle",
        Double => "esriWTDouble",
        Integer => "esriWTInteger",
        BitGate => "esriWTBitGate",
    }
}

/// Attribute field feeding a weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightAssociation {
    pub field_name: String,
    pub table_name: String,
}

/// A named per-element numeric attribute of the network
#[derive(Debug, Clone, PartialEq)]
pub struct NetWeight {
    pub id: i32,
    pub name: String,
    pub weight_type: WeightType,
    /// Bit width for `BitGate` weights, zero otherwise
    pub bit_gate_size: u32,
    pub associations: Vec<WeightAssociation>,
}

impl NetWeight {
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "type": self.weight_type.as_str(),
            "bitGateSize": self.bit_gate_size,
            "weightAssociation": self.associations,
        })
    }
}

/// Typed bound of a filter range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterValue {
    Double(f64),
    Integer(i32),
    BitGate(i32),
    Single(f32),
}

impl FilterValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            FilterValue::Double(v) => *v,
            FilterValue::Integer(v) | FilterValue::BitGate(v) => *v as f64,
            FilterValue::Single(v) => *v as f64,
        }
    }
}

/// Inclusive `from..=to` range of a filter weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightFilterRange {
    pub from: FilterValue,
    pub to: FilterValue,
}

impl WeightFilterRange {
    pub fn contains(&self, value: f64) -> bool {
        self.from.as_f64() <= value && value <= self.to.as_f64()
    }
}

/// Junction filter: one weight, its ranges and the negation switch
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionFilter {
    pub weight: NetWeight,
    pub ranges: Vec<WeightFilterRange>,
    pub not_operator: bool,
}

/// Edge filter: paired from-to / to-from weights sharing ranges
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFilter {
    pub from_to: NetWeight,
    pub to_from: NetWeight,
    pub ranges: Vec<WeightFilterRange>,
    pub not_operator: bool,
}

/// Filter evaluation shared by junction and edge filters
///
/// A filter without ranges lets every element through.
pub fn passes_filter(ranges: &[WeightFilterRange], not_operator: bool, value: f64) -> bool {
    if ranges.is_empty() {
        return true;
    }
    let inside = ranges.iter().any(|r| r.contains(value));
    inside != not_operator
}

/// Weights and filters attached to a solver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightSettings {
    pub junction_weight: Option<NetWeight>,
    pub from_to_edge_weight: Option<NetWeight>,
    pub to_from_edge_weight: Option<NetWeight>,
    pub junction_filter: Option<JunctionFilter>,
    pub edge_filter: Option<EdgeFilter>,
}

impl WeightSettings {
    pub fn is_empty(&self) -> bool {
        *self == WeightSettings::default()
    }
}
