//! JSON description of an in-memory network and its map
//!
//! ```json
//! {
//!   "networks": [{
//!     "name": "Water_Net",
//!     "spatialReference": {"wkid": 3003},
//!     "classes": [
//!       {"classId": 1, "name": "Valves", "featureType": "simpleJunction", "fields": ["STATUS"]},
//!       {"classId": 2, "name": "Mains", "featureType": "simpleEdge", "fields": ["LENGTH"]}
//!     ],
//!     "junctions": [
//!       {"classId": 1, "oid": 1, "x": 0.0, "y": 0.0, "role": "source"}
//!     ],
//!     "edges": [
//!       {"classId": 2, "oid": 1, "from": 1, "to": 2, "attributes": {"LENGTH": 10.0}}
//!     ],
//!     "weights": [
//!       {"id": 1, "name": "Length", "type": "esriWTDouble",
//!        "weightAssociation": [{"fieldName": "LENGTH", "tableName": "Mains"}]}
//!     ]
//!   }],
//!   "layers": [{"id": 0, "name": "Valves", "classId": 1}]
//! }
//! ```
//!
//! Edge endpoints refer to junctions by 1-based position in `junctions`,
//! which is also their element id.

use super::network::{FlowDirection, InMemoryNetwork, JunctionRole};
use crate::features::network_info::{MapCatalog, MapLayer};
use crate::shared::models::{
    FeatureType, FieldValue, LineString, NetWeight, Point, SpatialReference, WeightAssociation,
    WeightType,
};
use crate::shared::ports::NetworkError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid network '{network}': {source}")]
    Network {
        network: String,
        #[source]
        source: NetworkError,
    },

    #[error("Invalid weight '{weight}': {reason}")]
    Weight { weight: String, reason: String },
}

pub type FixtureResult<T> = Result<T, FixtureError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFixture {
    pub class_id: i32,
    pub name: String,
    pub feature_type: FeatureType,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JunctionFixture {
    pub class_id: i32,
    pub oid: i32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub role: JunctionRole,
    #[serde(default)]
    pub attributes: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFixture {
    pub class_id: i32,
    pub oid: i32,
    pub from: i32,
    pub to: i32,
    /// Vertices `[x, y]`; the straight segment between the junctions when absent
    #[serde(default)]
    pub path: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub flow: FlowDirection,
    #[serde(default)]
    pub attributes: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightFixture {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub weight_type: String,
    #[serde(default)]
    pub bit_gate_size: u32,
    #[serde(default, rename = "weightAssociation")]
    pub associations: Vec<WeightAssociation>,
}

impl WeightFixture {
    fn to_weight(&self) -> FixtureResult<NetWeight> {
        let weight_type = WeightType::from_str(&self.weight_type).map_err(|reason| FixtureError::Weight {
            weight: self.name.clone(),
            reason,
        })?;
        Ok(NetWeight {
            id: self.id,
            name: self.name.clone(),
            weight_type,
            bit_gate_size: self.bit_gate_size,
            associations: self.associations.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFixture {
    pub name: String,
    #[serde(default)]
    pub spatial_reference: SpatialReference,
    pub classes: Vec<ClassFixture>,
    #[serde(default)]
    pub junctions: Vec<JunctionFixture>,
    #[serde(default)]
    pub edges: Vec<EdgeFixture>,
    #[serde(default)]
    pub weights: Vec<WeightFixture>,
}

impl NetworkFixture {
    pub fn build(&self) -> FixtureResult<InMemoryNetwork> {
        let invalid = |source| FixtureError::Network {
            network: self.name.clone(),
            source,
        };
        let mut builder = InMemoryNetwork::builder(self.name.clone(), self.spatial_reference.clone());
        for class in &self.classes {
            let fields: Vec<&str> = class.fields.iter().map(String::as_str).collect();
            builder.add_class(class.class_id, class.name.clone(), class.feature_type, &fields);
        }
        for weight in &self.weights {
            builder.add_weight(weight.to_weight()?);
        }
        for junction in &self.junctions {
            builder
                .add_junction(
                    junction.class_id,
                    junction.oid,
                    Point::new(junction.x, junction.y),
                    junction.role,
                    junction.attributes.clone(),
                )
                .map_err(invalid)?;
        }
        for edge in &self.edges {
            let path = edge
                .path
                .as_ref()
                .map(|vertices| LineString::from(vertices.iter().map(|[x, y]| (*x, *y)).collect::<Vec<_>>()));
            builder
                .add_edge(edge.class_id, edge.oid, edge.from, edge.to, path, edge.flow, edge.attributes.clone())
                .map_err(invalid)?;
        }
        Ok(builder.build())
    }
}

/// Networks and layers of one map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFixture {
    pub networks: Vec<NetworkFixture>,
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

impl MapFixture {
    pub fn from_json_str(content: &str) -> FixtureResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> FixtureResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_catalog(&self) -> FixtureResult<MapCatalog> {
        let mut catalog = MapCatalog::new();
        for network in &self.networks {
            catalog = catalog.with_network(Arc::new(network.build()?));
        }
        for layer in &self.layers {
            catalog = catalog.with_layer(layer.clone());
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ports::GeometricNetwork;

    const MAP: &str = r#"{
        "networks": [{
            "name": "Water_Net",
            "spatialReference": {"wkid": 3003},
            "classes": [
                {"classId": 1, "name": "Nodes", "featureType": "simpleJunction"},
                {"classId": 2, "name": "Mains", "featureType": "complexEdge", "fields": ["LENGTH"]}
            ],
            "junctions": [
                {"classId": 1, "oid": 1, "x": 0.0, "y": 0.0, "role": "source"},
                {"classId": 1, "oid": 2, "x": 10.0, "y": 0.0}
            ],
            "edges": [
                {"classId": 2, "oid": 5, "from": 1, "to": 2,
                 "path": [[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]],
                 "flow": "againstDigitized", "attributes": {"LENGTH": 14.1}}
            ],
            "weights": [
                {"id": 1, "name": "Length", "type": "esriWTDouble",
                 "weightAssociation": [{"fieldName": "LENGTH", "tableName": "Mains"}]}
            ]
        }],
        "layers": [{"id": 3, "name": "Nodes", "classId": 1}]
    }"#;

    #[test]
    fn test_map_fixture_builds_catalog() {
        let catalog = MapFixture::from_json_str(MAP).unwrap().to_catalog().unwrap();
        assert_eq!(catalog.networks().len(), 1);
        assert_eq!(catalog.class_for_layer(3), Some(1));

        let network = &catalog.networks()[0];
        assert_eq!(network.name(), "Water_Net");
        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.weights()[0].weight_type, WeightType::Double);
        assert_eq!(network.attribute(2, 5, "LENGTH").unwrap(), FieldValue::Double(14.1));
    }

    #[test]
    fn test_edge_to_unknown_junction_is_rejected() {
        let mut map = MapFixture::from_json_str(MAP).unwrap();
        map.networks[0].edges[0].to = 9;
        assert!(matches!(map.to_catalog(), Err(FixtureError::Network { .. })));
    }

    #[test]
    fn test_unknown_weight_type_is_rejected() {
        let mut map = MapFixture::from_json_str(MAP).unwrap();
        map.networks[0].weights[0].weight_type = "esriWTLong".into();
        assert!(matches!(map.to_catalog(), Err(FixtureError::Weight { .. })));
    }
}
