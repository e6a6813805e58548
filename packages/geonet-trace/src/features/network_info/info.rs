//! Network descriptor served by the listing resource

use crate::shared::models::{Envelope, NetWeight, SpatialReference};
use crate::shared::ports::GeometricNetwork;
use serde_json::{json, Map, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct GeometricNetworkInfo {
    pub id: i32,
    pub name: String,
    pub extent: Option<Envelope>,
    pub spatial_reference: SpatialReference,
    pub weights: Vec<NetWeight>,
    network: Arc<dyn GeometricNetwork>,
}

impl std::fmt::Debug for GeometricNetworkInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometricNetworkInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("extent", &self.extent)
            .field("spatial_reference", &self.spatial_reference)
            .field("weights", &self.weights.len())
            .finish()
    }
}

impl GeometricNetworkInfo {
    pub fn new(id: i32, network: Arc<dyn GeometricNetwork>) -> Self {
        Self {
            id,
            name: network.name().to_string(),
            extent: network.extent(),
            spatial_reference: network.spatial_reference().clone(),
            weights: network.weights(),
            network,
        }
    }

    pub fn network(&self) -> &dyn GeometricNetwork {
        self.network.as_ref()
    }

    /// Spatial reference as a wkid when known, otherwise its definition
    fn spatial_reference_json(&self) -> Value {
        match (&self.spatial_reference.wkid, &self.spatial_reference.wkt) {
            (Some(wkid), _) => json!(wkid),
            (None, Some(wkt)) => json!(wkt),
            (None, None) => Value::Null,
        }
    }

    pub fn to_json(&self) -> Value {
        let extent = match &self.extent {
            Some(envelope) => {
                let mut extent = envelope.to_json(&self.spatial_reference);
                extent["spatialReference"] = self.spatial_reference_json();
                extent
            }
            None => {
                let mut extent = Map::new();
                extent.insert("spatialReference".into(), self.spatial_reference_json());
                Value::Object(extent)
            }
        };
        json!({
            "name": self.name,
            "id": self.id,
            "extent": extent,
            "weights": self.weights.iter().map(NetWeight::to_json).collect::<Vec<_>>(),
        })
    }
}
