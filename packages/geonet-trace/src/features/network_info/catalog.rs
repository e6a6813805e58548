//! Networks and layers published by one map

use super::info::GeometricNetworkInfo;
use crate::shared::ports::GeometricNetwork;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Map layer backed by a network feature class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayer {
    pub id: i32,
    pub name: String,
    pub class_id: i32,
}

#[derive(Clone, Default)]
pub struct MapCatalog {
    networks: Vec<Arc<dyn GeometricNetwork>>,
    layers: Vec<MapLayer>,
}

impl std::fmt::Debug for MapCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapCatalog")
            .field("networks", &self.networks.iter().map(|n| n.name().to_string()).collect::<Vec<_>>())
            .field("layers", &self.layers)
            .finish()
    }
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a network; the same network instance is listed once
    pub fn with_network(mut self, network: Arc<dyn GeometricNetwork>) -> Self {
        if !self.networks.iter().any(|n| Arc::ptr_eq(n, &network)) {
            self.networks.push(network);
        }
        self
    }

    pub fn with_layer(mut self, layer: MapLayer) -> Self {
        self.layers.retain(|l| l.id != layer.id);
        self.layers.push(layer);
        self
    }

    pub fn networks(&self) -> &[Arc<dyn GeometricNetwork>] {
        &self.networks
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn layer(&self, layer_id: i32) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    /// Feature class id behind a layer id
    pub fn class_for_layer(&self, layer_id: i32) -> Option<i32> {
        self.layer(layer_id).map(|l| l.class_id)
    }

    /// One info per network, ids 1-based in catalog order
    pub fn network_infos(&self) -> Vec<GeometricNetworkInfo> {
        self.networks
            .iter()
            .enumerate()
            .map(|(i, network)| GeometricNetworkInfo::new(i as i32 + 1, Arc::clone(network)))
            .collect()
    }
}
