//! Network catalog
//!
//! Networks reachable from the map layers, described once at service start
//! and cached for the service lifetime.

pub mod catalog;
pub mod info;

pub use catalog::{MapCatalog, MapLayer};
pub use info::GeometricNetworkInfo;

use serde_json::{json, Value};

/// Root listing: `{"GeometricNetworks": [...]}`
pub fn networks_json(infos: &[GeometricNetworkInfo]) -> Value {
    json!({ "GeometricNetworks": infos.iter().map(GeometricNetworkInfo::to_json).collect::<Vec<_>>() })
}
