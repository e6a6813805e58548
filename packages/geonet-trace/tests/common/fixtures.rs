//! Water network fixture
//!
//! ```text
//!                                   e3        e4
//!   S1 ──e1──▶ V1 ──e2──▶ N1 ──────────▶ V2 ──────▶ N2
//!  (0,0)     (10,0)     (20,0)         (30,0)     (40,0)
//!                         │ e5
//!                         ▼
//!                         N3 (20,-10)
//!                         │ e6
//!                         ▼
//!                         S2 (20,-20)
//! ```
//!
//! Every edge is digitized in the direction of flow. S1 and S2 are supply
//! stations (sources). Junction element ids follow the order above
//! (S1=1, V1=2, N1=3, V2=4, N2=5, N3=6, S2=7); edge element ids and oids are
//! e1..e6 = 1..6.

use geonet_trace::adapters::memory::{FlowDirection, InMemoryNetwork, JunctionRole, MapFixture};
use geonet_trace::config::ServiceConfig;
use geonet_trace::features::network_info::{MapCatalog, MapLayer};
use geonet_trace::shared::models::{
    FeatureType, FieldValue, NetWeight, Point, SpatialReference, WeightAssociation, WeightType,
};
use geonet_trace::GeometricNetworkService;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const STATIONS: i32 = 1;
pub const VALVES: i32 = 2;
pub const NODES: i32 = 3;
pub const MAINS: i32 = 4;

pub const STATION_LAYER: i32 = 0;
pub const VALVE_LAYER: i32 = 1;
pub const NODE_LAYER: i32 = 2;
pub const MAINS_LAYER: i32 = 3;

pub const S1: (f64, f64) = (0.0, 0.0);
pub const V1: (f64, f64) = (10.0, 0.0);
pub const N1: (f64, f64) = (20.0, 0.0);
pub const V2: (f64, f64) = (30.0, 0.0);
pub const N2: (f64, f64) = (40.0, 0.0);
pub const N3: (f64, f64) = (20.0, -10.0);
pub const S2: (f64, f64) = (20.0, -20.0);

pub fn point((x, y): (f64, f64)) -> Point<f64> {
    Point::new(x, y)
}

fn attributes(values: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
    values.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn weight(id: i32, name: &str, weight_type: WeightType, field: &str) -> NetWeight {
    NetWeight {
        id,
        name: name.into(),
        weight_type,
        bit_gate_size: 0,
        associations: vec![WeightAssociation {
            field_name: field.into(),
            table_name: "Mains".into(),
        }],
    }
}

/// The water network described in the module docs
pub fn water_network() -> InMemoryNetwork {
    let mut builder = InMemoryNetwork::builder("Water_Net", SpatialReference::from_wkid(3003));
    builder
        .add_class(STATIONS, "Stations", FeatureType::SimpleJunction, &["NAME"])
        .add_class(VALVES, "Valves", FeatureType::SimpleJunction, &["STATUS"])
        .add_class(NODES, "Nodes", FeatureType::SimpleJunction, &[])
        .add_class(MAINS, "Mains", FeatureType::SimpleEdge, &["LENGTH", "DIAMETER", "ORDER"])
        .add_weight(weight(1, "Length", WeightType::Double, "LENGTH"))
        .add_weight(weight(2, "Diameter", WeightType::Integer, "DIAMETER"));

    let station = |name: &str| attributes(&[("NAME", FieldValue::Text(name.into()))]);
    let valve = || attributes(&[("STATUS", FieldValue::Text("open".into()))]);

    let junctions = [
        (STATIONS, 1, S1, JunctionRole::Source, station("North")),
        (VALVES, 1, V1, JunctionRole::None, valve()),
        (NODES, 1, N1, JunctionRole::None, BTreeMap::new()),
        (VALVES, 2, V2, JunctionRole::None, valve()),
        (NODES, 2, N2, JunctionRole::None, BTreeMap::new()),
        (NODES, 3, N3, JunctionRole::None, BTreeMap::new()),
        (STATIONS, 2, S2, JunctionRole::Source, station("South")),
    ];
    for (class_id, oid, at, role, attrs) in junctions {
        builder
            .add_junction(class_id, oid, point(at), role, attrs)
            .expect("fixture junction");
    }

    // (oid, from, to, diameter, order)
    let mains = [
        (1, 1, 2, 200, 1),
        (2, 2, 3, 200, 1),
        (3, 3, 4, 100, 1),
        (4, 4, 5, 100, 1),
        (5, 3, 6, 100, 2),
        (6, 6, 7, 100, 2),
    ];
    for (oid, from, to, diameter, order) in mains {
        builder
            .add_edge(
                MAINS,
                oid,
                from,
                to,
                None,
                FlowDirection::WithDigitized,
                attributes(&[
                    ("LENGTH", FieldValue::Double(10.0)),
                    ("DIAMETER", FieldValue::Integer(diameter)),
                    ("ORDER", FieldValue::Integer(order)),
                ]),
            )
            .expect("fixture edge");
    }
    builder.build()
}

/// Catalog publishing the water network with one layer per class
pub fn water_catalog() -> (Arc<InMemoryNetwork>, MapCatalog) {
    let network = Arc::new(water_network());
    let catalog = MapCatalog::new()
        .with_network(network.clone())
        .with_layer(layer(STATION_LAYER, "Stations", STATIONS))
        .with_layer(layer(VALVE_LAYER, "Valves", VALVES))
        .with_layer(layer(NODE_LAYER, "Nodes", NODES))
        .with_layer(layer(MAINS_LAYER, "Mains", MAINS));
    (network, catalog)
}

fn layer(id: i32, name: &str, class_id: i32) -> MapLayer {
    MapLayer {
        id,
        name: name.into(),
        class_id,
    }
}

pub fn water_service() -> (Arc<InMemoryNetwork>, GeometricNetworkService) {
    let (network, catalog) = water_catalog();
    (network, GeometricNetworkService::new(catalog, ServiceConfig::default()))
}

/// Four nodes as a map fixture document: 1 → 2 → 3 → 4 → 2, so mains 2..4 form a loop
pub const LOOP_MAP: &str = r#"{
    "networks": [{
        "name": "Loop_Net",
        "spatialReference": {"wkid": 3003},
        "classes": [
            {"classId": 1, "name": "Nodes", "featureType": "simpleJunction"},
            {"classId": 2, "name": "Mains", "featureType": "simpleEdge", "fields": ["LENGTH"]}
        ],
        "junctions": [
            {"classId": 1, "oid": 1, "x": 0.0, "y": 0.0, "role": "source"},
            {"classId": 1, "oid": 2, "x": 10.0, "y": 0.0},
            {"classId": 1, "oid": 3, "x": 20.0, "y": 0.0},
            {"classId": 1, "oid": 4, "x": 20.0, "y": -10.0}
        ],
        "edges": [
            {"classId": 2, "oid": 1, "from": 1, "to": 2, "attributes": {"LENGTH": 10.0}},
            {"classId": 2, "oid": 2, "from": 2, "to": 3, "attributes": {"LENGTH": 10.0}},
            {"classId": 2, "oid": 3, "from": 3, "to": 4, "attributes": {"LENGTH": 10.0}},
            {"classId": 2, "oid": 4, "from": 4, "to": 2, "attributes": {"LENGTH": 14.0}}
        ],
        "weights": [
            {"id": 1, "name": "Length", "type": "esriWTDouble",
             "weightAssociation": [{"fieldName": "LENGTH", "tableName": "Mains"}]}
        ]
    }],
    "layers": [
        {"id": 0, "name": "Nodes", "classId": 1},
        {"id": 1, "name": "Mains", "classId": 2}
    ]
}"#;

/// First network of a map fixture document
pub fn fixture_network(map: &str) -> InMemoryNetwork {
    MapFixture::from_json_str(map).unwrap().networks[0].build().unwrap()
}

/// Square stream 1 → 2 → 3 → 4 → 1, every reach of ORDER 1
///
/// ```text
///   4 (0,10) ◀──e3── 3 (10,10)
///      │                ▲
///      e4               e2
///      ▼                │
///   1 (0,0)  ──e1──▶ 2 (10,0)
/// ```
pub const STREAM_LOOP_MAP: &str = r#"{
    "networks": [{
        "name": "Stream_Loop",
        "classes": [
            {"classId": 1, "name": "Confluences", "featureType": "simpleJunction"},
            {"classId": 2, "name": "Reaches", "featureType": "simpleEdge", "fields": ["ORDER"]}
        ],
        "junctions": [
            {"classId": 1, "oid": 1, "x": 0.0, "y": 0.0},
            {"classId": 1, "oid": 2, "x": 10.0, "y": 0.0},
            {"classId": 1, "oid": 3, "x": 10.0, "y": 10.0},
            {"classId": 1, "oid": 4, "x": 0.0, "y": 10.0}
        ],
        "edges": [
            {"classId": 2, "oid": 1, "from": 1, "to": 2, "attributes": {"ORDER": 1}},
            {"classId": 2, "oid": 2, "from": 2, "to": 3, "attributes": {"ORDER": 1}},
            {"classId": 2, "oid": 3, "from": 3, "to": 4, "attributes": {"ORDER": 1}},
            {"classId": 2, "oid": 4, "from": 4, "to": 1, "attributes": {"ORDER": 1}}
        ]
    }]
}"#;

/// Two tributaries meeting at (10,0) and flowing on to (20,0)
///
/// e1 from (0,10) has ORDER 1, e2 from (0,-10) has ORDER 2 and e3 below
/// the confluence has ORDER 2. RANK is unreadable on both tributaries.
pub const CONFLUENCE_MAP: &str = r#"{
    "networks": [{
        "name": "Confluence",
        "classes": [
            {"classId": 1, "name": "Confluences", "featureType": "simpleJunction"},
            {"classId": 2, "name": "Reaches", "featureType": "simpleEdge", "fields": ["ORDER", "RANK"]}
        ],
        "junctions": [
            {"classId": 1, "oid": 1, "x": 0.0, "y": 10.0},
            {"classId": 1, "oid": 2, "x": 0.0, "y": -10.0},
            {"classId": 1, "oid": 3, "x": 10.0, "y": 0.0},
            {"classId": 1, "oid": 4, "x": 20.0, "y": 0.0}
        ],
        "edges": [
            {"classId": 2, "oid": 1, "from": 1, "to": 3, "attributes": {"ORDER": 1, "RANK": "n/a"}},
            {"classId": 2, "oid": 2, "from": 2, "to": 3, "attributes": {"ORDER": 2, "RANK": "n/a"}},
            {"classId": 2, "oid": 3, "from": 3, "to": 4, "attributes": {"ORDER": 2, "RANK": 1}}
        ]
    }]
}"#;
