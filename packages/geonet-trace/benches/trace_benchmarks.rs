//! Trace benchmarks
//!
//! Square grid networks with mains digitized east and north, flagged at the
//! south-west corner:
//! - Flow traversal directly on the solver
//! - Full TraceNetwork operations (snap, solve, materialize)
//! - Valve isolation on a grid with a valve every few junctions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geonet_trace::adapters::memory::{FlowDirection, InMemoryFlowSolver, InMemoryNetwork, JunctionRole};
use geonet_trace::config::ServiceConfig;
use geonet_trace::features::flags::FlagInputs;
use geonet_trace::features::network_info::{MapCatalog, MapLayer};
use geonet_trace::features::valve_isolation::{IsolationRequest, ValveIsolationSolver};
use geonet_trace::shared::models::{
    FeatureType, FieldValue, Flag, FlowElements, FlowMethod, NetworkElementRef, Point, SpatialReference, UserIds,
};
use geonet_trace::shared::ports::FlowSolver;
use geonet_trace::GeometricNetworkService;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

const NODES: i32 = 1;
const VALVES: i32 = 2;
const MAINS: i32 = 3;
const STATIONS: i32 = 4;

/// `size` x `size` grid, 10 units apart, fed by a station in the south-west
/// corner; every `valve_every`-th junction is a valve
fn grid(size: i32, valve_every: i32) -> InMemoryNetwork {
    let mut builder = InMemoryNetwork::builder("Grid", SpatialReference::from_wkid(3003));
    builder
        .add_class(NODES, "Nodes", FeatureType::SimpleJunction, &[])
        .add_class(VALVES, "Valves", FeatureType::SimpleJunction, &[])
        .add_class(MAINS, "Mains", FeatureType::SimpleEdge, &["LENGTH"])
        .add_class(STATIONS, "Stations", FeatureType::SimpleJunction, &[]);

    let mut eids = Vec::with_capacity((size * size) as usize);
    for row in 0..size {
        for col in 0..size {
            let index = row * size + col;
            let (class, role) = if index == 0 {
                (STATIONS, JunctionRole::Source)
            } else if valve_every > 0 && index % valve_every == valve_every - 1 {
                (VALVES, JunctionRole::None)
            } else {
                (NODES, JunctionRole::None)
            };
            let point = Point::new(col as f64 * 10.0, row as f64 * 10.0);
            let eid = builder
                .add_junction(class, index + 1, point, role, BTreeMap::new())
                .expect("grid junction");
            eids.push(eid);
        }
    }

    let length = || BTreeMap::from([("LENGTH".to_string(), FieldValue::Double(10.0))]);
    let mut oid = 1;
    for row in 0..size {
        for col in 0..size {
            let here = eids[(row * size + col) as usize];
            if col + 1 < size {
                let east = eids[(row * size + col + 1) as usize];
                builder
                    .add_edge(MAINS, oid, here, east, None, FlowDirection::WithDigitized, length())
                    .expect("grid main");
                oid += 1;
            }
            if row + 1 < size {
                let north = eids[((row + 1) * size + col) as usize];
                builder
                    .add_edge(MAINS, oid, here, north, None, FlowDirection::WithDigitized, length())
                    .expect("grid main");
                oid += 1;
            }
        }
    }
    builder.build()
}

fn corner_flag() -> Flag {
    Flag::new(
        NetworkElementRef::junction(1),
        UserIds {
            class_id: STATIONS,
            feature_id: 1,
            sub_id: 0,
        },
    )
}

// ============================================================================
// Solver
// ============================================================================

fn bench_flow_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_flow_elements");

    for size in [10, 30, 60] {
        let network = grid(size, 0);
        group.throughput(Throughput::Elements(network.junction_count() as u64));
        for method in [FlowMethod::Connected, FlowMethod::Downstream] {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), size),
                &network,
                |b, network| {
                    b.iter(|| {
                        let mut solver = InMemoryFlowSolver::new(network);
                        solver.put_junction_origins(&[corner_flag()]);
                        black_box(solver.find_flow_elements(method, FlowElements::JunctionsAndEdges))
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_find_circuits(c: &mut Criterion) {
    let network = grid(30, 0);
    c.bench_function("find_circuits/30", |b| {
        b.iter(|| {
            let mut solver = InMemoryFlowSolver::new(&network);
            solver.put_junction_origins(&[corner_flag()]);
            black_box(solver.find_circuits(FlowElements::Edges))
        });
    });
}

// ============================================================================
// Operations
// ============================================================================

fn service(network: InMemoryNetwork) -> GeometricNetworkService {
    let catalog = MapCatalog::new()
        .with_network(Arc::new(network))
        .with_layer(MapLayer {
            id: 0,
            name: "Nodes".into(),
            class_id: NODES,
        })
        .with_layer(MapLayer {
            id: 1,
            name: "Valves".into(),
            class_id: VALVES,
        });
    GeometricNetworkService::new(catalog, ServiceConfig::default())
}

fn bench_trace_operation(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_network_operation");
    group.sample_size(30);

    for size in [10, 30] {
        let service = service(grid(size, 0));
        for solver in ["FindFlowElements", "FindPath"] {
            let input = json!({
                "traceSolverType": solver,
                "flowMethod": "esriFMConnected",
                "flowElements": "esriFEJunctionsAndEdges",
                "junctionFlags": [{"x": 0.0, "y": 0.0}, {"x": (size - 1) as f64 * 10.0, "y": (size - 1) as f64 * 10.0}],
                "outFields": "OBJECTID",
                "maxTracedFeatures": 100_000,
                "tolerance": 1.0
            });
            group.bench_with_input(BenchmarkId::new(solver, size), &input, |b, input| {
                b.iter(|| black_box(service.handle_operation("1", "TraceNetwork", input)));
            });
        }
    }

    group.finish();
}

fn bench_valve_isolation(c: &mut Criterion) {
    let network = grid(12, 5);
    let request = IsolationRequest::new(
        STATIONS,
        VALVES,
        FlowElements::JunctionsAndEdges,
        FlagInputs {
            junction_flags: vec![Point::new(60.0, 60.0)],
            ..FlagInputs::default()
        },
    );
    c.bench_function("isolate_valve/12", |b| {
        b.iter(|| black_box(ValveIsolationSolver::new(&network).solve(&request)));
    });
}

criterion_group!(
    benches,
    bench_flow_elements,
    bench_find_circuits,
    bench_trace_operation,
    bench_valve_isolation
);
criterion_main!(benches);
