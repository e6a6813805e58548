//! TraceNetwork solver modes over the water network

mod common;

use common::*;
use geonet_trace::config::LocaleConfig;
use geonet_trace::features::flags::FlagInputs;
use geonet_trace::features::trace::{TraceMode, TraceOrchestrator, TraceOutcome, TraceRequest};
use geonet_trace::shared::models::{FlowElements, FlowMethod, ShortestPathObjFn};
use geonet_trace::{GeonetError, Result};
use pretty_assertions::assert_eq;

fn junction_flags(points: &[(f64, f64)]) -> FlagInputs {
    FlagInputs {
        junction_flags: points.iter().copied().map(point).collect(),
        ..FlagInputs::default()
    }
}

fn solve(request: &TraceRequest) -> Result<TraceOutcome> {
    let network = water_network();
    TraceOrchestrator::new(&network, &LocaleConfig::default()).solve(request)
}

fn flow(flow_method: FlowMethod) -> TraceMode {
    TraceMode::FindFlowElements { flow_method }
}

// ═══════════════════════════════════════════════════════════════════════════
// Reachability modes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_downstream_flow_elements() {
    let request = TraceRequest::new(
        flow(FlowMethod::Downstream),
        FlowElements::JunctionsAndEdges,
        junction_flags(&[V1]),
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.junctions, Some(vec![2, 3, 4, 5, 6, 7]));
    assert_eq!(outcome.solved.elements.edges, Some(vec![2, 3, 4, 5, 6]));

    let junctions = outcome.features.junctions.as_deref().unwrap();
    assert_eq!(
        set_oids(junctions),
        vec![(VALVES, vec![1, 2]), (NODES, vec![1, 2, 3]), (STATIONS, vec![2])]
    );
    let edges = outcome.features.edges.as_deref().unwrap();
    assert_eq!(set_oids(edges), vec![(MAINS, vec![2, 3, 4, 5, 6])]);
    assert!(outcome.flags_not_found.is_empty());
}

#[test]
fn test_upstream_edges_only() {
    let request = TraceRequest::new(flow(FlowMethod::Upstream), FlowElements::Edges, junction_flags(&[N2]));
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2, 3, 4]));
    assert_eq!(outcome.solved.elements.junctions, None);
    assert!(outcome.features.junctions.is_none());

    let json = outcome.to_json();
    assert!(json.get("junctions").is_none());
    assert_eq!(json_oids(&json, "edges"), vec![(MAINS as i64, vec![1, 2, 3, 4])]);
}

#[test]
fn test_junction_barrier_stops_connected_trace() {
    let mut inputs = junction_flags(&[S1]);
    inputs.junction_barriers = vec![point(N1)];
    let request = TraceRequest::new(flow(FlowMethod::Connected), FlowElements::JunctionsAndEdges, inputs);
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.junctions, Some(vec![1, 2]));
    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2]));
    assert!(outcome.barriers_not_found.is_empty());
}

#[test]
fn test_edge_barrier_blocks_one_branch() {
    let mut inputs = junction_flags(&[V1]);
    inputs.edge_barriers = vec![point((25.0, 0.0))];
    let request = TraceRequest::new(flow(FlowMethod::Downstream), FlowElements::JunctionsAndEdges, inputs);
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![2, 5, 6]));
    assert_eq!(outcome.solved.elements.junctions, Some(vec![2, 3, 6, 7]));
}

#[test]
fn test_unreached_elements_exclude_barrier() {
    let mut inputs = junction_flags(&[S1]);
    inputs.junction_barriers = vec![point(N1)];
    let request = TraceRequest::new(
        TraceMode::FindFlowUnreachedElements {
            flow_method: FlowMethod::Connected,
        },
        FlowElements::JunctionsAndEdges,
        inputs,
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.junctions, Some(vec![4, 5, 6, 7]));
    assert_eq!(outcome.solved.elements.edges, Some(vec![3, 4, 5, 6]));
}

#[test]
fn test_downstream_end_elements() {
    let request = TraceRequest::new(
        TraceMode::FindFlowEndElements {
            flow_method: FlowMethod::Downstream,
        },
        FlowElements::JunctionsAndEdges,
        junction_flags(&[V1]),
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.junctions, Some(vec![5, 7]));
    assert_eq!(outcome.solved.elements.edges, Some(vec![4, 6]));
}

#[test]
fn test_disabled_class_blocks_traversal() {
    let mut request = TraceRequest::new(
        flow(FlowMethod::Connected),
        FlowElements::JunctionsAndEdges,
        junction_flags(&[S1]),
    );
    request.disabled_classes = vec![VALVES];
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.junctions, Some(vec![1]));
    assert_eq!(outcome.solved.elements.edges, Some(vec![1]));
}

#[test]
fn test_edge_filter_keeps_large_mains() {
    let mut request = TraceRequest::new(
        flow(FlowMethod::Connected),
        FlowElements::JunctionsAndEdges,
        junction_flags(&[S1]),
    );
    request.weights.from_to_edge_filter_weight = Some("Diameter".into());
    request.weights.to_from_edge_filter_weight = Some("Diameter".into());
    request.weights.edge_filter_ranges = Some("150-300".into());
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2]));
    assert_eq!(outcome.solved.elements.junctions, Some(vec![1, 2, 3]));
}

#[test]
fn test_accumulation_sums_traversed_weights() {
    let mut request = TraceRequest::new(
        TraceMode::FindAccumulation {
            flow_method: FlowMethod::Downstream,
        },
        FlowElements::Edges,
        junction_flags(&[V1]),
    );
    request.weights.from_to_edge_weight = Some("Length".into());
    let outcome = solve(&request).unwrap();

    assert_close(outcome.solved.total_cost.unwrap(), 50.0);
    assert_eq!(outcome.to_json()["totalCost"], serde_json::json!(50.0));
}

#[test]
fn test_common_ancestors() {
    let request = TraceRequest::new(
        TraceMode::FindCommonAncestors,
        FlowElements::JunctionsAndEdges,
        junction_flags(&[N2, S2]),
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.junctions, Some(vec![1, 2, 3]));
    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2]));
}

#[test]
fn test_tree_has_no_circuits() {
    let request = TraceRequest::new(TraceMode::FindCircuits, FlowElements::Edges, junction_flags(&[S1]));
    let outcome = solve(&request).unwrap();
    assert_eq!(outcome.solved.elements.edges, Some(vec![]));
    assert_eq!(outcome.features.edges, Some(vec![]));
}

// ═══════════════════════════════════════════════════════════════════════════
// Paths
// ═══════════════════════════════════════════════════════════════════════════

fn find_path(objective: ShortestPathObjFn) -> TraceMode {
    TraceMode::FindPath {
        flow_method: FlowMethod::Connected,
        objective,
    }
}

#[test]
fn test_find_path_between_junction_flags() {
    let mut request = TraceRequest::new(
        find_path(ShortestPathObjFn::MinSum),
        FlowElements::JunctionsAndEdges,
        junction_flags(&[S1, N2]),
    );
    request.weights.from_to_edge_weight = Some("Length".into());
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2, 3, 4]));
    assert_eq!(outcome.solved.elements.junctions, Some(vec![1, 2, 3, 4, 5]));
    assert_eq!(outcome.solved.segment_costs, Some(vec![Some(40.0)]));
}

#[test]
fn test_find_path_one_segment_per_consecutive_pair() {
    let request = TraceRequest::new(
        find_path(ShortestPathObjFn::MinMax),
        FlowElements::Edges,
        junction_flags(&[S1, N2, S2]),
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2, 3, 4, 5, 6]));
    assert_eq!(outcome.solved.segment_costs, Some(vec![Some(4.0), Some(4.0)]));
}

#[test]
fn test_find_path_without_route_reports_null_cost() {
    let mut inputs = junction_flags(&[S1, N2]);
    inputs.junction_barriers = vec![point(N1)];
    let request = TraceRequest::new(find_path(ShortestPathObjFn::MinSum), FlowElements::Edges, inputs);
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![]));
    assert_eq!(outcome.to_json()["segmentCosts"], serde_json::json!([null]));
}

#[test]
fn test_find_path_needs_two_resolved_flags() {
    let request = TraceRequest::new(
        find_path(ShortestPathObjFn::MinSum),
        FlowElements::Edges,
        junction_flags(&[S1, (500.0, 500.0)]),
    );
    let err = solve(&request).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Edge or junction found < 2!");
}

#[test]
fn test_find_path_single_flag_rejected_before_solving() {
    let request = TraceRequest::new(
        find_path(ShortestPathObjFn::MinSum),
        FlowElements::Edges,
        junction_flags(&[S1]),
    );
    let err = solve(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "FindPath: the flags junction you place on the network must be > 1."
    );
}

#[test]
fn test_find_source_upstream() {
    let request = TraceRequest::new(
        TraceMode::FindSource {
            flow_method: FlowMethod::Upstream,
            objective: ShortestPathObjFn::MinSum,
        },
        FlowElements::JunctionsAndEdges,
        junction_flags(&[N2]),
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2, 3, 4]));
    assert_eq!(outcome.solved.segment_costs, Some(vec![Some(4.0)]));
}

#[test]
fn test_find_source_downstream_reaches_south_station() {
    let request = TraceRequest::new(
        TraceMode::FindSource {
            flow_method: FlowMethod::Downstream,
            objective: ShortestPathObjFn::MinSum,
        },
        FlowElements::Edges,
        junction_flags(&[V1]),
    );
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![2, 5, 6]));
    assert_eq!(outcome.solved.segment_costs, Some(vec![Some(3.0)]));
}

#[test]
fn test_find_longest_upstream() {
    let mut request = TraceRequest::new(TraceMode::FindLongest, FlowElements::Edges, junction_flags(&[N2]));
    request.weights.from_to_edge_weight = Some("Length".into());
    let outcome = solve(&request).unwrap();

    assert_eq!(outcome.solved.elements.edges, Some(vec![1, 2, 3, 4]));
    assert_close(outcome.solved.total_cost.unwrap(), 40.0);
}

#[test]
fn test_find_longest_from_headwater_has_no_end_junction() {
    let request = TraceRequest::new(TraceMode::FindLongest, FlowElements::Edges, junction_flags(&[S1]));
    let err = solve(&request).unwrap_err();
    assert!(matches!(err, GeonetError::NoEndJunctionFound));
}

#[test]
fn test_find_longest_requires_one_junction_flag() {
    let request = TraceRequest::new(TraceMode::FindLongest, FlowElements::Edges, junction_flags(&[N2, S2]));
    let err = solve(&request).unwrap_err();
    assert!(err.is_validation());
}

// ═══════════════════════════════════════════════════════════════════════════
// Limits and flag diagnostics
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_zero_limit_rejects_non_empty_result() {
    let mut request = TraceRequest::new(flow(FlowMethod::Downstream), FlowElements::Edges, junction_flags(&[V1]));
    request.max_features = 0;
    let err = solve(&request).unwrap_err();
    assert!(matches!(err, GeonetError::TraceLimitExceeded { count: 5, limit: 0 }));
}

#[test]
fn test_limit_applies_per_category() {
    let mut request = TraceRequest::new(
        flow(FlowMethod::Downstream),
        FlowElements::JunctionsAndEdges,
        junction_flags(&[V1]),
    );
    request.max_features = 5;
    let err = solve(&request).unwrap_err();
    assert!(matches!(err, GeonetError::TraceLimitExceeded { count: 6, limit: 5 }));
}

#[test]
fn test_unsnapped_flags_are_reported() {
    let mut request = TraceRequest::new(
        flow(FlowMethod::Downstream),
        FlowElements::Edges,
        junction_flags(&[V1, (500.0, 500.0)]),
    );
    request.tolerance = 1.0;
    let outcome = solve(&request).unwrap();
    assert_eq!(outcome.flags_not_found, vec![point((500.0, 500.0))]);
    assert_eq!(outcome.to_json()["flagsNotFound"], serde_json::json!([{"x": 500.0, "y": 500.0}]));
}

#[test]
fn test_no_valid_flags() {
    let request = TraceRequest::new(
        flow(FlowMethod::Downstream),
        FlowElements::Edges,
        junction_flags(&[(500.0, 500.0)]),
    );
    let err = solve(&request).unwrap_err();
    assert!(matches!(err, GeonetError::NoValidFlags { ref flags_not_found, .. } if flags_not_found.len() == 1));
}

#[test]
fn test_tolerance_snaps_nearby_flag() {
    let mut request = TraceRequest::new(
        flow(FlowMethod::Downstream),
        FlowElements::Junctions,
        junction_flags(&[(40.5, 0.4)]),
    );
    request.tolerance = 1.0;
    let outcome = solve(&request).unwrap();
    assert_eq!(outcome.solved.elements.junctions, Some(vec![5]));
}
