//! `Info` and `Help` resources

use crate::config::ServiceConfig;
use serde_json::{json, Value};

const POINTS: &str = "array of point geometries {x, y}";
const FEATURES: &str = "array of feature sets, one per feature class";

/// Package identity and enabled operations
pub fn info_json(config: &ServiceConfig) -> Value {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "operations": config
            .capabilities
            .enabled()
            .iter()
            .map(|c| c.operation_name())
            .collect::<Vec<_>>(),
    })
}

/// Input and output description of every operation
pub fn help_json() -> Value {
    json!({
        "Resources": {
            "GeometricNetworks": "A list of geometric networks in the map. Operations return 'hasError' = true and 'errorDescription' (string) if there is an error."
        },
        "Operations": {
            "TraceNetwork": {
                "Info": "Trace network from edge and/or junction flags.",
                "Inputs": {
                    "traceSolverType": "(string) FindAccumulation or FindCircuits or FindCommonAncestors or FindFlowElements or FindFlowEndElements or FindFlowUnreachedElements or FindPath or FindSource or FindLongest",
                    "flowMethod": "(string) esriFMConnected, esriFMUpstream or esriFMDownstream. Not used by FindCircuits, FindCommonAncestors and FindLongest",
                    "flowElements": "(string) esriFEJunctions, esriFEEdges, esriFEJunctionsAndEdges or esriFENone",
                    "edgeFlags": POINTS,
                    "junctionFlags": POINTS,
                    "edgeBarriers": POINTS,
                    "junctionBarriers": POINTS,
                    "maxTracedFeatures": "max number of edges or junctions that can be returned",
                    "tolerance": "in map units to search for flag or barrier",
                    "traceIndeterminateFlow": "boolean (optional)",
                    "shortestPathObjFn": "esriSPObjFnMinSum or esriSPObjFnMinMax. Required for FindSource, optional for FindPath",
                    "disableLayers": "array of int. Id of layers (optional)",
                    "outFields": "list of fields in result ('*' for all fields). This list is common for all feature classes in the geometric network.",
                    "junctionWeight": "(optional)",
                    "fromToEdgeWeight": "(optional)",
                    "toFromEdgeWeight": "(optional)",
                    "junctionFilterWeight": "(optional)",
                    "junctionFilterRanges": "(optional) from-to ranges, e.g. 1-5,8",
                    "junctionFilterNotOperator": "boolean (optional)",
                    "fromToEdgeFilterWeight": "(optional)",
                    "toFromEdgeFilterWeight": "(optional)",
                    "edgeFilterRanges": "(optional) from-to ranges, e.g. 1-5,8",
                    "edgeFilterNotOperator": "boolean (optional)"
                },
                "Outputs": {
                    "barriersNotFound": POINTS,
                    "flagsNotFound": POINTS,
                    "edges": FEATURES,
                    "junctions": FEATURES,
                    "totalCost": "(double) FindAccumulation and FindLongest only",
                    "segmentCosts": "array of double, FindPath and FindSource only"
                }
            },
            "IsolateValve": {
                "Info": "Valves to close so that no station feeds the flagged location.",
                "Inputs": {
                    "stationLayerId": "(int) Id of station layer",
                    "valveLayerId": "(int) Id of valve layer",
                    "flowElements": "(string) esriFEJunctions, esriFEEdges, esriFEJunctionsAndEdges or esriFENone",
                    "edgeFlags": POINTS,
                    "junctionFlags": POINTS,
                    "edgeBarriers": "not used",
                    "junctionBarriers": "not used",
                    "maxTracedFeatures": "max number of edges or junctions that can be returned",
                    "tolerance": "in map units to search for flag",
                    "outFields": "list of fields in result ('*' for all fields). This list is common for all feature classes in the geometric network."
                },
                "Outputs": {
                    "flagsNotFound": POINTS,
                    "edges": FEATURES,
                    "junctions": FEATURES,
                    "valves": "feature set of the valves to close"
                }
            },
            "TraceNetworkPosAlong": {
                "Info": "Position along the geometric network. Requirements: simple edges, flow defined and digitized in the direction of flow",
                "Inputs": {
                    "edgeFlags": "array with exactly one point geometry {x, y}",
                    "length": "(double) distance from the edge flag along the network. Negative walks upstream, positive downstream",
                    "fieldLevel": "(string) edge field holding the Strahler stream order. Required upstream, and downstream when sameOrder = true",
                    "offset": "(double, optional) offset from the network, positive to the right",
                    "tolerance": "in map units to search for flag",
                    "sameOrder": "(bool, optional, default false) stop when the stream order of the start edge changes"
                },
                "Outputs": {
                    "geometry": "polyline or point geometry",
                    "message": "(string) set when length exceeds the stream",
                    "flagsNotFound": POINTS
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Capabilities;

    #[test]
    fn test_help_lists_every_operation() {
        let help = help_json();
        let operations = help["Operations"].as_object().unwrap();
        assert_eq!(operations.len(), 3);
        assert!(operations["TraceNetwork"]["Inputs"].get("edgeFilterNotOperator").is_some());
    }

    #[test]
    fn test_info_reflects_capabilities() {
        let config = ServiceConfig::default().with_capabilities(Capabilities {
            isolate_valve: false,
            ..Capabilities::default()
        });
        let info = info_json(&config);
        assert_eq!(info["name"], json!("geonet-trace"));
        assert_eq!(info["operations"], json!(["TraceNetwork", "TraceNetworkPosAlong"]));
    }
}
