//! Operation input decoding
//!
//! Operation inputs arrive as a JSON object. Decoding follows the host
//! server's rules: a key holding `null` or an empty string counts as absent,
//! and every rejection is a [`GeonetError::Validation`] naming the offending
//! parameter.

use crate::errors::{GeonetError, Result};
use crate::features::flags::FlagInputs;
use crate::features::materialize::OutFields;
use crate::features::network_info::MapCatalog;
use crate::features::position_along::PosAlongRequest;
use crate::features::trace::{TraceMode, TraceRequest};
use crate::features::valve_isolation::IsolationRequest;
use crate::features::weights::WeightRequest;
use crate::shared::models::{
    point_from_json, FlowElements, FlowMethod, Point, ShortestPathObjFn, TraceSolverType,
};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Borrowed view over an operation input object
#[derive(Debug, Clone, Copy)]
pub struct OperationInput<'a> {
    values: &'a Map<String, Value>,
}

impl<'a> OperationInput<'a> {
    pub fn new(values: &'a Map<String, Value>) -> Self {
        Self { values }
    }

    /// Wrap any JSON value; non-objects decode as an empty input
    pub fn from_value(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| GeonetError::validation("operation input must be a JSON object"))
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.values.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value),
        }
    }

    /// Present parameter read by `read`; a value it rejects is `"{key} not valid"`
    fn typed<T>(&self, key: &str, read: impl FnOnce(&'a Value) -> Option<T>) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => read(value).map(Some).ok_or_else(|| invalid(key)),
        }
    }

    fn string(&self, key: &str) -> Result<Option<&'a str>> {
        self.typed(key, Value::as_str)
    }

    fn integer(&self, key: &str) -> Result<Option<i64>> {
        self.typed(key, |value| match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    fn double(&self, key: &str) -> Result<Option<f64>> {
        self.typed(key, |value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>> {
        self.typed(key, |value| match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        })
    }

    /// Wire enum parameter: `"{key} not specified"` / `"{key} not valid"`
    fn required_enum<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self
            .string(key)?
            .ok_or_else(|| GeonetError::validation(format!("{} not specified", key)))?;
        T::from_str(raw).map_err(|_| invalid(key))
    }

    /// Array of points; absent means empty
    pub fn points(&self, key: &str) -> Result<Vec<Point<f64>>> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        let items = value
            .as_array()
            .ok_or_else(|| GeonetError::validation(format!("invalid {}", key)))?;
        items
            .iter()
            .map(|item| point_from_json(item).ok_or_else(|| GeonetError::validation(format!("invalid {}", key))))
            .collect()
    }

    fn flag_inputs(&self) -> Result<FlagInputs> {
        let inputs = FlagInputs {
            edge_flags: self.points("edgeFlags")?,
            junction_flags: self.points("junctionFlags")?,
            edge_barriers: self.points("edgeBarriers")?,
            junction_barriers: self.points("junctionBarriers")?,
        };
        if inputs.flag_count() == 0 {
            return Err(GeonetError::validation("edgeFlags and/or junctionFlags not found"));
        }
        Ok(inputs)
    }

    fn max_features(&self) -> Result<usize> {
        match self.integer("maxTracedFeatures") {
            Ok(Some(n)) if (0..=i32::MAX as i64).contains(&n) => Ok(n as usize),
            _ => Err(GeonetError::validation("invalid maxTracedFeatures")),
        }
    }

    fn tolerance(&self) -> Result<f64> {
        match self.double("tolerance") {
            Ok(Some(t)) if t >= 0.0 && t.is_finite() => Ok(t),
            _ => Err(GeonetError::validation("invalid tolerance")),
        }
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.string(key)?.map(String::from))
    }

    fn flag(&self, key: &str) -> Result<bool> {
        Ok(self.boolean(key)?.unwrap_or(false))
    }

    /// Layer id parameter mapped to its feature class
    fn layer_id(&self, key: &str) -> Result<i32> {
        let id = self
            .integer(key)?
            .ok_or_else(|| GeonetError::validation(format!("{} not specified", key)))?;
        i32::try_from(id).map_err(|_| invalid(key))
    }

    fn weights(&self) -> Result<WeightRequest> {
        Ok(WeightRequest {
            junction_weight: self.optional_string("junctionWeight")?,
            from_to_edge_weight: self.optional_string("fromToEdgeWeight")?,
            to_from_edge_weight: self.optional_string("toFromEdgeWeight")?,
            junction_filter_weight: self.optional_string("junctionFilterWeight")?,
            junction_filter_ranges: self.optional_string("junctionFilterRanges")?,
            junction_filter_not_operator: self.flag("junctionFilterNotOperator")?,
            from_to_edge_filter_weight: self.optional_string("fromToEdgeFilterWeight")?,
            to_from_edge_filter_weight: self.optional_string("toFromEdgeFilterWeight")?,
            edge_filter_ranges: self.optional_string("edgeFilterRanges")?,
            edge_filter_not_operator: self.flag("edgeFilterNotOperator")?,
        })
    }

    fn disabled_classes(&self, catalog: &MapCatalog) -> Result<Vec<i32>> {
        let Some(value) = self.get("disableLayers") else {
            return Ok(Vec::new());
        };
        let invalid_layers = || GeonetError::validation("invalid disableLayers");
        let layers = value.as_array().ok_or_else(invalid_layers)?;
        layers
            .iter()
            .map(|layer| {
                layer
                    .as_i64()
                    .and_then(|id| i32::try_from(id).ok())
                    .and_then(|id| catalog.class_for_layer(id))
                    .ok_or_else(invalid_layers)
            })
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Requests
    // ═══════════════════════════════════════════════════════════════════════

    /// `TraceNetwork` input
    pub fn trace_request(&self, catalog: &MapCatalog) -> Result<TraceRequest> {
        let solver_type: TraceSolverType = self.required_enum("traceSolverType")?;
        let flow_method: Option<FlowMethod> = if solver_type.ignores_flow_method() {
            None
        } else {
            Some(self.required_enum("flowMethod")?)
        };
        let flow_elements: FlowElements = self.required_enum("flowElements")?;
        let inputs = self.flag_inputs()?;

        let objective: Option<ShortestPathObjFn> = match solver_type {
            TraceSolverType::FindSource => Some(self.required_enum("shortestPathObjFn")?),
            TraceSolverType::FindPath => self
                .string("shortestPathObjFn")?
                .map(|raw| ShortestPathObjFn::from_str(raw).map_err(|_| invalid("shortestPathObjFn")))
                .transpose()?,
            _ => None,
        };
        let mode = TraceMode::from_parts(solver_type, flow_method, objective)?;

        let mut request = TraceRequest::new(mode, flow_elements, inputs);
        request.out_fields = self.string("outFields")?.map_or(OutFields::All, OutFields::parse);
        request.max_features = self.max_features()?;
        request.tolerance = self.tolerance()?;
        request.trace_indeterminate_flow = self.flag("traceIndeterminateFlow")?;
        request.disabled_classes = self.disabled_classes(catalog)?;
        request.weights = self.weights()?;
        request.validate()?;
        Ok(request)
    }

    /// `IsolateValve` input
    pub fn isolation_request(&self, catalog: &MapCatalog) -> Result<IsolationRequest> {
        let station_layer = self.layer_id("stationLayerId")?;
        let valve_layer = self.layer_id("valveLayerId")?;
        let flow_elements: FlowElements = self.required_enum("flowElements")?;
        let inputs = self.flag_inputs()?;
        let out_fields = match self.string("outFields") {
            Ok(Some(fields)) => OutFields::parse(fields),
            _ => return Err(GeonetError::validation("invalid outFields")),
        };
        let max_features = self.max_features()?;
        let tolerance = self.tolerance()?;

        let station_class = catalog
            .class_for_layer(station_layer)
            .ok_or_else(|| GeonetError::not_found("Unable to find station layer"))?;
        let valve_class = catalog
            .class_for_layer(valve_layer)
            .ok_or_else(|| GeonetError::not_found("Unable to find valve layer"))?;

        let mut request = IsolationRequest::new(station_class, valve_class, flow_elements, inputs);
        request.out_fields = out_fields;
        request.max_features = max_features;
        request.tolerance = tolerance;
        request.validate()?;
        Ok(request)
    }

    /// `TraceNetworkPosAlong` input
    pub fn pos_along_request(&self) -> Result<PosAlongRequest> {
        let edge_flags = self.points("edgeFlags")?;
        if edge_flags.len() != 1 {
            return Err(GeonetError::validation("edgeFlags != 1"));
        }
        let length = match self.double("length") {
            Ok(Some(length)) => length,
            Ok(None) => return Err(GeonetError::validation("distance not specified")),
            Err(_) => return Err(GeonetError::validation("distance not valid")),
        };

        let mut request = PosAlongRequest::new(edge_flags[0], length);
        request.same_order = self.flag("sameOrder")?;
        if request.needs_field_level() {
            request.field_level = self.optional_string("fieldLevel")?;
        }
        request.offset = self.double("offset")?.filter(|offset| offset.is_finite());
        request.tolerance = self.tolerance()?;
        request.validate()?;
        Ok(request)
    }
}

fn invalid(key: &str) -> GeonetError {
    GeonetError::validation(format!("{} not valid", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::network_info::MapLayer;
    use serde_json::json;

    fn catalog() -> MapCatalog {
        MapCatalog::new()
            .with_layer(MapLayer {
                id: 0,
                name: "Stations".into(),
                class_id: 11,
            })
            .with_layer(MapLayer {
                id: 1,
                name: "Valves".into(),
                class_id: 12,
            })
    }

    fn parse_trace(input: Value) -> Result<TraceRequest> {
        OperationInput::from_value(&input)?.trace_request(&catalog())
    }

    fn base_trace() -> Value {
        json!({
            "traceSolverType": "FindFlowElements",
            "flowMethod": "esriFMDownstream",
            "flowElements": "esriFEEdges",
            "junctionFlags": [{"x": 1.0, "y": 2.0}],
            "maxTracedFeatures": 100,
            "tolerance": 5
        })
    }

    fn message(result: Result<impl std::fmt::Debug>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_trace_request_defaults() {
        let request = parse_trace(base_trace()).unwrap();
        assert_eq!(
            request.mode,
            TraceMode::FindFlowElements {
                flow_method: FlowMethod::Downstream
            }
        );
        assert_eq!(request.out_fields, OutFields::All);
        assert_eq!(request.max_features, 100);
        assert!(!request.trace_indeterminate_flow);
        assert!(request.disabled_classes.is_empty());
    }

    #[test]
    fn test_trace_solver_type_messages() {
        let mut input = base_trace();
        input["traceSolverType"] = Value::Null;
        assert_eq!(message(parse_trace(input.clone())), "traceSolverType not specified");
        input["traceSolverType"] = json!("FindEverything");
        assert_eq!(message(parse_trace(input)), "traceSolverType not valid");
    }

    #[test]
    fn test_flow_method_skipped_for_circuits() {
        let mut input = base_trace();
        input["traceSolverType"] = json!("FindCircuits");
        input["flowMethod"] = json!("bogus");
        assert_eq!(parse_trace(input).unwrap().mode, TraceMode::FindCircuits);

        let mut input = base_trace();
        input["flowMethod"] = json!("bogus");
        assert_eq!(message(parse_trace(input)), "flowMethod not valid");
    }

    #[test]
    fn test_find_source_requires_objective() {
        let mut input = base_trace();
        input["traceSolverType"] = json!("FindSource");
        assert_eq!(message(parse_trace(input.clone())), "shortestPathObjFn not specified");
        input["shortestPathObjFn"] = json!("esriSPObjFnMinSum");
        assert!(parse_trace(input).is_ok());
    }

    #[test]
    fn test_numeric_limits() {
        let mut input = base_trace();
        input["maxTracedFeatures"] = json!(3_000_000_000i64);
        assert_eq!(message(parse_trace(input)), "invalid maxTracedFeatures");

        let mut input = base_trace();
        input["tolerance"] = json!(-1);
        assert_eq!(message(parse_trace(input)), "invalid tolerance");
    }

    #[test]
    fn test_mistyped_parameters_name_the_key() {
        let mut input = base_trace();
        input["traceIndeterminateFlow"] = json!("maybe");
        assert_eq!(message(parse_trace(input)), "traceIndeterminateFlow not valid");

        let mut input = base_trace();
        input["outFields"] = json!(5);
        assert_eq!(message(parse_trace(input)), "outFields not valid");

        let mut input = base_trace();
        input["traceIndeterminateFlow"] = json!("TRUE");
        assert!(parse_trace(input).unwrap().trace_indeterminate_flow);

        let parse = |input: Value| OperationInput::from_value(&input).unwrap().pos_along_request();
        let flag = json!([{"x": 0.0, "y": 0.0}]);
        assert_eq!(
            message(parse(json!({"edgeFlags": flag, "length": "far", "tolerance": 1}))),
            "distance not valid"
        );
        assert_eq!(
            message(parse(json!({"edgeFlags": flag, "length": 5, "tolerance": 1, "offset": [1]}))),
            "offset not valid"
        );
    }

    #[test]
    fn test_disable_layers_map_to_classes() {
        let mut input = base_trace();
        input["disableLayers"] = json!([1, 0]);
        assert_eq!(parse_trace(input).unwrap().disabled_classes, vec![12, 11]);

        let mut input = base_trace();
        input["disableLayers"] = json!([7]);
        assert_eq!(message(parse_trace(input)), "invalid disableLayers");
    }

    #[test]
    fn test_invalid_point_in_barriers() {
        let mut input = base_trace();
        input["edgeBarriers"] = json!([{"x": 1.0}]);
        assert_eq!(message(parse_trace(input)), "invalid edgeBarriers");
    }

    #[test]
    fn test_isolation_layers_and_out_fields() {
        let input = json!({
            "stationLayerId": 0,
            "valveLayerId": 1,
            "flowElements": "esriFEJunctionsAndEdges",
            "edgeFlags": [{"x": 0.0, "y": 0.0}],
            "outFields": "OBJECTID,DIAMETER",
            "maxTracedFeatures": 10,
            "tolerance": 1.5
        });
        let request = OperationInput::from_value(&input).unwrap().isolation_request(&catalog()).unwrap();
        assert_eq!((request.station_class, request.valve_class), (11, 12));

        let mut missing = input.clone();
        missing.as_object_mut().unwrap().remove("outFields");
        let err = OperationInput::from_value(&missing).unwrap().isolation_request(&catalog());
        assert_eq!(message(err), "invalid outFields");

        let mut unknown = input;
        unknown["valveLayerId"] = json!(9);
        let err = OperationInput::from_value(&unknown).unwrap().isolation_request(&catalog());
        assert_eq!(message(err), "Unable to find valve layer");
    }

    #[test]
    fn test_pos_along_messages() {
        let parse = |input: Value| OperationInput::from_value(&input).unwrap().pos_along_request();
        let flag = json!([{"x": 0.0, "y": 0.0}]);

        assert_eq!(message(parse(json!({"edgeFlags": [], "length": 5, "tolerance": 1}))), "edgeFlags != 1");
        assert_eq!(message(parse(json!({"edgeFlags": flag, "tolerance": 1}))), "distance not specified");
        assert_eq!(message(parse(json!({"edgeFlags": flag, "length": 0, "tolerance": 1}))), "distance not valid");
        assert_eq!(
            message(parse(json!({"edgeFlags": flag, "length": -5, "tolerance": 1}))),
            "fieldLevel not specified"
        );

        let request = parse(json!({"edgeFlags": flag, "length": 5, "tolerance": 1, "offset": 2.5})).unwrap();
        assert_eq!(request.offset, Some(2.5));
        assert!(request.field_level.is_none());
    }
}
