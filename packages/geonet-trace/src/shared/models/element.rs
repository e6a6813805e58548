//! Network element identity and trace enumerations

use serde::{Deserialize, Serialize};

/// Element identifier inside the network graph.
///
/// Opaque to the engine; valid identifiers are strictly positive.
pub type Eid = i32;

/// Edge or junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Junction,
    Edge,
}

impl ElementType {
    pub fn singular(&self) -> &'static str {
        match self {
            ElementType::Junction => "junction",
            ElementType::Edge => "edge",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ElementType::Junction => "junctions",
            ElementType::Edge => "edges",
        }
    }
}

/// Reference to one element of the network graph
///
/// Obtained from the element locator or from solver output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkElementRef {
    pub element_type: ElementType,
    pub eid: Eid,
}

impl NetworkElementRef {
    pub fn new(element_type: ElementType, eid: Eid) -> Self {
        Self { element_type, eid }
    }

    pub fn edge(eid: Eid) -> Self {
        Self::new(ElementType::Edge, eid)
    }

    pub fn junction(eid: Eid) -> Self {
        Self::new(ElementType::Junction, eid)
    }
}

/// Owning feature of an element: class, object id and sub id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIds {
    pub class_id: i32,
    pub feature_id: i32,
    pub sub_id: i32,
}

/// Network feature type of a feature class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureType {
    SimpleJunction,
    ComplexJunction,
    SimpleEdge,
    ComplexEdge,
}

impl FeatureType {
    pub fn element_type(&self) -> ElementType {
        match self {
            FeatureType::SimpleJunction | FeatureType::ComplexJunction => ElementType::Junction,
            FeatureType::SimpleEdge | FeatureType::ComplexEdge => ElementType::Edge,
        }
    }

    /// Search order used when snapping: simple classes before complex ones
    pub fn search_order(element_type: ElementType) -> [FeatureType; 2] {
        match element_type {
            ElementType::Junction => [FeatureType::SimpleJunction, FeatureType::ComplexJunction],
            ElementType::Edge => [FeatureType::SimpleEdge, FeatureType::ComplexEdge],
        }
    }
}

wire_enum! {
    /// Traversal direction
    pub enum FlowMethod {
        Connected => "esriFMConnected",
        Upstream => "esriFMUpstream",
        Downstream => "esriFMDownstream",
    }
}

impl FlowMethod {
    /// Upstream and downstream traces honour flow direction
    pub fn is_directed(&self) -> bool {
        matches!(self, FlowMethod::Upstream | FlowMethod::Downstream)
    }
}

wire_enum! {
    /// Element categories returned by a trace
    pub enum FlowElements {
        Junctions => "esriFEJunctions",
        Edges => "esriFEEdges",
        JunctionsAndEdges => "esriFEJunctionsAndEdges",
        None => "esriFENone",
    }
}

impl FlowElements {
    pub fn includes_edges(&self) -> bool {
        matches!(self, FlowElements::Edges | FlowElements::JunctionsAndEdges)
    }

    pub fn includes_junctions(&self) -> bool {
        matches!(self, FlowElements::Junctions | FlowElements::JunctionsAndEdges)
    }
}

wire_enum! {
    /// Objective for shortest path style solves
    pub enum ShortestPathObjFn {
        MinSum => "esriSPObjFnMinSum",
        MinMax => "esriSPObjFnMinMax",
    }
}

impl Default for ShortestPathObjFn {
    fn default() -> Self {
        ShortestPathObjFn::MinMax
    }
}

wire_enum! {
    /// Trace solver selected by a TraceNetwork request
    pub enum TraceSolverType {
        FindAccumulation => "FindAccumulation",
        FindCircuits => "FindCircuits",
        FindCommonAncestors => "FindCommonAncestors",
        FindFlowElements => "FindFlowElements",
        FindFlowEndElements => "FindFlowEndElements",
        FindFlowUnreachedElements => "FindFlowUnreachedElements",
        FindPath => "FindPath",
        FindSource => "FindSource",
        FindLongest => "FindLongest",
    }
}

impl TraceSolverType {
    /// Solvers that take no flow method parameter
    pub fn ignores_flow_method(&self) -> bool {
        matches!(
            self,
            TraceSolverType::FindCircuits
                | TraceSolverType::FindCommonAncestors
                | TraceSolverType::FindLongest
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names_and_short_names_parse() {
        assert_eq!(FlowMethod::from_str("esriFMUpstream").unwrap(), FlowMethod::Upstream);
        assert_eq!(FlowMethod::from_str("Downstream").unwrap(), FlowMethod::Downstream);
        assert_eq!(
            FlowElements::from_str("esriFEJunctionsAndEdges").unwrap(),
            FlowElements::JunctionsAndEdges
        );
        assert_eq!(
            TraceSolverType::from_str("FindLongest").unwrap(),
            TraceSolverType::FindLongest
        );
    }

    #[test]
    fn test_unknown_name_lists_choices() {
        let err = ShortestPathObjFn::from_str("esriSPObjFnMax").unwrap_err();
        assert!(err.contains("esriSPObjFnMinSum"));
        assert!(err.contains("ShortestPathObjFn"));
    }

    #[test]
    fn test_flow_elements_categories() {
        assert!(FlowElements::JunctionsAndEdges.includes_edges());
        assert!(FlowElements::JunctionsAndEdges.includes_junctions());
        assert!(!FlowElements::Edges.includes_junctions());
        assert!(!FlowElements::None.includes_edges());
    }

    #[test]
    fn test_search_order_puts_simple_first() {
        assert_eq!(
            FeatureType::search_order(ElementType::Edge),
            [FeatureType::SimpleEdge, FeatureType::ComplexEdge]
        );
    }
}
