//! Network graph provider port
//!
//! The geodatabase side of the engine: schema, spatial search, snapping,
//! element ⇄ feature lookups, topology adjacency and attribute reads.

use super::cursor::ScopedCursor;
use super::solver::FlowSolver;
use crate::shared::models::{
    Eid, ElementType, Envelope, FeatureClassInfo, FeatureType, FieldValue, Geometry, NetWeight,
    Point, SpatialReference, SubFields, UserIds,
};
use thiserror::Error;

/// Provider failure
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Element {eid} ({}) not found in network", .element_type.singular())]
    UnknownElement { element_type: ElementType, eid: Eid },

    #[error("Feature class {0} not found in network")]
    UnknownClass(i32),

    #[error("Feature {oid} not found in class {class_id}")]
    UnknownFeature { class_id: i32, oid: i32 },

    #[error("Field '{field}' not found in class {class_id}")]
    UnknownField { class_id: i32, field: String },

    #[error("Provider error: {0}")]
    Provider(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Edge incident to a junction
///
/// `reverse_orientation == false` means the edge starts at the junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentEdge {
    pub edge: Eid,
    pub reverse_orientation: bool,
}

/// Geometric network exposed by the geodatabase layer
///
/// Shared read-only across requests.
pub trait GeometricNetwork: Send + Sync {
    fn name(&self) -> &str;

    fn spatial_reference(&self) -> &SpatialReference;

    fn extent(&self) -> Option<Envelope>;

    /// Feature classes participating in the network
    fn feature_classes(&self) -> Vec<FeatureClassInfo>;

    fn classes_of_type(&self, feature_type: FeatureType) -> Vec<FeatureClassInfo> {
        self.feature_classes()
            .into_iter()
            .filter(|class| class.feature_type == feature_type)
            .collect()
    }

    fn feature_class(&self, class_id: i32) -> Option<FeatureClassInfo> {
        self.feature_classes()
            .into_iter()
            .find(|class| class.class_id == class_id)
    }

    /// Features of `class_id` whose geometry intersects a `tolerance` buffer around `point`
    fn search_near(
        &self,
        class_id: i32,
        point: &Point<f64>,
        tolerance: f64,
    ) -> NetworkResult<ScopedCursor<'_>>;

    /// Features of `class_id` restricted to `oids`, reading `fields`
    fn query_features(
        &self,
        class_id: i32,
        oids: &[i32],
        fields: &SubFields,
    ) -> NetworkResult<ScopedCursor<'_>>;

    /// Snap a point lying on a network feature to its element
    fn element_at(&self, point: &Point<f64>, element_type: ElementType) -> NetworkResult<Option<Eid>>;

    fn query_ids(&self, eid: Eid, element_type: ElementType) -> NetworkResult<UserIds>;

    fn element_geometry(&self, eid: Eid, element_type: ElementType) -> NetworkResult<Geometry>;

    /// `(from, to)` junctions of an edge in digitized direction
    fn edge_junctions(&self, edge: Eid) -> NetworkResult<(Eid, Eid)>;

    fn adjacent_edges(&self, junction: Eid) -> NetworkResult<Vec<AdjacentEdge>>;

    fn edge_count(&self) -> usize;

    fn weights(&self) -> Vec<NetWeight>;

    fn weight_by_name(&self, name: &str) -> Option<NetWeight> {
        self.weights()
            .into_iter()
            .find(|weight| weight.name.eq_ignore_ascii_case(name))
    }

    fn attribute(&self, class_id: i32, oid: i32, field: &str) -> NetworkResult<FieldValue>;

    fn all_oids(&self, class_id: i32) -> NetworkResult<Vec<i32>>;

    /// Fresh solver bound to this network
    fn new_solver(&self) -> Box<dyn FlowSolver + '_>;
}
