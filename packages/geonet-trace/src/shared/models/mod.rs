//! Shared domain models

pub mod element;
pub mod feature;
pub mod flag;
pub mod geometry;
pub mod weight;

pub use element::{
    Eid, ElementType, FeatureType, FlowElements, FlowMethod, NetworkElementRef,
    ShortestPathObjFn, TraceSolverType, UserIds,
};
pub use flag::{ElementBarriers, Flag, SelectionSetBarriers};
pub use feature::{FeatureClassInfo, FeatureRecord, FeatureSet, FieldValue, SubFields};
pub use geometry::{point_from_json, points_to_json, Envelope, Geometry, SpatialReference};
pub use weight::{
    passes_filter, EdgeFilter, FilterValue, JunctionFilter, NetWeight, WeightAssociation,
    WeightFilterRange, WeightSettings, WeightType,
};

pub use geo::{Coord, LineString, MultiLineString, Point};
