//! In-memory geometric network
//!
//! Topology lives in a petgraph `StableDiGraph` whose arcs point in
//! digitized direction (from-junction → to-junction). Flow direction is an
//! attribute of each arc. Spatial lookups go through rstar trees: one per
//! feature class for searches, one per element kind for snapping.
//!
//! Junction and edge element ids are separate 1-based sequences, assigned
//! in insertion order.

use super::cursor::RecordCursor;
use super::solver::InMemoryFlowSolver;
use crate::shared::models::{
    Eid, ElementType, Envelope, FeatureClassInfo, FeatureRecord, FeatureType, FieldValue, Geometry,
    LineString, NetWeight, Point, SpatialReference, SubFields, UserIds,
};
use crate::shared::ports::{AdjacentEdge, FlowSolver, GeometricNetwork, NetworkError, NetworkResult, ScopedCursor};
use geo::{BoundingRect, EuclideanDistance, Rect};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Points closer than this to a feature lie on it
pub const SNAP_EPSILON: f64 = 1e-6;

/// Flow direction of an edge relative to its digitized direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowDirection {
    #[default]
    WithDigitized,
    AgainstDigitized,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JunctionRole {
    #[default]
    None,
    Source,
    Sink,
}

#[derive(Debug, Clone)]
pub(crate) struct JunctionNode {
    pub eid: Eid,
    pub ids: UserIds,
    pub point: Point<f64>,
    pub role: JunctionRole,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeArc {
    pub eid: Eid,
    pub ids: UserIds,
    pub path: LineString<f64>,
    pub flow: FlowDirection,
}

#[derive(Debug, Clone)]
struct FeatureRow {
    attributes: BTreeMap<String, FieldValue>,
    geometry: Geometry,
}

type ClassTree = RTree<GeomWithData<Rectangle<[f64; 2]>, i32>>;

pub struct InMemoryNetwork {
    name: String,
    spatial_reference: SpatialReference,
    classes: Vec<FeatureClassInfo>,
    pub(crate) graph: StableDiGraph<JunctionNode, EdgeArc>,
    pub(crate) junctions: FxHashMap<Eid, NodeIndex>,
    pub(crate) edges: FxHashMap<Eid, EdgeIndex>,
    features: FxHashMap<(i32, i32), FeatureRow>,
    /// Element ids per feature, sub id order
    feature_elements: FxHashMap<(i32, i32), Vec<Eid>>,
    class_oids: FxHashMap<i32, Vec<i32>>,
    class_trees: FxHashMap<i32, ClassTree>,
    junction_tree: RTree<GeomWithData<[f64; 2], Eid>>,
    edge_tree: RTree<GeomWithData<Rectangle<[f64; 2]>, Eid>>,
    weights: Vec<NetWeight>,
    extent: Option<Envelope>,
    open_cursors: Arc<AtomicUsize>,
}

impl std::fmt::Debug for InMemoryNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNetwork")
            .field("name", &self.name)
            .field("junctions", &self.junctions.len())
            .field("edges", &self.edges.len())
            .field("classes", &self.classes.len())
            .finish()
    }
}

impl InMemoryNetwork {
    pub fn builder(name: impl Into<String>, spatial_reference: SpatialReference) -> NetworkBuilder {
        NetworkBuilder::new(name, spatial_reference)
    }

    /// Cursors handed out and not yet released
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    pub(crate) fn junction(&self, eid: Eid) -> NetworkResult<&JunctionNode> {
        self.junctions
            .get(&eid)
            .and_then(|idx| self.graph.node_weight(*idx))
            .ok_or(NetworkError::UnknownElement {
                element_type: ElementType::Junction,
                eid,
            })
    }

    pub(crate) fn edge(&self, eid: Eid) -> NetworkResult<&EdgeArc> {
        self.edges
            .get(&eid)
            .and_then(|idx| self.graph.edge_weight(*idx))
            .ok_or(NetworkError::UnknownElement {
                element_type: ElementType::Edge,
                eid,
            })
    }

    /// Element ids of one feature
    pub(crate) fn feature_elements(&self, class_id: i32, oid: i32) -> &[Eid] {
        self.feature_elements
            .get(&(class_id, oid))
            .map_or(&[], Vec::as_slice)
    }

    pub(crate) fn junction_eids(&self) -> impl Iterator<Item = Eid> + '_ {
        let mut eids: Vec<Eid> = self.junctions.keys().copied().collect();
        eids.sort_unstable();
        eids.into_iter()
    }

    pub(crate) fn edge_eids(&self) -> impl Iterator<Item = Eid> + '_ {
        let mut eids: Vec<Eid> = self.edges.keys().copied().collect();
        eids.sort_unstable();
        eids.into_iter()
    }

    /// Numeric value of `weight` on an element, zero when not associated
    pub(crate) fn weight_value(&self, weight: &NetWeight, ids: &UserIds) -> f64 {
        let Some(class) = self.classes.iter().find(|c| c.class_id == ids.class_id) else {
            return 0.0;
        };
        weight
            .associations
            .iter()
            .find(|a| a.table_name.eq_ignore_ascii_case(&class.name))
            .and_then(|a| self.attribute(ids.class_id, ids.feature_id, &a.field_name).ok())
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    fn record(&self, class: &FeatureClassInfo, oid: i32, fields: &SubFields) -> NetworkResult<FeatureRecord> {
        let row = self
            .features
            .get(&(class.class_id, oid))
            .ok_or(NetworkError::UnknownFeature {
                class_id: class.class_id,
                oid,
            })?;

        let mut attributes = BTreeMap::new();
        for field in &class.fields {
            if field.eq_ignore_ascii_case(&class.shape_field) || !fields.includes(field) {
                continue;
            }
            let value = if field.eq_ignore_ascii_case(&class.oid_field) {
                FieldValue::Integer(oid as i64)
            } else {
                lookup(&row.attributes, field).cloned().unwrap_or(FieldValue::Null)
            };
            attributes.insert(field.clone(), value);
        }

        Ok(FeatureRecord {
            oid,
            attributes,
            geometry: fields.includes(&class.shape_field).then(|| row.geometry.clone()),
        })
    }

    fn class(&self, class_id: i32) -> NetworkResult<&FeatureClassInfo> {
        self.classes
            .iter()
            .find(|c| c.class_id == class_id)
            .ok_or(NetworkError::UnknownClass(class_id))
    }

    fn cursor(&self, records: Vec<FeatureRecord>) -> ScopedCursor<'_> {
        ScopedCursor::new(RecordCursor::new(records, Arc::clone(&self.open_cursors)))
    }
}

fn lookup<'a>(attributes: &'a BTreeMap<String, FieldValue>, field: &str) -> Option<&'a FieldValue> {
    attributes
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(field))
        .map(|(_, value)| value)
}

fn search_box(point: &Point<f64>, radius: f64) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [point.x() - radius, point.y() - radius],
        [point.x() + radius, point.y() + radius],
    )
}

fn rectangle(rect: Rect<f64>) -> Rectangle<[f64; 2]> {
    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}

impl GeometricNetwork for InMemoryNetwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn spatial_reference(&self) -> &SpatialReference {
        &self.spatial_reference
    }

    fn extent(&self) -> Option<Envelope> {
        self.extent
    }

    fn feature_classes(&self) -> Vec<FeatureClassInfo> {
        self.classes.clone()
    }

    fn search_near(&self, class_id: i32, point: &Point<f64>, tolerance: f64) -> NetworkResult<ScopedCursor<'_>> {
        let class = self.class(class_id)?;
        let mut oids: Vec<i32> = match self.class_trees.get(&class_id) {
            Some(tree) => tree
                .locate_in_envelope_intersecting(&search_box(point, tolerance))
                .map(|entry| entry.data)
                .collect(),
            None => Vec::new(),
        };
        oids.sort_unstable();

        let mut records = Vec::new();
        for oid in oids {
            let within = self
                .features
                .get(&(class_id, oid))
                .map_or(false, |row| row.geometry.distance_to(point) <= tolerance);
            if within {
                records.push(self.record(class, oid, &SubFields::All)?);
            }
        }
        Ok(self.cursor(records))
    }

    fn query_features(&self, class_id: i32, oids: &[i32], fields: &SubFields) -> NetworkResult<ScopedCursor<'_>> {
        let class = self.class(class_id)?;
        let records = oids
            .iter()
            .map(|oid| self.record(class, *oid, fields))
            .collect::<NetworkResult<Vec<_>>>()?;
        Ok(self.cursor(records))
    }

    fn element_at(&self, point: &Point<f64>, element_type: ElementType) -> NetworkResult<Option<Eid>> {
        let eid = match element_type {
            ElementType::Junction => self
                .junction_tree
                .nearest_neighbor(&[point.x(), point.y()])
                .filter(|entry| {
                    let [x, y] = *entry.geom();
                    Point::new(x, y).euclidean_distance(point) <= SNAP_EPSILON
                })
                .map(|entry| entry.data),
            ElementType::Edge => {
                let mut best: Option<(f64, Eid)> = None;
                for entry in self.edge_tree.locate_in_envelope_intersecting(&search_box(point, SNAP_EPSILON)) {
                    let arc = self.edge(entry.data)?;
                    let distance = Geometry::polyline(vec![arc.path.clone()]).distance_to(point);
                    if distance > SNAP_EPSILON {
                        continue;
                    }
                    let candidate = (distance, entry.data);
                    if best.map_or(true, |b| candidate.0 < b.0 || (candidate.0 == b.0 && candidate.1 < b.1)) {
                        best = Some(candidate);
                    }
                }
                best.map(|(_, eid)| eid)
            }
        };
        Ok(eid)
    }

    fn query_ids(&self, eid: Eid, element_type: ElementType) -> NetworkResult<UserIds> {
        match element_type {
            ElementType::Junction => self.junction(eid).map(|j| j.ids),
            ElementType::Edge => self.edge(eid).map(|e| e.ids),
        }
    }

    fn element_geometry(&self, eid: Eid, element_type: ElementType) -> NetworkResult<Geometry> {
        match element_type {
            ElementType::Junction => self.junction(eid).map(|j| Geometry::Point(j.point)),
            ElementType::Edge => self.edge(eid).map(|e| Geometry::polyline(vec![e.path.clone()])),
        }
    }

    fn edge_junctions(&self, edge: Eid) -> NetworkResult<(Eid, Eid)> {
        let (from, to) = self
            .edges
            .get(&edge)
            .and_then(|idx| self.graph.edge_endpoints(*idx))
            .ok_or(NetworkError::UnknownElement {
                element_type: ElementType::Edge,
                eid: edge,
            })?;
        Ok((self.graph[from].eid, self.graph[to].eid))
    }

    fn adjacent_edges(&self, junction: Eid) -> NetworkResult<Vec<AdjacentEdge>> {
        let idx = *self.junctions.get(&junction).ok_or(NetworkError::UnknownElement {
            element_type: ElementType::Junction,
            eid: junction,
        })?;
        let mut adjacent: Vec<AdjacentEdge> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| AdjacentEdge {
                edge: e.weight().eid,
                reverse_orientation: false,
            })
            .chain(self.graph.edges_directed(idx, Direction::Incoming).map(|e| AdjacentEdge {
                edge: e.weight().eid,
                reverse_orientation: true,
            }))
            .collect();
        adjacent.sort_by_key(|a| (a.edge, a.reverse_orientation));
        Ok(adjacent)
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn weights(&self) -> Vec<NetWeight> {
        self.weights.clone()
    }

    fn attribute(&self, class_id: i32, oid: i32, field: &str) -> NetworkResult<FieldValue> {
        let class = self.class(class_id)?;
        if !class.has_field(field) {
            return Err(NetworkError::UnknownField {
                class_id,
                field: field.to_string(),
            });
        }
        if field.eq_ignore_ascii_case(&class.oid_field) {
            return Ok(FieldValue::Integer(oid as i64));
        }
        let row = self
            .features
            .get(&(class_id, oid))
            .ok_or(NetworkError::UnknownFeature { class_id, oid })?;
        Ok(lookup(&row.attributes, field).cloned().unwrap_or(FieldValue::Null))
    }

    fn all_oids(&self, class_id: i32) -> NetworkResult<Vec<i32>> {
        self.class(class_id)?;
        Ok(self.class_oids.get(&class_id).cloned().unwrap_or_default())
    }

    fn new_solver(&self) -> Box<dyn FlowSolver + '_> {
        Box::new(InMemoryFlowSolver::new(self))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════

/// Incremental construction of an [`InMemoryNetwork`]
pub struct NetworkBuilder {
    name: String,
    spatial_reference: SpatialReference,
    classes: Vec<FeatureClassInfo>,
    graph: StableDiGraph<JunctionNode, EdgeArc>,
    junctions: FxHashMap<Eid, NodeIndex>,
    edges: FxHashMap<Eid, EdgeIndex>,
    attributes: FxHashMap<(i32, i32), BTreeMap<String, FieldValue>>,
    feature_elements: FxHashMap<(i32, i32), Vec<Eid>>,
    class_oids: FxHashMap<i32, Vec<i32>>,
    weights: Vec<NetWeight>,
}

impl NetworkBuilder {
    pub fn new(name: impl Into<String>, spatial_reference: SpatialReference) -> Self {
        Self {
            name: name.into(),
            spatial_reference,
            classes: Vec::new(),
            graph: StableDiGraph::new(),
            junctions: FxHashMap::default(),
            edges: FxHashMap::default(),
            attributes: FxHashMap::default(),
            feature_elements: FxHashMap::default(),
            class_oids: FxHashMap::default(),
            weights: Vec::new(),
        }
    }

    /// Register a class; OID and shape fields are added to its field list
    pub fn add_class(
        &mut self,
        class_id: i32,
        name: impl Into<String>,
        feature_type: FeatureType,
        fields: &[&str],
    ) -> &mut Self {
        let oid_field = "OBJECTID".to_string();
        let shape_field = "SHAPE".to_string();
        let mut all_fields = vec![oid_field.clone(), shape_field.clone()];
        for field in fields {
            if !all_fields.iter().any(|f| f.eq_ignore_ascii_case(field)) {
                all_fields.push(field.to_string());
            }
        }
        self.add_class_info(FeatureClassInfo {
            class_id,
            name: name.into(),
            feature_type,
            oid_field,
            shape_field,
            fields: all_fields,
        })
    }

    pub fn add_class_info(&mut self, class: FeatureClassInfo) -> &mut Self {
        self.classes.retain(|c| c.class_id != class.class_id);
        self.classes.push(class);
        self
    }

    pub fn add_weight(&mut self, weight: NetWeight) -> &mut Self {
        self.weights.push(weight);
        self
    }

    fn feature_type(&self, class_id: i32) -> NetworkResult<FeatureType> {
        self.classes
            .iter()
            .find(|c| c.class_id == class_id)
            .map(|c| c.feature_type)
            .ok_or(NetworkError::UnknownClass(class_id))
    }

    fn register_element(
        &mut self,
        class_id: i32,
        oid: i32,
        eid: Eid,
        attributes: BTreeMap<String, FieldValue>,
    ) -> i32 {
        let elements = self.feature_elements.entry((class_id, oid)).or_default();
        let sub_id = elements.len() as i32;
        elements.push(eid);
        if sub_id == 0 {
            self.class_oids.entry(class_id).or_default().push(oid);
        }
        let row = self.attributes.entry((class_id, oid)).or_default();
        for (field, value) in attributes {
            row.entry(field).or_insert(value);
        }
        sub_id
    }

    /// Add a junction element; returns its element id
    pub fn add_junction(
        &mut self,
        class_id: i32,
        oid: i32,
        point: Point<f64>,
        role: JunctionRole,
        attributes: BTreeMap<String, FieldValue>,
    ) -> NetworkResult<Eid> {
        if self.feature_type(class_id)?.element_type() != ElementType::Junction {
            return Err(NetworkError::Provider(format!("class {} is not a junction class", class_id)));
        }
        let eid = self.junctions.len() as Eid + 1;
        let sub_id = self.register_element(class_id, oid, eid, attributes);
        let idx = self.graph.add_node(JunctionNode {
            eid,
            ids: UserIds {
                class_id,
                feature_id: oid,
                sub_id,
            },
            point,
            role,
        });
        self.junctions.insert(eid, idx);
        Ok(eid)
    }

    /// Add an edge element between two junction elements
    ///
    /// Without a path the edge is the straight segment between its
    /// junctions. Adding the same feature again creates the next element of
    /// a complex edge.
    pub fn add_edge(
        &mut self,
        class_id: i32,
        oid: i32,
        from: Eid,
        to: Eid,
        path: Option<LineString<f64>>,
        flow: FlowDirection,
        attributes: BTreeMap<String, FieldValue>,
    ) -> NetworkResult<Eid> {
        if self.feature_type(class_id)?.element_type() != ElementType::Edge {
            return Err(NetworkError::Provider(format!("class {} is not an edge class", class_id)));
        }
        let unknown = |eid| NetworkError::UnknownElement {
            element_type: ElementType::Junction,
            eid,
        };
        let from_idx = *self.junctions.get(&from).ok_or_else(|| unknown(from))?;
        let to_idx = *self.junctions.get(&to).ok_or_else(|| unknown(to))?;
        let path = match path {
            Some(path) if path.0.len() >= 2 => path,
            Some(_) => return Err(NetworkError::Provider(format!("edge {} of class {} has a degenerate path", oid, class_id))),
            None => LineString::new(vec![self.graph[from_idx].point.0, self.graph[to_idx].point.0]),
        };

        let eid = self.edges.len() as Eid + 1;
        let sub_id = self.register_element(class_id, oid, eid, attributes);
        let idx = self.graph.add_edge(
            from_idx,
            to_idx,
            EdgeArc {
                eid,
                ids: UserIds {
                    class_id,
                    feature_id: oid,
                    sub_id,
                },
                path,
                flow,
            },
        );
        self.edges.insert(eid, idx);
        Ok(eid)
    }

    pub fn build(self) -> InMemoryNetwork {
        let mut features = FxHashMap::default();
        let mut class_entries: FxHashMap<i32, Vec<GeomWithData<Rectangle<[f64; 2]>, i32>>> = FxHashMap::default();
        let mut extent: Option<Rect<f64>> = None;

        for (&(class_id, oid), eids) in &self.feature_elements {
            let is_junction = self
                .classes
                .iter()
                .find(|c| c.class_id == class_id)
                .map_or(false, |c| c.feature_type.element_type() == ElementType::Junction);
            let geometry = if is_junction {
                let point = eids
                    .first()
                    .and_then(|eid| self.junctions.get(eid))
                    .map(|idx| self.graph[*idx].point)
                    .unwrap_or_else(|| Point::new(f64::NAN, f64::NAN));
                Geometry::Point(point)
            } else {
                Geometry::polyline(
                    eids.iter()
                        .filter_map(|eid| self.edges.get(eid))
                        .map(|idx| self.graph[*idx].path.clone())
                        .collect(),
                )
            };

            if let Some(rect) = geometry.bounding_rect() {
                extent = Some(match extent {
                    Some(e) => Rect::new(
                        geo::coord! { x: e.min().x.min(rect.min().x), y: e.min().y.min(rect.min().y) },
                        geo::coord! { x: e.max().x.max(rect.max().x), y: e.max().y.max(rect.max().y) },
                    ),
                    None => rect,
                });
                class_entries
                    .entry(class_id)
                    .or_default()
                    .push(GeomWithData::new(rectangle(rect), oid));
            }

            features.insert(
                (class_id, oid),
                FeatureRow {
                    attributes: self.attributes.get(&(class_id, oid)).cloned().unwrap_or_default(),
                    geometry,
                },
            );
        }

        let junction_tree = RTree::bulk_load(
            self.graph
                .node_weights()
                .map(|j| GeomWithData::new([j.point.x(), j.point.y()], j.eid))
                .collect(),
        );
        let edge_tree = RTree::bulk_load(
            self.graph
                .edge_weights()
                .filter_map(|e| e.path.bounding_rect().map(|r| GeomWithData::new(rectangle(r), e.eid)))
                .collect(),
        );
        let class_trees = class_entries
            .into_iter()
            .map(|(class_id, entries)| (class_id, RTree::bulk_load(entries)))
            .collect();

        tracing::debug!(
            network = %self.name,
            junctions = self.junctions.len(),
            edges = self.edges.len(),
            features = features.len(),
            "in_memory_network_built"
        );

        InMemoryNetwork {
            name: self.name,
            spatial_reference: self.spatial_reference,
            classes: self.classes,
            graph: self.graph,
            junctions: self.junctions,
            edges: self.edges,
            features,
            feature_elements: self.feature_elements,
            class_oids: self.class_oids,
            class_trees,
            junction_tree,
            edge_tree,
            weights: self.weights,
            extent: extent.map(Envelope),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    fn network() -> InMemoryNetwork {
        let mut builder = InMemoryNetwork::builder("Test", SpatialReference::from_wkid(3003));
        builder
            .add_class(1, "Nodes", FeatureType::SimpleJunction, &[])
            .add_class(2, "Mains", FeatureType::SimpleEdge, &["DIAMETER"])
            .add_class(3, "Trunk", FeatureType::ComplexEdge, &[]);
        let a = builder.add_junction(1, 1, Point::new(0.0, 0.0), JunctionRole::None, BTreeMap::new()).unwrap();
        let b = builder.add_junction(1, 2, Point::new(10.0, 0.0), JunctionRole::None, BTreeMap::new()).unwrap();
        let c = builder.add_junction(1, 3, Point::new(20.0, 0.0), JunctionRole::None, BTreeMap::new()).unwrap();
        let attrs = BTreeMap::from([("DIAMETER".to_string(), FieldValue::Integer(150))]);
        builder.add_edge(2, 7, a, b, None, FlowDirection::WithDigitized, attrs).unwrap();
        builder
            .add_edge(3, 1, b, c, Some(line_string![(x: 10.0, y: 0.0), (x: 15.0, y: 0.0), (x: 20.0, y: 0.0)]), FlowDirection::WithDigitized, BTreeMap::new())
            .unwrap();
        builder.add_edge(3, 1, c, a, None, FlowDirection::Indeterminate, BTreeMap::new()).unwrap();
        builder.build()
    }

    #[test]
    fn test_element_ids_are_sequential_per_kind() {
        let network = network();
        assert_eq!(network.junction_count(), 3);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.query_ids(3, ElementType::Edge).unwrap().sub_id, 1);
        assert_eq!(network.feature_elements(3, 1), &[2, 3]);
    }

    #[test]
    fn test_snap_point_on_edge() {
        let network = network();
        assert_eq!(network.element_at(&Point::new(15.0, 0.0), ElementType::Edge).unwrap(), Some(2));
        assert_eq!(network.element_at(&Point::new(10.0, 0.0), ElementType::Junction).unwrap(), Some(2));
        assert_eq!(network.element_at(&Point::new(10.0, 1.0), ElementType::Junction).unwrap(), None);
    }

    #[test]
    fn test_adjacency_orientation() {
        let network = network();
        let adjacent = network.adjacent_edges(2).unwrap();
        assert_eq!(
            adjacent,
            vec![
                AdjacentEdge { edge: 1, reverse_orientation: true },
                AdjacentEdge { edge: 2, reverse_orientation: false },
            ]
        );
        assert_eq!(network.edge_junctions(3).unwrap(), (3, 1));
    }

    #[test]
    fn test_query_restricts_fields_and_releases_cursor() {
        let network = network();
        let fields = SubFields::Only(vec!["OBJECTID".into()]);
        let records = network.query_features(2, &[7], &fields).unwrap().collect_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attributes.get("OBJECTID"), Some(&FieldValue::Integer(7)));
        assert!(records[0].attributes.get("DIAMETER").is_none());
        assert!(records[0].geometry.is_none());
        assert_eq!(network.open_cursors(), 0);
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let network = network();
        assert!(matches!(
            network.attribute(2, 7, "MATERIAL"),
            Err(NetworkError::UnknownField { .. })
        ));
        assert_eq!(network.attribute(2, 7, "diameter").unwrap(), FieldValue::Integer(150));
    }
}
