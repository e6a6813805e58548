//! Element ids → feature sets

use super::domain::{MaterializedResult, OutFields};
use crate::errors::{GeonetError, Result};
use crate::shared::models::{Eid, ElementType, FeatureSet, FlowElements, SubFields};
use crate::shared::ports::{GeometricNetwork, TraceElements};
use rustc_hash::{FxHashMap, FxHashSet};

pub struct ResultMaterializer<'n> {
    network: &'n dyn GeometricNetwork,
}

impl<'n> ResultMaterializer<'n> {
    pub fn new(network: &'n dyn GeometricNetwork) -> Self {
        Self { network }
    }

    /// Check limits per requested category, then materialize each
    pub fn materialize_trace(
        &self,
        elements: &TraceElements,
        flow_elements: FlowElements,
        max_features: usize,
        out_fields: &OutFields,
    ) -> Result<MaterializedResult> {
        let mut result = MaterializedResult::default();
        if flow_elements.includes_edges() {
            let eids = checked(elements, ElementType::Edge, max_features)?;
            result.edges = Some(self.materialize(eids, ElementType::Edge, out_fields)?);
        }
        if flow_elements.includes_junctions() {
            let eids = checked(elements, ElementType::Junction, max_features)?;
            result.junctions = Some(self.materialize(eids, ElementType::Junction, out_fields)?);
        }
        Ok(result)
    }

    /// One feature set per owning class, in first-seen order
    pub fn materialize(
        &self,
        eids: &[Eid],
        element_type: ElementType,
        out_fields: &OutFields,
    ) -> Result<Vec<FeatureSet>> {
        if eids.is_empty() {
            return Ok(Vec::new());
        }

        let groups = self.group_by_class(eids, element_type)?;
        let mut sets = Vec::with_capacity(groups.len());
        for (class_id, oids) in groups {
            let class = self
                .network
                .feature_class(class_id)
                .ok_or_else(|| GeonetError::not_found(format!("Feature class {} not found", class_id)))?;
            let sub_fields = out_fields.sub_fields(&class);
            let features = self
                .network
                .query_features(class_id, &oids, &sub_fields)?
                .collect_all()?;

            let fields = match sub_fields {
                SubFields::All => class.fields.clone(),
                SubFields::Only(fields) => fields,
            };
            tracing::debug!(class = %class.name, requested = oids.len(), returned = features.len(), "class_materialized");
            sets.push(FeatureSet {
                class_id,
                class_name: class.name.clone(),
                fields,
                spatial_reference: self.network.spatial_reference().clone(),
                features,
            });
        }
        Ok(sets)
    }

    /// `(class_id, oids)` groups, classes in first-seen order, oids unique per class
    pub fn group_by_class(&self, eids: &[Eid], element_type: ElementType) -> Result<Vec<(i32, Vec<i32>)>> {
        let mut groups: Vec<(i32, Vec<i32>)> = Vec::new();
        let mut index: FxHashMap<i32, usize> = FxHashMap::default();
        let mut seen: FxHashSet<(i32, i32)> = FxHashSet::default();

        for &eid in eids {
            let ids = self.network.query_ids(eid, element_type)?;
            if !seen.insert((ids.class_id, ids.feature_id)) {
                continue;
            }
            let slot = *index.entry(ids.class_id).or_insert_with(|| {
                groups.push((ids.class_id, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(ids.feature_id);
        }
        Ok(groups)
    }
}

/// Requested category's ids, rejecting missing or oversized sets
fn checked(elements: &TraceElements, element_type: ElementType, max_features: usize) -> Result<&[Eid]> {
    let eids = elements
        .get(element_type)
        .ok_or(GeonetError::NoTracedElementsFound(element_type))?;
    if eids.len() > max_features {
        return Err(GeonetError::TraceLimitExceeded {
            count: eids.len(),
            limit: max_features,
        });
    }
    Ok(eids.as_slice())
}
