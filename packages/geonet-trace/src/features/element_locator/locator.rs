//! Point → element snapping

use crate::errors::Result;
use crate::shared::models::{Eid, ElementType, FeatureType, Geometry, Point};
use crate::shared::ports::GeometricNetwork;

/// Nearest feature seen so far
struct Candidate {
    distance: f64,
    class_id: i32,
    oid: i32,
    geometry: Geometry,
}

pub struct ElementLocator<'n> {
    network: &'n dyn GeometricNetwork,
}

impl<'n> ElementLocator<'n> {
    pub fn new(network: &'n dyn GeometricNetwork) -> Self {
        Self { network }
    }

    /// Element id of the nearest `element_type` element, if any lies within `tolerance`
    pub fn locate(
        &self,
        point: &Point<f64>,
        tolerance: f64,
        element_type: ElementType,
    ) -> Result<Option<Eid>> {
        let Some(nearest) = self.nearest_feature(point, tolerance, element_type)? else {
            tracing::debug!(x = point.x(), y = point.y(), tolerance, kind = element_type.singular(), "no_feature_within_tolerance");
            return Ok(None);
        };

        let Some(snap_point) = nearest.geometry.nearest_point(point) else {
            return Ok(None);
        };
        let eid = self
            .network
            .element_at(&snap_point, element_type)?
            .filter(|eid| *eid > 0);

        tracing::debug!(
            class_id = nearest.class_id,
            oid = nearest.oid,
            distance = nearest.distance,
            eid = ?eid,
            "element_located"
        );
        Ok(eid)
    }

    fn nearest_feature(
        &self,
        point: &Point<f64>,
        tolerance: f64,
        element_type: ElementType,
    ) -> Result<Option<Candidate>> {
        let mut best: Option<Candidate> = None;

        for feature_type in FeatureType::search_order(element_type) {
            for class in self.network.classes_of_type(feature_type) {
                let mut cursor = self.network.search_near(class.class_id, point, tolerance)?;
                while let Some(record) = cursor.next_feature()? {
                    let Some(geometry) = record.geometry else {
                        continue;
                    };
                    let distance = geometry.distance_to(point);
                    if distance > tolerance {
                        continue;
                    }
                    // strictly nearer replaces; equal keeps the first found
                    if best.as_ref().map_or(true, |b| distance < b.distance) {
                        best = Some(Candidate {
                            distance,
                            class_id: class.class_id,
                            oid: record.oid,
                            geometry,
                        });
                    }
                }
            }
        }
        Ok(best)
    }
}
