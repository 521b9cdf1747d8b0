use planner_core::geometry::BBox;
use planner_core::{InstanceId, Layout, SpatialIndex};

use crate::overlap::Overlap;

/// Inward adjustment applied to every footprint before testing, in grid units.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Overlap queries against a snapshot of a layout's footprints.
///
/// Footprints are shrunk by `epsilon` on every side first, so buildings that
/// only share an edge are never reported.
pub struct CollisionChecker {
    index: SpatialIndex,
    epsilon: f64,
}

impl CollisionChecker {
    pub fn new(layout: &Layout, epsilon: f64) -> Self {
        Self {
            index: layout.spatial_index(),
            epsilon,
        }
    }

    /// Ids of every indexed building overlapping `footprint`, except those in `ignore`.
    pub fn colliding_with(&self, footprint: &BBox, ignore: &[InstanceId]) -> Vec<InstanceId> {
        let candidate = footprint.shrink(self.epsilon);
        self.index
            .touching(&candidate)
            .into_iter()
            .filter(|entry| !ignore.contains(&entry.instance_id))
            .filter(|entry| footprints_overlap(&entry.bbox, footprint, self.epsilon))
            .map(|entry| entry.instance_id)
            .collect()
    }

    pub fn is_colliding(&self, footprint: &BBox, ignore: &[InstanceId]) -> bool {
        !self.colliding_with(footprint, ignore).is_empty()
    }
}

/// True when two footprints overlap after each is shrunk by `epsilon`.
pub fn footprints_overlap(a: &BBox, b: &BBox, epsilon: f64) -> bool {
    a.shrink(epsilon).intersects(&b.shrink(epsilon))
}

/// Every overlapping pair in the layout, ordered by the earlier instance.
pub fn find_overlaps(layout: &Layout, epsilon: f64) -> Vec<Overlap> {
    let checker = CollisionChecker::new(layout, epsilon);
    let instances = layout.instances();
    let mut overlaps = Vec::new();

    for (i, first) in instances.iter().enumerate() {
        let hits = checker.colliding_with(&first.footprint(), &[first.id()]);
        for second in &instances[i + 1..] {
            if !hits.contains(&second.id()) {
                continue;
            }
            let Some(shared) = first.footprint().intersection(&second.footprint()) else {
                continue;
            };
            overlaps.push(Overlap {
                first: first.id(),
                second: second.id(),
                first_type: first.type_name().to_string(),
                second_type: second.type_name().to_string(),
                bbox: [shared.min.x, shared.min.y, shared.max.x, shared.max.y],
            });
        }
    }

    if !overlaps.is_empty() {
        log::info!("Found {} overlapping building pairs", overlaps.len());
    }
    overlaps
}
