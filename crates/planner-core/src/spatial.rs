use rstar::{RTree, RTreeObject, AABB};

use crate::geometry::{BBox, Point};
use crate::instance::InstanceId;

/// One building footprint in the R-tree.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub instance_id: InstanceId,
    /// Position in the layout's draw order; higher is drawn later.
    pub z: usize,
    /// Footprint in grid units.
    pub bbox: BBox,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.bbox)
    }
}

fn envelope_of(bbox: &BBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min.x, bbox.min.y], [bbox.max.x, bbox.max.y])
}

/// Snapshot of a layout's footprints for hit-testing and overlap candidates.
///
/// Built once per query batch; it is not kept in sync with later edits.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Index footprints given in draw order.
    pub fn from_footprints<I>(footprints: I) -> Self
    where
        I: IntoIterator<Item = (InstanceId, BBox)>,
    {
        let entries = footprints
            .into_iter()
            .enumerate()
            .map(|(z, (instance_id, bbox))| SpatialEntry { instance_id, z, bbox })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Buildings covering `point`, topmost first. Edges count as inside.
    pub fn hits_at(&self, point: &Point) -> Vec<InstanceId> {
        let at = AABB::from_point([point.x, point.y]);
        let mut hits: Vec<&SpatialEntry> =
            self.tree.locate_in_envelope_intersecting(&at).collect();
        hits.sort_by(|a, b| b.z.cmp(&a.z));
        hits.into_iter().map(|e| e.instance_id).collect()
    }

    /// Entries whose footprint touches or overlaps `region`, in draw order.
    pub fn touching(&self, region: &BBox) -> Vec<&SpatialEntry> {
        let mut found: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope_of(region))
            .collect();
        found.sort_by_key(|e| e.z);
        found
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
