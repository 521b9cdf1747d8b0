use crate::geometry::{BBox, Point};
use crate::instance::{InstanceId, InstanceRecord, PlacedInstance};
use crate::spatial::SpatialIndex;

/// Ordered collection of placed buildings. Order is draw order: later
/// entries are drawn on top.
#[derive(Debug, Default)]
pub struct Layout {
    instances: Vec<PlacedInstance>,
}

impl Layout {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    // ── Instance management ──────────────────────────────────────────

    /// Append an instance and return a reference to it.
    ///
    /// An instance whose id is already present is not added twice.
    pub fn add(&mut self, instance: PlacedInstance) -> &PlacedInstance {
        let idx = match self.index_of(instance.id()) {
            Some(existing) => {
                log::warn!("Instance {} is already in the layout", instance.id());
                existing
            }
            None => {
                log::debug!(
                    "Placed {} at ({}, {})",
                    instance.type_name(),
                    instance.position.x,
                    instance.position.y
                );
                self.instances.push(instance);
                self.instances.len() - 1
            }
        };
        &self.instances[idx]
    }

    /// Remove an instance by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: InstanceId) -> Option<PlacedInstance> {
        match self.index_of(id) {
            Some(idx) => Some(self.instances.remove(idx)),
            None => {
                log::debug!("Instance {} not in layout, nothing to remove", id);
                None
            }
        }
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedInstance> {
        self.instances.iter().find(|i| i.id() == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut PlacedInstance> {
        self.instances.iter_mut().find(|i| i.id() == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|i| i.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.instances.iter()
    }

    pub fn instances(&self) -> &[PlacedInstance] {
        &self.instances
    }

    pub fn ids(&self) -> Vec<InstanceId> {
        self.instances.iter().map(|i| i.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Swap in a complete new instance list.
    pub fn replace_with(&mut self, instances: Vec<PlacedInstance>) {
        self.instances = instances;
    }

    pub fn into_instances(self) -> Vec<PlacedInstance> {
        self.instances
    }

    // ── Copying ──────────────────────────────────────────────────────

    /// Deep copy; every instance gets a new id.
    pub fn duplicate(&self) -> Self {
        Self {
            instances: self.instances.iter().map(|i| i.duplicate()).collect(),
        }
    }

    /// Detached layout holding copies of the given instances, in layout order.
    pub fn extract(&self, ids: &[InstanceId]) -> Self {
        Self {
            instances: self
                .instances
                .iter()
                .filter(|i| ids.contains(&i.id()))
                .map(|i| i.duplicate())
                .collect(),
        }
    }

    /// Translate every instance of `other` by `(dx, dy)` and append it.
    /// Returns the ids of the appended instances.
    pub fn merge_offset(&mut self, other: Layout, dx: i64, dy: i64) -> Vec<InstanceId> {
        let mut added = Vec::with_capacity(other.len());
        for mut instance in other.instances {
            instance.translate(dx, dy);
            added.push(self.add(instance).id());
        }
        added
    }

    pub fn records(&self) -> Vec<InstanceRecord> {
        self.instances.iter().map(|i| i.to_record()).collect()
    }

    // ── Spatial queries ──────────────────────────────────────────────

    /// Topmost instance whose footprint contains `point` (grid units).
    pub fn topmost_at(&self, point: &Point) -> Option<&PlacedInstance> {
        let id = *self.spatial_index().hits_at(point).first()?;
        self.get(id)
    }

    /// Ids of every instance whose footprint touches `region` (grid units), in layout order.
    pub fn ids_in_region(&self, region: &BBox) -> Vec<InstanceId> {
        self.spatial_index()
            .touching(region)
            .into_iter()
            .map(|entry| entry.instance_id)
            .collect()
    }

    /// Union of all footprints.
    pub fn bounds(&self) -> Option<BBox> {
        self.instances
            .iter()
            .map(|i| i.footprint())
            .reduce(|acc, bb| acc.union(&bb))
    }

    /// R-tree over the current footprints.
    pub fn spatial_index(&self) -> SpatialIndex {
        SpatialIndex::from_footprints(self.instances.iter().map(|i| (i.id(), i.footprint())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::geometry::{Position, Rotation};

    fn place(layout: &mut Layout, catalog: &Catalog, name: &str, x: i64, y: i64) -> InstanceId {
        let ty = catalog.lookup(name).unwrap();
        layout
            .add(PlacedInstance::new(ty, Position::new(x, y), Rotation::Deg0))
            .id()
    }

    #[test]
    fn test_add_appends_in_order() {
        let catalog = Catalog::builtin();
        let mut layout = Layout::new();
        let a = place(&mut layout, &catalog, "Smelter", 0, 0);
        let b = place(&mut layout, &catalog, "Foundry", 20, 0);
        assert_eq!(layout.ids(), vec![a, b]);
    }

    #[test]
    fn test_remove_preserves_order_and_ignores_absent() {
        let catalog = Catalog::builtin();
        let mut layout = Layout::new();
        let a = place(&mut layout, &catalog, "Smelter", 0, 0);
        let b = place(&mut layout, &catalog, "Foundry", 20, 0);
        let c = place(&mut layout, &catalog, "Merger", 40, 0);

        assert!(layout.remove(b).is_some());
        assert_eq!(layout.ids(), vec![a, c]);
        assert!(layout.remove(b).is_none());
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_duplicate_is_deep() {
        let catalog = Catalog::builtin();
        let mut layout = Layout::new();
        let a = place(&mut layout, &catalog, "Smelter", 3, 4);

        let mut copy = layout.duplicate();
        assert_eq!(copy.records(), layout.records());
        assert!(!copy.contains(a));

        let copied_id = copy.ids()[0];
        copy.get_mut(copied_id).unwrap().translate(1, 1);
        assert_eq!(layout.get(a).unwrap().position, Position::new(3, 4));
    }

    #[test]
    fn test_merge_offset_translates_and_appends() {
        let catalog = Catalog::builtin();
        let mut layout = Layout::new();
        place(&mut layout, &catalog, "Smelter", 0, 0);

        let mut other = Layout::new();
        place(&mut other, &catalog, "Splitter", 10, 10);
        place(&mut other, &catalog, "Merger", 20, 10);

        let added = layout.merge_offset(other, 4, 4);
        assert_eq!(added.len(), 2);
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.get(added[0]).unwrap().position, Position::new(14, 14));
        assert_eq!(layout.get(added[1]).unwrap().position, Position::new(24, 14));
    }

    #[test]
    fn test_topmost_at_prefers_last_added() {
        let catalog = Catalog::builtin();
        let mut layout = Layout::new();
        place(&mut layout, &catalog, "Manufacturer", 0, 0);
        let top = place(&mut layout, &catalog, "Splitter", 2, 2);

        let hit = layout.topmost_at(&Point::new(3.0, 3.0)).unwrap();
        assert_eq!(hit.id(), top);
        assert!(layout.topmost_at(&Point::new(-5.0, -5.0)).is_none());
    }

    #[test]
    fn test_bounds_and_region() {
        let catalog = Catalog::builtin();
        let mut layout = Layout::new();
        assert!(layout.bounds().is_none());
        let a = place(&mut layout, &catalog, "Splitter", 0, 0);
        place(&mut layout, &catalog, "Splitter", 50, 50);

        let bb = layout.bounds().unwrap();
        assert!((bb.max.x - 54.0).abs() < 1e-10);
        let region = BBox::new(Point::new(-1.0, -1.0), Point::new(5.0, 5.0));
        assert_eq!(layout.ids_in_region(&region), vec![a]);
        assert_eq!(layout.spatial_index().len(), 2);
    }
}
