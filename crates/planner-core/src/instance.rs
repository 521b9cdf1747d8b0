use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError, ObjectType};
use crate::geometry::{self, BBox, Position, Rotation};

/// Identity of a placed building. Never persisted.
pub type InstanceId = Uuid;

/// A building placed on the grid.
///
/// Not `Clone`; copies go through [`PlacedInstance::duplicate`], which assigns
/// a new id.
#[derive(Debug)]
pub struct PlacedInstance {
    id: InstanceId,
    object_type: Arc<ObjectType>,
    pub position: Position,
    pub rotation: Rotation,
}

/// Structural form of an instance as stored in layout files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    pub position: Position,
    pub rotation: Rotation,
}

impl PlacedInstance {
    pub fn new(object_type: Arc<ObjectType>, position: Position, rotation: Rotation) -> Self {
        Self {
            id: Uuid::new_v4(),
            object_type,
            position,
            rotation,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn object_type(&self) -> &Arc<ObjectType> {
        &self.object_type
    }

    pub fn type_name(&self) -> &str {
        &self.object_type.name
    }

    pub fn translate(&mut self, dx: i64, dy: i64) {
        self.position = self.position.offset(dx, dy);
    }

    pub fn move_to(&mut self, x: i64, y: i64) {
        self.position = Position::new(x, y);
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = self.rotation.rotate_clockwise();
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.rotation = self.rotation.rotate_counterclockwise();
    }

    /// Independent copy with a fresh id and the same shared type.
    pub fn duplicate(&self) -> Self {
        Self::new(Arc::clone(&self.object_type), self.position, self.rotation)
    }

    /// Occupied area in grid units.
    pub fn footprint(&self) -> BBox {
        geometry::footprint(&self.object_type, self.position, self.rotation)
    }

    pub fn to_record(&self) -> InstanceRecord {
        InstanceRecord {
            type_name: self.object_type.name.clone(),
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn from_record(record: &InstanceRecord, catalog: &Catalog) -> Result<Self, CatalogError> {
        let object_type = catalog.lookup(&record.type_name)?;
        Ok(Self::new(object_type, record.position, record.rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smelter(catalog: &Catalog) -> PlacedInstance {
        PlacedInstance::new(
            catalog.lookup("Smelter").unwrap(),
            Position::new(10, 10),
            Rotation::Deg0,
        )
    }

    #[test]
    fn test_translate_and_move() {
        let catalog = Catalog::builtin();
        let mut inst = smelter(&catalog);
        inst.translate(3, -4);
        assert_eq!(inst.position, Position::new(13, 6));
        inst.move_to(-2, 7);
        assert_eq!(inst.position, Position::new(-2, 7));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let catalog = Catalog::builtin();
        let original = smelter(&catalog);
        let mut copy = original.duplicate();
        assert_ne!(copy.id(), original.id());
        assert!(Arc::ptr_eq(copy.object_type(), original.object_type()));

        copy.translate(5, 5);
        copy.rotate_clockwise();
        assert_eq!(original.position, Position::new(10, 10));
        assert_eq!(original.rotation, Rotation::Deg0);
    }

    #[test]
    fn test_record_round_trip() {
        let catalog = Catalog::builtin();
        let mut inst = smelter(&catalog);
        inst.rotate_counterclockwise();
        let record = inst.to_record();
        assert_eq!(record.rotation, Rotation::Deg270);

        let restored = PlacedInstance::from_record(&record, &catalog).unwrap();
        assert_eq!(restored.to_record(), record);
    }

    #[test]
    fn test_from_record_unknown_type() {
        let catalog = Catalog::builtin();
        let record = InstanceRecord {
            type_name: "Particle Accelerator".to_string(),
            position: Position::origin(),
            rotation: Rotation::Deg0,
        };
        let err = PlacedInstance::from_record(&record, &catalog).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownType("Particle Accelerator".to_string())
        );
    }

    #[test]
    fn test_record_json_shape() {
        let catalog = Catalog::builtin();
        let value = serde_json::to_value(smelter(&catalog).to_record()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "Smelter", "position": {"x": 10, "y": 10}, "rotation": 0})
        );
    }
}
