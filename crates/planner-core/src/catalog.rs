use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A building definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Unique key, also the name written to layout files.
    pub name: String,
    /// Extent along x at rotation 0, in grid units.
    pub width: u32,
    /// Extent along y at rotation 0, in grid units.
    pub length: u32,
    /// Palette grouping label.
    pub category: String,
    /// Opaque reference to the icon image, resolved by the presentation layer.
    pub icon: String,
}

impl ObjectType {
    pub fn new(name: &str, width: u32, length: u32, category: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            width,
            length,
            category: category.to_string(),
            icon: icon.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Building type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("Unknown building type '{0}'")]
    UnknownType(String),
}

/// Read-only registry of building types, built once at startup.
///
/// Insertion order is preserved so palettes list types the way the seed
/// table does.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: Vec<Arc<ObjectType>>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate names.
    pub fn from_types<I>(types: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = ObjectType>,
    {
        let mut catalog = Self::new();
        for ty in types {
            catalog.insert(ty)?;
        }
        log::info!("Catalog ready with {} building types", catalog.len());
        Ok(catalog)
    }

    /// The stock building set.
    pub fn builtin() -> Self {
        Self::from_types(builtin_types()).unwrap_or_else(|err| {
            log::error!("Built-in catalog is inconsistent: {}", err);
            Self::first_definitions(builtin_types())
        })
    }

    /// Build a catalog keeping the first definition of each repeated name.
    fn first_definitions<I>(types: I) -> Self
    where
        I: IntoIterator<Item = ObjectType>,
    {
        let mut catalog = Self::new();
        for ty in types {
            if let Err(err) = catalog.insert(ty) {
                log::warn!("{}, keeping the first definition", err);
            }
        }
        catalog
    }

    fn insert(&mut self, ty: ObjectType) -> Result<(), CatalogError> {
        if self.by_name.contains_key(&ty.name) {
            return Err(CatalogError::DuplicateType(ty.name));
        }
        self.by_name.insert(ty.name.clone(), self.types.len());
        self.types.push(Arc::new(ty));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ObjectType>> {
        self.by_name.get(name).map(|&idx| &self.types[idx])
    }

    /// Like [`Catalog::get`] but an unknown name is an error.
    pub fn lookup(&self, name: &str) -> Result<Arc<ObjectType>, CatalogError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ObjectType>> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types grouped by category, categories in first-seen order.
    pub fn categories(&self) -> Vec<(&str, Vec<&Arc<ObjectType>>)> {
        let mut groups: Vec<(&str, Vec<&Arc<ObjectType>>)> = Vec::new();
        for ty in &self.types {
            match groups.iter_mut().find(|(cat, _)| *cat == ty.category) {
                Some((_, members)) => members.push(ty),
                None => groups.push((ty.category.as_str(), vec![ty])),
            }
        }
        groups
    }
}

fn builtin_types() -> Vec<ObjectType> {
    vec![
        // Production
        ObjectType::new("Constructor", 8, 10, "Production", "./resources/Constructor.png"),
        ObjectType::new("Assembler", 10, 15, "Production", "./resources/Assembler.jpg"),
        ObjectType::new("Manufacturer", 18, 20, "Production", "./resources/Manufacturer.png"),
        ObjectType::new("Foundry", 10, 9, "Production", "./resources/Foundry.png"),
        ObjectType::new("Smelter", 6, 9, "Production", "./resources/Smelter.png"),
        ObjectType::new("Refinery", 10, 20, "Production", "./resources/Refinery.png"),
        // Power
        ObjectType::new("Coal Generator", 10, 26, "Power", "./resources/CoalGenerator.png"),
        ObjectType::new("Fuel Generator", 20, 20, "Power", "./resources/FuelGenerator.png"),
        // Logistics
        ObjectType::new("Lift (IN)", 2, 2, "Logistics", "./resources/LiftIn.png"),
        ObjectType::new("Lift (OUT)", 2, 2, "Logistics", "./resources/LiftOut.png"),
        ObjectType::new("Splitter", 4, 4, "Logistics", "./resources/Splitter.png"),
        ObjectType::new("Merger", 4, 4, "Logistics", "./resources/Merger.png"),
        ObjectType::new("Pipe Junction", 4, 4, "Logistics", "./resources/PipeJunction.png"),
        // Organisation
        ObjectType::new("Storage container", 10, 5, "Organisation", "./resources/StorageContainer.png"),
        // Other
        ObjectType::new("AWESOME Sink", 16, 13, "Other", "./resources/Sink.png"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 15);
        let smelter = catalog.get("Smelter").unwrap();
        assert_eq!((smelter.width, smelter.length), (6, 9));
        assert!(catalog.get("Nuclear Plant").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Catalog::from_types([
            ObjectType::new("Splitter", 4, 4, "Logistics", ""),
            ObjectType::new("Splitter", 2, 2, "Logistics", ""),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateType("Splitter".to_string())
        );
    }

    #[test]
    fn test_lookup_unknown_type() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.lookup("Blender").unwrap_err(),
            CatalogError::UnknownType("Blender".to_string())
        );
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.categories().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            names,
            vec!["Production", "Power", "Logistics", "Organisation", "Other"]
        );
        let production = &catalog.categories()[0].1;
        assert_eq!(production.len(), 6);
    }

    #[test]
    fn test_builtin_table_has_unique_names() {
        let catalog = Catalog::from_types(builtin_types()).unwrap();
        assert_eq!(catalog.len(), 15);
        assert_eq!(Catalog::builtin().len(), catalog.len());
    }

    #[test]
    fn test_first_definition_wins_on_repeat() {
        let catalog = Catalog::first_definitions(vec![
            ObjectType::new("Splitter", 4, 4, "Logistics", ""),
            ObjectType::new("Splitter", 2, 2, "Logistics", ""),
            ObjectType::new("Merger", 4, 4, "Logistics", ""),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("Splitter").unwrap().width, 4);
    }
}
