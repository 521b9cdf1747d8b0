//! Catalog seed files: a JSON array of building definitions.
//!
//! ```text
//! [{"name": "Smelter", "width": 6, "length": 9, "category": "Production", "icon": "smelter.png"}]
//! ```

use std::path::Path;

use planner_core::{Catalog, ObjectType};

use crate::codec::CodecError;

pub fn parse_catalog(text: &str) -> Result<Catalog, CodecError> {
    let types: Vec<ObjectType> = serde_json::from_str(text)?;
    Ok(Catalog::from_types(types)?)
}

pub fn read_catalog(path: &Path) -> Result<Catalog, CodecError> {
    let text = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&text)?;
    log::info!("Loaded catalog from {}", path.display());
    Ok(catalog)
}

/// Serialize a catalog in seed-file form, in catalog order.
pub fn catalog_to_json(catalog: &Catalog) -> Result<String, CodecError> {
    let types: Vec<&ObjectType> = catalog.iter().map(|t| t.as_ref()).collect();
    Ok(serde_json::to_string_pretty(&types)?)
}
