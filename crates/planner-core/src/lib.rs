//! # Factory Planner Core
//!
//! Building catalog, placed-instance model, layout container and the grid
//! geometry shared by placement, dragging and collision checks. Footprints
//! are indexed in an R-tree for hit-testing and overlap queries.

pub mod geometry;
pub mod catalog;
pub mod instance;
pub mod layout;
pub mod spatial;

pub use catalog::{Catalog, CatalogError, ObjectType};
pub use geometry::{BBox, Point, Position, Rotation};
pub use instance::{InstanceId, InstanceRecord, PlacedInstance};
pub use layout::Layout;
pub use spatial::{SpatialEntry, SpatialIndex};
