use std::fmt;

use planner_core::geometry::{world_to_grid, world_to_grid_snapped};
use planner_core::{Point, Position};
use serde::Serialize;

/// Where the pointer is, in every coordinate space the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerStatus {
    /// Scene pixels.
    pub scene: Point,
    /// Fractional grid units.
    pub world: Point,
    /// Nearest grid cell.
    pub snapped: Position,
}

impl PointerStatus {
    pub fn new(scene: Point, grid_size: f64) -> Self {
        Self {
            scene,
            world: world_to_grid(scene, grid_size),
            snapped: world_to_grid_snapped(scene, grid_size),
        }
    }
}

impl fmt::Display for PointerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: ({:.1}, {:.1})  World: ({:.2}, {:.2})  Snapped: ({}, {})",
            self.scene.x, self.scene.y, self.world.x, self.world.y, self.snapped.x, self.snapped.y
        )
    }
}
