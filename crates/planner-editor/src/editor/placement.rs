use std::sync::Arc;

use planner_core::geometry::{anchor_under_cursor, world_to_grid, world_to_grid_snapped};
use planner_core::{InstanceId, ObjectType, PlacedInstance, Point, Position, Rotation};

use super::{Editor, Mode, Preview};
use crate::error::EditorError;
use crate::status::PointerStatus;

/// Result of a primary click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The preview was committed as a new building.
    Placed(InstanceId),
    /// A building under the cursor was picked and a drag started.
    Picked(InstanceId),
    /// Nothing under the cursor; the selection was cleared.
    Cleared,
    /// The click had no effect in the current mode.
    Ignored,
}

impl Editor {
    /// Enter placement mode with a fresh preview of `object_type` at the grid
    /// origin, rotation 0.
    pub fn set_preview_type(&mut self, object_type: Arc<ObjectType>) {
        log::debug!("Placing {}", object_type.name);
        let instance = PlacedInstance::new(object_type, Position::origin(), Rotation::Deg0);
        self.mode = Mode::Placing(Preview {
            instance,
            collisions: Vec::new(),
        });
        self.refresh_preview_collisions();
    }

    /// [`Editor::set_preview_type`] by catalog name.
    pub fn set_preview_type_by_name(&mut self, name: &str) -> Result<(), EditorError> {
        let object_type = self.catalog.lookup(name)?;
        self.set_preview_type(object_type);
        Ok(())
    }

    /// Track the pointer (scene coordinates) and update whatever follows it.
    pub fn on_pointer_move(&mut self, point: Point) -> PointerStatus {
        self.cursor = Some(point);
        match self.mode {
            Mode::Placing(_) => self.snap_preview_to_cursor(),
            Mode::Dragging { .. } => self.drag_to(point),
            Mode::Idle => {}
        }
        PointerStatus::new(point, self.settings.grid_size)
    }

    /// Commit the preview while placing, otherwise pick the building under
    /// the cursor.
    pub fn on_primary_click(&mut self) -> ClickOutcome {
        match &self.mode {
            Mode::Placing(preview) => {
                let placed = preview.instance.duplicate();
                let id = self.layout.add(placed).id();
                self.layout_changed();
                ClickOutcome::Placed(id)
            }
            Mode::Idle => self.pick_at_cursor(),
            Mode::Dragging { .. } => ClickOutcome::Ignored,
        }
    }

    pub fn on_primary_release(&mut self) {
        if let Mode::Dragging { .. } = self.mode {
            self.mode = Mode::Idle;
        }
    }

    /// Leaves placement mode.
    pub fn on_secondary_click(&mut self) {
        if let Mode::Placing(_) = self.mode {
            self.cancel();
        }
    }

    /// Drop the preview or end a drag and return to idle.
    pub fn cancel(&mut self) {
        if !matches!(self.mode, Mode::Idle) {
            log::debug!("Back to idle");
        }
        self.mode = Mode::Idle;
    }

    /// Rotate the preview clockwise while placing, otherwise rotate the
    /// selection in place.
    pub fn rotate(&mut self) {
        match &mut self.mode {
            Mode::Placing(preview) => {
                preview.instance.rotate_clockwise();
                self.snap_preview_to_cursor();
            }
            _ => self.rotate_selection(),
        }
    }

    /// Position the preview so its centre sits on the snapped cursor cell.
    fn snap_preview_to_cursor(&mut self) {
        let Some(cursor) = self.cursor else {
            self.refresh_preview_collisions();
            return;
        };
        let grid_size = self.settings.grid_size;
        if let Mode::Placing(preview) = &mut self.mode {
            let instance = &mut preview.instance;
            let anchor =
                anchor_under_cursor(instance.object_type(), instance.rotation, cursor, grid_size);
            instance.move_to(anchor.x, anchor.y);
        }
        self.refresh_preview_collisions();
    }

    fn pick_at_cursor(&mut self) -> ClickOutcome {
        let Some(cursor) = self.cursor else {
            return ClickOutcome::Ignored;
        };
        let grid_point = world_to_grid(cursor, self.settings.grid_size);
        let hit = self.layout.topmost_at(&grid_point).map(|i| i.id());
        match hit {
            Some(id) => {
                if !self.selection.contains(id) {
                    self.selection.replace(vec![id]);
                }
                self.mode = Mode::Dragging {
                    last_cell: world_to_grid_snapped(cursor, self.settings.grid_size),
                };
                ClickOutcome::Picked(id)
            }
            None => {
                self.selection.clear();
                ClickOutcome::Cleared
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::editor::EditorMode;

    #[test]
    fn test_select_type_creates_preview_at_origin() {
        let mut editor = editor();
        editor.set_preview_type_by_name("Smelter").unwrap();
        assert_eq!(editor.mode(), EditorMode::Placing);
        let preview = editor.preview().unwrap();
        assert_eq!(preview.position, Position::origin());
        assert_eq!(preview.rotation, Rotation::Deg0);
        assert_eq!(preview.type_name(), "Smelter");
    }

    #[test]
    fn test_unknown_type_selection_fails() {
        let mut editor = editor();
        assert!(editor.set_preview_type_by_name("Space Elevator").is_err());
        assert_eq!(editor.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_preview_center_follows_cursor() {
        let mut editor = editor();
        editor.set_preview_type_by_name("Constructor").unwrap();
        editor.on_pointer_move(at(20.0, 30.0));
        // Constructor is 8 x 10, so its pivot sits half a footprint up-left.
        assert_eq!(editor.preview().unwrap().position, Position::new(16, 25));

        editor.rotate();
        let preview = editor.preview().unwrap();
        assert_eq!(preview.rotation, Rotation::Deg90);
        let center = preview.footprint().center();
        assert!((center.x - 20.0).abs() < 1e-10 && (center.y - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_preview_snaps_cursor_to_nearest_cell() {
        let mut editor = editor();
        editor.set_preview_type_by_name("Splitter").unwrap();
        // 10.4 cells right, 9.6 cells down
        editor.on_pointer_move(Point::new(166.4, 153.6));
        assert_eq!(editor.preview().unwrap().position, Position::new(8, 8));
    }

    #[test]
    fn test_click_places_and_keeps_placing() {
        let mut editor = editor();
        editor.set_preview_type_by_name("Smelter").unwrap();
        editor.on_pointer_move(at(13.0, 14.0));
        let first = editor.on_primary_click();
        editor.on_pointer_move(at(40.0, 40.0));
        let second = editor.on_primary_click();

        assert!(matches!(first, ClickOutcome::Placed(_)));
        assert!(matches!(second, ClickOutcome::Placed(_)));
        assert_eq!(editor.instances().len(), 2);
        assert_eq!(editor.mode(), EditorMode::Placing);
        assert_eq!(editor.instances()[0].position, Position::new(10, 10));
        assert!(editor.is_modified());

        let preview = editor.preview().unwrap();
        assert!(!editor.instances().iter().any(|i| i.id() == preview.id()));
    }

    #[test]
    fn test_placement_keeps_preview_rotation() {
        let mut editor = editor();
        editor.set_preview_type_by_name("Refinery").unwrap();
        editor.on_pointer_move(at(0.0, 0.0));
        editor.rotate();
        editor.on_primary_click();
        assert_eq!(editor.instances()[0].rotation, Rotation::Deg90);
        assert_eq!(editor.preview().unwrap().rotation, Rotation::Deg90);
    }

    #[test]
    fn test_secondary_click_discards_preview() {
        let mut editor = editor();
        editor.set_preview_type_by_name("Smelter").unwrap();
        editor.on_secondary_click();
        assert_eq!(editor.mode(), EditorMode::Idle);
        assert!(editor.preview().is_none());
        assert!(editor.instances().is_empty());
    }

    #[test]
    fn test_preview_collision_flag_is_advisory() {
        let mut editor = editor();
        let existing = place(&mut editor, "Smelter", 10, 10);
        editor.set_preview_type_by_name("Smelter").unwrap();

        // Over the existing smelter
        editor.on_pointer_move(at(13.0, 14.0));
        assert!(editor.is_preview_colliding());
        assert_eq!(editor.preview_collisions(), &[existing]);

        // Placement still goes through.
        assert!(matches!(editor.on_primary_click(), ClickOutcome::Placed(_)));
        assert_eq!(editor.instances().len(), 2);

        // Directly to the right, edges touching
        editor.on_pointer_move(at(19.0, 14.0));
        assert_eq!(editor.preview().unwrap().position, Position::new(16, 10));
        assert!(!editor.is_preview_colliding());

        editor.on_pointer_move(at(300.0, 300.0));
        assert!(!editor.is_preview_colliding());
    }

    #[test]
    fn test_idle_click_picks_topmost() {
        let mut editor = editor();
        place(&mut editor, "Manufacturer", 0, 0);
        let top = place(&mut editor, "Splitter", 2, 2);

        editor.on_pointer_move(at(3.0, 3.0));
        assert_eq!(editor.on_primary_click(), ClickOutcome::Picked(top));
        assert_eq!(editor.selection(), &[top]);
        assert_eq!(editor.mode(), EditorMode::Dragging);

        editor.on_primary_release();
        editor.on_pointer_move(at(-50.0, -50.0));
        assert_eq!(editor.on_primary_click(), ClickOutcome::Cleared);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_pointer_status_reports_coordinates() {
        let mut editor = editor();
        let status = editor.on_pointer_move(Point::new(40.0, 8.0));
        assert_eq!(status.snapped, Position::new(3, 1));
        assert_eq!(editor.cursor(), Some(Point::new(40.0, 8.0)));
    }
}
