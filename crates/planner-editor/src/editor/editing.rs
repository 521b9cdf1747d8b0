use planner_core::geometry::{world_to_grid, world_to_grid_snapped};
use planner_core::{BBox, InstanceId, Point};

use super::{Editor, Mode};

impl Editor {
    /// Remove every selected building. Returns how many were removed.
    pub fn delete_selection(&mut self) -> usize {
        let ids: Vec<InstanceId> = self.selection.ids().to_vec();
        let removed = ids
            .into_iter()
            .filter(|&id| self.layout.remove(id).is_some())
            .count();
        self.selection.clear();
        if removed > 0 {
            log::debug!("Deleted {} buildings", removed);
            self.layout_changed();
        }
        removed
    }

    pub fn select_all(&mut self) {
        self.selection.replace(self.layout.ids());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Add or remove one building from the selection. Unknown ids are ignored.
    pub fn toggle_selected(&mut self, id: InstanceId) -> bool {
        if !self.layout.contains(id) {
            return false;
        }
        self.selection.toggle(id)
    }

    /// Select every building touching the rectangle spanned by two scene points.
    pub fn select_region(&mut self, a: Point, b: Point) -> usize {
        let grid_size = self.settings.grid_size;
        let region = BBox::from_corners(world_to_grid(a, grid_size), world_to_grid(b, grid_size));
        let ids = self.layout.ids_in_region(&region);
        let count = ids.len();
        self.selection.replace(ids);
        count
    }

    /// Turn every selected building a quarter clockwise around its own
    /// position. Unlike the placement preview, the centre is not preserved.
    pub(super) fn rotate_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        for &id in self.selection.ids() {
            if let Some(instance) = self.layout.get_mut(id) {
                instance.rotate_clockwise();
            }
        }
        self.layout_changed();
    }

    /// Move the selection by whole cells as the dragged cursor crosses them.
    pub(super) fn drag_to(&mut self, point: Point) {
        let Mode::Dragging { last_cell } = self.mode else {
            return;
        };
        let cell = world_to_grid_snapped(point, self.settings.grid_size);
        let dx = cell.x.saturating_sub(last_cell.x);
        let dy = cell.y.saturating_sub(last_cell.y);
        if dx == 0 && dy == 0 {
            return;
        }
        for &id in self.selection.ids() {
            if let Some(instance) = self.layout.get_mut(id) {
                instance.translate(dx, dy);
            }
        }
        self.mode = Mode::Dragging { last_cell: cell };
        self.layout_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::editor::EditorMode;
    use planner_core::{Position, Rotation};

    #[test]
    fn test_select_all_and_delete() {
        let mut editor = editor();
        place(&mut editor, "Smelter", 0, 0);
        place(&mut editor, "Foundry", 20, 0);
        editor.select_all();
        assert_eq!(editor.selection().len(), 2);

        assert_eq!(editor.delete_selection(), 2);
        assert!(editor.instances().is_empty());
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_delete_only_selected() {
        let mut editor = editor();
        let a = place(&mut editor, "Smelter", 0, 0);
        let b = place(&mut editor, "Foundry", 20, 0);
        let c = place(&mut editor, "Merger", 40, 0);
        editor.toggle_selected(b);

        assert_eq!(editor.delete_selection(), 1);
        let ids: Vec<_> = editor.instances().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(editor.delete_selection(), 0);
    }

    #[test]
    fn test_delete_works_while_placing() {
        let mut editor = editor();
        let id = place(&mut editor, "Smelter", 0, 0);
        editor.set_preview_type_by_name("Smelter").unwrap();
        assert!(editor.is_preview_colliding());

        editor.toggle_selected(id);
        editor.delete_selection();
        assert_eq!(editor.mode(), EditorMode::Placing);
        assert!(!editor.is_preview_colliding());
    }

    #[test]
    fn test_rotate_selection_in_place() {
        let mut editor = editor();
        let id = place(&mut editor, "Smelter", 10, 10);
        let other = place(&mut editor, "Smelter", 30, 10);
        editor.toggle_selected(id);

        editor.rotate();
        let rotated = editor.layout().get(id).unwrap();
        assert_eq!(rotated.rotation, Rotation::Deg90);
        assert_eq!(rotated.position, Position::new(10, 10));
        assert_eq!(editor.layout().get(other).unwrap().rotation, Rotation::Deg0);
    }

    #[test]
    fn test_rotate_without_selection_is_noop() {
        let mut editor = editor();
        let id = place(&mut editor, "Smelter", 10, 10);
        editor.rotate();
        assert_eq!(editor.layout().get(id).unwrap().rotation, Rotation::Deg0);
    }

    #[test]
    fn test_toggle_ignores_unknown_ids() {
        let mut editor = editor();
        assert!(!editor.toggle_selected(uuid::Uuid::new_v4()));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_select_region() {
        let mut editor = editor();
        let a = place(&mut editor, "Splitter", 0, 0);
        let b = place(&mut editor, "Splitter", 10, 0);
        place(&mut editor, "Splitter", 100, 100);

        // Drag from the far corner back towards the origin.
        let count = editor.select_region(at(12.0, 2.0), at(1.0, 1.0));
        assert_eq!(count, 2);
        assert_eq!(editor.selection(), &[a, b]);
    }

    #[test]
    fn test_drag_moves_selection_by_whole_cells() {
        let mut editor = editor();
        let a = place(&mut editor, "Splitter", 0, 0);
        let b = place(&mut editor, "Splitter", 10, 0);
        editor.select_all();

        editor.on_pointer_move(at(1.0, 1.0));
        editor.on_primary_click();
        assert_eq!(editor.mode(), EditorMode::Dragging);
        assert_eq!(editor.selection().len(), 2);

        // Less than half a cell: nothing moves.
        editor.on_pointer_move(at(1.4, 1.0));
        assert_eq!(editor.layout().get(a).unwrap().position, Position::new(0, 0));

        editor.on_pointer_move(at(4.0, -2.0));
        assert_eq!(editor.layout().get(a).unwrap().position, Position::new(3, -3));
        assert_eq!(editor.layout().get(b).unwrap().position, Position::new(13, -3));

        editor.on_primary_release();
        assert_eq!(editor.mode(), EditorMode::Idle);
        editor.on_pointer_move(at(40.0, 40.0));
        assert_eq!(editor.layout().get(a).unwrap().position, Position::new(3, -3));
    }

    #[test]
    fn test_drag_to_extreme_cursor_clamps() {
        let mut editor = editor();
        let a = place(&mut editor, "Splitter", -10, 0);
        editor.on_pointer_move(at(-9.0, 1.0));
        editor.on_primary_click();
        assert_eq!(editor.mode(), EditorMode::Dragging);

        // The cell delta clamps to i64::MAX, then i64::MIN on the way back.
        editor.on_pointer_move(planner_core::Point::new(f64::MAX, 16.0));
        assert_eq!(editor.layout().get(a).unwrap().position, Position::new(i64::MAX - 10, 0));
        editor.on_pointer_move(planner_core::Point::new(f64::MIN, 16.0));
        assert_eq!(editor.layout().get(a).unwrap().position, Position::new(-11, 0));
    }
}
