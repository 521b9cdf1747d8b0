use planner_core::{BBox, InstanceId, PlacedInstance};
use planner_editor::{Editor, EditorMode};
use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// A placed building ready to be drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderInstance {
    pub id: InstanceId,
    pub type_name: String,
    pub icon: String,
    /// Scene-space footprint: [min_x, min_y, max_x, max_y]
    pub footprint: [f64; 4],
    pub rotation_degrees: f64,
    pub selected: bool,
    /// Whether any part of it falls inside the viewport.
    pub visible: bool,
}

/// The translucent building that follows the cursor while placing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPreview {
    pub type_name: String,
    pub icon: String,
    pub footprint: [f64; 4],
    pub rotation_degrees: f64,
    pub opacity: f32,
    /// Tint the preview as a warning; placement is still allowed.
    pub colliding: bool,
}

/// Everything a canvas needs to draw one frame of the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Placed buildings in draw order, bottom first.
    pub instances: Vec<RenderInstance>,
    pub preview: Option<RenderPreview>,
    pub mode: EditorMode,
    pub viewport: Viewport,
    /// Scene pixels between grid lines.
    pub grid_spacing: f64,
    pub selection_bbox: Option<[f64; 4]>,
}

fn to_array(bbox: &BBox) -> [f64; 4] {
    [bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y]
}

fn scene_footprint(instance: &PlacedInstance, grid_size: f64) -> BBox {
    instance.footprint().scale(grid_size)
}

impl RenderFrame {
    pub fn empty(viewport: Viewport, grid_spacing: f64) -> Self {
        Self {
            instances: Vec::new(),
            preview: None,
            mode: EditorMode::Idle,
            viewport,
            grid_spacing,
            selection_bbox: None,
        }
    }

    pub fn from_editor(editor: &Editor, viewport: &Viewport) -> Self {
        let grid_size = editor.settings().grid_size;
        let visible_area = viewport.visible_bounds();
        let mut frame = Self::empty(*viewport, grid_size);
        frame.mode = editor.mode();
        let mut selection_bbox: Option<BBox> = None;

        for instance in editor.instances() {
            let bbox = scene_footprint(instance, grid_size);
            let selected = editor.is_selected(instance.id());
            if selected {
                selection_bbox = Some(match selection_bbox {
                    Some(acc) => acc.union(&bbox),
                    None => bbox,
                });
            }
            let object_type = instance.object_type();
            frame.instances.push(RenderInstance {
                id: instance.id(),
                type_name: object_type.name.clone(),
                icon: object_type.icon.clone(),
                footprint: to_array(&bbox),
                rotation_degrees: instance.rotation.degrees(),
                selected,
                visible: bbox.intersects(&visible_area),
            });
        }

        frame.preview = editor.preview().map(|preview| {
            let object_type = preview.object_type();
            RenderPreview {
                type_name: object_type.name.clone(),
                icon: object_type.icon.clone(),
                footprint: to_array(&scene_footprint(preview, grid_size)),
                rotation_degrees: preview.rotation.degrees(),
                opacity: editor.settings().preview_opacity,
                colliding: editor.is_preview_colliding(),
            }
        });
        frame.selection_bbox = selection_bbox.as_ref().map(to_array);
        frame
    }

    pub fn visible_count(&self) -> usize {
        self.instances.iter().filter(|i| i.visible).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
