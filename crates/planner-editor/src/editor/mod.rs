//! The layout editing state machine.
//!
//! Submodules split the operations by concern:
//! - `placement`: preview tracking, placing, rotation, pointer and click handling
//! - `editing`: selection, deletion, in-place rotation, drag moves
//! - `clipboard`: copy, cut, paste
//! - `document`: save and load

mod clipboard;
mod document;
mod editing;
mod placement;

pub use placement::ClickOutcome;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use planner_collision::CollisionChecker;
use planner_core::{Catalog, InstanceId, Layout, PlacedInstance, Point, Position};
use planner_io::EditorSettings;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;

/// What the editor is doing, as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
    Idle,
    /// A catalog type is selected and a preview follows the cursor.
    Placing,
    /// Selected buildings follow the cursor until the button is released.
    Dragging,
}

#[derive(Debug)]
pub(crate) struct Preview {
    pub(crate) instance: PlacedInstance,
    /// Placed buildings the preview currently overlaps.
    pub(crate) collisions: Vec<InstanceId>,
}

#[derive(Debug)]
pub(crate) enum Mode {
    Idle,
    Placing(Preview),
    Dragging { last_cell: Position },
}

/// Owns the live layout and interprets input against it, one event at a time.
#[derive(Debug)]
pub struct Editor {
    catalog: Arc<Catalog>,
    settings: EditorSettings,
    layout: Layout,
    mode: Mode,
    selection: Selection,
    clipboard: Layout,
    /// Last pointer position in scene coordinates.
    cursor: Option<Point>,
    current_file: Option<PathBuf>,
    modified: bool,
}

impl Editor {
    pub fn new(catalog: Arc<Catalog>, settings: EditorSettings) -> Self {
        Self {
            catalog,
            settings,
            layout: Layout::new(),
            mode: Mode::Idle,
            selection: Selection::new(),
            clipboard: Layout::new(),
            cursor: None,
            current_file: None,
            modified: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Placed buildings in draw order.
    pub fn instances(&self) -> &[PlacedInstance] {
        self.layout.instances()
    }

    pub fn mode(&self) -> EditorMode {
        match self.mode {
            Mode::Idle => EditorMode::Idle,
            Mode::Placing(_) => EditorMode::Placing,
            Mode::Dragging { .. } => EditorMode::Dragging,
        }
    }

    /// The uncommitted building under the cursor while placing.
    pub fn preview(&self) -> Option<&PlacedInstance> {
        match &self.mode {
            Mode::Placing(preview) => Some(&preview.instance),
            _ => None,
        }
    }

    /// Whether the preview overlaps a placed building. Advisory only.
    pub fn is_preview_colliding(&self) -> bool {
        !self.preview_collisions().is_empty()
    }

    pub fn preview_collisions(&self) -> &[InstanceId] {
        match &self.mode {
            Mode::Placing(preview) => &preview.collisions,
            _ => &[],
        }
    }

    pub fn selection(&self) -> &[InstanceId] {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: InstanceId) -> bool {
        self.selection.contains(id)
    }

    pub fn clipboard(&self) -> &Layout {
        &self.clipboard
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// True when the layout changed since the last save or load.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    // ── Internal helpers ─────────────────────────────────────────────

    fn collision_checker(&self) -> CollisionChecker {
        CollisionChecker::new(&self.layout, self.settings.collision_epsilon)
    }

    /// Recompute the preview's collision list against the current layout.
    fn refresh_preview_collisions(&mut self) {
        let checker = match self.mode {
            Mode::Placing(_) => self.collision_checker(),
            _ => return,
        };
        if let Mode::Placing(preview) = &mut self.mode {
            preview.collisions = checker.colliding_with(&preview.instance.footprint(), &[]);
        }
    }

    /// Called after every change to the layout's contents or geometry.
    fn layout_changed(&mut self) {
        self.modified = true;
        let layout = &self.layout;
        self.selection.retain(|id| layout.contains(id));
        self.refresh_preview_collisions();
    }
}
