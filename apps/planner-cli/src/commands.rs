use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use planner_collision::{find_overlaps, Overlap};
use planner_core::{Catalog, Layout};
use planner_editor::Editor;
use planner_io::{read_catalog, read_layout, EditorSettings};
use planner_render::{RenderFrame, Viewport};

use crate::script::{parse_script, run_script};

/// Catalog and settings shared by every subcommand.
pub struct Environment {
    pub catalog: Arc<Catalog>,
    pub settings: EditorSettings,
}

impl Environment {
    pub fn load(settings: Option<&Path>, catalog: Option<&Path>) -> Result<Self, String> {
        let settings = match settings {
            Some(path) => EditorSettings::load(path)
                .map_err(|e| format!("{}: {}", path.display(), e))?,
            None => EditorSettings::default(),
        };
        let catalog = match catalog {
            Some(path) => read_catalog(path).map_err(|e| format!("{}: {}", path.display(), e))?,
            None => Catalog::builtin(),
        };
        Ok(Self {
            catalog: Arc::new(catalog),
            settings,
        })
    }

    fn open(&self, path: &Path) -> Result<Layout, String> {
        read_layout(path, &self.catalog).map_err(|e| format!("{}: {}", path.display(), e))
    }
}

/// Every building type grouped by category.
pub fn list_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (category, types) in catalog.categories() {
        let _ = writeln!(out, "{}", category);
        for ty in types {
            let _ = writeln!(out, "  {:<20} {:>3} x {:<3} {}", ty.name, ty.width, ty.length, ty.icon);
        }
    }
    out
}

/// Building counts per type, bounds and overlap count of a layout file.
pub fn inspect(env: &Environment, path: &Path) -> Result<String, String> {
    let layout = env.open(path)?;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for instance in layout.iter() {
        *counts.entry(instance.type_name()).or_default() += 1;
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}: {} buildings", path.display(), layout.len());
    for (name, count) in &counts {
        let _ = writeln!(out, "  {:<20} {}", name, count);
    }
    if let Some(bounds) = layout.bounds() {
        let _ = writeln!(
            out,
            "Bounds: ({}, {}) .. ({}, {})",
            bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
        );
    }
    let overlaps = find_overlaps(&layout, env.settings.collision_epsilon);
    let _ = writeln!(out, "Overlaps: {}", overlaps.len());
    Ok(out)
}

/// Every overlapping pair in a layout file.
pub fn check(env: &Environment, path: &Path) -> Result<Vec<Overlap>, String> {
    let layout = env.open(path)?;
    Ok(find_overlaps(&layout, env.settings.collision_epsilon))
}

/// Run a script against a fresh editor, optionally starting from `open`.
pub fn replay(env: &Environment, script: &str, open: Option<&Path>) -> Result<Editor, String> {
    let steps = parse_script(script).map_err(|e| e.to_string())?;
    let mut editor = Editor::new(Arc::clone(&env.catalog), env.settings.clone());
    if let Some(path) = open {
        editor
            .load_from(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    run_script(&mut editor, steps).map_err(|e| e.to_string())?;
    Ok(editor)
}

/// JSON render frame of the editor, framed around everything placed.
pub fn render_frame(editor: &Editor) -> Result<String, String> {
    let mut viewport = Viewport::new(1400.0, 900.0);
    if let Some(bounds) = editor.layout().bounds() {
        viewport.fit(&bounds.scale(editor.settings().grid_size));
    }
    RenderFrame::from_editor(editor, &viewport)
        .to_json()
        .map_err(|e| e.to_string())
}
