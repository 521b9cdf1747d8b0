//! Line-oriented editor scripts.
//!
//! One step per line, `#` starts a comment. Pointer coordinates are given in
//! grid units and converted to scene pixels with the editor's grid size.
//!
//! ```text
//! place Smelter
//! move 13 14
//! click
//! cancel
//! select-all
//! rotate
//! save factory.fl
//! ```

use std::path::PathBuf;

use planner_core::Point;
use planner_editor::{Editor, EditorCommand, EditorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Step {
        line: usize,
        #[source]
        source: EditorError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Start placing the named catalog type.
    Place(String),
    /// Pointer moved to a grid coordinate.
    Move(f64, f64),
    Click,
    Release,
    RightClick,
    ClearSelection,
    SelectRegion([f64; 4]),
    Command(EditorCommand),
}

fn parse_coords<const N: usize>(args: &[&str], line: usize) -> Result<[f64; N], ScriptError> {
    if args.len() != N {
        return Err(ScriptError::Parse {
            line,
            message: format!("expected {} numbers, got {}", N, args.len()),
        });
    }
    let mut coords = [0.0; N];
    for (slot, arg) in coords.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| ScriptError::Parse {
            line,
            message: format!("'{}' is not a number", arg),
        })?;
    }
    Ok(coords)
}

fn no_args(step: Step, args: &[&str], line: usize) -> Result<Step, ScriptError> {
    if args.is_empty() {
        Ok(step)
    } else {
        Err(ScriptError::Parse {
            line,
            message: format!("unexpected argument '{}'", args[0]),
        })
    }
}

fn parse_line(text: &str, line: usize) -> Result<Option<Step>, ScriptError> {
    let text = text.split('#').next().unwrap_or("").trim();
    let mut words = text.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let step = match keyword {
        "place" => {
            if args.is_empty() {
                return Err(ScriptError::Parse {
                    line,
                    message: "place needs a building type".to_string(),
                });
            }
            Step::Place(args.join(" "))
        }
        "move" => {
            let [x, y] = parse_coords::<2>(&args, line)?;
            Step::Move(x, y)
        }
        "select-region" => Step::SelectRegion(parse_coords::<4>(&args, line)?),
        "click" => no_args(Step::Click, &args, line)?,
        "release" => no_args(Step::Release, &args, line)?,
        "right-click" => no_args(Step::RightClick, &args, line)?,
        "clear-selection" => no_args(Step::ClearSelection, &args, line)?,
        "delete" => no_args(Step::Command(EditorCommand::Delete), &args, line)?,
        "select-all" => no_args(Step::Command(EditorCommand::SelectAll), &args, line)?,
        "copy" => no_args(Step::Command(EditorCommand::Copy), &args, line)?,
        "cut" => no_args(Step::Command(EditorCommand::Cut), &args, line)?,
        "paste" => no_args(Step::Command(EditorCommand::Paste), &args, line)?,
        "rotate" => no_args(Step::Command(EditorCommand::Rotate), &args, line)?,
        "cancel" => no_args(Step::Command(EditorCommand::Cancel), &args, line)?,
        "save" => match args.as_slice() {
            [] => Step::Command(EditorCommand::Save(None)),
            _ => Step::Command(EditorCommand::Save(Some(PathBuf::from(args.join(" "))))),
        },
        "load" => {
            if args.is_empty() {
                return Err(ScriptError::Parse {
                    line,
                    message: "load needs a file".to_string(),
                });
            }
            Step::Command(EditorCommand::Load(PathBuf::from(args.join(" "))))
        }
        other => {
            return Err(ScriptError::Parse {
                line,
                message: format!("unknown step '{}'", other),
            })
        }
    };
    Ok(Some(step))
}

/// Parse a whole script. Steps carry their 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Step)>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if let Some(step) = parse_line(raw, index + 1)? {
            steps.push((index + 1, step));
        }
    }
    Ok(steps)
}

/// Feed parsed steps to the editor, stopping at the first failure.
pub fn run_script(editor: &mut Editor, steps: Vec<(usize, Step)>) -> Result<(), ScriptError> {
    let grid_size = editor.settings().grid_size;
    let scene = |x: f64, y: f64| Point::new(x * grid_size, y * grid_size);

    for (line, step) in steps {
        log::debug!("Line {}: {:?}", line, step);
        let result = match step {
            Step::Place(name) => editor.set_preview_type_by_name(&name),
            Step::Move(x, y) => {
                editor.on_pointer_move(scene(x, y));
                Ok(())
            }
            Step::Click => {
                editor.on_primary_click();
                Ok(())
            }
            Step::Release => {
                editor.on_primary_release();
                Ok(())
            }
            Step::RightClick => {
                editor.on_secondary_click();
                Ok(())
            }
            Step::ClearSelection => {
                editor.clear_selection();
                Ok(())
            }
            Step::SelectRegion([x1, y1, x2, y2]) => {
                editor.select_region(scene(x1, y1), scene(x2, y2));
                Ok(())
            }
            Step::Command(command) => editor.execute(command),
        };
        result.map_err(|source| ScriptError::Step { line, source })?;
    }
    Ok(())
}
