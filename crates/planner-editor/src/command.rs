use std::path::PathBuf;

use crate::editor::Editor;
use crate::error::EditorError;

/// Named editing operations. The presentation layer binds keys and menu
/// entries to these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Delete,
    SelectAll,
    Copy,
    Cut,
    Paste,
    Rotate,
    /// Leave placement mode or abort a drag.
    Cancel,
    /// Save to the given file, or to the current file when `None`.
    Save(Option<PathBuf>),
    Load(PathBuf),
}

impl EditorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::Delete => "delete",
            EditorCommand::SelectAll => "select-all",
            EditorCommand::Copy => "copy",
            EditorCommand::Cut => "cut",
            EditorCommand::Paste => "paste",
            EditorCommand::Rotate => "rotate",
            EditorCommand::Cancel => "cancel",
            EditorCommand::Save(_) => "save",
            EditorCommand::Load(_) => "load",
        }
    }
}

impl Editor {
    pub fn execute(&mut self, command: EditorCommand) -> Result<(), EditorError> {
        log::debug!("Command: {}", command.name());
        match command {
            EditorCommand::Delete => {
                self.delete_selection();
            }
            EditorCommand::SelectAll => self.select_all(),
            EditorCommand::Copy => {
                self.copy_selection();
            }
            EditorCommand::Cut => {
                self.cut_selection();
            }
            EditorCommand::Paste => {
                self.paste();
            }
            EditorCommand::Rotate => self.rotate(),
            EditorCommand::Cancel => self.cancel(),
            EditorCommand::Save(Some(path)) => self.save_to(&path)?,
            EditorCommand::Save(None) => self.save()?,
            EditorCommand::Load(path) => self.load_from(&path)?,
        }
        Ok(())
    }
}
