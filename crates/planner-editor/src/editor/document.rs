use std::path::Path;

use planner_io::codec;

use super::{Editor, Mode};
use crate::error::EditorError;

impl Editor {
    /// Save to `path` and remember it for later saves.
    pub fn save_to(&mut self, path: &Path) -> Result<(), EditorError> {
        codec::write_layout(path, &self.layout)?;
        self.current_file = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Save to the file last saved to or loaded from.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.current_file.clone().ok_or(EditorError::NoFilePath)?;
        self.save_to(&path)
    }

    /// Replace the whole layout with the contents of `path`.
    ///
    /// The file is fully decoded before anything changes; on error the
    /// current layout, selection and file name are kept. A successful load
    /// leaves the editor idle with no preview.
    pub fn load_from(&mut self, path: &Path) -> Result<(), EditorError> {
        let loaded = codec::read_layout(path, &self.catalog)?;
        self.layout.replace_with(loaded.into_instances());
        self.selection.clear();
        self.mode = Mode::Idle;
        self.current_file = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}
