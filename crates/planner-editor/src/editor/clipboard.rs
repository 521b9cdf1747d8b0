use planner_core::InstanceId;

use super::Editor;

impl Editor {
    /// Replace the clipboard with copies of the selected buildings.
    /// Returns the number copied; an empty selection empties the clipboard.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = self.layout.extract(self.selection.ids());
        log::debug!("Copied {} buildings", self.clipboard.len());
        self.clipboard.len()
    }

    /// Copy, then delete the selection.
    pub fn cut_selection(&mut self) -> usize {
        let copied = self.copy_selection();
        self.delete_selection();
        copied
    }

    /// Add a copy of the clipboard shifted by the paste offset and select
    /// exactly the new buildings. The clipboard itself is left as is.
    pub fn paste(&mut self) -> Vec<InstanceId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let [dx, dy] = self.settings.paste_offset;
        let added = self.layout.merge_offset(self.clipboard.duplicate(), dx, dy);
        log::debug!("Pasted {} buildings", added.len());
        self.selection.replace(added.clone());
        self.layout_changed();
        added
    }
}
