use planner_core::InstanceId;

/// Ordered set of selected instance ids, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<InstanceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[InstanceId] {
        &self.ids
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn insert(&mut self, id: InstanceId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: InstanceId) {
        self.ids.retain(|&i| i != id);
    }

    /// Flip membership. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: InstanceId) -> bool {
        if self.contains(id) {
            self.remove(id);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn replace(&mut self, ids: Vec<InstanceId>) {
        self.ids.clear();
        for id in ids {
            self.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids for which `keep` is false.
    pub fn retain(&mut self, keep: impl Fn(InstanceId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }
}
