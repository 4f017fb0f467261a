use std::collections::HashSet;

/// Bulk-selection set scoped to whatever item list the caller passes
/// in (in practice the current page). Ids that have scrolled out of
/// view stay in the set but are ignored by the all/some queries, which
/// only look at the overlap with the current items.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<i64>,
}

impl Selection {
    pub fn toggle(&mut self, id: i64) {
        if !self.ids.insert(id) {
            self.ids.remove(&id);
        }
    }

    /// All-or-nothing toggle against the current items: if every
    /// current id is already selected (and there is at least one),
    /// clear the whole selection; otherwise select all current ids.
    pub fn toggle_all(&mut self, current: &[i64]) {
        if self.is_all_selected(current) {
            self.ids.clear();
        } else {
            self.ids.extend(current.iter().copied());
        }
    }

    pub fn select_all(&mut self, current: &[i64]) {
        self.ids.extend(current.iter().copied());
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_all_selected(&self, current: &[i64]) -> bool {
        !current.is_empty() && current.iter().all(|id| self.ids.contains(id))
    }

    /// Drives the indeterminate checkbox state: some of the current
    /// items selected, but not all of them.
    pub fn is_some_selected(&self, current: &[i64]) -> bool {
        let selected_here = current.iter().filter(|id| self.ids.contains(id)).count();
        selected_here > 0 && selected_here < current.len()
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
