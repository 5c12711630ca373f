// ── Row selection ──

use std::collections::BTreeSet;

use crate::model::{EntityId, Identified};

/// The set of rows an admin has ticked for a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if unselected, otherwise unselect it. Returns whether
    /// it is selected afterwards.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: EntityId) {
        self.ids.insert(id);
    }

    /// Replace the selection with every visible row that has an id.
    pub fn select_all<'a, T: Identified + 'a>(&mut self, visible: impl IntoIterator<Item = &'a T>) {
        self.ids = visible
            .into_iter()
            .map(Identified::id)
            .filter(|id| !id.is_empty())
            .cloned()
            .collect();
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }
}

impl FromIterator<EntityId> for Selection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(EntityId);

    impl Identified for Row {
        fn id(&self) -> &EntityId {
            &self.0
        }
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(EntityId::new("a")));
        assert!(selection.contains(&EntityId::new("a")));
        assert!(!selection.toggle(EntityId::new("a")));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_skips_rows_without_ids() {
        let rows = [Row(EntityId::new("a")), Row(EntityId::default()), Row(EntityId::new("b"))];
        let mut selection: Selection = [EntityId::new("stale")].into_iter().collect();
        selection.select_all(&rows);
        assert_eq!(selection.len(), 2);
        assert!(!selection.contains(&EntityId::new("stale")));
    }
}
