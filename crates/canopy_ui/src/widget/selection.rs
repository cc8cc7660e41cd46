//! Ordered selection of items.

use crate::input::Modifiers;

/// A set of selected items with the rules widgets need: single or multiple
/// selection, toggling, and a required minimum of one.
///
/// Mutators return true when the owner should fire a change event. User
/// choices always report a change; programmatic edits only report one when
/// [`Selection::set_programmatic_change_events`] is on. Each mutation first
/// that changes the selection records the previous state, so a cancelled
/// change can be undone with [`Selection::revert`].
#[derive(Debug, Clone)]
pub struct Selection<T: Copy + PartialEq> {
    selected: Vec<T>,
    snapshot: Vec<T>,
    snapshot_last: Option<T>,
    last_selected: Option<T>,
    disabled: bool,
    multiple: bool,
    required: bool,
    toggle: bool,
    programmatic_change_events: bool,
}

impl<T: Copy + PartialEq> Default for Selection<T> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            snapshot: Vec::new(),
            snapshot_last: None,
            last_selected: None,
            disabled: false,
            multiple: false,
            required: false,
            toggle: false,
            programmatic_change_events: true,
        }
    }
}

impl<T: Copy + PartialEq> Selection<T> {
    /// Creates an empty single selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a user choice of `item`.
    ///
    /// With toggle mode or the multi-select modifier, choosing a selected
    /// item deselects it. Otherwise a single selection replaces the current
    /// one, and a multiple selection adds to it only with the modifier.
    pub fn choose(&mut self, item: T, modifiers: Modifiers) -> bool {
        if self.disabled {
            return false;
        }
        let before = self.saved();
        let additive = self.toggle || modifiers.multi_select();

        if additive && self.contains(item) {
            if self.required && self.selected.len() == 1 {
                return false;
            }
            self.selected.retain(|&s| s != item);
            self.last_selected = None;
            self.keep_snapshot(before);
        } else {
            let mut modified = false;
            if !self.multiple || !additive {
                if self.selected.len() == 1 && self.contains(item) {
                    return false;
                }
                modified = !self.selected.is_empty();
                self.selected.clear();
            }
            if !self.insert(item) && !modified {
                return false;
            }
            self.last_selected = Some(item);
            self.keep_snapshot(before);
        }
        true
    }

    /// Adds an item.
    pub fn add(&mut self, item: T) -> bool {
        let before = self.saved();
        if !self.insert(item) {
            return false;
        }
        self.keep_snapshot(before);
        self.last_selected = Some(item);
        self.programmatic_change_events
    }

    /// Adds several items. The last one becomes the last selected.
    pub fn add_all(&mut self, items: &[T]) -> bool {
        let before = self.saved();
        let mut added = false;
        for &item in items {
            added |= self.insert(item);
        }
        if !added {
            return false;
        }
        self.keep_snapshot(before);
        self.last_selected = items.last().copied();
        self.programmatic_change_events
    }

    /// Removes an item.
    pub fn remove(&mut self, item: T) -> bool {
        if !self.contains(item) {
            return false;
        }
        self.snapshot();
        self.selected.retain(|&s| s != item);
        self.last_selected = None;
        self.programmatic_change_events
    }

    /// Removes several items.
    pub fn remove_all(&mut self, items: &[T]) -> bool {
        if !items.iter().any(|&item| self.contains(item)) {
            return false;
        }
        self.snapshot();
        self.selected.retain(|s| !items.contains(s));
        self.last_selected = None;
        self.programmatic_change_events
    }

    /// Deselects everything.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.snapshot();
        self.selected.clear();
        self.last_selected = None;
        self.programmatic_change_events
    }

    /// Makes `item` the only selected item.
    pub fn set(&mut self, item: T) -> bool {
        if self.selected.len() == 1 && self.selected[0] == item {
            return false;
        }
        self.snapshot();
        self.selected.clear();
        self.selected.push(item);
        self.last_selected = Some(item);
        self.programmatic_change_events
    }

    /// Makes `items` the selection.
    pub fn set_all(&mut self, items: &[T]) -> bool {
        let mut changed = items.len() != self.selected.len();
        for &item in items {
            changed |= !self.contains(item);
        }
        if !changed {
            return false;
        }
        self.snapshot();
        self.selected.clear();
        for &item in items {
            self.insert(item);
        }
        self.last_selected = items.last().copied();
        self.programmatic_change_events
    }

    /// Selects a contiguous run chosen by the user, replacing the selection
    /// unless `keep` is set. Always reports a change.
    pub fn select_range(&mut self, items: &[T], keep: bool) -> bool {
        self.snapshot();
        if !keep {
            self.selected.clear();
        }
        for &item in items {
            self.insert(item);
        }
        if let Some(&last) = items.last() {
            self.last_selected = Some(last);
        }
        true
    }

    /// Restores the state before the last mutation.
    pub fn revert(&mut self) {
        self.selected.clone_from(&self.snapshot);
        self.last_selected = self.snapshot_last;
    }

    /// Records the current state for [`Selection::revert`]. Mutators call
    /// this themselves.
    pub fn snapshot(&mut self) {
        self.snapshot.clone_from(&self.selected);
        self.snapshot_last = self.last_selected;
    }

    fn saved(&self) -> (Vec<T>, Option<T>) {
        (self.selected.clone(), self.last_selected)
    }

    fn keep_snapshot(&mut self, (selected, last): (Vec<T>, Option<T>)) {
        self.snapshot = selected;
        self.snapshot_last = last;
    }

    fn insert(&mut self, item: T) -> bool {
        if self.contains(item) {
            return false;
        }
        self.selected.push(item);
        true
    }

    /// Returns true if `item` is selected.
    #[must_use]
    pub fn contains(&self, item: T) -> bool {
        self.selected.contains(&item)
    }

    /// Selected items in selection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.selected
    }

    /// Iterates the selected items in selection order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.selected.iter().copied()
    }

    /// The first selected item.
    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.selected.first().copied()
    }

    /// The item selected last, or the first selected item.
    #[must_use]
    pub fn last_selected(&self) -> Option<T> {
        self.last_selected.or_else(|| self.first())
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns true if user choices are ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Ignores user choices while set.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Returns true if more than one item may be selected.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Allows more than one selected item.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.multiple = multiple;
    }

    /// Returns true if the user cannot deselect the last item.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Keeps at least one item selected against user choices.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Returns true if choosing toggles items.
    #[must_use]
    pub const fn is_toggle(&self) -> bool {
        self.toggle
    }

    /// Makes every choice behave as if the multi-select modifier were held.
    pub fn set_toggle(&mut self, toggle: bool) {
        self.toggle = toggle;
    }

    /// Returns true if programmatic edits report changes.
    #[must_use]
    pub const fn programmatic_change_events(&self) -> bool {
        self.programmatic_change_events
    }

    /// Controls whether programmatic edits report changes.
    pub fn set_programmatic_change_events(&mut self, enabled: bool) {
        self.programmatic_change_events = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_single_replaces() {
        let mut selection = Selection::new();
        assert!(selection.choose(1, Modifiers::NONE));
        assert!(selection.choose(2, Modifiers::NONE));
        assert_eq!(selection.items(), &[2]);
        assert!(!selection.choose(2, Modifiers::NONE));
    }

    #[test]
    fn test_choose_multiple_with_ctrl() {
        let mut selection = Selection::new();
        selection.set_multiple(true);
        selection.choose(1, Modifiers::NONE);
        selection.choose(2, Modifiers::CTRL);
        assert_eq!(selection.items(), &[1, 2]);

        selection.choose(1, Modifiers::CTRL);
        assert_eq!(selection.items(), &[2]);
        assert_eq!(selection.last_selected(), Some(2));
    }

    #[test]
    fn test_required_keeps_last_item() {
        let mut selection = Selection::new();
        selection.set_required(true);
        selection.set_toggle(true);
        selection.choose(1, Modifiers::NONE);
        assert!(!selection.choose(1, Modifiers::NONE));
        assert_eq!(selection.items(), &[1]);
    }

    #[test]
    fn test_revert_restores_snapshot() {
        let mut selection = Selection::new();
        selection.choose(1, Modifiers::NONE);
        selection.choose(2, Modifiers::NONE);
        selection.revert();
        assert_eq!(selection.items(), &[1]);
        assert_eq!(selection.last_selected(), Some(1));
    }

    #[test]
    fn test_programmatic_events_toggle() {
        let mut selection = Selection::new();
        assert!(selection.add(1));
        selection.set_programmatic_change_events(false);
        assert!(!selection.add(2));
        assert_eq!(selection.len(), 2);
        assert!(!selection.clear());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_disabled_ignores_choices() {
        let mut selection = Selection::new();
        selection.set_disabled(true);
        assert!(!selection.choose(1, Modifiers::NONE));
        assert!(selection.set(1));
        assert_eq!(selection.first(), Some(1));
    }

    #[test]
    fn test_set_all_detects_no_change() {
        let mut selection = Selection::new();
        assert!(selection.set_all(&[1, 2]));
        assert!(!selection.set_all(&[2, 1]));
        assert!(selection.remove_all(&[1]));
        assert_eq!(selection.items(), &[2]);
    }

    #[test]
    fn test_unchanged_mutation_keeps_revert_point() {
        let mut selection = Selection::new();
        selection.set_multiple(true);
        selection.add(1);
        selection.add(2);
        assert!(!selection.add(2));
        assert!(!selection.remove(3));
        assert!(!selection.set_all(&[1, 2]));
        assert!(!selection.remove_all(&[7, 8]));

        selection.revert();
        assert_eq!(selection.items(), &[1]);
    }
}
