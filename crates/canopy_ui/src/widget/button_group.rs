//! Mutually exclusive buttons.

use canopy_core::Index;

use super::Button;
use crate::error::{UiError, UiResult};
use crate::scene::{ComponentId, Scene};

/// Handle of a [`ButtonGroup`] in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonGroupId(pub(crate) Index);

/// Keeps the number of checked buttons between a minimum and a maximum.
///
/// By default exactly one button is checked: checking another unchecks the
/// one checked last.
#[derive(Debug, Clone)]
pub struct ButtonGroup {
    buttons: Vec<ComponentId>,
    checked: Vec<ComponentId>,
    min_check_count: usize,
    max_check_count: Option<usize>,
    uncheck_last: bool,
    last_checked: Option<ComponentId>,
}

impl Default for ButtonGroup {
    fn default() -> Self {
        Self {
            buttons: Vec::new(),
            checked: Vec::new(),
            min_check_count: 1,
            max_check_count: Some(1),
            uncheck_last: true,
            last_checked: None,
        }
    }
}

impl ButtonGroup {
    /// Buttons in the order they were added.
    #[must_use]
    pub fn buttons(&self) -> &[ComponentId] {
        &self.buttons
    }

    /// Checked buttons in the order they were checked.
    #[must_use]
    pub fn all_checked(&self) -> &[ComponentId] {
        &self.checked
    }

    /// The first checked button.
    #[must_use]
    pub fn checked(&self) -> Option<ComponentId> {
        self.checked.first().copied()
    }

    /// Position of the first checked button in [`ButtonGroup::buttons`].
    #[must_use]
    pub fn checked_index(&self) -> Option<usize> {
        let checked = self.checked()?;
        self.buttons.iter().position(|&b| b == checked)
    }

    /// Fewest buttons that must stay checked.
    #[must_use]
    pub const fn min_check_count(&self) -> usize {
        self.min_check_count
    }

    /// Most buttons that may be checked. `None` means unlimited.
    #[must_use]
    pub const fn max_check_count(&self) -> Option<usize> {
        self.max_check_count
    }

    /// If true, checking past the maximum unchecks the button checked last;
    /// otherwise the new check is refused.
    #[must_use]
    pub const fn uncheck_last(&self) -> bool {
        self.uncheck_last
    }

    pub(crate) fn retain_buttons(&mut self, keep: impl Fn(ComponentId) -> bool) {
        self.buttons.retain(|&b| keep(b));
        self.checked.retain(|&b| keep(b));
        if self.last_checked.is_some_and(|b| !keep(b)) {
            self.last_checked = None;
        }
    }
}

impl Scene {
    /// Creates an empty button group.
    pub fn create_button_group(&mut self) -> ButtonGroupId {
        ButtonGroupId(self.button_groups.insert(ButtonGroup::default()))
    }

    /// Returns a button group.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale id.
    pub fn button_group(&self, group: ButtonGroupId) -> UiResult<&ButtonGroup> {
        self.button_groups
            .get(group.0)
            .ok_or(UiError::ButtonGroupNotFound)
    }

    fn button_group_mut(&mut self, group: ButtonGroupId) -> UiResult<&mut ButtonGroup> {
        self.button_groups
            .get_mut(group.0)
            .ok_or(UiError::ButtonGroupNotFound)
    }

    /// Sets the fewest buttons that must stay checked.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale id.
    pub fn set_min_check_count(&mut self, group: ButtonGroupId, count: usize) -> UiResult<()> {
        self.button_group_mut(group)?.min_check_count = count;
        Ok(())
    }

    /// Sets the most buttons that may be checked. `None` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale id.
    pub fn set_max_check_count(&mut self, group: ButtonGroupId, count: Option<usize>) -> UiResult<()> {
        self.button_group_mut(group)?.max_check_count = count;
        Ok(())
    }

    /// Chooses between unchecking the last checked button and refusing the
    /// check when the maximum is reached.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale id.
    pub fn set_uncheck_last(&mut self, group: ButtonGroupId, uncheck_last: bool) -> UiResult<()> {
        self.button_group_mut(group)?.uncheck_last = uncheck_last;
        Ok(())
    }

    /// Adds a button to a group, leaving any group it was in.
    ///
    /// The button keeps its checked state if the group allows it. While the
    /// group has fewer buttons than its minimum, new buttons are checked.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale group and the
    /// [`Scene::with_widget`] errors if `button` is not an idle [`Button`].
    pub fn add_to_group(&mut self, group: ButtonGroupId, button: ComponentId) -> UiResult<()> {
        self.button_group(group)?;
        self.with_widget::<Button, _>(button, |widget, scene| {
            if let Some(old) = widget.group.take() {
                scene.forget_button(old, button);
            }
            let should_check = widget.is_checked()
                || scene
                    .button_group(group)
                    .is_ok_and(|g| g.buttons.len() < g.min_check_count);
            widget.set_checked(scene, false);

            widget.group = Some(group);
            if let Ok(g) = scene.button_group_mut(group) {
                g.buttons.push(button);
            }
            widget.set_checked(scene, should_check);
        })?;
        tracing::debug!("Button {} joined group {:?}", button, group);
        Ok(())
    }

    /// Removes a button from a group. The button keeps its checked state.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale group.
    pub fn remove_from_group(&mut self, group: ButtonGroupId, button: ComponentId) -> UiResult<()> {
        self.button_group(group)?;
        if let Ok(widget) = self.widget_mut::<Button>(button) {
            if widget.group == Some(group) {
                widget.group = None;
            }
        }
        self.forget_button(group, button);
        Ok(())
    }

    /// Unchecks every button in a group, ignoring the minimum.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ButtonGroupNotFound`] for a stale group.
    pub fn uncheck_all(&mut self, group: ButtonGroupId) -> UiResult<()> {
        let g = self.button_group_mut(group)?;
        let old_min = std::mem::replace(&mut g.min_check_count, 0);
        let buttons = g.buttons.clone();

        for button in buttons {
            if let Err(err) = self.with_widget::<Button, _>(button, |b, scene| b.set_checked(scene, false)) {
                tracing::debug!("Group button {} not unchecked: {}", button, err);
            }
        }

        self.button_group_mut(group)?.min_check_count = old_min;
        Ok(())
    }

    fn forget_button(&mut self, group: ButtonGroupId, button: ComponentId) {
        if let Ok(g) = self.button_group_mut(group) {
            g.retain_buttons(|b| b != button);
        }
    }

    /// Decides whether a group member may change to `checked`, updating the
    /// group's bookkeeping when it may.
    ///
    /// Returns `None` if the change is refused, otherwise what is needed to
    /// undo it should the change event be cancelled.
    pub(super) fn group_can_check(
        &mut self,
        group: ButtonGroupId,
        button: ComponentId,
        checked: bool,
    ) -> Option<GroupUndo> {
        let Ok(g) = self.button_group_mut(group) else {
            return Some(GroupUndo::default());
        };
        let mut undo = GroupUndo {
            group: Some(group),
            checked: g.checked.clone(),
            last_checked: g.last_checked,
            unchecked: None,
        };

        if !checked {
            if g.checked.len() <= g.min_check_count {
                return None;
            }
            g.checked.retain(|&b| b != button);
            return Some(undo);
        }

        g.checked.retain(|&b| b != button);
        if let Some(max) = g.max_check_count {
            if g.checked.len() >= max {
                if !g.uncheck_last {
                    return None;
                }
                let last = g
                    .last_checked
                    .filter(|&b| b != button && g.checked.contains(&b))
                    .or_else(|| g.checked.last().copied())?;
                let old_min = std::mem::replace(&mut g.min_check_count, 0);
                let unchecked = self.with_widget::<Button, _>(last, |b, scene| b.set_checked(scene, false));
                let g = self.button_group_mut(group).ok()?;
                g.min_check_count = old_min;
                match unchecked {
                    Ok(()) => undo.unchecked = Some(last),
                    Err(UiError::WidgetBusy(_)) => {
                        tracing::debug!("Group button {} busy, check of {} refused", last, button);
                        g.checked = undo.checked;
                        return None;
                    }
                    Err(err) => {
                        tracing::debug!("Dropping stale group button {}: {}", last, err);
                        g.checked.retain(|&b| b != last);
                        g.buttons.retain(|&b| b != last);
                    }
                }
            }
        }

        let g = self.button_group_mut(group).ok()?;
        g.checked.push(button);
        g.last_checked = Some(button);
        Some(undo)
    }

    /// Puts a group back the way it was before a cancelled check change.
    pub(super) fn undo_group_change(&mut self, undo: GroupUndo) {
        let Some(group) = undo.group else {
            return;
        };
        let Ok(g) = self.button_group_mut(group) else {
            return;
        };
        g.checked = undo.checked;
        g.last_checked = undo.last_checked;
        if let Some(other) = undo.unchecked {
            if let Err(err) = self.with_widget::<Button, _>(other, |b, _| b.restore_checked(true)) {
                tracing::debug!("Group button {} not rechecked: {}", other, err);
            }
        }
    }
}

/// Group state captured before a check change, restored if the change is
/// cancelled.
#[derive(Debug, Clone, Default)]
pub(crate) struct GroupUndo {
    group: Option<ButtonGroupId>,
    checked: Vec<ComponentId>,
    last_checked: Option<ComponentId>,
    unchecked: Option<ComponentId>,
}
