//! Actions that complete on their first frame.

use super::{Action, ActionContext, ActionId};
use crate::scene::{ComponentId, Touchable};

/// Shows or hides the component.
#[derive(Debug, Clone, Copy)]
pub struct VisibleAction {
    visible: bool,
}

impl VisibleAction {
    /// Creates the action.
    #[must_use]
    pub const fn new(visible: bool) -> Self {
        Self { visible }
    }
}

impl Action for VisibleAction {
    fn act(&mut self, _delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if let Err(err) = ctx.scene.set_visible(ctx.target, self.visible) {
            tracing::trace!("VisibleAction skipped: {}", err);
        }
        true
    }
}

/// Changes how the component takes part in hit testing.
#[derive(Debug, Clone, Copy)]
pub struct TouchableAction {
    touchable: Touchable,
}

impl TouchableAction {
    /// Creates the action.
    #[must_use]
    pub const fn new(touchable: Touchable) -> Self {
        Self { touchable }
    }
}

impl Action for TouchableAction {
    fn act(&mut self, _delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if let Err(err) = ctx.scene.set_touchable(ctx.target, self.touchable) {
            tracing::trace!("TouchableAction skipped: {}", err);
        }
        true
    }
}

/// Detaches a component from its parent. The component stays alive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveComponentAction {
    component: Option<ComponentId>,
    removed: bool,
}

impl RemoveComponentAction {
    /// Detaches the component running the action, or `component` if given.
    #[must_use]
    pub const fn new(component: Option<ComponentId>) -> Self {
        Self {
            component,
            removed: false,
        }
    }
}

impl Action for RemoveComponentAction {
    fn act(&mut self, _delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if !self.removed {
            self.removed = true;
            let id = self.component.unwrap_or(ctx.target);
            if let Err(err) = ctx.scene.remove_from_parent(id) {
                tracing::trace!("RemoveComponentAction skipped: {}", err);
            }
        }
        true
    }

    fn restart(&mut self) {
        self.removed = false;
    }
}

/// Removes a scheduled action.
#[derive(Debug, Clone, Copy)]
pub struct RemoveAction {
    target: Option<ComponentId>,
    action: ActionId,
}

impl RemoveAction {
    /// Removes `action` from `target`, or from the running component.
    #[must_use]
    pub const fn new(target: Option<ComponentId>, action: ActionId) -> Self {
        Self { target, action }
    }
}

impl Action for RemoveAction {
    fn act(&mut self, _delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        let target = self.target.unwrap_or(ctx.target);
        if !ctx.scene.remove_action(target, self.action) {
            tracing::trace!("RemoveAction: {:?} not scheduled on {}", self.action, target);
        }
        true
    }
}

/// Runs a closure once.
pub struct RunAction {
    callback: Box<dyn FnMut(&mut ActionContext<'_>)>,
    ran: bool,
}

impl RunAction {
    /// Wraps `callback`.
    pub fn new(callback: impl FnMut(&mut ActionContext<'_>) + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            ran: false,
        }
    }
}

impl std::fmt::Debug for RunAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunAction")
            .field("ran", &self.ran)
            .finish_non_exhaustive()
    }
}

impl Action for RunAction {
    fn act(&mut self, _delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if !self.ran {
            self.ran = true;
            (self.callback)(ctx);
        }
        true
    }

    fn restart(&mut self) {
        self.ran = false;
    }
}

/// Schedules another action. The added action first runs on the frame
/// after this one.
pub struct AddAction {
    target: Option<ComponentId>,
    action: Option<Box<dyn Action>>,
}

impl AddAction {
    /// Adds `action` to `target`, or to the running component.
    pub fn new(target: Option<ComponentId>, action: impl Action) -> Self {
        Self {
            target,
            action: Some(action.boxed()),
        }
    }
}

impl std::fmt::Debug for AddAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddAction")
            .field("target", &self.target)
            .field("pending", &self.action.is_some())
            .finish()
    }
}

impl Action for AddAction {
    fn act(&mut self, _delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if let Some(action) = self.action.take() {
            let target = self.target.unwrap_or(ctx.target);
            if let Err(err) = ctx.scene.add_boxed_action(target, action) {
                tracing::trace!("AddAction skipped: {}", err);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::action::{
        add_action_to, remove_action_of, remove_component, remove_component_of, repeat, run,
        show, touchable, Action,
    };
    use crate::scene::{ComponentId, Scene, Touchable};

    fn attached(scene: &mut Scene) -> ComponentId {
        let id = scene.create_component();
        scene.add_child(scene.root(), id).unwrap();
        id
    }

    #[test]
    fn test_show_and_touchable() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene.set_visible(id, false).unwrap();
        scene
            .add_action(id, show().with(touchable(Touchable::Disabled)))
            .unwrap();

        scene.act(0.016);
        let state = scene.component(id).unwrap();
        assert!(state.is_visible());
        assert_eq!(state.touchable, Touchable::Disabled);
    }

    #[test]
    fn test_remove_component_keeps_it_alive() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let other = attached(&mut scene);
        scene.add_action(id, remove_component()).unwrap();
        scene.add_action(id, remove_component_of(other)).unwrap();

        scene.act(0.016);
        assert!(scene.contains(id));
        assert!(scene.parent(id).is_none());
        assert!(scene.parent(other).is_none());
        assert!(scene.children(scene.root()).is_empty());
    }

    #[test]
    fn test_remove_action_of_other_component() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let other = attached(&mut scene);
        let hits = Rc::new(Cell::new(0));
        let count = Rc::clone(&hits);
        let ticking = scene
            .add_action(other, repeat(5, run(move |_| count.set(count.get() + 1))))
            .unwrap();
        scene.add_action(id, remove_action_of(other, ticking)).unwrap();

        scene.act(0.016);
        scene.act(0.016);
        assert_eq!(hits.get(), 0);
        assert!(!scene.has_actions(other));
    }

    #[test]
    fn test_add_action_to_other_component() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let other = attached(&mut scene);
        scene.set_visible(other, false).unwrap();
        scene.add_action(id, add_action_to(other, show())).unwrap();

        scene.act(0.016);
        scene.act(0.016);
        assert!(!scene.has_actions(id));
        assert!(!scene.has_actions(other));
        assert!(scene.component(other).unwrap().is_visible());
    }

    #[test]
    fn test_run_restarts() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let hits = Rc::new(Cell::new(0));
        let count = Rc::clone(&hits);
        scene
            .add_action(id, repeat(3, run(move |_| count.set(count.get() + 1))))
            .unwrap();

        scene.act(0.016);
        assert_eq!(hits.get(), 1);
        scene.act(0.016);
        scene.act(0.016);
        assert_eq!(hits.get(), 3);
        assert!(!scene.has_actions(id));
    }
}
