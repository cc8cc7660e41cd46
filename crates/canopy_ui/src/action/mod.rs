//! # Actions
//!
//! Per-frame behavior attached to components: tweens that move, resize or
//! recolor a component over time, one-shot commands, and composites that
//! chain or combine them.
//!
//! ```text
//! Scene::act(delta)
//!   └── for each attached component, depth-first
//!         └── for each scheduled action
//!               └── act(delta, ctx) ── true ──► dropped
//! ```
//!
//! Actions reach the scene only through [`ActionContext`], so an action can
//! schedule, remove or destroy anything, including itself, without
//! invalidating the pass that runs it.
//!
//! ## Example
//!
//! ```
//! use canopy_ui::action::{self, Action};
//! use canopy_ui::Scene;
//!
//! let mut scene = Scene::new(800.0, 600.0);
//! let panel = scene.create_component();
//! scene.add_child(scene.root(), panel).unwrap();
//!
//! let slide = action::move_to(100.0, 0.0, 0.25).then(action::hide());
//! scene.add_action(panel, slide).unwrap();
//! scene.act(0.25);
//! scene.act(0.0);
//! assert!(!scene.component(panel).unwrap().is_visible());
//! ```

mod composite;
mod factory;
mod instant;
mod temporal;

pub use composite::{Delay, Parallel, Repeat, RepeatHandle, Sequence};
pub use factory::*;
pub use instant::{
    AddAction, RemoveAction, RemoveComponentAction, RunAction, TouchableAction, VisibleAction,
};
pub use temporal::{AlphaTo, ColorTo, MoveBy, MoveTo, SizeBy, SizeTo, Temporal, Tween};

use crate::scene::{ComponentId, ComponentState, Scene};

/// Handle of a scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub(crate) u64);

impl ActionId {
    /// Marks "every action" in the running component's cancel list. Real
    /// ids start at 1.
    pub(crate) const ALL: Self = Self(0);
}

/// What an action sees while it runs.
pub struct ActionContext<'a> {
    /// The scene, with the running component's actions taken out.
    pub scene: &'a mut Scene,
    /// Component the action runs on. Temporal actions with an explicit
    /// target swap it in for their own duration.
    pub target: ComponentId,
    /// Id of the top-level scheduled action being run.
    pub action: ActionId,
}

impl ActionContext<'_> {
    /// State of the target component, if it still exists.
    #[must_use]
    pub fn state(&self) -> Option<&ComponentState> {
        self.scene.component(self.target).ok()
    }
}

/// Behavior run once per frame until it reports completion.
pub trait Action: 'static {
    /// Advances the action by `delta` seconds. Returns true when done; a
    /// finished action is removed from its component.
    fn act(&mut self, delta: f32, ctx: &mut ActionContext<'_>) -> bool;

    /// Rewinds the action so it can run again, e.g. inside a [`Repeat`].
    fn restart(&mut self) {}

    /// Boxes the action.
    fn boxed(self) -> Box<dyn Action>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Runs `next` after this action.
    fn then(self, next: impl Action) -> Sequence
    where
        Self: Sized,
    {
        Sequence::new().push(self).push(next)
    }

    /// Runs `other` alongside this action.
    fn with(self, other: impl Action) -> Parallel
    where
        Self: Sized,
    {
        Parallel::new().push(self).push(other)
    }
}

impl Action for Box<dyn Action> {
    fn act(&mut self, delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        self.as_mut().act(delta, ctx)
    }

    fn restart(&mut self) {
        self.as_mut().restart();
    }

    fn boxed(self) -> Box<dyn Action> {
        self
    }
}

/// An action in a component's list.
pub(crate) struct ScheduledAction {
    pub(crate) id: ActionId,
    pub(crate) action: Box<dyn Action>,
}

impl std::fmt::Debug for ScheduledAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledAction")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn attached(scene: &mut Scene) -> ComponentId {
        let id = scene.create_component();
        scene.add_child(scene.root(), id).unwrap();
        id
    }

    fn counter(hits: &Rc<Cell<u32>>) -> RunAction {
        let hits = Rc::clone(hits);
        run(move |_| hits.set(hits.get() + 1))
    }

    #[test]
    fn test_finished_actions_dropped() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene.add_action(id, hide()).unwrap();
        assert!(scene.has_actions(id));

        scene.act(0.016);
        assert!(!scene.has_actions(id));
        assert!(!scene.component(id).unwrap().is_visible());
    }

    #[test]
    fn test_detached_components_do_not_act() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = scene.create_component();
        scene.add_action(id, hide()).unwrap();

        scene.act(0.016);
        assert_eq!(scene.action_count(id), 1);
        assert!(scene.component(id).unwrap().is_visible());
    }

    #[test]
    fn test_remove_action_by_id() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let slide = scene.add_action(id, move_by(10.0, 0.0, 1.0)).unwrap();
        scene.add_action(id, remove_action(slide)).unwrap();

        scene.act(0.5);
        scene.act(0.5);
        assert!(!scene.has_actions(id));
        assert_eq!(scene.component(id).unwrap().x, 5.0);
    }

    #[test]
    fn test_action_added_while_running_starts_next_frame() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let hits = Rc::new(Cell::new(0));
        scene.add_action(id, add_action(counter(&hits))).unwrap();

        scene.act(0.016);
        assert_eq!(hits.get(), 0);
        assert_eq!(scene.action_count(id), 1);
        scene.act(0.016);
        assert_eq!(hits.get(), 1);
        assert!(!scene.has_actions(id));
    }

    #[test]
    fn test_clear_actions_from_inside() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let hits = Rc::new(Cell::new(0));
        scene
            .add_action(id, run(|ctx| ctx.scene.clear_actions(ctx.target)))
            .unwrap();
        scene.add_action(id, forever(counter(&hits))).unwrap();

        scene.act(0.016);
        assert_eq!(hits.get(), 0);
        assert!(!scene.has_actions(id));
    }

    #[test]
    fn test_action_destroying_its_component() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene
            .add_action(id, run(|ctx| ctx.scene.destroy(ctx.target).unwrap()))
            .unwrap();

        scene.act(0.016);
        assert!(!scene.contains(id));
    }

    #[test]
    fn test_context_reports_running_action() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let seen = Rc::new(Cell::new(None));
        let record = Rc::clone(&seen);
        let action = scene
            .add_action(id, run(move |ctx| record.set(Some(ctx.action))))
            .unwrap();

        scene.act(0.016);
        assert_eq!(seen.get(), Some(action));
    }
}
