//! Per-frame action scheduling.

use super::{ComponentId, Scene};
use crate::action::{Action, ActionContext, ActionId, ScheduledAction};
use crate::error::UiResult;

/// Bookkeeping for the component whose actions are running.
#[derive(Debug)]
pub(crate) struct Running {
    component: ComponentId,
    /// Actions removed while their list was taken out for the pass.
    cancelled: Vec<ActionId>,
}

impl Scene {
    /// Schedules an action on a component.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`](crate::UiError::ComponentNotFound)
    /// for a stale id.
    pub fn add_action(&mut self, target: ComponentId, action: impl Action) -> UiResult<ActionId> {
        self.add_boxed_action(target, Box::new(action))
    }

    /// Schedules an already boxed action.
    ///
    /// # Errors
    ///
    /// As [`Scene::add_action`].
    pub fn add_boxed_action(&mut self, target: ComponentId, action: Box<dyn Action>) -> UiResult<ActionId> {
        let id = ActionId(self.next_action);
        self.entry_mut(target)?
            .actions
            .push(ScheduledAction { id, action });
        self.next_action += 1;
        Ok(id)
    }

    /// Unschedules an action. Returns true if it was scheduled on `target`
    /// or `target` is acting right now.
    ///
    /// Removing an action of the component currently acting takes effect at
    /// the end of its pass; the action does not run again.
    pub fn remove_action(&mut self, target: ComponentId, action: ActionId) -> bool {
        if let Some(running) = self.running.as_mut().filter(|r| r.component == target) {
            if !running.cancelled.contains(&action) {
                running.cancelled.push(action);
            }
            tracing::trace!("Action {:?} on {} cancelled while running", action, target);
        }

        let Ok(component) = self.entry_mut(target) else {
            return false;
        };
        let before = component.actions.len();
        component.actions.retain(|scheduled| scheduled.id != action);
        component.actions.len() != before
            || self
                .running
                .as_ref()
                .is_some_and(|r| r.component == target)
    }

    /// Unschedules every action of a component.
    pub fn clear_actions(&mut self, target: ComponentId) {
        let taken: Vec<ActionId> = match self.entry_mut(target) {
            Ok(component) => component.actions.drain(..).map(|s| s.id).collect(),
            Err(_) => return,
        };
        if let Some(running) = self.running.as_mut().filter(|r| r.component == target) {
            running.cancelled.extend(taken);
            running.cancelled.push(ActionId::ALL);
        }
    }

    /// Returns true if a component has scheduled actions.
    #[must_use]
    pub fn has_actions(&self, target: ComponentId) -> bool {
        let running = self
            .running
            .as_ref()
            .is_some_and(|r| r.component == target);
        running || self.entry(target).is_ok_and(|c| !c.actions.is_empty())
    }

    /// Returns the number of actions scheduled on a component.
    #[must_use]
    pub fn action_count(&self, target: ComponentId) -> usize {
        self.entry(target).map_or(0, |c| c.actions.len())
    }

    /// Advances the scene clock and runs the actions of every attached
    /// component, depth-first in draw order.
    pub fn act(&mut self, delta: f32) {
        self.time += f64::from(delta);

        let mut order = Vec::with_capacity(self.component_count());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        for id in order {
            self.act_component(id, delta);
        }
    }

    fn act_component(&mut self, id: ComponentId, delta: f32) {
        let actions = match self.entry_mut(id) {
            Ok(component) if !component.actions.is_empty() => {
                std::mem::take(&mut component.actions)
            }
            _ => return,
        };

        let outer = self.running.replace(Running {
            component: id,
            cancelled: Vec::new(),
        });

        let mut kept = Vec::with_capacity(actions.len());
        for mut scheduled in actions {
            if self.is_cancelled(scheduled.id) {
                continue;
            }
            let finished = {
                let mut ctx = ActionContext {
                    scene: &mut *self,
                    target: id,
                    action: scheduled.id,
                };
                scheduled.action.act(delta, &mut ctx)
            };
            if finished {
                tracing::trace!("Action {:?} on {} finished", scheduled.id, id);
            } else {
                kept.push(scheduled);
            }
        }

        let running = std::mem::replace(&mut self.running, outer);
        if let Some(running) = running {
            kept.retain(|scheduled| !running.cancelled.contains(&scheduled.id));
            if running.cancelled.contains(&ActionId::ALL) {
                kept.clear();
            }
        }

        match self.entry_mut(id) {
            Ok(component) => {
                let added = std::mem::take(&mut component.actions);
                kept.extend(added);
                component.actions = kept;
            }
            Err(_) => {
                tracing::trace!("Component {} destroyed by its own action", id);
            }
        }
    }

    fn is_cancelled(&self, action: ActionId) -> bool {
        self.running.as_ref().is_some_and(|running| {
            running.cancelled.contains(&action) || running.cancelled.contains(&ActionId::ALL)
        })
    }
}
