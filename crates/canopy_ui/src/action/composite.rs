//! Actions built out of other actions.

use std::cell::Cell;
use std::rc::Rc;

use super::{Action, ActionContext};

/// Runs actions one after another. Each frame advances only the current
/// action, so an action finishing mid-frame hands over on the next frame.
#[derive(Default)]
pub struct Sequence {
    actions: Vec<Box<dyn Action>>,
    index: usize,
}

impl Sequence {
    /// Creates an empty sequence, which finishes immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action.
    #[must_use]
    pub fn push(mut self, action: impl Action) -> Self {
        self.actions.push(action.boxed());
        self
    }

    /// Number of actions in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if the sequence has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl From<Vec<Box<dyn Action>>> for Sequence {
    fn from(actions: Vec<Box<dyn Action>>) -> Self {
        Self { actions, index: 0 }
    }
}

impl std::fmt::Debug for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("len", &self.actions.len())
            .field("index", &self.index)
            .finish()
    }
}

impl Action for Sequence {
    fn act(&mut self, delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        let Some(current) = self.actions.get_mut(self.index) else {
            return true;
        };
        if current.act(delta, ctx) {
            self.index += 1;
        }
        self.index >= self.actions.len()
    }

    fn restart(&mut self) {
        self.index = 0;
        for action in &mut self.actions {
            action.restart();
        }
    }

    fn then(mut self, next: impl Action) -> Sequence {
        self.actions.push(next.boxed());
        self
    }
}

/// Runs actions side by side until all of them finish.
#[derive(Default)]
pub struct Parallel {
    actions: Vec<Box<dyn Action>>,
    done: Vec<bool>,
}

impl Parallel {
    /// Creates an empty group, which finishes immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action.
    #[must_use]
    pub fn push(mut self, action: impl Action) -> Self {
        self.actions.push(action.boxed());
        self.done.push(false);
        self
    }
}

impl From<Vec<Box<dyn Action>>> for Parallel {
    fn from(actions: Vec<Box<dyn Action>>) -> Self {
        let done = vec![false; actions.len()];
        Self { actions, done }
    }
}

impl std::fmt::Debug for Parallel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parallel").field("done", &self.done).finish()
    }
}

impl Action for Parallel {
    fn act(&mut self, delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        let mut complete = true;
        for (action, done) in self.actions.iter_mut().zip(self.done.iter_mut()) {
            if !*done {
                *done = action.act(delta, ctx);
                complete &= *done;
            }
        }
        complete
    }

    fn restart(&mut self) {
        self.done.fill(false);
        for action in &mut self.actions {
            action.restart();
        }
    }

    fn with(mut self, other: impl Action) -> Parallel {
        self.actions.push(other.boxed());
        self.done.push(false);
        self
    }
}

/// Waits before running an action. Time left over on the frame the delay
/// ends is passed on to the action.
pub struct Delay {
    duration: f32,
    time: f32,
    action: Option<Box<dyn Action>>,
}

impl Delay {
    /// Waits `duration` seconds, then finishes.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            time: 0.0,
            action: None,
        }
    }

    /// Waits `duration` seconds, then runs `action`.
    pub fn then_run(duration: f32, action: impl Action) -> Self {
        Self {
            duration,
            time: 0.0,
            action: Some(action.boxed()),
        }
    }

    /// Seconds waited so far.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Ends the wait on the next frame.
    pub fn finish(&mut self) {
        self.time = self.duration;
    }
}

impl std::fmt::Debug for Delay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delay")
            .field("duration", &self.duration)
            .field("time", &self.time)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl Action for Delay {
    fn act(&mut self, mut delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if self.time < self.duration {
            self.time += delta;
            if self.time < self.duration {
                return false;
            }
            delta = self.time - self.duration;
        }
        self.action.as_mut().map_or(true, |action| action.act(delta, ctx))
    }

    fn restart(&mut self) {
        self.time = 0.0;
        if let Some(action) = self.action.as_mut() {
            action.restart();
        }
    }
}

/// Stops a [`Repeat`] from outside once its current run ends.
#[derive(Debug, Clone)]
pub struct RepeatHandle(Rc<Cell<bool>>);

impl RepeatHandle {
    /// Lets the current run finish, then ends the repeat.
    pub fn finish(&self) {
        self.0.set(true);
    }
}

/// Runs an action a number of times, or forever. One run advances per
/// frame at most.
pub struct Repeat {
    action: Box<dyn Action>,
    count: Option<u32>,
    executed: u32,
    finished: Rc<Cell<bool>>,
}

impl Repeat {
    /// Runs `action` `count` times. A count of zero finishes at once.
    pub fn new(count: u32, action: impl Action) -> Self {
        Self {
            action: action.boxed(),
            count: Some(count),
            executed: 0,
            finished: Rc::new(Cell::new(false)),
        }
    }

    /// Runs `action` until [`RepeatHandle::finish`] is called.
    pub fn forever(action: impl Action) -> Self {
        Self {
            count: None,
            ..Self::new(0, action)
        }
    }

    /// Handle for ending the repeat early.
    #[must_use]
    pub fn handle(&self) -> RepeatHandle {
        RepeatHandle(Rc::clone(&self.finished))
    }

    /// Completed runs.
    #[must_use]
    pub const fn executed(&self) -> u32 {
        self.executed
    }
}

impl std::fmt::Debug for Repeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repeat")
            .field("count", &self.count)
            .field("executed", &self.executed)
            .field("finished", &self.finished.get())
            .finish_non_exhaustive()
    }
}

impl Action for Repeat {
    fn act(&mut self, delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if self.count == Some(self.executed) {
            return true;
        }
        if self.action.act(delta, ctx) {
            if self.finished.get() {
                return true;
            }
            if self.count.is_some() {
                self.executed += 1;
            }
            if self.count == Some(self.executed) {
                return true;
            }
            self.action.restart();
        }
        false
    }

    fn restart(&mut self) {
        self.executed = 0;
        self.finished.set(false);
        self.action.restart();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::action::{delay, delay_then, forever, move_by, parallel, run, sequence, show};
    use crate::scene::{ComponentId, Scene};

    fn attached(scene: &mut Scene) -> ComponentId {
        let id = scene.create_component();
        scene.add_child(scene.root(), id).unwrap();
        id
    }

    fn log(entries: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Box<dyn Action> {
        let entries = Rc::clone(entries);
        run(move |_| entries.borrow_mut().push(name)).boxed()
    }

    #[test]
    fn test_sequence_one_step_per_frame() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let entries = Rc::new(RefCell::new(Vec::new()));
        scene
            .add_action(
                id,
                sequence(vec![log(&entries, "a"), log(&entries, "b"), log(&entries, "c")]),
            )
            .unwrap();

        scene.act(0.016);
        assert_eq!(*entries.borrow(), ["a"]);
        scene.act(0.016);
        scene.act(0.016);
        assert_eq!(*entries.borrow(), ["a", "b", "c"]);
        assert!(!scene.has_actions(id));
    }

    #[test]
    fn test_parallel_waits_for_longest() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let entries = Rc::new(RefCell::new(Vec::new()));
        scene
            .add_action(
                id,
                parallel(vec![log(&entries, "once"), move_by(4.0, 0.0, 1.0).boxed()]),
            )
            .unwrap();

        scene.act(0.5);
        scene.act(0.25);
        assert_eq!(*entries.borrow(), ["once"]);
        assert!(scene.has_actions(id));
        scene.act(0.25);
        assert!(!scene.has_actions(id));
        assert_eq!(scene.component(id).unwrap().x, 4.0);
    }

    #[test]
    fn test_delay_passes_overflow() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene
            .add_action(id, delay_then(0.5, move_by(10.0, 0.0, 1.0)))
            .unwrap();

        scene.act(0.25);
        assert_eq!(scene.component(id).unwrap().x, 0.0);
        scene.act(0.5);
        assert_eq!(scene.component(id).unwrap().x, 2.5);
    }

    #[test]
    fn test_plain_delay_finishes() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene.set_visible(id, false).unwrap();
        scene.add_action(id, delay(1.0).then(show())).unwrap();

        scene.act(0.5);
        scene.act(0.5);
        assert!(!scene.component(id).unwrap().is_visible());
        scene.act(0.0);
        assert!(scene.component(id).unwrap().is_visible());
    }

    #[test]
    fn test_forever_until_handle_finishes() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let hits = Rc::new(Cell::new(0));
        let count = Rc::clone(&hits);
        let repeat = forever(run(move |_| count.set(count.get() + 1)));
        let handle = repeat.handle();
        scene.add_action(id, repeat).unwrap();

        for _ in 0..10 {
            scene.act(0.016);
        }
        assert_eq!(hits.get(), 10);
        handle.finish();
        scene.act(0.016);
        assert_eq!(hits.get(), 11);
        assert!(!scene.has_actions(id));
    }

    #[test]
    fn test_zero_repeat_never_runs() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        let hits = Rc::new(Cell::new(0));
        let count = Rc::clone(&hits);
        scene
            .add_action(id, Repeat::new(0, run(move |_| count.set(count.get() + 1))))
            .unwrap();

        scene.act(0.016);
        assert_eq!(hits.get(), 0);
        assert!(!scene.has_actions(id));
    }

    #[test]
    fn test_sequence_restart() {
        let mut sequence = Sequence::new().push(Delay::new(1.0)).then(Delay::new(1.0));
        assert_eq!(sequence.len(), 2);
        sequence.restart();
        assert!(!sequence.is_empty());
    }
}
