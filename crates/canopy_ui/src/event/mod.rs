//! # Events
//!
//! Input and change notifications delivered to component listeners.
//!
//! Events are fired at a target component and bubble up through its
//! ancestors until a listener stops them. Event objects are recycled through
//! the scene's [`Pools`](canopy_core::Pools) since several are created for
//! every pointer movement.

mod click;
mod listener;

pub use click::{ClickListener, ClickResponse, PointerProbe};
pub use listener::{ListenerFn, ListenerId};
pub(crate) use listener::{ListenerEntry, TouchFocus};

use canopy_core::Poolable;

use crate::input::{Modifiers, MouseButton};
use crate::scene::ComponentId;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    /// A widget's value changed (checked state, selection).
    #[default]
    Change,
    /// A pointer went down.
    TouchDown,
    /// A pointer went up.
    TouchUp,
    /// A pressed pointer moved.
    TouchDragged,
    /// The mouse moved with no button pressed.
    MouseMoved,
    /// The pointer moved onto a component.
    Enter,
    /// The pointer left a component.
    Exit,
}

impl EventKind {
    /// Returns true for pointer events.
    #[must_use]
    pub const fn is_input(self) -> bool {
        !matches!(self, Self::Change)
    }
}

/// A pooled event.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Component the event was fired at.
    pub target: Option<ComponentId>,
    /// Component whose listener is currently running.
    pub listener_component: Option<ComponentId>,
    /// Pointer x in stage coordinates.
    pub stage_x: f32,
    /// Pointer y in stage coordinates.
    pub stage_y: f32,
    /// Touch pointer index. `None` for mouse hover events.
    pub pointer: Option<u32>,
    /// Button for touch down/up.
    pub button: Option<MouseButton>,
    /// For `Enter`, the component the pointer came from; for `Exit`, the one
    /// it went to.
    pub related: Option<ComponentId>,
    /// Modifier keys at the time of the event.
    pub modifiers: Modifiers,
    /// Scene time in seconds.
    pub time: f64,
    /// Whether the event continues to ancestors after the target.
    pub bubbles: bool,
    handled: bool,
    stopped: bool,
    cancelled: bool,
}

impl Event {
    /// Marks the event handled. Input handled by nobody falls through to
    /// the host.
    pub fn handle(&mut self) {
        self.handled = true;
    }

    /// Stops propagation to further ancestors.
    ///
    /// Listeners on the current component still run.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Stops and handles the event and asks the firing widget to undo the
    /// change.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.stopped = true;
        self.handled = true;
    }

    /// Returns true if a listener handled the event.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        self.handled
    }

    /// Returns true if propagation was stopped.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Returns true if the event was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Default for Event {
    fn default() -> Self {
        Self {
            kind: EventKind::Change,
            target: None,
            listener_component: None,
            stage_x: 0.0,
            stage_y: 0.0,
            pointer: None,
            button: None,
            related: None,
            modifiers: Modifiers::NONE,
            time: 0.0,
            bubbles: true,
            handled: false,
            stopped: false,
            cancelled: false,
        }
    }
}

impl Poolable for Event {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::Pool;

    #[test]
    fn test_cancel_stops_and_handles() {
        let mut event = Event::default();
        assert!(event.bubbles);

        event.cancel();
        assert!(event.is_cancelled());
        assert!(event.is_stopped());
        assert!(event.is_handled());
    }

    #[test]
    fn test_pooled_event_is_reset() {
        let mut pool: Pool<Event> = Pool::new(4);
        let mut event = pool.obtain();
        event.kind = EventKind::TouchDown;
        event.pointer = Some(1);
        event.bubbles = false;
        event.stop();
        pool.free(event);

        let event = pool.obtain();
        assert_eq!(event.kind, EventKind::Change);
        assert_eq!(event.pointer, None);
        assert!(event.bubbles);
        assert!(!event.is_stopped());
    }
}
