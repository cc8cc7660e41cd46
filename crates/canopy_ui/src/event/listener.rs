//! Listener registration and touch focus bookkeeping.

use std::cell::RefCell;
use std::rc::Rc;

use super::Event;
use crate::input::MouseButton;
use crate::scene::{ComponentId, Scene};

/// Listener callback.
///
/// Returns true if the event was handled. A listener returning true to a
/// `TouchDown` keeps receiving drag and up events for that pointer.
pub type ListenerFn = dyn FnMut(&mut Event, &mut Scene) -> bool;

/// Handle used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A registered listener.
///
/// The callback is shared so dispatch can run it while the scene stays
/// mutably borrowed by the callback itself.
#[derive(Clone)]
pub(crate) struct ListenerEntry {
    pub(crate) id: ListenerId,
    pub(crate) callback: Rc<RefCell<Box<ListenerFn>>>,
}

impl ListenerEntry {
    pub(crate) fn new(id: ListenerId, callback: Box<ListenerFn>) -> Self {
        Self {
            id,
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    /// Runs the callback. Returns `None` if it is already running further up
    /// the stack.
    pub(crate) fn invoke(&self, event: &mut Event, scene: &mut Scene) -> Option<bool> {
        let Ok(mut callback) = self.callback.try_borrow_mut() else {
            tracing::trace!("Skipping re-entrant listener {:?}", self.id);
            return None;
        };
        Some((&mut **callback)(event, scene))
    }
}

impl std::fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerEntry").field("id", &self.id).finish()
    }
}

/// A listener that claimed a pointer on touch down.
#[derive(Debug, Clone)]
pub(crate) struct TouchFocus {
    pub(crate) listener: ListenerEntry,
    /// Component the listener is registered on.
    pub(crate) component: ComponentId,
    /// Component the touch down was fired at.
    pub(crate) target: ComponentId,
    pub(crate) pointer: u32,
    pub(crate) button: MouseButton,
}
