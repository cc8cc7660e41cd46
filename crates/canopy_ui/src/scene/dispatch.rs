//! Event dispatch and pointer input.

use super::{ComponentId, Scene};
use crate::error::UiResult;
use crate::event::{
    Event, EventKind, ListenerEntry, ListenerFn, ListenerId, PointerProbe, TouchFocus,
};
use crate::input::MouseButton;

impl Scene {
    // =========================================================================
    // Listeners
    // =========================================================================

    /// Registers a listener on a component.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`](crate::UiError::ComponentNotFound)
    /// for a stale id.
    pub fn add_listener(
        &mut self,
        id: ComponentId,
        listener: impl FnMut(&mut Event, &mut Self) -> bool + 'static,
    ) -> UiResult<ListenerId> {
        self.add_boxed_listener(id, Box::new(listener))
    }

    /// Registers an already boxed listener.
    ///
    /// # Errors
    ///
    /// As [`Scene::add_listener`].
    pub fn add_boxed_listener(&mut self, id: ComponentId, listener: Box<ListenerFn>) -> UiResult<ListenerId> {
        let listener_id = ListenerId(self.next_listener);
        self.entry_mut(id)?
            .listeners
            .push(ListenerEntry::new(listener_id, listener));
        self.next_listener += 1;
        Ok(listener_id)
    }

    /// Registers a listener that only sees change events.
    ///
    /// # Errors
    ///
    /// As [`Scene::add_listener`].
    pub fn on_change(
        &mut self,
        id: ComponentId,
        mut listener: impl FnMut(&mut Event, &mut Self) + 'static,
    ) -> UiResult<ListenerId> {
        self.add_listener(id, move |event, scene| {
            if event.kind == EventKind::Change {
                listener(event, scene);
            }
            false
        })
    }

    /// Removes a listener. Returns false if it was not registered there.
    pub fn remove_listener(&mut self, id: ComponentId, listener: ListenerId) -> bool {
        let Ok(component) = self.entry_mut(id) else {
            return false;
        };
        let before = component.listeners.len();
        component.listeners.retain(|entry| entry.id != listener);
        let removed = component.listeners.len() != before;
        if removed {
            self.touch_focus.retain(|focus| focus.listener.id != listener);
        }
        removed
    }

    /// Returns the number of listeners on a component.
    #[must_use]
    pub fn listener_count(&self, id: ComponentId) -> usize {
        self.entry(id).map_or(0, |c| c.listeners.len())
    }

    // =========================================================================
    // Firing
    // =========================================================================

    /// Delivers an event to its target's listeners, then to each ancestor's
    /// until a listener stops it.
    ///
    /// Returns true if the event was cancelled.
    pub fn fire(&mut self, event: &mut Event) -> bool {
        let Some(target) = event.target else {
            return false;
        };
        event.time = self.time;
        event.modifiers = self.modifiers;

        let mut current = Some(target);
        while let Some(id) = current {
            self.notify(id, event);
            if event.is_stopped() || !event.bubbles {
                break;
            }
            current = self.parent(id);
        }
        event.is_cancelled()
    }

    /// Runs every listener of one component.
    fn notify(&mut self, id: ComponentId, event: &mut Event) {
        let Ok(component) = self.entry(id) else {
            return;
        };
        let listeners = component.listeners.clone();
        event.listener_component = Some(id);

        for entry in listeners {
            let Some(handled) = entry.invoke(event, self) else {
                continue;
            };
            if !handled {
                continue;
            }
            event.handle();

            if event.kind == EventKind::TouchDown {
                if let (Some(target), Some(pointer), Some(button)) =
                    (event.target, event.pointer, event.button)
                {
                    self.touch_focus.push(TouchFocus {
                        listener: entry.clone(),
                        component: id,
                        target,
                        pointer,
                        button,
                    });
                }
            }
        }
    }

    /// Fires a pooled change event at a component.
    ///
    /// Returns true if a listener cancelled it.
    pub fn fire_change(&mut self, id: ComponentId) -> bool {
        let mut event = self.pools.obtain::<Event>();
        event.kind = EventKind::Change;
        event.target = Some(id);
        let cancelled = self.fire(&mut event);
        self.pools.free(event);
        cancelled
    }

    /// Fires a change event for a widget that just changed its value.
    ///
    /// Inside [`Scene::with_widget`] the event waits until the widget is back
    /// in place, so listeners can read it. A cancelled event is answered
    /// with [`Widget::revert_change`](crate::Widget::revert_change).
    pub fn queue_change(&mut self, id: ComponentId) {
        self.pending_changes.push_back(id);
        if self.checkout_depth == 0 {
            self.flush_changes();
        }
    }

    pub(super) fn flush_changes(&mut self) {
        while let Some(id) = self.pending_changes.pop_front() {
            if !self.fire_change(id) {
                continue;
            }
            tracing::debug!("Change on {} cancelled, reverting", id);
            if let Err(err) = self.with_dyn_widget(id, |widget, scene| widget.revert_change(scene)) {
                tracing::warn!("Could not revert cancelled change on {}: {}", id, err);
            }
        }
    }

    /// Returns where an input event's pointer is relative to a component.
    ///
    /// Widgets compute this before mutating themselves, since the hit test
    /// reads the scene.
    #[must_use]
    pub fn probe(&self, id: ComponentId, event: &Event) -> PointerProbe {
        let Ok((local_x, local_y)) = self.stage_to_local(id, event.stage_x, event.stage_y) else {
            return PointerProbe::default();
        };
        PointerProbe {
            local_x,
            local_y,
            inside: self.hit_from(id, local_x, local_y).is_some(),
        }
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    fn input_event(&mut self, kind: EventKind, x: f32, y: f32) -> Event {
        let mut event = self.pools.obtain::<Event>();
        event.kind = kind;
        event.stage_x = x;
        event.stage_y = y;
        event
    }

    /// Reports a pointer going down. Returns true if a listener handled it.
    pub fn touch_down(&mut self, x: f32, y: f32, pointer: u32, button: MouseButton) -> bool {
        let target = self.hit(x, y).unwrap_or(self.root);
        let mut event = self.input_event(EventKind::TouchDown, x, y);
        event.target = Some(target);
        event.pointer = Some(pointer);
        event.button = Some(button);

        self.fire(&mut event);
        let handled = event.is_handled();
        self.pools.free(event);
        handled
    }

    /// Reports a pressed pointer moving. Only listeners that claimed the
    /// pointer on touch down are told.
    pub fn touch_dragged(&mut self, x: f32, y: f32, pointer: u32) -> bool {
        let focused: Vec<TouchFocus> = self
            .touch_focus
            .iter()
            .filter(|focus| focus.pointer == pointer)
            .cloned()
            .collect();

        let mut handled = false;
        for focus in focused {
            let mut event = self.input_event(EventKind::TouchDragged, x, y);
            event.pointer = Some(pointer);
            handled |= self.notify_focus(&focus, &mut event);
            self.pools.free(event);
        }
        handled
    }

    /// Reports a pointer going up. Releases the touch focus it held.
    pub fn touch_up(&mut self, x: f32, y: f32, pointer: u32, button: MouseButton) -> bool {
        let mut released = Vec::new();
        self.touch_focus.retain(|focus| {
            let matches = focus.pointer == pointer && focus.button == button;
            if matches {
                released.push(focus.clone());
            }
            !matches
        });

        let mut handled = false;
        for focus in released {
            let mut event = self.input_event(EventKind::TouchUp, x, y);
            event.pointer = Some(pointer);
            event.button = Some(button);
            handled |= self.notify_focus(&focus, &mut event);
            self.pools.free(event);
        }
        handled
    }

    /// Drops every touch focus without telling the listeners.
    pub fn clear_touch_focus(&mut self) {
        self.touch_focus.clear();
    }

    fn notify_focus(&mut self, focus: &TouchFocus, event: &mut Event) -> bool {
        if !self.contains(focus.component) {
            return false;
        }
        event.target = Some(focus.target);
        event.listener_component = Some(focus.component);
        event.time = self.time;
        event.modifiers = self.modifiers;
        focus.listener.invoke(event, self).unwrap_or(false) || event.is_handled()
    }

    /// Reports the mouse moving with no button pressed.
    ///
    /// Fires `Exit` on the previously hovered component and `Enter` on the
    /// new one when they differ, then `MouseMoved` on the hovered component.
    pub fn mouse_moved(&mut self, x: f32, y: f32) -> bool {
        let over = self.hit(x, y);
        let previous = self.mouse_over;

        if over != previous {
            if let Some(old) = previous.filter(|&old| self.contains(old)) {
                let mut exit = self.input_event(EventKind::Exit, x, y);
                exit.target = Some(old);
                exit.related = over;
                self.fire(&mut exit);
                self.pools.free(exit);
            }
            if let Some(new) = over {
                let mut enter = self.input_event(EventKind::Enter, x, y);
                enter.target = Some(new);
                enter.related = previous;
                self.fire(&mut enter);
                self.pools.free(enter);
            }
            self.mouse_over = over;
        }

        let mut moved = self.input_event(EventKind::MouseMoved, x, y);
        moved.target = Some(over.unwrap_or(self.root));
        self.fire(&mut moved);
        let handled = moved.is_handled();
        self.pools.free(moved);
        handled
    }

    /// Returns the component under the mouse as of the last
    /// [`Scene::mouse_moved`].
    #[must_use]
    pub const fn mouse_over(&self) -> Option<ComponentId> {
        self.mouse_over
    }
}
