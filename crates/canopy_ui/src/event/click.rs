//! Click recognition.
//!
//! [`ClickListener`] turns raw touch down/drag/up and enter/exit events into
//! clicks, tracks hover and pressed state for drawing, and counts multi-taps.
//! It is plain state: the owning widget feeds it events from its scene
//! listener together with a [`PointerProbe`] computed by the scene.

use super::{Event, EventKind};
use crate::config::ClickConfig;
use crate::input::MouseButton;

/// Where the pointer is relative to the listening component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerProbe {
    /// Pointer x in the component's coordinates.
    pub local_x: f32,
    /// Pointer y in the component's coordinates.
    pub local_y: f32,
    /// True if a hit test at the pointer lands on the component or one of
    /// its descendants.
    pub inside: bool,
}

/// What a [`ClickListener`] made of an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClickResponse {
    /// The listener wants the event marked handled (claims touch focus on
    /// touch down).
    pub handled: bool,
    /// A click completed.
    pub clicked: bool,
    /// Click position in the component's coordinates.
    pub x: f32,
    /// Click position in the component's coordinates.
    pub y: f32,
    /// Taps in the current multi-tap sequence, including this one.
    pub tap_count: u32,
}

/// Pressed/over/tap state machine.
#[derive(Debug, Clone)]
pub struct ClickListener {
    config: ClickConfig,
    /// Only this button counts for the primary pointer. `None` accepts any.
    button: Option<MouseButton>,
    pressed: bool,
    over: bool,
    cancelled: bool,
    pressed_pointer: Option<u32>,
    pressed_button: Option<MouseButton>,
    touch_down: Option<(f32, f32)>,
    visual_pressed_until: f64,
    tap_count: u32,
    last_tap_time: f64,
}

impl ClickListener {
    /// Creates a listener accepting the left button.
    #[must_use]
    pub fn new(config: ClickConfig) -> Self {
        Self {
            config,
            button: Some(MouseButton::Left),
            pressed: false,
            over: false,
            cancelled: false,
            pressed_pointer: None,
            pressed_button: None,
            touch_down: None,
            visual_pressed_until: 0.0,
            tap_count: 0,
            last_tap_time: f64::NEG_INFINITY,
        }
    }

    /// Feeds one event.
    pub fn handle(&mut self, event: &Event, probe: &PointerProbe) -> ClickResponse {
        let mut response = ClickResponse {
            x: probe.local_x,
            y: probe.local_y,
            ..ClickResponse::default()
        };

        match event.kind {
            EventKind::TouchDown => {
                response.handled = self.touch_down(event, probe);
            }
            EventKind::TouchDragged => self.touch_dragged(event, probe),
            EventKind::TouchUp => {
                response.clicked = self.touch_up(event, probe);
                response.tap_count = self.tap_count;
            }
            EventKind::Enter => {
                if event.pointer.is_none() && !self.cancelled {
                    self.over = true;
                }
            }
            EventKind::Exit => {
                if event.pointer.is_none() && !self.cancelled {
                    self.over = false;
                }
            }
            EventKind::MouseMoved | EventKind::Change => {}
        }

        response
    }

    fn touch_down(&mut self, event: &Event, probe: &PointerProbe) -> bool {
        if self.pressed {
            return false;
        }
        let (Some(pointer), Some(button)) = (event.pointer, event.button) else {
            return false;
        };
        if pointer == 0 && self.button.is_some_and(|wanted| wanted != button) {
            return false;
        }

        self.pressed = true;
        self.pressed_pointer = Some(pointer);
        self.pressed_button = Some(button);
        self.touch_down = Some((probe.local_x, probe.local_y));
        self.set_visual_pressed(true, event.time);
        true
    }

    fn touch_dragged(&mut self, event: &Event, probe: &PointerProbe) {
        if event.pointer != self.pressed_pointer || self.cancelled {
            return;
        }
        self.pressed = self.is_over_probe(probe);
        if !self.pressed {
            self.invalidate_tap_square();
        }
    }

    fn touch_up(&mut self, event: &Event, probe: &PointerProbe) -> bool {
        if event.pointer.is_none() || event.pointer != self.pressed_pointer {
            return false;
        }

        let mut clicked = false;
        if !self.cancelled {
            let mut over = self.is_over_probe(probe);
            if over
                && event.pointer == Some(0)
                && self.button.is_some_and(|wanted| event.button != Some(wanted))
            {
                over = false;
            }
            if over {
                if event.time - self.last_tap_time > f64::from(self.config.tap_count_interval) {
                    self.tap_count = 0;
                }
                self.tap_count += 1;
                self.last_tap_time = event.time;
                clicked = true;
            }
        }

        self.pressed = false;
        self.pressed_pointer = None;
        self.pressed_button = None;
        self.cancelled = false;
        clicked
    }

    fn is_over_probe(&self, probe: &PointerProbe) -> bool {
        probe.inside || self.in_tap_square(probe.local_x, probe.local_y)
    }

    /// Returns true if a point is close enough to the touch-down point to
    /// still count as a tap.
    #[must_use]
    pub fn in_tap_square(&self, x: f32, y: f32) -> bool {
        let Some((down_x, down_y)) = self.touch_down else {
            return false;
        };
        (x - down_x).abs() < self.config.tap_square_size
            && (y - down_y).abs() < self.config.tap_square_size
    }

    /// Forgets the touch-down point so the release no longer counts as a
    /// tap unless it is over the component.
    pub fn invalidate_tap_square(&mut self) {
        self.touch_down = None;
    }

    /// Aborts the current press. The coming touch up will not click.
    pub fn cancel(&mut self) {
        if self.pressed_pointer.is_none() {
            return;
        }
        self.cancelled = true;
        self.pressed = false;
    }

    /// Returns true while a pointer is down on the component and still over
    /// it.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns true while pressed, or for a short time after a quick tap so
    /// the press is visible.
    #[must_use]
    pub fn is_visual_pressed(&self, now: f64) -> bool {
        self.pressed || now < self.visual_pressed_until
    }

    /// Starts or clears the visual press timer.
    pub fn set_visual_pressed(&mut self, visual_pressed: bool, now: f64) {
        self.visual_pressed_until = if visual_pressed {
            now + f64::from(self.config.visual_pressed_duration)
        } else {
            0.0
        };
    }

    /// Returns true if the mouse hovers the component or it is pressed.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over || self.pressed
    }

    /// Returns the touch-down point in component coordinates.
    #[must_use]
    pub const fn touch_down_point(&self) -> Option<(f32, f32)> {
        self.touch_down
    }

    /// Returns the pointer holding the press.
    #[must_use]
    pub const fn pressed_pointer(&self) -> Option<u32> {
        self.pressed_pointer
    }

    /// Returns the button holding the press.
    #[must_use]
    pub const fn pressed_button(&self) -> Option<MouseButton> {
        self.pressed_button
    }

    /// Returns the taps counted in the current multi-tap sequence.
    #[must_use]
    pub const fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Overrides the tap count, e.g. to reset a double-click.
    pub fn set_tap_count(&mut self, tap_count: u32) {
        self.tap_count = tap_count;
    }

    /// Returns the button filter.
    #[must_use]
    pub const fn button(&self) -> Option<MouseButton> {
        self.button
    }

    /// Sets the button accepted for the primary pointer. `None` accepts any.
    pub fn set_button(&mut self, button: Option<MouseButton>) {
        self.button = button;
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &ClickConfig {
        &self.config
    }
}

impl Default for ClickListener {
    fn default() -> Self {
        Self::new(ClickConfig::default())
    }
}
