//! Core widget traits.

use std::any::Any;

use crate::layout::Rect;
use crate::scene::{DrawContext, Scene};

/// Downcasting support for widgets stored as trait objects.
pub trait AsAny: Any {
    /// Returns `self` as [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as mutable [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior attached to a component.
///
/// The component itself (position, size, children, listeners) lives in the
/// [`Scene`]; a widget adds layout, drawing and state on top. Every method
/// has a default so simple widgets implement only what they need.
pub trait Widget: AsAny {
    /// Preferred size. Widgets that cache it recompute after
    /// [`Widget::invalidate`].
    fn pref_size(&mut self, _scene: &mut Scene) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Smallest usable size.
    fn min_size(&mut self, scene: &mut Scene) -> (f32, f32) {
        self.pref_size(scene)
    }

    /// Positions children. Called by [`Scene::validate`] when the component
    /// needs layout.
    fn layout(&mut self, _scene: &mut Scene) {}

    /// Drops cached sizes.
    fn invalidate(&mut self) {}

    /// Draws the widget's own visuals. Children are drawn by the scene
    /// afterwards.
    fn draw(&self, _ctx: &mut DrawContext<'_>) {}

    /// Offset applied to children while drawing.
    fn child_offset(&self, _scene: &Scene) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Undoes the change whose event was cancelled.
    fn revert_change(&mut self, _scene: &mut Scene) {}

    /// Receives the area the widget is visible in, for widgets that skip
    /// work outside it.
    fn set_culling_area(&mut self, _area: Option<Rect>) {}
}

/// A widget that can be disabled.
pub trait Disableable {
    /// Enables or disables the widget.
    fn set_disabled(&mut self, disabled: bool);

    /// Returns true if the widget is disabled.
    fn is_disabled(&self) -> bool;
}
