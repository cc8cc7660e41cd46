//! Per-component storage.

use crate::action::ScheduledAction;
use crate::event::ListenerEntry;
use crate::layout::Rect;
use crate::style::Color;
use crate::widget::Widget;

use super::ComponentId;

/// Component state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentFlags(u32);

impl ComponentFlags {
    /// Component and its children are drawn and hit.
    pub const VISIBLE: u32 = 1 << 0;
    /// Layout must run before the next draw.
    pub const NEEDS_LAYOUT: u32 = 1 << 1;

    /// Default flags for a new component.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::NEEDS_LAYOUT);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

impl Default for ComponentFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a component takes part in hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Touchable {
    /// The component and its children can be hit.
    #[default]
    Enabled,
    /// Neither the component nor its children can be hit.
    Disabled,
    /// Only the children can be hit.
    ChildrenOnly,
}

/// Geometry and hierarchy of one component.
///
/// Handed out read-only; change it through [`Scene`](super::Scene) so layout
/// invalidation and widget notifications happen.
#[derive(Debug, Clone)]
pub struct ComponentState {
    /// Left edge, relative to the parent.
    pub x: f32,
    /// Bottom edge, relative to the parent.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Tint; alpha multiplies down the hierarchy.
    pub color: Color,
    /// State flags.
    pub flags: ComponentFlags,
    /// Hit testing mode.
    pub touchable: Touchable,
    /// Optional name for lookups.
    pub name: Option<String>,
    /// Parent component, `None` for the root and detached components.
    pub parent: Option<ComponentId>,
    /// Children in draw order.
    pub children: Vec<ComponentId>,
    /// Area outside which children are not drawn, in local coordinates.
    pub culling_area: Option<Rect>,
}

impl ComponentState {
    pub(crate) fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            color: Color::WHITE,
            flags: ComponentFlags::DEFAULT,
            touchable: Touchable::Enabled,
            name: None,
            parent: None,
            children: Vec::new(),
            culling_area: None,
        }
    }

    /// Returns true if the component is visible.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.has(ComponentFlags::VISIBLE)
    }

    /// Returns true if the component needs layout.
    #[inline]
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        self.flags.has(ComponentFlags::NEEDS_LAYOUT)
    }

    /// Returns the bounds in the parent's coordinates.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Where a component's widget currently is.
pub(crate) enum WidgetSlot {
    /// Plain group or leaf with no widget behavior.
    Empty,
    Present(Box<dyn Widget>),
    /// Taken out by `with_widget`; put back when the closure returns.
    CheckedOut,
}

/// Everything the scene stores for one component.
pub(crate) struct Component {
    pub(crate) state: ComponentState,
    pub(crate) widget: WidgetSlot,
    pub(crate) listeners: Vec<ListenerEntry>,
    pub(crate) actions: Vec<ScheduledAction>,
}

impl Component {
    pub(crate) fn new() -> Self {
        Self {
            state: ComponentState::new(),
            widget: WidgetSlot::Empty,
            listeners: Vec::new(),
            actions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut flags = ComponentFlags::DEFAULT;
        assert!(flags.has(ComponentFlags::VISIBLE));
        assert!(flags.has(ComponentFlags::NEEDS_LAYOUT));

        flags.clear(ComponentFlags::NEEDS_LAYOUT);
        assert!(!flags.has(ComponentFlags::NEEDS_LAYOUT));

        flags.assign(ComponentFlags::VISIBLE, false);
        assert!(!flags.has(ComponentFlags::VISIBLE));
    }
}
