//! # Scene Graph
//!
//! The scene owns every component in a generational arena. Components refer
//! to their parent and children by [`ComponentId`], so there are no
//! back-pointers and removing a subtree never leaves a dangling reference:
//! stale ids simply stop resolving.
//!
//! ## Frame
//!
//! ```text
//! host input ──► touch_down / touch_up / mouse_moved ──► listeners
//!                                                          │
//! act(delta) ──► actions ──► positions, colors, visibility ◄┘
//!                                   │
//! draw(batch) ──► validate() ──► widget layout ──► Batch
//! ```
//!
//! ## Widgets
//!
//! A component may carry a [`Widget`]. Widget methods that need to change
//! the scene (add children, fire events) run inside
//! [`Scene::with_widget`], which takes the widget out of its slot for the
//! duration of the call.

mod act;
mod component;
mod dispatch;
mod draw;
mod validate;

pub use component::{ComponentFlags, ComponentState, Touchable};
pub use draw::DrawContext;

pub(crate) use act::Running;
pub(crate) use component::{Component, WidgetSlot};

use std::any::type_name;
use std::collections::VecDeque;

use canopy_core::{Arena, Index, Pools};

use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::event::TouchFocus;
use crate::input::Modifiers;
use crate::layout::Rect;
use crate::style::Color;
use crate::widget::{ButtonGroup, Widget};

/// Handle of a component in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) Index);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}v{}", self.0.slot(), self.0.generation())
    }
}

/// The component graph plus per-frame input, action and event state.
pub struct Scene {
    components: Arena<Component>,
    root: ComponentId,
    config: UiConfig,
    pools: Pools,
    /// Seconds accumulated by [`Scene::act`].
    time: f64,
    modifiers: Modifiers,
    next_listener: u64,
    next_action: u64,
    /// Component whose actions are being run.
    running: Option<Running>,
    /// Change events queued by checked-out widgets.
    pending_changes: VecDeque<ComponentId>,
    checkout_depth: u32,
    touch_focus: Vec<TouchFocus>,
    mouse_over: Option<ComponentId>,
    pub(crate) button_groups: Arena<ButtonGroup>,
}

impl Scene {
    /// Creates a scene whose root group covers the viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, UiConfig::default())
    }

    /// Creates a scene with explicit widget defaults.
    #[must_use]
    pub fn with_config(width: f32, height: f32, config: UiConfig) -> Self {
        let mut components = Arena::with_capacity(256);
        let mut root = Component::new();
        root.state.width = width;
        root.state.height = height;
        root.state.touchable = Touchable::ChildrenOnly;
        root.state.name = Some("root".to_string());
        let root = ComponentId(components.insert(root));

        Self {
            components,
            root,
            pools: Pools::new(config.pool.max_free_events),
            config,
            time: 0.0,
            modifiers: Modifiers::NONE,
            next_listener: 1,
            next_action: 1,
            running: None,
            pending_changes: VecDeque::new(),
            checkout_depth: 0,
            touch_focus: Vec::new(),
            mouse_over: None,
            button_groups: Arena::new(),
        }
    }

    /// Returns the root group.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> ComponentId {
        self.root
    }

    /// Returns the widget defaults.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Returns seconds elapsed through [`Scene::act`].
    #[inline]
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Returns the modifier keys last reported by the host.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Records the modifier keys currently held.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Returns the event pools.
    #[must_use]
    pub const fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Returns the number of live components, the root included.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Creates a detached component with no widget.
    pub fn create_component(&mut self) -> ComponentId {
        ComponentId(self.components.insert(Component::new()))
    }

    /// Creates a detached component carrying a widget built from its id.
    pub fn spawn_widget<W: Widget>(&mut self, build: impl FnOnce(ComponentId) -> W) -> ComponentId {
        let index = self.components.insert_with(|index| {
            let mut component = Component::new();
            component.widget = WidgetSlot::Present(Box::new(build(ComponentId(index))));
            component
        });
        ComponentId(index)
    }

    /// Returns true if the id refers to a live component.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains(id.0)
    }

    /// Returns a component's state.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn component(&self, id: ComponentId) -> UiResult<&ComponentState> {
        self.components
            .get(id.0)
            .map(|c| &c.state)
            .ok_or(UiError::ComponentNotFound(id))
    }

    pub(crate) fn entry(&self, id: ComponentId) -> UiResult<&Component> {
        self.components.get(id.0).ok_or(UiError::ComponentNotFound(id))
    }

    pub(crate) fn entry_mut(&mut self, id: ComponentId) -> UiResult<&mut Component> {
        self.components
            .get_mut(id.0)
            .ok_or(UiError::ComponentNotFound(id))
    }

    fn state_mut(&mut self, id: ComponentId) -> UiResult<&mut ComponentState> {
        self.entry_mut(id).map(|c| &mut c.state)
    }

    /// Returns a component's children in draw order. Empty for stale ids.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.components
            .get(id.0)
            .map_or(&[], |c| c.state.children.as_slice())
    }

    /// Returns a component's parent.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.components.get(id.0)?.state.parent
    }

    /// Returns true if `id` is `ancestor` or lies below it.
    #[must_use]
    pub fn is_descendant_of(&self, id: ComponentId, ancestor: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Returns true if the component is connected to the root.
    #[must_use]
    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.contains(id) && self.is_descendant_of(id, self.root)
    }

    /// Appends `child` to `parent`, moving it from any previous parent.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for stale ids and
    /// [`UiError::ComponentCycle`] if `parent` lies below `child`.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) -> UiResult<()> {
        let index = self.children(parent).len();
        let index = if self.parent(child) == Some(parent) {
            index - 1
        } else {
            index
        };
        self.insert_child(parent, index, child)
    }

    /// Inserts `child` at `index` among `parent`'s children.
    ///
    /// The index is taken after `child` has been removed from its previous
    /// parent.
    ///
    /// # Errors
    ///
    /// As [`Scene::add_child`], plus [`UiError::IndexOutOfBounds`].
    pub fn insert_child(&mut self, parent: ComponentId, index: usize, child: ComponentId) -> UiResult<()> {
        self.component(parent)?;
        self.component(child)?;
        if child == self.root || self.is_descendant_of(parent, child) {
            return Err(UiError::ComponentCycle(child));
        }

        let siblings = self.children(parent).len();
        let len = if self.parent(child) == Some(parent) {
            siblings - 1
        } else {
            siblings
        };
        if index > len {
            return Err(UiError::IndexOutOfBounds { index, len });
        }

        self.remove_from_parent(child)?;
        self.state_mut(parent)?.children.insert(index, child);
        self.state_mut(child)?.parent = Some(parent);
        self.invalidate_hierarchy(parent);
        Ok(())
    }

    /// Detaches a component from its parent. The component and its subtree
    /// stay alive and can be added elsewhere.
    ///
    /// Returns false if it had no parent.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn remove_from_parent(&mut self, id: ComponentId) -> UiResult<bool> {
        let Some(parent) = self.component(id)?.parent else {
            return Ok(false);
        };
        if let Ok(state) = self.state_mut(parent) {
            state.children.retain(|&c| c != id);
        }
        self.state_mut(id)?.parent = None;
        self.invalidate_hierarchy(parent);
        Ok(true)
    }

    /// Removes every child of a component, keeping them alive.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn clear_children(&mut self, id: ComponentId) -> UiResult<()> {
        let children = std::mem::take(&mut self.state_mut(id)?.children);
        for child in children {
            if let Ok(state) = self.state_mut(child) {
                state.parent = None;
            }
        }
        self.invalidate_hierarchy(id);
        Ok(())
    }

    /// Frees a component and its whole subtree.
    ///
    /// Widgets, listeners and actions are dropped. Destroying the root only
    /// destroys its children.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn destroy(&mut self, id: ComponentId) -> UiResult<()> {
        if id == self.root {
            for child in self.children(id).to_vec() {
                self.destroy(child)?;
            }
            return Ok(());
        }

        self.remove_from_parent(id)?;

        let mut stack = vec![id];
        let mut freed = 0_usize;
        while let Some(next) = stack.pop() {
            if let Some(component) = self.components.remove(next.0) {
                stack.extend(component.state.children.iter().copied());
                freed += 1;
            }
        }

        let components = &self.components;
        for (_, group) in self.button_groups.iter_mut() {
            group.retain_buttons(|b| components.contains(b.0));
        }
        self.pending_changes.retain(|c| components.contains(c.0));
        self.touch_focus
            .retain(|focus| self.components.contains(focus.component.0));
        if self.mouse_over.is_some_and(|over| !self.components.contains(over.0)) {
            self.mouse_over = None;
        }
        tracing::debug!("Destroyed component {} ({} in subtree)", id, freed);
        Ok(())
    }

    /// Sets a component's name.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_name(&mut self, id: ComponentId, name: impl Into<String>) -> UiResult<()> {
        self.state_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Finds a descendant of `parent` by name: direct children first, then
    /// each child's subtree in order.
    #[must_use]
    pub fn find_by_name(&self, parent: ComponentId, name: &str) -> Option<ComponentId> {
        let children = self.children(parent);
        let direct = children.iter().copied().find(|&child| {
            self.component(child)
                .is_ok_and(|state| state.name.as_deref() == Some(name))
        });
        direct.or_else(|| {
            children
                .iter()
                .find_map(|&child| self.find_by_name(child, name))
        })
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Sets the position relative to the parent.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_position(&mut self, id: ComponentId, x: f32, y: f32) -> UiResult<()> {
        let state = self.state_mut(id)?;
        state.x = x;
        state.y = y;
        Ok(())
    }

    /// Moves a component by an offset.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn move_by(&mut self, id: ComponentId, dx: f32, dy: f32) -> UiResult<()> {
        let state = self.state_mut(id)?;
        state.x += dx;
        state.y += dy;
        Ok(())
    }

    /// Resizes a component. A changed size invalidates its layout.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_size(&mut self, id: ComponentId, width: f32, height: f32) -> UiResult<()> {
        let state = self.state_mut(id)?;
        #[allow(clippy::float_cmp)]
        let unchanged = state.width == width && state.height == height;
        if unchanged {
            return Ok(());
        }
        state.width = width;
        state.height = height;
        self.invalidate(id);
        Ok(())
    }

    /// Sets position and size.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_bounds(&mut self, id: ComponentId, bounds: Rect) -> UiResult<()> {
        self.set_position(id, bounds.x, bounds.y)?;
        self.set_size(id, bounds.width, bounds.height)
    }

    /// Resizes a component to its preferred size.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id and
    /// [`UiError::WidgetBusy`] if its widget is checked out.
    pub fn pack(&mut self, id: ComponentId) -> UiResult<()> {
        let (width, height) = self.pref_size(id)?;
        self.set_size(id, width, height)?;
        self.validate_subtree(id);
        Ok(())
    }

    /// Sets the tint.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_color(&mut self, id: ComponentId, color: Color) -> UiResult<()> {
        self.state_mut(id)?.color = color;
        Ok(())
    }

    /// Shows or hides a component and its subtree.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_visible(&mut self, id: ComponentId, visible: bool) -> UiResult<()> {
        self.state_mut(id)?
            .flags
            .assign(ComponentFlags::VISIBLE, visible);
        Ok(())
    }

    /// Sets how the component takes part in hit testing.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_touchable(&mut self, id: ComponentId, touchable: Touchable) -> UiResult<()> {
        self.state_mut(id)?.touchable = touchable;
        Ok(())
    }

    /// Sets the area outside which children are not drawn, in the
    /// component's coordinates, and tells the widget.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn set_culling_area(&mut self, id: ComponentId, area: Option<Rect>) -> UiResult<()> {
        let component = self.entry_mut(id)?;
        component.state.culling_area = area;
        if let WidgetSlot::Present(widget) = &mut component.widget {
            widget.set_culling_area(area);
        }
        Ok(())
    }

    /// Converts stage coordinates into a component's coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn stage_to_local(&self, id: ComponentId, x: f32, y: f32) -> UiResult<(f32, f32)> {
        let (ox, oy) = self.stage_origin(id)?;
        Ok((x - ox, y - oy))
    }

    /// Converts a component's coordinates into stage coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id.
    pub fn local_to_stage(&self, id: ComponentId, x: f32, y: f32) -> UiResult<(f32, f32)> {
        let (ox, oy) = self.stage_origin(id)?;
        Ok((x + ox, y + oy))
    }

    fn stage_origin(&self, id: ComponentId) -> UiResult<(f32, f32)> {
        let mut state = self.component(id)?;
        let (mut x, mut y) = (state.x, state.y);
        while let Some(parent) = state.parent {
            state = self.component(parent)?;
            x += state.x;
            y += state.y;
        }
        Ok((x, y))
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Returns the top-most touchable component under a stage point.
    #[must_use]
    pub fn hit(&self, stage_x: f32, stage_y: f32) -> Option<ComponentId> {
        let root = self.component(self.root).ok()?;
        self.hit_from(self.root, stage_x - root.x, stage_y - root.y)
    }

    /// Hit tests a subtree with a point in `id`'s coordinates.
    ///
    /// Children are tested front to back (reverse draw order). Invisible
    /// components and [`Touchable::Disabled`] subtrees are skipped;
    /// [`Touchable::ChildrenOnly`] components pass the point through.
    #[must_use]
    pub fn hit_from(&self, id: ComponentId, x: f32, y: f32) -> Option<ComponentId> {
        let state = self.component(id).ok()?;
        if !state.is_visible() || state.touchable == Touchable::Disabled {
            return None;
        }

        for &child in state.children.iter().rev() {
            let Ok(child_state) = self.component(child) else {
                continue;
            };
            if let Some(hit) = self.hit_from(child, x - child_state.x, y - child_state.y) {
                return Some(hit);
            }
        }

        let inside = x >= 0.0 && x < state.width && y >= 0.0 && y < state.height;
        (state.touchable == Touchable::Enabled && inside).then_some(id)
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// Returns true if the component carries a widget (checked out or not).
    #[must_use]
    pub fn has_widget(&self, id: ComponentId) -> bool {
        self.components
            .get(id.0)
            .is_some_and(|c| !matches!(c.widget, WidgetSlot::Empty))
    }

    /// Attaches a widget to an existing component, replacing any previous
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id and
    /// [`UiError::WidgetBusy`] while the old widget is checked out.
    pub fn set_widget(&mut self, id: ComponentId, widget: Box<dyn Widget>) -> UiResult<()> {
        let component = self.entry_mut(id)?;
        if matches!(component.widget, WidgetSlot::CheckedOut) {
            return Err(UiError::WidgetBusy(id));
        }
        component.widget = WidgetSlot::Present(widget);
        self.invalidate_hierarchy(id);
        Ok(())
    }

    /// Returns a component's widget as a trait object.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`], [`UiError::WidgetNotFound`]
    /// or [`UiError::WidgetBusy`].
    pub fn dyn_widget(&self, id: ComponentId) -> UiResult<&dyn Widget> {
        match &self.entry(id)?.widget {
            WidgetSlot::Present(widget) => Ok(widget.as_ref()),
            WidgetSlot::Empty => Err(UiError::WidgetNotFound(id)),
            WidgetSlot::CheckedOut => Err(UiError::WidgetBusy(id)),
        }
    }

    /// Returns a component's widget as a concrete type.
    ///
    /// # Errors
    ///
    /// As [`Scene::dyn_widget`], plus [`UiError::WidgetTypeMismatch`].
    pub fn widget<W: Widget>(&self, id: ComponentId) -> UiResult<&W> {
        self.dyn_widget(id)?
            .as_any()
            .downcast_ref::<W>()
            .ok_or(UiError::WidgetTypeMismatch {
                id,
                expected: type_name::<W>(),
            })
    }

    /// Returns a component's widget mutably.
    ///
    /// Use [`Scene::with_widget`] for changes that must reach the scene.
    ///
    /// # Errors
    ///
    /// As [`Scene::widget`].
    pub fn widget_mut<W: Widget>(&mut self, id: ComponentId) -> UiResult<&mut W> {
        match &mut self.entry_mut(id)?.widget {
            WidgetSlot::Present(widget) => widget
                .as_mut()
                .as_any_mut()
                .downcast_mut::<W>()
                .ok_or(UiError::WidgetTypeMismatch {
                    id,
                    expected: type_name::<W>(),
                }),
            WidgetSlot::Empty => Err(UiError::WidgetNotFound(id)),
            WidgetSlot::CheckedOut => Err(UiError::WidgetBusy(id)),
        }
    }

    /// Runs `f` with the widget taken out of the scene, so it can mutate
    /// both itself and the scene.
    ///
    /// While checked out, the widget is invisible to lookups
    /// ([`UiError::WidgetBusy`]) and is not drawn or laid out. Change events
    /// the widget queues are fired once it is back in place.
    ///
    /// # Errors
    ///
    /// As [`Scene::widget`].
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut W, &mut Self) -> R,
    ) -> UiResult<R> {
        self.widget::<W>(id)?;
        self.with_dyn_widget(id, |widget, scene| {
            widget.as_any_mut().downcast_mut::<W>().map(|widget| f(widget, scene))
        })?
        .ok_or(UiError::WidgetTypeMismatch {
            id,
            expected: type_name::<W>(),
        })
    }

    /// [`Scene::with_widget`] for any widget type.
    ///
    /// # Errors
    ///
    /// As [`Scene::dyn_widget`].
    pub fn with_dyn_widget<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> UiResult<R> {
        let mut widget = self.take_widget(id)?;
        self.checkout_depth += 1;
        let result = f(widget.as_mut(), self);
        self.checkout_depth -= 1;
        self.restore_widget(id, widget);

        if self.checkout_depth == 0 {
            self.flush_changes();
        }
        Ok(result)
    }

    fn take_widget(&mut self, id: ComponentId) -> UiResult<Box<dyn Widget>> {
        let component = self.entry_mut(id)?;
        match std::mem::replace(&mut component.widget, WidgetSlot::CheckedOut) {
            WidgetSlot::Present(widget) => Ok(widget),
            WidgetSlot::Empty => {
                component.widget = WidgetSlot::Empty;
                Err(UiError::WidgetNotFound(id))
            }
            WidgetSlot::CheckedOut => Err(UiError::WidgetBusy(id)),
        }
    }

    fn restore_widget(&mut self, id: ComponentId, mut widget: Box<dyn Widget>) {
        let Some(component) = self.components.get_mut(id.0) else {
            tracing::trace!("Dropping widget of component {} destroyed while in use", id);
            return;
        };
        if component.state.needs_layout() {
            widget.invalidate();
        }
        component.widget = WidgetSlot::Present(widget);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("components", &self.components.len())
            .field("root", &self.root)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(scene: &mut Scene, parent: ComponentId, x: f32, y: f32, w: f32, h: f32) -> ComponentId {
        let id = scene.create_component();
        scene.add_child(parent, id).unwrap();
        scene.set_bounds(id, Rect::new(x, y, w, h)).unwrap();
        id
    }

    #[test]
    fn test_add_child_moves_between_parents() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let a = scene.create_component();
        let b = scene.create_component();
        let child = scene.create_component();
        scene.add_child(root, a).unwrap();
        scene.add_child(root, b).unwrap();

        scene.add_child(a, child).unwrap();
        scene.add_child(b, child).unwrap();

        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[child]);
        assert_eq!(scene.parent(child), Some(b));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut scene = Scene::new(100.0, 100.0);
        let a = scene.create_component();
        let b = scene.create_component();
        scene.add_child(a, b).unwrap();

        assert_eq!(scene.add_child(b, a), Err(UiError::ComponentCycle(a)));
        assert_eq!(scene.add_child(a, a), Err(UiError::ComponentCycle(a)));
        let root = scene.root();
        assert_eq!(scene.add_child(a, root), Err(UiError::ComponentCycle(root)));
    }

    #[test]
    fn test_insert_child_index() {
        let mut scene = Scene::new(100.0, 100.0);
        let parent = scene.create_component();
        let first = scene.create_component();
        let second = scene.create_component();
        scene.add_child(parent, first).unwrap();
        scene.insert_child(parent, 0, second).unwrap();
        assert_eq!(scene.children(parent), &[second, first]);

        // Re-adding an existing child moves it to the end.
        scene.add_child(parent, second).unwrap();
        assert_eq!(scene.children(parent), &[first, second]);

        let extra = scene.create_component();
        assert_eq!(
            scene.insert_child(parent, 5, extra),
            Err(UiError::IndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let panel = sized(&mut scene, root, 0.0, 0.0, 50.0, 50.0);
        let inner = sized(&mut scene, panel, 0.0, 0.0, 10.0, 10.0);

        scene.destroy(panel).unwrap();
        assert!(!scene.contains(panel));
        assert!(!scene.contains(inner));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.component_count(), 1);
        assert!(matches!(scene.destroy(panel), Err(UiError::ComponentNotFound(_))));
    }

    #[test]
    fn test_coordinate_conversion() {
        let mut scene = Scene::new(200.0, 200.0);
        let root = scene.root();
        let panel = sized(&mut scene, root, 10.0, 20.0, 100.0, 100.0);
        let inner = sized(&mut scene, panel, 5.0, 5.0, 10.0, 10.0);

        assert_eq!(scene.local_to_stage(inner, 1.0, 1.0).unwrap(), (16.0, 26.0));
        assert_eq!(scene.stage_to_local(inner, 16.0, 26.0).unwrap(), (1.0, 1.0));
    }

    #[test]
    fn test_hit_prefers_front_child() {
        let mut scene = Scene::new(200.0, 200.0);
        let root = scene.root();
        let back = sized(&mut scene, root, 0.0, 0.0, 100.0, 100.0);
        let front = sized(&mut scene, root, 50.0, 50.0, 100.0, 100.0);

        assert_eq!(scene.hit(75.0, 75.0), Some(front));
        assert_eq!(scene.hit(25.0, 25.0), Some(back));
        assert_eq!(scene.hit(190.0, 10.0), None); // Root is children-only

        scene.set_touchable(front, Touchable::Disabled).unwrap();
        assert_eq!(scene.hit(75.0, 75.0), Some(back));

        scene.set_visible(back, false).unwrap();
        assert_eq!(scene.hit(25.0, 25.0), None);
    }

    #[test]
    fn test_hit_edges_half_open() {
        let mut scene = Scene::new(200.0, 200.0);
        let root = scene.root();
        let panel = sized(&mut scene, root, 10.0, 10.0, 20.0, 20.0);

        assert_eq!(scene.hit(10.0, 10.0), Some(panel));
        assert_eq!(scene.hit(30.0, 10.0), None);
        assert_eq!(scene.hit(10.0, 30.0), None);
    }

    #[test]
    fn test_find_by_name_breadth_first_per_level() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let group = scene.create_component();
        let deep = scene.create_component();
        let shallow = scene.create_component();
        scene.add_child(root, group).unwrap();
        scene.add_child(group, deep).unwrap();
        scene.add_child(root, shallow).unwrap();
        scene.set_name(deep, "target").unwrap();
        scene.set_name(shallow, "target").unwrap();

        assert_eq!(scene.find_by_name(root, "target"), Some(shallow));
        assert_eq!(scene.find_by_name(group, "target"), Some(deep));
        assert_eq!(scene.find_by_name(root, "missing"), None);
    }
}
