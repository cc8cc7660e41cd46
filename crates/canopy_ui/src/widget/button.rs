//! Clickable, checkable container.

use super::button_group::GroupUndo;
use super::{ButtonGroupId, Disableable, Widget};
use crate::error::UiResult;
use crate::event::{ClickListener, Event, PointerProbe};
use crate::layout::{Alignment, Layout, Rect};
use crate::scene::{ComponentId, DrawContext, Scene};
use crate::skin::Skin;
use crate::style::{ButtonStyle, Drawable};

/// A container that reacts to clicks and can be checked.
///
/// Children are centered in a single row inside the padding of the style's
/// background. Each click toggles the checked state and fires a change
/// event; cancelling that event undoes the toggle.
#[derive(Debug)]
pub struct Button {
    id: ComponentId,
    style: ButtonStyle,
    checked: bool,
    disabled: bool,
    pub(super) group: Option<ButtonGroupId>,
    group_undo: Option<GroupUndo>,
    click: ClickListener,
    pad_left: f32,
    pad_right: f32,
    pad_top: f32,
    pad_bottom: f32,
}

impl Button {
    /// Creates an empty button sized to its style.
    ///
    /// # Errors
    ///
    /// Propagates scene errors from wiring the input listener.
    pub fn create(scene: &mut Scene, style: ButtonStyle) -> UiResult<ComponentId> {
        let click = ClickListener::new(scene.config().click.clone());
        let id = scene.spawn_widget(|id| {
            let mut button = Self {
                id,
                style: ButtonStyle::default(),
                checked: false,
                disabled: false,
                group: None,
                group_undo: None,
                click,
                pad_left: 0.0,
                pad_right: 0.0,
                pad_top: 0.0,
                pad_bottom: 0.0,
            };
            button.apply_style(style);
            button
        });

        scene.add_listener(id, move |event, scene| Self::on_input(id, event, scene))?;
        scene.pack(id)?;
        tracing::trace!("Created button {}", id);
        Ok(id)
    }

    /// Creates a button around an existing component.
    ///
    /// # Errors
    ///
    /// As [`Button::create`], plus the errors of [`Scene::add_child`].
    pub fn create_with_child(
        scene: &mut Scene,
        child: ComponentId,
        style: ButtonStyle,
    ) -> UiResult<ComponentId> {
        let id = Self::create(scene, style)?;
        scene.add_child(id, child)?;
        scene.pack(id)?;
        Ok(id)
    }

    /// Creates a button with a named style from a skin.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StyleNotFound`](crate::UiError::StyleNotFound) if
    /// the skin has no such button style.
    pub fn from_skin(scene: &mut Scene, skin: &Skin, name: &str) -> UiResult<ComponentId> {
        let style = skin.get::<ButtonStyle>(name)?.clone();
        Self::create(scene, style)
    }

    fn on_input(id: ComponentId, event: &mut Event, scene: &mut Scene) -> bool {
        let probe = scene.probe(id, event);
        match scene.with_widget::<Self, _>(id, |button, scene| button.handle_input(event, &probe, scene)) {
            Ok(handled) => handled,
            Err(err) => {
                tracing::trace!("Button input skipped: {}", err);
                false
            }
        }
    }

    fn handle_input(&mut self, event: &Event, probe: &PointerProbe, scene: &mut Scene) -> bool {
        let response = self.click.handle(event, probe);
        if response.clicked && !self.disabled {
            let checked = !self.checked;
            self.set_checked(scene, checked);
        }
        response.handled
    }

    /// Returns the component this widget belongs to.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Sets the checked state, subject to the button's group.
    ///
    /// Fires a change event when the state actually changes.
    pub fn set_checked(&mut self, scene: &mut Scene, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.group_undo = match self.group {
            Some(group) => match scene.group_can_check(group, self.id, checked) {
                Some(undo) => Some(undo),
                None => return,
            },
            None => None,
        };
        self.checked = checked;
        scene.queue_change(self.id);
    }

    /// Sets the checked state without consulting the group or firing events.
    pub(super) fn restore_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flips the checked state.
    pub fn toggle(&mut self, scene: &mut Scene) {
        let checked = !self.checked;
        self.set_checked(scene, checked);
    }

    /// Returns true if the button is checked.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns true while the button looks pressed.
    #[must_use]
    pub fn is_pressed(&self, scene: &Scene) -> bool {
        self.click.is_visual_pressed(scene.time())
    }

    /// Returns true while hovered or pressed.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.click.is_over()
    }

    /// Returns the group the button belongs to.
    #[must_use]
    pub const fn group(&self) -> Option<ButtonGroupId> {
        self.group
    }

    /// Returns the style.
    #[must_use]
    pub const fn style(&self) -> &ButtonStyle {
        &self.style
    }

    /// Replaces the style. Padding is taken from the new background.
    pub fn set_style(&mut self, scene: &mut Scene, style: ButtonStyle) {
        self.apply_style(style);
        scene.invalidate_hierarchy(self.id);
    }

    fn apply_style(&mut self, style: ButtonStyle) {
        let pad = style.padding_source().copied();
        self.pad_left = pad.map_or(0.0, |d| d.left_width);
        self.pad_right = pad.map_or(0.0, |d| d.right_width);
        self.pad_top = pad.map_or(0.0, |d| d.top_height);
        self.pad_bottom = pad.map_or(0.0, |d| d.bottom_height);
        self.style = style;
    }

    /// Returns the click state machine.
    #[must_use]
    pub const fn click_listener(&self) -> &ClickListener {
        &self.click
    }

    /// Returns the click state machine mutably, e.g. to cancel a press.
    pub fn click_listener_mut(&mut self) -> &mut ClickListener {
        &mut self.click
    }

    /// Returns the background for the current state.
    #[must_use]
    pub fn background(&self, scene: &Scene) -> Option<Drawable> {
        let style = &self.style;
        if self.is_pressed(scene) && !self.disabled {
            return style.down.or(style.up);
        }
        if self.disabled && style.disabled.is_some() {
            return style.disabled;
        }
        if self.checked && style.checked.is_some() {
            if self.is_over() && style.checked_over.is_some() {
                return style.checked_over;
            }
            return style.checked;
        }
        if self.is_over() && style.over.is_some() {
            return style.over;
        }
        style.up
    }

    fn content_sizes(scene: &mut Scene, id: ComponentId) -> Vec<(f32, f32)> {
        scene
            .children(id)
            .to_vec()
            .into_iter()
            .filter_map(|child| scene.pref_size(child).ok())
            .collect()
    }
}

impl Widget for Button {
    fn pref_size(&mut self, scene: &mut Scene) -> (f32, f32) {
        let sizes = Self::content_sizes(scene, self.id);
        let (content_width, content_height) = Layout::horizontal().measure(&sizes);

        let mut width = content_width + self.pad_left + self.pad_right;
        let mut height = content_height + self.pad_top + self.pad_bottom;
        for drawable in [self.style.up, self.style.down, self.style.checked]
            .into_iter()
            .flatten()
        {
            width = width.max(drawable.min_width);
            height = height.max(drawable.min_height);
        }
        (width, height)
    }

    fn layout(&mut self, scene: &mut Scene) {
        let Ok(state) = scene.component(self.id) else {
            return;
        };
        let bounds = Rect::new(0.0, 0.0, state.width, state.height).inset(
            self.pad_left,
            self.pad_right,
            self.pad_top,
            self.pad_bottom,
        );

        let children = scene.children(self.id).to_vec();
        let sizes = Self::content_sizes(scene, self.id);
        if sizes.len() != children.len() {
            tracing::debug!("Button {} has busy children, layout skipped", self.id);
            return;
        }
        let rects = Layout::horizontal()
            .align_main(Alignment::Center)
            .align_cross(Alignment::Center)
            .arrange(bounds, &sizes);
        for (child, rect) in children.into_iter().zip(rects) {
            if let Err(err) = scene.set_bounds(child, rect) {
                tracing::debug!("Button child {} not placed: {}", child, err);
            }
        }
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        if let Some(background) = self.background(ctx.scene) {
            ctx.fill(&background);
        }
    }

    fn child_offset(&self, scene: &Scene) -> (f32, f32) {
        if self.is_pressed(scene) && !self.disabled {
            (self.style.pressed_offset_x, self.style.pressed_offset_y)
        } else {
            (self.style.unpressed_offset_x, self.style.unpressed_offset_y)
        }
    }

    fn revert_change(&mut self, scene: &mut Scene) {
        self.checked = !self.checked;
        if let Some(undo) = self.group_undo.take() {
            scene.undo_group_change(undo);
        }
    }
}

impl Disableable for Button {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}
