//! Shorthand constructors for the built-in actions.

use super::composite::{Delay, Parallel, Repeat, Sequence};
use super::instant::{
    AddAction, RemoveAction, RemoveComponentAction, RunAction, TouchableAction, VisibleAction,
};
use super::temporal::{AlphaTo, ColorTo, MoveBy, MoveTo, SizeBy, SizeTo, Temporal};
use super::{Action, ActionContext, ActionId};
use crate::scene::{ComponentId, Touchable};
use crate::style::Color;

/// Moves to `(x, y)` over `duration` seconds.
#[must_use]
pub fn move_to(x: f32, y: f32, duration: f32) -> Temporal<MoveTo> {
    Temporal::new(MoveTo::new(x, y), duration)
}

/// Moves by `(dx, dy)` over `duration` seconds.
#[must_use]
pub fn move_by(dx: f32, dy: f32, duration: f32) -> Temporal<MoveBy> {
    Temporal::new(MoveBy::new(dx, dy), duration)
}

/// Resizes to `width` x `height` over `duration` seconds.
#[must_use]
pub fn size_to(width: f32, height: f32, duration: f32) -> Temporal<SizeTo> {
    Temporal::new(SizeTo::new(width, height), duration)
}

/// Grows by `(dw, dh)` over `duration` seconds.
#[must_use]
pub fn size_by(dw: f32, dh: f32, duration: f32) -> Temporal<SizeBy> {
    Temporal::new(SizeBy::new(dw, dh), duration)
}

/// Blends the tint to `color`.
#[must_use]
pub fn color_to(color: Color, duration: f32) -> Temporal<ColorTo> {
    Temporal::new(ColorTo::new(color), duration)
}

/// Blends the tint's alpha to `alpha`.
#[must_use]
pub fn alpha_to(alpha: f32, duration: f32) -> Temporal<AlphaTo> {
    Temporal::new(AlphaTo::new(alpha), duration)
}

/// Fades to opaque.
#[must_use]
pub fn fade_in(duration: f32) -> Temporal<AlphaTo> {
    alpha_to(1.0, duration)
}

/// Fades to transparent.
#[must_use]
pub fn fade_out(duration: f32) -> Temporal<AlphaTo> {
    alpha_to(0.0, duration)
}

/// Sets visibility.
#[must_use]
pub fn visible(visible: bool) -> VisibleAction {
    VisibleAction::new(visible)
}

/// Shows the component.
#[must_use]
pub fn show() -> VisibleAction {
    VisibleAction::new(true)
}

/// Hides the component.
#[must_use]
pub fn hide() -> VisibleAction {
    VisibleAction::new(false)
}

/// Sets how the component is hit tested.
#[must_use]
pub fn touchable(touchable: Touchable) -> TouchableAction {
    TouchableAction::new(touchable)
}

/// Detaches the running component from its parent.
#[must_use]
pub fn remove_component() -> RemoveComponentAction {
    RemoveComponentAction::new(None)
}

/// Detaches `component` from its parent.
#[must_use]
pub fn remove_component_of(component: ComponentId) -> RemoveComponentAction {
    RemoveComponentAction::new(Some(component))
}

/// Removes `action` from the running component.
#[must_use]
pub fn remove_action(action: ActionId) -> RemoveAction {
    RemoveAction::new(None, action)
}

/// Removes `action` from `target`.
#[must_use]
pub fn remove_action_of(target: ComponentId, action: ActionId) -> RemoveAction {
    RemoveAction::new(Some(target), action)
}

/// Runs `callback` once.
pub fn run(callback: impl FnMut(&mut ActionContext<'_>) + 'static) -> RunAction {
    RunAction::new(callback)
}

/// Waits `duration` seconds.
#[must_use]
pub fn delay(duration: f32) -> Delay {
    Delay::new(duration)
}

/// Waits `duration` seconds, then runs `action`.
pub fn delay_then(duration: f32, action: impl Action) -> Delay {
    Delay::then_run(duration, action)
}

/// Runs `action` `count` times.
pub fn repeat(count: u32, action: impl Action) -> Repeat {
    Repeat::new(count, action)
}

/// Runs `action` until its [`RepeatHandle`](super::RepeatHandle) finishes it.
pub fn forever(action: impl Action) -> Repeat {
    Repeat::forever(action)
}

/// Runs `actions` one after another.
#[must_use]
pub fn sequence(actions: Vec<Box<dyn Action>>) -> Sequence {
    Sequence::from(actions)
}

/// Runs `actions` together.
#[must_use]
pub fn parallel(actions: Vec<Box<dyn Action>>) -> Parallel {
    Parallel::from(actions)
}

/// Schedules `action` on the running component.
pub fn add_action(action: impl Action) -> AddAction {
    AddAction::new(None, action)
}

/// Schedules `action` on `target`.
pub fn add_action_to(target: ComponentId, action: impl Action) -> AddAction {
    AddAction::new(Some(target), action)
}
