//! Actions that run for a fixed duration.

use super::{Action, ActionContext};
use crate::easing::Easing;
use crate::scene::ComponentId;
use crate::style::Color;

/// The per-property half of a [`Temporal`] action.
///
/// `update` receives eased progress in `[0, 1]`; `begin` runs on the first
/// frame and `end` on the last.
pub trait Tween: 'static {
    /// Captures start values.
    fn begin(&mut self, _ctx: &mut ActionContext<'_>) {}

    /// Applies progress.
    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>);

    /// Runs after the final update.
    fn end(&mut self, _ctx: &mut ActionContext<'_>) {}
}

/// Drives a [`Tween`] over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Temporal<T: Tween> {
    tween: T,
    duration: f32,
    time: f32,
    easing: Easing,
    reverse: bool,
    began: bool,
    complete: bool,
    target: Option<ComponentId>,
}

impl<T: Tween> Temporal<T> {
    /// Creates a linear action.
    #[must_use]
    pub fn new(tween: T, duration: f32) -> Self {
        Self {
            tween,
            duration,
            time: 0.0,
            easing: Easing::Linear,
            reverse: false,
            began: false,
            complete: false,
            target: None,
        }
    }

    /// Sets the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Runs progress from 1 to 0.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Applies the tween to `target` instead of the owning component.
    #[must_use]
    pub fn with_target(mut self, target: ComponentId) -> Self {
        self.target = Some(target);
        self
    }

    /// Seconds elapsed.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Jumps to a point in time. Takes effect on the next frame.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    /// Total duration.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Returns true once the last update ran.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Makes the next frame the last.
    pub fn finish(&mut self) {
        self.time = self.duration;
    }

    /// The tween being driven.
    #[must_use]
    pub const fn tween(&self) -> &T {
        &self.tween
    }
}

impl<T: Tween> Action for Temporal<T> {
    fn act(&mut self, delta: f32, ctx: &mut ActionContext<'_>) -> bool {
        if self.complete {
            return true;
        }
        let owner = ctx.target;
        if let Some(target) = self.target {
            ctx.target = target;
        }

        if !self.began {
            self.tween.begin(ctx);
            self.began = true;
        }
        self.time += delta;
        self.complete = self.time >= self.duration;
        let linear = if self.complete {
            1.0
        } else {
            self.time / self.duration
        };
        let percent = self.easing.apply(linear);
        self.tween
            .update(if self.reverse { 1.0 - percent } else { percent }, ctx);
        if self.complete {
            self.tween.end(ctx);
        }

        ctx.target = owner;
        self.complete
    }

    fn restart(&mut self) {
        self.time = 0.0;
        self.began = false;
        self.complete = false;
    }
}

fn lerp(start: f32, end: f32, percent: f32) -> f32 {
    start + (end - start) * percent
}

/// Moves to an absolute position.
#[derive(Debug, Clone)]
pub struct MoveTo {
    x: f32,
    y: f32,
    start: (f32, f32),
}

impl MoveTo {
    /// Target position in parent coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            start: (0.0, 0.0),
        }
    }
}

impl Tween for MoveTo {
    fn begin(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(state) = ctx.state() {
            self.start = (state.x, state.y);
        }
    }

    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>) {
        let x = lerp(self.start.0, self.x, percent);
        let y = lerp(self.start.1, self.y, percent);
        if let Err(err) = ctx.scene.set_position(ctx.target, x, y) {
            tracing::trace!("MoveTo skipped: {}", err);
        }
    }
}

/// Moves by an offset. Other movement applied meanwhile is kept.
#[derive(Debug, Clone)]
pub struct MoveBy {
    dx: f32,
    dy: f32,
    last_percent: f32,
}

impl MoveBy {
    /// Offset to travel.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            last_percent: 0.0,
        }
    }
}

impl Tween for MoveBy {
    fn begin(&mut self, _ctx: &mut ActionContext<'_>) {
        self.last_percent = 0.0;
    }

    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>) {
        let step = percent - self.last_percent;
        self.last_percent = percent;
        if let Err(err) = ctx.scene.move_by(ctx.target, self.dx * step, self.dy * step) {
            tracing::trace!("MoveBy skipped: {}", err);
        }
    }
}

/// Resizes to an absolute size.
#[derive(Debug, Clone)]
pub struct SizeTo {
    width: f32,
    height: f32,
    start: (f32, f32),
}

impl SizeTo {
    /// Target size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            start: (0.0, 0.0),
        }
    }
}

impl Tween for SizeTo {
    fn begin(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(state) = ctx.state() {
            self.start = (state.width, state.height);
        }
    }

    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>) {
        let width = lerp(self.start.0, self.width, percent);
        let height = lerp(self.start.1, self.height, percent);
        if let Err(err) = ctx.scene.set_size(ctx.target, width, height) {
            tracing::trace!("SizeTo skipped: {}", err);
        }
    }
}

/// Grows or shrinks by an amount.
#[derive(Debug, Clone)]
pub struct SizeBy {
    dw: f32,
    dh: f32,
    last_percent: f32,
}

impl SizeBy {
    /// Size change to apply.
    #[must_use]
    pub const fn new(dw: f32, dh: f32) -> Self {
        Self {
            dw,
            dh,
            last_percent: 0.0,
        }
    }
}

impl Tween for SizeBy {
    fn begin(&mut self, _ctx: &mut ActionContext<'_>) {
        self.last_percent = 0.0;
    }

    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>) {
        let step = percent - self.last_percent;
        self.last_percent = percent;
        let Some(state) = ctx.state() else {
            return;
        };
        let (width, height) = (state.width + self.dw * step, state.height + self.dh * step);
        if let Err(err) = ctx.scene.set_size(ctx.target, width, height) {
            tracing::trace!("SizeBy skipped: {}", err);
        }
    }
}

/// Blends the tint to a color.
#[derive(Debug, Clone)]
pub struct ColorTo {
    end: Color,
    start: Color,
}

impl ColorTo {
    /// Final tint.
    #[must_use]
    pub const fn new(end: Color) -> Self {
        Self {
            end,
            start: Color::WHITE,
        }
    }
}

impl Tween for ColorTo {
    fn begin(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(state) = ctx.state() {
            self.start = state.color;
        }
    }

    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>) {
        let color = self.start.lerp(self.end, percent);
        if let Err(err) = ctx.scene.set_color(ctx.target, color) {
            tracing::trace!("ColorTo skipped: {}", err);
        }
    }
}

/// Blends the tint's alpha, leaving RGB alone.
#[derive(Debug, Clone)]
pub struct AlphaTo {
    alpha: f32,
    start: f32,
}

impl AlphaTo {
    /// Final alpha.
    #[must_use]
    pub const fn new(alpha: f32) -> Self {
        Self { alpha, start: 1.0 }
    }
}

impl Tween for AlphaTo {
    fn begin(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(state) = ctx.state() {
            self.start = state.color.a;
        }
    }

    fn update(&mut self, percent: f32, ctx: &mut ActionContext<'_>) {
        let Some(state) = ctx.state() else {
            return;
        };
        let color = state.color.with_alpha(lerp(self.start, self.alpha, percent));
        if let Err(err) = ctx.scene.set_color(ctx.target, color) {
            tracing::trace!("AlphaTo skipped: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{alpha_to, color_to, move_by, move_to, size_by, size_to};
    use crate::scene::Scene;

    fn attached(scene: &mut Scene) -> ComponentId {
        let id = scene.create_component();
        scene.add_child(scene.root(), id).unwrap();
        id
    }

    #[test]
    fn test_move_to_interpolates() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene.add_action(id, move_to(10.0, 20.0, 1.0)).unwrap();

        scene.act(0.5);
        let state = scene.component(id).unwrap();
        assert_eq!((state.x, state.y), (5.0, 10.0));

        scene.act(0.75);
        let state = scene.component(id).unwrap();
        assert_eq!((state.x, state.y), (10.0, 20.0));
        assert!(!scene.has_actions(id));
    }

    #[test]
    fn test_move_by_keeps_other_movement() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene.add_action(id, move_by(10.0, 0.0, 1.0)).unwrap();

        scene.act(0.5);
        scene.set_position(id, 100.0, 0.0).unwrap();
        scene.act(0.5);
        assert_eq!(scene.component(id).unwrap().x, 105.0);
    }

    #[test]
    fn test_size_actions() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene.set_size(id, 10.0, 10.0).unwrap();
        scene
            .add_action(id, size_to(20.0, 30.0, 1.0).then(size_by(5.0, 5.0, 0.0)))
            .unwrap();

        scene.act(1.0);
        scene.act(0.0);
        let state = scene.component(id).unwrap();
        assert_eq!((state.width, state.height), (25.0, 35.0));
    }

    #[test]
    fn test_color_and_alpha() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene
            .add_action(id, color_to(Color::BLACK, 1.0).with(alpha_to(0.0, 1.0)))
            .unwrap();

        scene.act(1.0);
        let color = scene.component(id).unwrap().color;
        assert_eq!((color.r, color.g, color.b), (0.0, 0.0, 0.0));
        assert_eq!(color.a, 0.0);
    }

    #[test]
    fn test_reverse_and_easing() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = attached(&mut scene);
        scene
            .add_action(
                id,
                move_to(10.0, 0.0, 1.0)
                    .with_easing(Easing::Instant)
                    .reversed(),
            )
            .unwrap();

        scene.act(0.1);
        assert_eq!(scene.component(id).unwrap().x, 0.0);
    }

    #[test]
    fn test_explicit_target() {
        let mut scene = Scene::new(100.0, 100.0);
        let owner = attached(&mut scene);
        let other = attached(&mut scene);
        scene
            .add_action(owner, move_to(4.0, 4.0, 0.0).with_target(other))
            .unwrap();

        scene.act(0.016);
        assert_eq!(scene.component(owner).unwrap().x, 0.0);
        assert_eq!(scene.component(other).unwrap().x, 4.0);
    }

    #[test]
    fn test_restart_runs_again() {
        let mut temporal = Temporal::new(MoveBy::new(1.0, 0.0), 1.0);
        temporal.finish();
        assert_eq!(temporal.time(), 1.0);
        temporal.restart();
        assert_eq!(temporal.time(), 0.0);
        assert!(!temporal.is_complete());
    }
}
