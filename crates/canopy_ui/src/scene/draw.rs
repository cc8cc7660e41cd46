//! Drawing the component graph.

use super::{ComponentId, Scene, WidgetSlot};
use crate::render::Batch;
use crate::style::{Color, Drawable};

/// What a widget gets when it is asked to draw.
pub struct DrawContext<'a> {
    /// The scene, read-only.
    pub scene: &'a Scene,
    /// Target batch.
    pub batch: &'a mut dyn Batch,
    /// Component being drawn.
    pub id: ComponentId,
    /// Stage x of the component's left edge.
    pub x: f32,
    /// Stage y of the component's bottom edge.
    pub y: f32,
    /// Component width.
    pub width: f32,
    /// Component height.
    pub height: f32,
    /// Component tint.
    pub color: Color,
    /// Product of the ancestors' alphas.
    pub parent_alpha: f32,
}

impl DrawContext<'_> {
    /// The component color with the inherited alpha applied.
    #[must_use]
    pub fn tint(&self) -> Color {
        self.color.with_alpha(self.color.a * self.parent_alpha)
    }

    /// Draws a drawable over the whole component with its tint.
    pub fn fill(&mut self, drawable: &Drawable) {
        self.batch.set_color(self.tint());
        drawable.draw(self.batch, self.x, self.y, self.width, self.height);
    }
}

impl Scene {
    /// Validates layout, then draws every visible attached component
    /// depth-first.
    pub fn draw(&mut self, batch: &mut dyn Batch) {
        self.validate();
        let restore = batch.color();
        self.draw_component(self.root, batch, 0.0, 0.0, 1.0);
        batch.set_color(restore);
    }

    fn draw_component(
        &self,
        id: ComponentId,
        batch: &mut dyn Batch,
        parent_x: f32,
        parent_y: f32,
        parent_alpha: f32,
    ) {
        let Ok(component) = self.entry(id) else {
            return;
        };
        let state = &component.state;
        if !state.is_visible() {
            return;
        }

        let x = parent_x + state.x;
        let y = parent_y + state.y;
        let (mut offset_x, mut offset_y) = (0.0, 0.0);

        if let WidgetSlot::Present(widget) = &component.widget {
            let mut ctx = DrawContext {
                scene: self,
                batch: &mut *batch,
                id,
                x,
                y,
                width: state.width,
                height: state.height,
                color: state.color,
                parent_alpha,
            };
            widget.draw(&mut ctx);
            (offset_x, offset_y) = widget.child_offset(self);
        }

        let alpha = parent_alpha * state.color.a;
        for &child in &state.children {
            if let Some(area) = state.culling_area {
                let Ok(child_state) = self.component(child) else {
                    continue;
                };
                if !child_state.bounds().intersects(&area) {
                    continue;
                }
            }
            self.draw_component(child, batch, x + offset_x, y + offset_y, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::render::CommandBatch;
    use crate::style::DrawableId;
    use crate::widget::Image;

    fn image(scene: &mut Scene, parent: ComponentId, id: u32, bounds: Rect) -> ComponentId {
        let drawable = Drawable::new(DrawableId(id), 4.0, 4.0);
        let image = Image::create(scene, drawable).unwrap();
        scene.add_child(parent, image).unwrap();
        scene.set_bounds(image, bounds).unwrap();
        image
    }

    #[test]
    fn test_draw_positions_and_alpha() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let group = scene.create_component();
        scene.add_child(root, group).unwrap();
        scene.set_bounds(group, Rect::new(10.0, 10.0, 50.0, 50.0)).unwrap();
        scene.set_color(group, Color::WHITE.with_alpha(0.5)).unwrap();
        image(&mut scene, group, 1, Rect::new(5.0, 5.0, 8.0, 8.0));

        let mut batch = CommandBatch::new();
        scene.draw(&mut batch);

        assert_eq!(batch.command_count(), 1);
        let command = batch.commands()[0];
        assert_eq!(command.bounds, Rect::new(15.0, 15.0, 8.0, 8.0));
        assert!((command.color.a - 0.5).abs() < 1e-6);
        assert_eq!(batch.color(), Color::WHITE);
    }

    #[test]
    fn test_hidden_subtree_not_drawn() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let shown = image(&mut scene, root, 1, Rect::new(0.0, 0.0, 8.0, 8.0));
        let hidden = image(&mut scene, root, 2, Rect::new(0.0, 0.0, 8.0, 8.0));
        scene.set_visible(hidden, false).unwrap();

        let mut batch = CommandBatch::new();
        scene.draw(&mut batch);
        assert_eq!(batch.commands_for(DrawableId(1)).count(), 1);
        assert_eq!(batch.commands_for(DrawableId(2)).count(), 0);
        assert!(scene.contains(shown));
    }

    #[test]
    fn test_culling_area_skips_children() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let group = scene.create_component();
        scene.add_child(root, group).unwrap();
        image(&mut scene, group, 1, Rect::new(0.0, 0.0, 10.0, 10.0));
        image(&mut scene, group, 2, Rect::new(0.0, 50.0, 10.0, 10.0));
        scene
            .set_culling_area(group, Some(Rect::new(0.0, 0.0, 100.0, 20.0)))
            .unwrap();

        let mut batch = CommandBatch::new();
        scene.draw(&mut batch);
        assert_eq!(batch.commands_for(DrawableId(1)).count(), 1);
        assert_eq!(batch.commands_for(DrawableId(2)).count(), 0);
    }

    #[test]
    fn test_detached_component_not_drawn() {
        let mut scene = Scene::new(100.0, 100.0);
        let detached = Image::create(&mut scene, Drawable::new(DrawableId(9), 4.0, 4.0)).unwrap();
        scene.set_size(detached, 4.0, 4.0).unwrap();

        let mut batch = CommandBatch::new();
        scene.draw(&mut batch);
        assert_eq!(batch.command_count(), 0);
    }
}
