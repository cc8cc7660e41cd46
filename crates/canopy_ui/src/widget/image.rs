//! Single-drawable leaf widget.

use super::Widget;
use crate::error::UiResult;
use crate::layout::Rect;
use crate::scene::{ComponentId, DrawContext, Scene};
use crate::style::Drawable;

/// Draws one drawable stretched over its bounds.
#[derive(Debug, Clone)]
pub struct Image {
    id: ComponentId,
    drawable: Option<Drawable>,
    culling_area: Option<Rect>,
}

impl Image {
    /// Creates a detached image sized to the drawable.
    ///
    /// # Errors
    ///
    /// Never fails for a freshly created component; the result mirrors the
    /// other widget constructors.
    pub fn create(scene: &mut Scene, drawable: Drawable) -> UiResult<ComponentId> {
        let id = scene.spawn_widget(|id| Self {
            id,
            drawable: Some(drawable),
            culling_area: None,
        });
        scene.set_size(id, drawable.min_width, drawable.min_height)?;
        Ok(id)
    }

    /// Returns the component this widget belongs to.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the drawable.
    #[must_use]
    pub const fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    /// Replaces the drawable. The preferred size follows it.
    pub fn set_drawable(&mut self, scene: &mut Scene, drawable: Option<Drawable>) {
        self.drawable = drawable;
        scene.invalidate_hierarchy(self.id);
    }
}

impl Widget for Image {
    fn pref_size(&mut self, _scene: &mut Scene) -> (f32, f32) {
        self.drawable
            .map_or((0.0, 0.0), |d| (d.min_width, d.min_height))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(drawable) = self.drawable else {
            return;
        };
        if let Some(area) = self.culling_area {
            if !area.intersects(&Rect::new(0.0, 0.0, ctx.width, ctx.height)) {
                return;
            }
        }
        ctx.fill(&drawable);
    }

    fn set_culling_area(&mut self, area: Option<Rect>) {
        self.culling_area = area;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandBatch;
    use crate::style::DrawableId;

    #[test]
    fn test_image_sized_to_drawable() {
        let mut scene = Scene::new(100.0, 100.0);
        let image = Image::create(&mut scene, Drawable::new(DrawableId(1), 16.0, 8.0)).unwrap();

        let state = scene.component(image).unwrap();
        assert_eq!((state.width, state.height), (16.0, 8.0));
        assert_eq!(scene.pref_size(image).unwrap(), (16.0, 8.0));
    }

    #[test]
    fn test_set_drawable_changes_pref_size() {
        let mut scene = Scene::new(100.0, 100.0);
        let image = Image::create(&mut scene, Drawable::new(DrawableId(1), 16.0, 8.0)).unwrap();
        scene
            .with_widget::<Image, _>(image, |image, scene| image.set_drawable(scene, None))
            .unwrap();

        assert_eq!(scene.pref_size(image).unwrap(), (0.0, 0.0));
        assert!(scene.widget::<Image>(image).unwrap().drawable().is_none());
    }

    #[test]
    fn test_culling_area_skips_image_outside() {
        let mut scene = Scene::new(100.0, 100.0);
        let image = Image::create(&mut scene, Drawable::new(DrawableId(5), 16.0, 8.0)).unwrap();
        scene.add_child(scene.root(), image).unwrap();
        let mut batch = CommandBatch::new();

        scene
            .set_culling_area(image, Some(Rect::new(40.0, 40.0, 10.0, 10.0)))
            .unwrap();
        scene.draw(&mut batch);
        assert_eq!(batch.commands_for(DrawableId(5)).count(), 0);

        scene
            .set_culling_area(image, Some(Rect::new(10.0, 4.0, 20.0, 20.0)))
            .unwrap();
        batch.begin_frame();
        scene.draw(&mut batch);
        assert_eq!(batch.commands_for(DrawableId(5)).count(), 1);

        scene.set_culling_area(image, None).unwrap();
        batch.begin_frame();
        scene.draw(&mut batch);
        assert_eq!(batch.commands_for(DrawableId(5)).count(), 1);
    }
}
