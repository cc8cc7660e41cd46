//! Layout invalidation and the validate pass.

use super::{ComponentFlags, ComponentId, Scene, WidgetSlot};
use crate::error::{UiError, UiResult};

impl Scene {
    /// Marks a component as needing layout.
    pub fn invalidate(&mut self, id: ComponentId) {
        let Some(component) = self.components.get_mut(id.0) else {
            return;
        };
        component.state.flags.set(ComponentFlags::NEEDS_LAYOUT);
        if let WidgetSlot::Present(widget) = &mut component.widget {
            widget.invalidate();
        }
    }

    /// Marks a component and all its ancestors as needing layout, for
    /// changes that affect preferred sizes up the hierarchy.
    pub fn invalidate_hierarchy(&mut self, id: ComponentId) {
        let mut current = Some(id);
        while let Some(node) = current {
            self.invalidate(node);
            current = self.parent(node);
        }
    }

    /// Lays out every visible component that needs it, parents before
    /// children.
    pub fn validate(&mut self) {
        self.validate_subtree(self.root);
    }

    /// Lays out a subtree.
    pub fn validate_subtree(&mut self, id: ComponentId) {
        let Some(component) = self.components.get_mut(id.0) else {
            return;
        };
        if !component.state.is_visible() {
            return;
        }

        if component.state.needs_layout() {
            component.state.flags.clear(ComponentFlags::NEEDS_LAYOUT);
            if matches!(component.widget, WidgetSlot::Present(_)) {
                if let Err(err) = self.with_dyn_widget(id, |widget, scene| widget.layout(scene)) {
                    tracing::debug!("Layout of {} skipped: {}", id, err);
                }
            }
        }

        for child in self.children(id).to_vec() {
            self.validate_subtree(child);
        }
    }

    /// Returns the size a component would like to have.
    ///
    /// Widgets report their own preference; plain components report their
    /// current size.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ComponentNotFound`] for a stale id and
    /// [`UiError::WidgetBusy`] if the widget is checked out.
    pub fn pref_size(&mut self, id: ComponentId) -> UiResult<(f32, f32)> {
        match self.with_dyn_widget(id, |widget, scene| widget.pref_size(scene)) {
            Err(UiError::WidgetNotFound(_)) => {
                let state = self.component(id)?;
                Ok((state.width, state.height))
            }
            result => result,
        }
    }

    /// Returns the smallest size a component can be laid out at.
    ///
    /// # Errors
    ///
    /// As [`Scene::pref_size`].
    pub fn min_size(&mut self, id: ComponentId) -> UiResult<(f32, f32)> {
        match self.with_dyn_widget(id, |widget, scene| widget.min_size(scene)) {
            Err(UiError::WidgetNotFound(_)) => {
                let state = self.component(id)?;
                Ok((state.width, state.height))
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;

    #[test]
    fn test_invalidate_hierarchy_marks_ancestors() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let panel = scene.create_component();
        let leaf = scene.create_component();
        scene.add_child(root, panel).unwrap();
        scene.add_child(panel, leaf).unwrap();
        scene.validate();
        assert!(!scene.component(panel).unwrap().needs_layout());

        scene.invalidate_hierarchy(leaf);
        assert!(scene.component(root).unwrap().needs_layout());
        assert!(scene.component(panel).unwrap().needs_layout());
    }

    #[test]
    fn test_set_size_invalidates_only_self() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let panel = scene.create_component();
        scene.add_child(root, panel).unwrap();
        scene.validate();

        scene.set_bounds(panel, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(scene.component(panel).unwrap().needs_layout());
        assert!(!scene.component(root).unwrap().needs_layout());
    }

    #[test]
    fn test_plain_pref_size_is_current_size() {
        let mut scene = Scene::new(100.0, 100.0);
        let panel = scene.create_component();
        scene.set_size(panel, 12.0, 7.0).unwrap();
        assert_eq!(scene.pref_size(panel).unwrap(), (12.0, 7.0));
    }
}
