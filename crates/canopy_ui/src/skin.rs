//! Named style registry.
//!
//! A skin maps `(type, name)` to a style value, so a button and a tree can
//! both have a style called `"default"`. Skins are filled in by the host;
//! reading them from files is left to the host's asset pipeline.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::{UiError, UiResult};

/// Registry of styles looked up by type and name.
#[derive(Default)]
pub struct Skin {
    resources: HashMap<(TypeId, String), Box<dyn Any>>,
}

impl Skin {
    /// Name used when a widget is created without a style name.
    pub const DEFAULT: &'static str = "default";

    /// Creates an empty skin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource, replacing any previous one of the same type and
    /// name.
    pub fn add<S: Any>(&mut self, name: impl Into<String>, resource: S) {
        self.resources
            .insert((TypeId::of::<S>(), name.into()), Box::new(resource));
    }

    /// Looks up a resource.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StyleNotFound`] if nothing of type `S` is
    /// registered under `name`.
    pub fn get<S: Any>(&self, name: &str) -> UiResult<&S> {
        self.resources
            .get(&(TypeId::of::<S>(), name.to_string()))
            .and_then(|resource| resource.downcast_ref::<S>())
            .ok_or_else(|| UiError::StyleNotFound {
                type_name: std::any::type_name::<S>(),
                name: name.to_string(),
            })
    }

    /// Looks up the resource named [`Skin::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StyleNotFound`] if there is none.
    pub fn get_default<S: Any>(&self) -> UiResult<&S> {
        self.get(Self::DEFAULT)
    }

    /// Returns true if a resource of type `S` is registered under `name`.
    #[must_use]
    pub fn has<S: Any>(&self, name: &str) -> bool {
        self.resources
            .contains_key(&(TypeId::of::<S>(), name.to_string()))
    }

    /// Removes and returns a resource.
    pub fn remove<S: Any>(&mut self, name: &str) -> Option<S> {
        self.resources
            .remove(&(TypeId::of::<S>(), name.to_string()))
            .and_then(|resource| resource.downcast::<S>().ok())
            .map(|resource| *resource)
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl std::fmt::Debug for Skin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skin")
            .field("resources", &self.resources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ButtonStyle, Drawable, DrawableId};

    #[test]
    fn test_lookup_by_type_and_name() {
        let mut skin = Skin::new();
        let up = Drawable::new(DrawableId(1), 20.0, 10.0);
        skin.add("default", ButtonStyle::new(Some(up), None, None));
        skin.add("default", up);

        assert_eq!(skin.get_default::<ButtonStyle>().unwrap().up, Some(up));
        assert_eq!(skin.get::<Drawable>("default").unwrap(), &up);
        assert_eq!(skin.len(), 2);
    }

    #[test]
    fn test_missing_style() {
        let skin = Skin::new();
        let err = skin.get::<ButtonStyle>("toggle").unwrap_err();
        assert!(matches!(err, UiError::StyleNotFound { ref name, .. } if name == "toggle"));
        assert!(!skin.has::<ButtonStyle>("toggle"));
    }

    #[test]
    fn test_remove_returns_value() {
        let mut skin = Skin::new();
        skin.add("x", 5_u32);
        assert_eq!(skin.remove::<u32>("x"), Some(5));
        assert!(skin.is_empty());
    }
}
