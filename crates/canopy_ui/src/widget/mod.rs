//! Widgets.
//!
//! A widget is the behavior half of a component: the scene owns geometry,
//! children and listeners, the widget owns everything else. Widgets are
//! created through their `create` constructors, which allocate the
//! component, attach the widget and register its input listener.

mod button;
mod button_group;
mod core;
mod image;
mod selection;
mod tree;

pub use self::core::{AsAny, Disableable, Widget};
pub use button::Button;
pub use button_group::{ButtonGroup, ButtonGroupId};
pub use image::Image;
pub use selection::Selection;
pub use tree::{Node, NodeId, Tree};
