//! # Canopy UI
//!
//! Retained-mode widgets for a 2D engine:
//! - A scene graph of components with bubbling input events
//! - Buttons with check state and radio groups
//! - Trees of expandable, selectable nodes
//! - Images drawn from host-supplied drawables
//! - Per-frame actions: tweens, one-shot commands and composites
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      FRAME                              │
//! ├────────────────────────────────────────────────────────┤
//! │  Host input → Scene::fire → listeners → change events  │
//! │  Scene::act(delta) → actions                           │
//! │  Scene::validate() → pref sizes → layout               │
//! │  Scene::draw(batch) → host Batch                       │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The scene owns every component in a generational arena and hands out
//! [`ComponentId`] handles. Widgets are boxed behind the [`Widget`] trait
//! and are checked out of the scene while they run, so a widget can call
//! back into the scene that owns it.
//!
//! ## Example
//!
//! ```rust
//! use canopy_ui::action::{self, Action};
//! use canopy_ui::{Button, ButtonStyle, Scene};
//!
//! let mut scene = Scene::new(800.0, 600.0);
//! let button = Button::create(&mut scene, ButtonStyle::default()).unwrap();
//! scene.add_child(scene.root(), button).unwrap();
//!
//! scene
//!     .add_action(button, action::fade_out(0.2).then(action::hide()))
//!     .unwrap();
//! scene.act(0.2);
//! scene.act(0.0);
//! assert!(!scene.component(button).unwrap().is_visible());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod action;
pub mod config;
pub mod easing;
pub mod error;
pub mod event;
pub mod input;
pub mod layout;
pub mod render;
pub mod scene;
pub mod skin;
pub mod style;
pub mod widget;

pub use action::{Action, ActionContext, ActionId};
pub use config::{ClickConfig, PoolConfig, TreeConfig, UiConfig};
pub use easing::Easing;
pub use error::{UiError, UiResult};
pub use event::{ClickListener, Event, EventKind, ListenerId, PointerProbe};
pub use input::{Modifiers, MouseButton};
pub use layout::{Alignment, Layout, Rect};
pub use render::{Batch, CommandBatch, RenderCommand, UIVertex};
pub use scene::{ComponentFlags, ComponentId, ComponentState, DrawContext, Scene, Touchable};
pub use skin::Skin;
pub use style::{ButtonStyle, Color, Drawable, DrawableId, TreeStyle};
pub use widget::{
    Button, ButtonGroup, ButtonGroupId, Disableable, Image, Node, NodeId, Selection, Tree, Widget,
};
