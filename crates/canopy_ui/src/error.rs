//! # UI Error Types
//!
//! All errors that can occur while manipulating the scene graph and widgets.

use thiserror::Error;

use crate::scene::ComponentId;
use crate::widget::NodeId;

/// Errors that can occur in the UI toolkit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The component handle is stale or was never issued.
    #[error("component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// The component exists but carries no widget.
    #[error("component {0} has no widget")]
    WidgetNotFound(ComponentId),

    /// The widget is checked out by an enclosing `with_widget` call.
    #[error("widget of component {0} is already in use")]
    WidgetBusy(ComponentId),

    /// The widget is not of the requested type.
    #[error("widget of component {id} is not a {expected}")]
    WidgetTypeMismatch {
        /// The component that was queried.
        id: ComponentId,
        /// The requested widget type.
        expected: &'static str,
    },

    /// The tree node handle is stale or belongs to another tree.
    #[error("tree node not found: {0}")]
    NodeNotFound(NodeId),

    /// Insertion index past the end of a child list.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the list.
        len: usize,
    },

    /// A node was inserted under itself or one of its descendants.
    #[error("node {0} cannot be placed under itself or a descendant")]
    NodeCycle(NodeId),

    /// A component was added under itself or one of its descendants.
    #[error("component {0} cannot be placed under itself or a descendant")]
    ComponentCycle(ComponentId),

    /// The button group handle is stale.
    #[error("button group not found")]
    ButtonGroupNotFound,

    /// No style of the requested type is registered under that name.
    #[error("no {type_name} style named '{name}'")]
    StyleNotFound {
        /// The requested style type.
        type_name: &'static str,
        /// The requested name.
        name: String,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
