//! Tree nodes.

use canopy_core::Index;

use crate::scene::ComponentId;
use crate::style::Drawable;

/// Handle of a [`Node`] in a [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) Index);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}v{}", self.0.slot(), self.0.generation())
    }
}

/// One row of a tree: a component shown in the row, an optional icon,
/// child nodes and a user value.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(super) component: ComponentId,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) selectable: bool,
    pub(super) expanded: bool,
    pub(super) icon: Option<Drawable>,
    pub(super) height: f32,
    pub(super) value: Option<T>,
}

impl<T> Node<T> {
    pub(super) fn new(component: ComponentId) -> Self {
        Self {
            component,
            parent: None,
            children: Vec::new(),
            selectable: true,
            expanded: false,
            icon: None,
            height: 0.0,
            value: None,
        }
    }

    /// The component shown in the row.
    #[must_use]
    pub const fn component(&self) -> ComponentId {
        self.component
    }

    /// The parent node, `None` for root nodes and detached nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in display order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if the node has child nodes.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if clicking the row may select the node.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Returns true if the children are shown.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The icon drawn left of the component.
    #[must_use]
    pub const fn icon(&self) -> Option<&Drawable> {
        self.icon.as_ref()
    }

    /// Row height from the last size computation.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// The user value.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
