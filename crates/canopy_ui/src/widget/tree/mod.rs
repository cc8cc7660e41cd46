//! # Tree
//!
//! A hierarchical list. Each [`Node`] shows one component in a row; child
//! rows are indented under their parent and appear only while the parent is
//! expanded.
//!
//! ## Structure
//!
//! Nodes live in the tree's own arena and are addressed by [`NodeId`]. The
//! components of visible rows are children of the tree component, so the
//! scene draws and hit-tests them like any other children. Expanding a node
//! attaches its children's components; collapsing detaches them.
//!
//! ```text
//! Tree component
//! ├── row component (root node, expanded)
//! ├── row component (child node)
//! └── row component (root node, collapsed; its children are detached)
//! ```
//!
//! ## Geometry
//!
//! Rows run top-down from the tree's top edge. Each row is `node.height +
//! y_spacing` tall; the left column holds the plus/minus expander, then the
//! optional icon, then the component.

mod node;

pub use node::{Node, NodeId};

use std::fmt;

use canopy_core::Arena;

use super::{Selection, Widget};
use crate::error::{UiError, UiResult};
use crate::event::{ClickListener, Event, EventKind, PointerProbe};
use crate::input::Modifiers;
use crate::scene::{ComponentId, DrawContext, Scene};
use crate::skin::Skin;
use crate::style::{Color, Drawable, TreeStyle};

/// Tree widget holding values of type `T` in its nodes.
pub struct Tree<T: 'static = ()> {
    id: ComponentId,
    style: TreeStyle,
    nodes: Arena<Node<T>>,
    root_nodes: Vec<NodeId>,
    selection: Selection<NodeId>,
    y_spacing: f32,
    icon_spacing_left: f32,
    icon_spacing_right: f32,
    padding: f32,
    indent_spacing: f32,
    left_column_width: f32,
    pref_width: f32,
    pref_height: f32,
    size_invalid: bool,
    over_node: Option<NodeId>,
    click: ClickListener,
}

impl<T: 'static> Tree<T> {
    /// Creates an empty tree. Size it with [`Scene::set_bounds`] or
    /// [`Scene::pack`] once it has nodes.
    ///
    /// # Errors
    ///
    /// Propagates scene errors from wiring the input listener.
    pub fn create(scene: &mut Scene, style: TreeStyle) -> UiResult<ComponentId> {
        let config = scene.config().tree.clone();
        let click = ClickListener::new(scene.config().click.clone());
        let id = scene.spawn_widget(|id| {
            let mut selection = Selection::new();
            selection.set_multiple(true);
            let mut tree = Self {
                id,
                style,
                nodes: Arena::new(),
                root_nodes: Vec::new(),
                selection,
                y_spacing: config.y_spacing,
                icon_spacing_left: config.icon_spacing_left,
                icon_spacing_right: config.icon_spacing_right,
                padding: config.padding,
                indent_spacing: 0.0,
                left_column_width: 0.0,
                pref_width: 0.0,
                pref_height: 0.0,
                size_invalid: true,
                over_node: None,
                click,
            };
            tree.update_indent();
            tree
        });

        scene.add_listener(id, move |event, scene| Self::on_input(id, event, scene))?;
        tracing::trace!("Created tree {}", id);
        Ok(id)
    }

    /// Creates a tree with a named style from a skin.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::StyleNotFound`] if the skin has no such tree style.
    pub fn from_skin(scene: &mut Scene, skin: &Skin, name: &str) -> UiResult<ComponentId> {
        let style = skin.get::<TreeStyle>(name)?.clone();
        Self::create(scene, style)
    }

    /// Returns the component this widget belongs to.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Creates a detached node showing `component`.
    pub fn create_node(&mut self, component: ComponentId) -> NodeId {
        NodeId(self.nodes.insert(Node::new(component)))
    }

    /// Creates a detached node carrying a value.
    pub fn create_node_with(&mut self, component: ComponentId, value: T) -> NodeId {
        let mut node = Node::new(component);
        node.value = Some(value);
        NodeId(self.nodes.insert(node))
    }

    /// Returns a node.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an id from another tree.
    pub fn node(&self, id: NodeId) -> UiResult<&Node<T>> {
        self.nodes.get(id.0).ok_or(UiError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> UiResult<&mut Node<T>> {
        self.nodes.get_mut(id.0).ok_or(UiError::NodeNotFound(id))
    }

    /// Number of live nodes in this tree, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sets the icon drawn left of the node's component.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn set_icon(&mut self, scene: &mut Scene, node: NodeId, icon: Option<Drawable>) -> UiResult<()> {
        self.node_mut(node)?.icon = icon;
        self.invalidate_tree(scene);
        Ok(())
    }

    /// Sets the node's value.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn set_value(&mut self, node: NodeId, value: Option<T>) -> UiResult<()> {
        self.node_mut(node)?.value = value;
        Ok(())
    }

    /// Controls whether clicking the row selects the node.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn set_selectable(&mut self, node: NodeId, selectable: bool) -> UiResult<()> {
        self.node_mut(node)?.selectable = selectable;
        Ok(())
    }

    /// Returns true if the node's component is currently a row of this tree.
    #[must_use]
    pub fn is_in_tree(&self, scene: &Scene, node: NodeId) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|n| scene.parent(n.component) == Some(self.id))
    }

    /// Root nodes in display order.
    #[must_use]
    pub fn root_nodes(&self) -> &[NodeId] {
        &self.root_nodes
    }

    // =========================================================================
    // Root level
    // =========================================================================

    /// Appends a root node, moving it from wherever it was.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn add(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        self.remove(scene, node)?;
        self.insert(scene, self.root_nodes.len(), node)
    }

    /// Inserts a root node at `index`, moving it from wherever it was. The
    /// index counts root nodes after the move.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] or [`UiError::IndexOutOfBounds`].
    pub fn insert(&mut self, scene: &mut Scene, index: usize, node: NodeId) -> UiResult<()> {
        let len = self.root_nodes.len() - usize::from(self.root_nodes.contains(&node));
        if index > len {
            return Err(UiError::IndexOutOfBounds { index, len });
        }
        self.remove(scene, node)?;
        self.node_mut(node)?.parent = None;
        self.root_nodes.insert(index, node);
        self.add_to_tree(scene, node);
        self.invalidate_tree(scene);
        Ok(())
    }

    /// Detaches a node from its parent node or from the root level.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn remove(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        if let Some(parent) = self.node(node)?.parent {
            return self.remove_child(scene, parent, node);
        }
        let before = self.root_nodes.len();
        self.root_nodes.retain(|&n| n != node);
        if self.root_nodes.len() != before {
            self.remove_from_tree(scene, node);
            self.invalidate_tree(scene);
        }
        Ok(())
    }

    /// Same as [`Tree::remove`], named for call sites that act on a node.
    ///
    /// # Errors
    ///
    /// As [`Tree::remove`].
    pub fn remove_node(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        self.remove(scene, node)
    }

    /// Detaches a node and frees it with all of its descendants, destroying
    /// their row components. Their ids become stale.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn destroy_node(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        self.remove(scene, node)?;
        let mut freed = Vec::new();
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            if let Some(n) = self.nodes.remove(next.0) {
                stack.extend(n.children.iter().copied());
                if let Err(err) = scene.destroy(n.component) {
                    tracing::debug!("Row of node {} not destroyed: {}", next, err);
                }
                freed.push(next);
            }
        }

        if self.over_node.is_some_and(|over| freed.contains(&over)) {
            self.over_node = None;
        }
        if self.selection.remove_all(&freed) {
            scene.queue_change(self.id);
        }
        tracing::debug!("Tree {} freed {} nodes", self.id, freed.len());
        Ok(())
    }

    /// Frees every node of the tree, attached or not, destroys their row
    /// components and clears the selection.
    pub fn clear(&mut self, scene: &mut Scene) {
        for (_, node) in self.nodes.iter() {
            if let Err(err) = scene.destroy(node.component) {
                tracing::debug!("Row {} not destroyed: {}", node.component, err);
            }
        }
        self.nodes.clear();
        self.over_node = None;
        self.root_nodes.clear();
        if self.selection.clear() {
            scene.queue_change(self.id);
        }
        self.invalidate_tree(scene);
    }

    // =========================================================================
    // Child nodes
    // =========================================================================

    /// Appends `child` under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for unknown nodes and
    /// [`UiError::NodeCycle`] if `parent` is `child` or lies below it.
    pub fn add_child(&mut self, scene: &mut Scene, parent: NodeId, child: NodeId) -> UiResult<()> {
        self.attach_child(scene, parent, None, child)
    }

    /// Inserts `child` under `parent` at `index`, counted after `child` has
    /// left its previous place.
    ///
    /// # Errors
    ///
    /// As [`Tree::add_child`], plus [`UiError::IndexOutOfBounds`].
    pub fn insert_child(&mut self, scene: &mut Scene, parent: NodeId, index: usize, child: NodeId) -> UiResult<()> {
        self.attach_child(scene, parent, Some(index), child)
    }

    /// Appends several children under `parent`.
    ///
    /// # Errors
    ///
    /// As [`Tree::add_child`]; children before the failing one stay added.
    pub fn add_children(&mut self, scene: &mut Scene, parent: NodeId, children: &[NodeId]) -> UiResult<()> {
        for &child in children {
            self.attach_child(scene, parent, None, child)?;
        }
        Ok(())
    }

    fn attach_child(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        index: Option<usize>,
        child: NodeId,
    ) -> UiResult<()> {
        self.node(parent)?;
        self.node(child)?;
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(UiError::NodeCycle(child));
            }
            current = self.node(id)?.parent;
        }

        let siblings = &self.node(parent)?.children;
        let len = siblings.len() - usize::from(siblings.contains(&child));
        let index = index.unwrap_or(len);
        if index > len {
            return Err(UiError::IndexOutOfBounds { index, len });
        }
        self.remove(scene, child)?;
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);

        self.update_children(scene, parent)?;
        self.invalidate_tree(scene);
        Ok(())
    }

    /// Detaches `child` from `parent`. An expanded parent left without
    /// children collapses.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown parent.
    pub fn remove_child(&mut self, scene: &mut Scene, parent: NodeId, child: NodeId) -> UiResult<()> {
        let node = self.node_mut(parent)?;
        let before = node.children.len();
        node.children.retain(|&c| c != child);
        if node.children.len() == before {
            return Ok(());
        }
        let expanded = node.expanded;
        if let Ok(child) = self.node_mut(child) {
            child.parent = None;
        }

        if !expanded || !self.is_in_tree(scene, parent) {
            return Ok(());
        }
        self.remove_from_tree(scene, child);
        let node = self.node_mut(parent)?;
        if node.children.is_empty() {
            node.expanded = false;
        }
        self.invalidate_tree(scene);
        Ok(())
    }

    /// Detaches every child of a node.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn remove_all(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        let in_tree = self.is_in_tree(scene, node);
        let children = std::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            if in_tree {
                self.remove_from_tree(scene, child);
            }
            if let Ok(child) = self.node_mut(child) {
                child.parent = None;
            }
        }
        self.invalidate_tree(scene);
        Ok(())
    }

    /// Re-attaches the children's row components of an expanded node that
    /// is in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn update_children(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        let n = self.node(node)?;
        if !n.expanded || !self.is_in_tree(scene, node) {
            return Ok(());
        }
        for child in n.children.clone() {
            self.add_to_tree(scene, child);
        }
        Ok(())
    }

    fn add_to_tree(&self, scene: &mut Scene, node: NodeId) {
        let Some(n) = self.nodes.get(node.0) else {
            return;
        };
        if let Err(err) = scene.add_child(self.id, n.component) {
            tracing::debug!("Row of node {} not attached: {}", node, err);
        }
        if n.expanded {
            for &child in &n.children {
                self.add_to_tree(scene, child);
            }
        }
    }

    fn remove_from_tree(&self, scene: &mut Scene, node: NodeId) {
        let Some(n) = self.nodes.get(node.0) else {
            return;
        };
        if scene.parent(n.component) == Some(self.id) {
            if let Err(err) = scene.remove_from_parent(n.component) {
                tracing::debug!("Row of node {} not detached: {}", node, err);
            }
        }
        if n.expanded {
            for &child in &n.children {
                self.remove_from_tree(scene, child);
            }
        }
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Shows or hides a node's children.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn set_expanded(&mut self, scene: &mut Scene, node: NodeId, expanded: bool) -> UiResult<()> {
        let n = self.node_mut(node)?;
        if n.expanded == expanded {
            return Ok(());
        }
        n.expanded = expanded;
        if n.children.is_empty() || !self.is_in_tree(scene, node) {
            return Ok(());
        }

        let children = self.node(node)?.children.clone();
        for child in children {
            if expanded {
                self.add_to_tree(scene, child);
            } else {
                self.remove_from_tree(scene, child);
            }
        }
        self.invalidate_tree(scene);
        tracing::debug!(
            "Node {} {}",
            node,
            if expanded { "expanded" } else { "collapsed" }
        );
        Ok(())
    }

    /// Expands a node and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn expand_subtree(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        self.set_expanded(scene, node, true)?;
        for child in self.node(node)?.children.clone() {
            self.expand_subtree(scene, child)?;
        }
        Ok(())
    }

    /// Collapses a node and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn collapse_subtree(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        self.set_expanded(scene, node, false)?;
        for child in self.node(node)?.children.clone() {
            self.collapse_subtree(scene, child)?;
        }
        Ok(())
    }

    /// Expands every node.
    pub fn expand_all(&mut self, scene: &mut Scene) {
        for node in self.root_nodes.clone() {
            if let Err(err) = self.expand_subtree(scene, node) {
                tracing::debug!("Expand skipped: {}", err);
            }
        }
    }

    /// Collapses every node.
    pub fn collapse_all(&mut self, scene: &mut Scene) {
        for node in self.root_nodes.clone() {
            if let Err(err) = self.collapse_subtree(scene, node) {
                tracing::debug!("Collapse skipped: {}", err);
            }
        }
    }

    /// Expands every ancestor of a node so it becomes visible.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NodeNotFound`] for an unknown node.
    pub fn expand_to(&mut self, scene: &mut Scene, node: NodeId) -> UiResult<()> {
        let mut current = self.node(node)?.parent;
        while let Some(parent) = current {
            self.set_expanded(scene, parent, true)?;
            current = self.node(parent)?.parent;
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selected nodes.
    #[must_use]
    pub const fn selection(&self) -> &Selection<NodeId> {
        &self.selection
    }

    /// The selection, for changing its rules or editing it programmatically.
    /// Edits made here do not fire change events.
    pub fn selection_mut(&mut self) -> &mut Selection<NodeId> {
        &mut self.selection
    }

    /// Applies a user choice of `node`, firing a change event if the
    /// selection changed.
    pub fn choose(&mut self, scene: &mut Scene, node: NodeId, modifiers: Modifiers) -> bool {
        let changed = self.selection.choose(node, modifiers);
        if changed {
            scene.queue_change(self.id);
        }
        changed
    }

    /// Adds the selectable visible rows whose component y lies in
    /// `[low, high]` to the selection.
    pub fn select_nodes(&mut self, scene: &mut Scene, low: f32, high: f32) -> bool {
        let found = self.nodes_in_range(scene, low, high);
        let changed = self.selection.add_all(&found);
        if changed {
            scene.queue_change(self.id);
        }
        changed
    }

    fn nodes_in_range(&self, scene: &Scene, low: f32, high: f32) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_range(scene, &self.root_nodes, low, high, &mut found);
        found
    }

    fn collect_range(&self, scene: &Scene, nodes: &[NodeId], low: f32, high: f32, found: &mut Vec<NodeId>) {
        for &id in nodes {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            let Ok(component) = scene.component(node.component) else {
                continue;
            };
            if component.y < low {
                break;
            }
            if !node.selectable {
                continue;
            }
            if component.y <= high {
                found.push(id);
            }
            if node.expanded {
                self.collect_range(scene, &node.children, low, high, found);
            }
        }
    }

    /// The node under the mouse.
    #[must_use]
    pub const fn over_node(&self) -> Option<NodeId> {
        self.over_node
    }

    /// Sets the node highlighted as hovered.
    pub fn set_over_node(&mut self, node: Option<NodeId>) {
        self.over_node = node;
    }

    /// Returns the visible row at tree-local `y`.
    #[must_use]
    pub fn node_at(&self, scene: &Scene, y: f32) -> Option<NodeId> {
        let height = scene.component(self.id).ok()?.height;
        self.node_at_in(&self.root_nodes, y, height).err()
    }

    /// Walks rows from `row_y` down. `Err` carries the hit, `Ok` the top of
    /// the next row.
    fn node_at_in(&self, nodes: &[NodeId], y: f32, mut row_y: f32) -> Result<f32, NodeId> {
        for &id in nodes {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            if y >= row_y - node.height - self.y_spacing && y < row_y {
                return Err(id);
            }
            row_y -= node.height + self.y_spacing;
            if node.expanded {
                row_y = self.node_at_in(&node.children, y, row_y)?;
            }
        }
        Ok(row_y)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Finds the first node carrying `value`, checking each level before
    /// descending.
    #[must_use]
    pub fn find_node(&self, value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        self.find_in(&self.root_nodes, value)
    }

    /// [`Tree::find_node`] starting at `node` itself.
    #[must_use]
    pub fn find_node_under(&self, node: NodeId, value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        let n = self.nodes.get(node.0)?;
        if n.value.as_ref() == Some(value) {
            return Some(node);
        }
        self.find_in(&n.children, value)
    }

    fn find_in(&self, nodes: &[NodeId], value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        let level = nodes.iter().copied().find(|id| {
            self.nodes
                .get(id.0)
                .is_some_and(|n| n.value.as_ref() == Some(value))
        });
        level.or_else(|| {
            nodes.iter().find_map(|id| {
                let node = self.nodes.get(id.0)?;
                self.find_in(&node.children, value)
            })
        })
    }

    /// Values of every expanded node, deepest first, for
    /// [`Tree::restore_expanded_values`].
    #[must_use]
    pub fn find_expanded_values(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        self.collect_expanded(&self.root_nodes, &mut values);
        values
    }

    /// [`Tree::find_expanded_values`] for `node` and its descendants.
    #[must_use]
    pub fn find_expanded_values_under(&self, node: NodeId) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        if let Some(n) = self.nodes.get(node.0) {
            if n.expanded {
                self.collect_expanded(&n.children, &mut values);
                values.extend(n.value.clone());
            }
        }
        values
    }

    fn collect_expanded(&self, nodes: &[NodeId], values: &mut Vec<T>)
    where
        T: Clone,
    {
        for id in nodes {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            if node.expanded {
                self.collect_expanded(&node.children, values);
                values.extend(node.value.clone());
            }
        }
    }

    /// Expands the nodes carrying `values` and their ancestors.
    pub fn restore_expanded_values(&mut self, scene: &mut Scene, values: &[T])
    where
        T: PartialEq,
    {
        for value in values {
            if let Some(node) = self.find_node(value) {
                self.expand_with_ancestors(scene, node);
            }
        }
    }

    /// [`Tree::restore_expanded_values`] limited to `node` and its
    /// descendants.
    pub fn restore_expanded_values_under(&mut self, scene: &mut Scene, node: NodeId, values: &[T])
    where
        T: PartialEq,
    {
        for value in values {
            if let Some(found) = self.find_node_under(node, value) {
                self.expand_with_ancestors(scene, found);
            }
        }
    }

    fn expand_with_ancestors(&mut self, scene: &mut Scene, node: NodeId) {
        let result = self
            .set_expanded(scene, node, true)
            .and_then(|()| self.expand_to(scene, node));
        if let Err(err) = result {
            tracing::debug!("Node {} not restored: {}", node, err);
        }
    }

    // =========================================================================
    // Style and spacing
    // =========================================================================

    /// Returns the style.
    #[must_use]
    pub const fn style(&self) -> &TreeStyle {
        &self.style
    }

    /// Replaces the style. The indent follows the expander width.
    pub fn set_style(&mut self, scene: &mut Scene, style: TreeStyle) {
        self.style = style;
        self.update_indent();
        self.invalidate_tree(scene);
    }

    /// Space left and right of the rows.
    pub fn set_padding(&mut self, scene: &mut Scene, padding: f32) {
        self.padding = padding;
        self.invalidate_tree(scene);
    }

    /// Vertical space between rows.
    pub fn set_y_spacing(&mut self, scene: &mut Scene, y_spacing: f32) {
        self.y_spacing = y_spacing;
        self.invalidate_tree(scene);
    }

    /// Space left of the expander and between icon and component.
    pub fn set_icon_spacing(&mut self, scene: &mut Scene, left: f32, right: f32) {
        self.icon_spacing_left = left;
        self.icon_spacing_right = right;
        self.update_indent();
        self.invalidate_tree(scene);
    }

    /// Returns the row padding.
    #[must_use]
    pub const fn padding(&self) -> f32 {
        self.padding
    }

    /// Returns the vertical row spacing.
    #[must_use]
    pub const fn y_spacing(&self) -> f32 {
        self.y_spacing
    }

    /// Returns the left and right icon spacing.
    #[must_use]
    pub const fn icon_spacing(&self) -> (f32, f32) {
        (self.icon_spacing_left, self.icon_spacing_right)
    }

    /// Horizontal offset of each nesting level.
    #[must_use]
    pub const fn indent_spacing(&self) -> f32 {
        self.indent_spacing
    }

    /// Returns the click state machine.
    #[must_use]
    pub const fn click_listener(&self) -> &ClickListener {
        &self.click
    }

    fn update_indent(&mut self) {
        self.indent_spacing =
            self.style.plus.min_width.max(self.style.minus.min_width) + self.icon_spacing_left;
    }

    fn invalidate_tree(&mut self, scene: &mut Scene) {
        self.size_invalid = true;
        scene.invalidate_hierarchy(self.id);
    }

    // =========================================================================
    // Input
    // =========================================================================

    fn on_input(id: ComponentId, event: &mut Event, scene: &mut Scene) -> bool {
        let probe = scene.probe(id, event);
        match scene.with_widget::<Self, _>(id, |tree, scene| tree.handle_input(event, &probe, scene)) {
            Ok(handled) => handled,
            Err(err) => {
                tracing::trace!("Tree input skipped: {}", err);
                false
            }
        }
    }

    fn handle_input(&mut self, event: &Event, probe: &PointerProbe, scene: &mut Scene) -> bool {
        let response = self.click.handle(event, probe);
        match event.kind {
            EventKind::MouseMoved => self.over_node = self.node_at(scene, probe.local_y),
            EventKind::Exit => {
                let still_inside = event
                    .related
                    .is_some_and(|to| scene.is_descendant_of(to, self.id));
                if !still_inside {
                    self.over_node = None;
                }
            }
            _ => {}
        }
        if response.clicked {
            self.clicked(scene, response.x, response.y, event.modifiers);
        }
        response.handled
    }

    fn clicked(&mut self, scene: &mut Scene, x: f32, y: f32, modifiers: Modifiers) {
        let Some(id) = self.node_at(scene, y) else {
            return;
        };
        let down = self
            .click
            .touch_down_point()
            .and_then(|(_, down_y)| self.node_at(scene, down_y));
        if down != Some(id) {
            return;
        }

        if self.selection.is_multiple() && !self.selection.is_empty() && modifiers.shift {
            let Some(last) = self.selection.last_selected() else {
                return;
            };
            let mut low = self.row_y(scene, last);
            let mut high = self.row_y(scene, id);
            if low > high {
                std::mem::swap(&mut low, &mut high);
            }
            let found = self.nodes_in_range(scene, low, high);
            self.selection.select_range(&found, modifiers.multi_select());
            scene.queue_change(self.id);
            return;
        }

        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        if node.has_children() && (!self.selection.is_multiple() || !modifiers.multi_select()) {
            let mut row_x = scene.component(node.component).map_or(0.0, |c| c.x);
            if let Some(icon) = node.icon {
                row_x -= self.icon_spacing_right + icon.min_width;
            }
            if x < row_x {
                let expanded = !node.expanded;
                if let Err(err) = self.set_expanded(scene, id, expanded) {
                    tracing::debug!("Toggle of node {} failed: {}", id, err);
                }
                return;
            }
        }
        if !node.selectable {
            return;
        }
        self.choose(scene, id, modifiers);
    }

    fn row_y(&self, scene: &Scene, node: NodeId) -> f32 {
        self.nodes
            .get(node.0)
            .and_then(|n| scene.component(n.component).ok())
            .map_or(0.0, |c| c.y)
    }

    // =========================================================================
    // Size and layout
    // =========================================================================

    fn compute_size(&mut self, scene: &mut Scene) {
        self.size_invalid = false;
        self.pref_width = self.style.plus.min_width.max(self.style.minus.min_width);
        self.pref_height = 0.0;
        self.left_column_width = 0.0;
        let roots = self.root_nodes.clone();
        self.compute_rows(scene, &roots, self.indent_spacing);
        self.left_column_width += self.icon_spacing_left + self.padding;
        self.pref_width += self.left_column_width + self.padding;
    }

    fn compute_rows(&mut self, scene: &mut Scene, nodes: &[NodeId], indent: f32) {
        let spacing = self.icon_spacing_left + self.icon_spacing_right;
        for &id in nodes {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            let component = node.component;
            let icon = node.icon;
            let children = if node.expanded {
                node.children.clone()
            } else {
                Vec::new()
            };

            let (width, mut height) = Self::row_size(scene, component);
            let mut row_width = indent + self.icon_spacing_right + width;
            if let Some(icon) = icon {
                row_width += spacing + icon.min_width;
                height = height.max(icon.min_height);
            }
            self.pref_width = self.pref_width.max(row_width);
            self.pref_height += height + self.y_spacing;
            if let Some(node) = self.nodes.get_mut(id.0) {
                node.height = height;
            }

            if !children.is_empty() {
                self.compute_rows(scene, &children, indent + self.indent_spacing);
            }
        }
    }

    /// Widget rows are packed to their preferred size; plain components
    /// keep theirs.
    fn row_size(scene: &mut Scene, component: ComponentId) -> (f32, f32) {
        if scene.has_widget(component) {
            match scene.pref_size(component) {
                Ok(size) => {
                    if let Err(err) = scene.pack(component) {
                        tracing::debug!("Row {} not packed: {}", component, err);
                    }
                    return size;
                }
                Err(err) => tracing::debug!("Row {} size unavailable: {}", component, err),
            }
        }
        scene
            .component(component)
            .map_or((0.0, 0.0), |c| (c.width, c.height))
    }

    fn layout_rows(&self, scene: &mut Scene, nodes: &[NodeId], indent: f32, mut y: f32) -> f32 {
        for &id in nodes {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            let x = indent + node.icon.map_or(0.0, |icon| icon.min_width);
            y -= node.height;
            if let Err(err) = scene.set_position(node.component, x, y) {
                tracing::debug!("Row of node {} not placed: {}", id, err);
            }
            y -= self.y_spacing;
            if node.expanded {
                y = self.layout_rows(scene, &node.children, indent + self.indent_spacing, y);
            }
        }
        y
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn draw_rows(&self, ctx: &mut DrawContext<'_>, nodes: &[NodeId], indent: f32, tint: Color) {
        let scene = ctx.scene;
        let half_spacing = self.y_spacing / 2.0;
        for &id in nodes {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            let Ok(component) = scene.component(node.component) else {
                continue;
            };

            let band = if self.selection.contains(id) && self.style.selection.is_some() {
                self.style.selection
            } else if self.over_node == Some(id) {
                self.style.over
            } else {
                None
            };
            if let Some(band) = band {
                band.draw(
                    ctx.batch,
                    ctx.x,
                    ctx.y + component.y - half_spacing,
                    ctx.width,
                    node.height + self.y_spacing,
                );
            }

            if let Some(icon) = node.icon {
                let icon_y = component.y + ((node.height - icon.min_height) / 2.0).round();
                let color = component.color;
                ctx.batch.set_color(color.with_alpha(color.a * tint.a));
                icon.draw(
                    ctx.batch,
                    ctx.x + component.x - self.icon_spacing_right - icon.min_width,
                    ctx.y + icon_y,
                    icon.min_width,
                    icon.min_height,
                );
                ctx.batch.set_color(tint);
            }

            if node.children.is_empty() {
                continue;
            }
            let expander = if node.expanded {
                self.style.minus
            } else {
                self.style.plus
            };
            let icon_y = component.y + ((node.height - expander.min_height) / 2.0).round();
            expander.draw(
                ctx.batch,
                ctx.x + indent - self.icon_spacing_left,
                ctx.y + icon_y,
                expander.min_width,
                expander.min_height,
            );
            if node.expanded {
                self.draw_rows(ctx, &node.children, indent + self.indent_spacing, tint);
            }
        }
    }
}

impl<T: 'static> Widget for Tree<T> {
    fn pref_size(&mut self, scene: &mut Scene) -> (f32, f32) {
        if self.size_invalid {
            self.compute_size(scene);
        }
        (self.pref_width, self.pref_height)
    }

    fn layout(&mut self, scene: &mut Scene) {
        if self.size_invalid {
            self.compute_size(scene);
        }
        let Ok(height) = scene.component(self.id).map(|c| c.height) else {
            return;
        };
        let indent = self.left_column_width + self.indent_spacing + self.icon_spacing_right;
        self.layout_rows(scene, &self.root_nodes, indent, height - self.y_spacing / 2.0);
    }

    fn invalidate(&mut self) {
        self.size_invalid = true;
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let tint = ctx.tint();
        ctx.batch.set_color(tint);
        if let Some(background) = self.style.background {
            background.draw(ctx.batch, ctx.x, ctx.y, ctx.width, ctx.height);
        }
        self.draw_rows(ctx, &self.root_nodes, self.left_column_width, tint);
    }

    fn revert_change(&mut self, _scene: &mut Scene) {
        self.selection.revert();
    }
}

impl<T: 'static> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("root_nodes", &self.root_nodes)
            .field("selected", &self.selection.items())
            .finish_non_exhaustive()
    }
}
