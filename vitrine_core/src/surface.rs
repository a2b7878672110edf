// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation contract between behaviors and the document.
//!
//! Behaviors never touch the document directly. Every visible effect goes
//! through a [`Surface`]: class toggles, text, inline style properties,
//! disclosure open state and horizontal scrolling. The browser backend
//! implements it over live DOM elements; [`MemorySurface`] implements it in
//! memory for tests and host-side simulation.
//!
//! All methods are infallible. A `NodeId` the surface does not know is
//! ignored, matching the "absent element is a no-op" rule.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString as _};

use crate::node::NodeId;

/// How a relative scroll is animated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Jump immediately.
    #[default]
    Instant,
    /// Let the host animate the scroll.
    Smooth,
}

/// Applies behavior output to a document.
pub trait Surface {
    /// Adds (`on == true`) or removes a class.
    fn set_class(&mut self, node: NodeId, class: &str, on: bool);

    /// Replaces the node's text content.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Sets an inline style property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Opens or closes a disclosure element.
    fn set_open(&mut self, node: NodeId, open: bool);

    /// Current horizontal scroll offset.
    fn scroll_left(&self, node: NodeId) -> f64;

    /// Sets the horizontal scroll offset.
    fn set_scroll_left(&mut self, node: NodeId, left: f64);

    /// Scrolls horizontally by `dx`.
    fn scroll_by(&mut self, node: NodeId, dx: f64, behavior: ScrollBehavior);
}

/// State of one node in a [`MemorySurface`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryNode {
    /// Classes currently present.
    pub classes: BTreeSet<String>,
    /// Text content, if ever set.
    pub text: Option<String>,
    /// Inline style properties.
    pub styles: BTreeMap<String, String>,
    /// Disclosure open state.
    pub open: bool,
    /// Horizontal scroll offset.
    pub scroll_left: f64,
    /// Largest allowed scroll offset, if bounded.
    pub max_scroll_left: Option<f64>,
    /// Behavior of the last relative scroll.
    pub last_scroll: Option<ScrollBehavior>,
}

/// An in-memory [`Surface`].
///
/// Nodes must be created with [`insert`](Self::insert) before they accept
/// mutations; unknown nodes are ignored like absent elements. Scroll offsets
/// are clamped at zero and, when set, at
/// [`max_scroll_left`](MemoryNode::max_scroll_left).
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    nodes: BTreeMap<NodeId, MemoryNode>,
    next: u32,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node and returns its handle.
    pub fn insert(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(id, MemoryNode::default());
        id
    }

    /// Returns the node's state.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&node)
    }

    /// Returns the node's mutable state.
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(&node)
    }

    /// Returns `true` if the node has `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    /// Returns the node's text content.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| n.text.as_deref())
    }

    /// Returns an inline style property.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    /// Returns the node's open state.
    #[must_use]
    pub fn is_open(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.open)
    }

    fn clamp_scroll(node: &MemoryNode, left: f64) -> f64 {
        let left = left.max(0.0);
        node.max_scroll_left.map_or(left, |max| left.min(max))
    }
}

impl Surface for MemorySurface {
    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            if on {
                n.classes.insert(class.to_string());
            } else {
                n.classes.remove(class);
            }
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.text = Some(text.to_string());
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn set_open(&mut self, node: NodeId, open: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.open = open;
        }
    }

    fn scroll_left(&self, node: NodeId) -> f64 {
        self.node(node).map_or(0.0, |n| n.scroll_left)
    }

    fn set_scroll_left(&mut self, node: NodeId, left: f64) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.scroll_left = Self::clamp_scroll(n, left);
        }
    }

    fn scroll_by(&mut self, node: NodeId, dx: f64, behavior: ScrollBehavior) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.scroll_left = Self::clamp_scroll(n, n.scroll_left + dx);
            n.last_scroll = Some(behavior);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut s = MemorySurface::new();
        s.set_class(NodeId(9), "x", true);
        s.set_text(NodeId(9), "hi");
        assert!(!s.has_class(NodeId(9), "x"));
        assert_eq!(s.text(NodeId(9)), None);
        assert_eq!(s.scroll_left(NodeId(9)), 0.0);
    }

    #[test]
    fn class_toggle_and_styles() {
        let mut s = MemorySurface::new();
        let n = s.insert();
        s.set_class(n, "is-in", true);
        assert!(s.has_class(n, "is-in"));
        s.set_class(n, "is-in", false);
        assert!(!s.has_class(n, "is-in"));

        s.set_style(n, "width", "40%");
        assert_eq!(s.style(n, "width"), Some("40%"));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut s = MemorySurface::new();
        let n = s.insert();
        s.node_mut(n).unwrap().max_scroll_left = Some(500.0);
        s.scroll_by(n, -50.0, ScrollBehavior::Smooth);
        assert_eq!(s.scroll_left(n), 0.0);
        s.set_scroll_left(n, 900.0);
        assert_eq!(s.scroll_left(n), 500.0);
        assert_eq!(s.node(n).unwrap().last_scroll, Some(ScrollBehavior::Smooth));
    }
}
