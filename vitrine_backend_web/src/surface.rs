// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live DOM surface.
//!
//! [`DomSurface`] hands out [`NodeId`]s for the elements a page registers and
//! applies [`Surface`] mutations to them. Slots are never reused, so a
//! `NodeId` stays valid for the life of the surface.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use vitrine_core::node::NodeId;
use vitrine_core::surface::{ScrollBehavior, Surface};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlDetailsElement, HtmlElement, Node, ScrollToOptions};

/// Maps [`NodeId`]s to live DOM elements.
pub struct DomSurface {
    document: Document,
    elements: Vec<Option<Element>>,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("document", &"Document")
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomSurface {
    /// Creates an empty surface over `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            elements: Vec::new(),
        }
    }

    /// Returns the document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Registers `el`, returning its handle. Registering the same element
    /// twice returns the same handle.
    pub fn register(&mut self, el: Element) -> NodeId {
        if let Some(node) = self.find(&el) {
            return node;
        }
        let node = NodeId(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        self.elements.push(Some(el));
        node
    }

    /// Returns the handle of an already registered element.
    #[must_use]
    pub fn find(&self, el: &Node) -> Option<NodeId> {
        let idx = self
            .elements
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|e| e.is_same_node(Some(el))))?;
        u32::try_from(idx).ok().map(NodeId)
    }

    /// Returns the DOM element for `node`, if it exists.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements
            .get(node.index() as usize)
            .and_then(|slot| slot.as_ref())
    }

    /// Forgets `node`. Its handle is not reused.
    pub fn release(&mut self, node: NodeId) -> Option<Element> {
        self.elements.get_mut(node.index() as usize)?.take()
    }

    /// Registers the first element matching `selector`.
    pub fn query(&mut self, selector: &str) -> Option<NodeId> {
        let el = self.document.query_selector(selector).ok().flatten()?;
        Some(self.register(el))
    }

    /// Registers the first element under `parent` matching `selector`.
    pub fn query_within(&mut self, parent: NodeId, selector: &str) -> Option<NodeId> {
        let el = self.element(parent)?.query_selector(selector).ok().flatten()?;
        Some(self.register(el))
    }

    /// Registers every element matching `selector`, in document order.
    pub fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .map(|el| self.register(el))
            .collect()
    }

    /// Registers the element with id `id`.
    pub fn by_id(&mut self, id: &str) -> Option<NodeId> {
        let el = self.document.get_element_by_id(id)?;
        Some(self.register(el))
    }

    /// Reads attribute `name` of `node`.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    /// Returns the current bounding rectangle of `node` in viewport
    /// coordinates.
    #[must_use]
    pub fn bounds(&self, node: NodeId) -> Option<Rect> {
        let r = self.element(node)?.get_bounding_client_rect();
        Some(crate::to_rect(r.x(), r.y(), r.width(), r.height()))
    }

    /// Returns the rendered width of `node`, if it has any.
    #[must_use]
    pub fn width(&self, node: NodeId) -> Option<f64> {
        self.bounds(node).map(|r| r.width())
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }
}

fn scroll_options(left: f64, behavior: ScrollBehavior) -> ScrollToOptions {
    let opts = ScrollToOptions::new();
    opts.set_left(left);
    opts.set_behavior(match behavior {
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
    });
    opts
}

impl Surface for DomSurface {
    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(el) = self.element(node) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.html(node) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_open(&mut self, node: NodeId, open: bool) {
        if let Some(details) = self
            .element(node)
            .and_then(|el| el.dyn_ref::<HtmlDetailsElement>())
        {
            details.set_open(open);
        }
    }

    fn scroll_left(&self, node: NodeId) -> f64 {
        self.element(node)
            .and_then(|el| js_sys::Reflect::get(el, &JsValue::from_str("scrollLeft")).ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn set_scroll_left(&mut self, node: NodeId, left: f64) {
        if let Some(el) = self.element(node) {
            el.scroll_to_with_scroll_to_options(&scroll_options(left, ScrollBehavior::Instant));
        }
    }

    fn scroll_by(&mut self, node: NodeId, dx: f64, behavior: ScrollBehavior) {
        if let Some(el) = self.element(node) {
            el.scroll_by_with_scroll_to_options(&scroll_options(dx, behavior));
        }
    }
}
