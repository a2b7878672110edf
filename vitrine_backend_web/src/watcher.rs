// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wrapper.
//!
//! [`Watcher`] owns one [`IntersectionObserver`][mdn] configured from core
//! [`WatchOptions`] and translates each notification batch into a slice of
//! [`Entry`] values keyed by the [`NodeId`]s the targets were watched under.
//! The handler returns the nodes that should stop being observed.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/IntersectionObserver

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString as _;
use alloc::vec::Vec;
use core::cell::RefCell;

use vitrine_core::node::NodeId;
use vitrine_core::observe::{Entry, WatchOptions};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node,
};

type WatchClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;
type Handler = Box<dyn FnMut(&[Entry]) -> Vec<NodeId>>;

/// Observes a set of elements and delivers visibility batches.
///
/// Dropping the `Watcher` disconnects the observer.
pub struct Watcher {
    inner: Rc<WatcherInner>,
}

struct WatcherInner {
    observer: IntersectionObserver,

    /// Kept alive for as long as the observer may call it.
    closure: RefCell<Option<WatchClosure>>,

    /// Watched targets and the handles they report under.
    targets: RefCell<Vec<(NodeId, Element)>>,

    handler: RefCell<Handler>,
}

impl WatcherInner {
    fn lookup(&self, target: &Node) -> Option<NodeId> {
        self.targets
            .borrow()
            .iter()
            .find(|(_, el)| el.is_same_node(Some(target)))
            .map(|(node, _)| *node)
    }

    fn forget(&self, node: NodeId) -> Option<Element> {
        let mut targets = self.targets.borrow_mut();
        let idx = targets.iter().position(|(n, _)| *n == node)?;
        Some(targets.swap_remove(idx).1)
    }
}

fn to_entry(node: NodeId, e: &IntersectionObserverEntry) -> Entry {
    let r = e.bounding_client_rect();
    Entry {
        target: node,
        is_intersecting: e.is_intersecting(),
        ratio: e.intersection_ratio(),
        bounds: crate::to_rect(r.x(), r.y(), r.width(), r.height()),
    }
}

impl Watcher {
    /// Creates a watcher with `options`.
    ///
    /// `root` is the element standing for [`Root::Element`](vitrine_core::observe::Root::Element);
    /// `None` observes against the viewport. `handler` runs once per batch.
    pub fn new(
        options: &WatchOptions,
        root: Option<&Element>,
        handler: impl FnMut(&[Entry]) -> Vec<NodeId> + 'static,
    ) -> Result<Self, JsValue> {
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin.to_string());
        let thresholds = js_sys::Array::new();
        for &t in &options.thresholds {
            thresholds.push(&JsValue::from_f64(t));
        }
        init.set_threshold(&thresholds);
        if let Some(root) = root {
            init.set_root(Some(root.unchecked_ref()));
        }

        // The observer needs the callback and the callback needs the target
        // table, so the closure is built over a placeholder first.
        let targets: RefCell<Vec<(NodeId, Element)>> = RefCell::new(Vec::new());
        let handler: RefCell<Handler> = RefCell::new(Box::new(handler));
        let slot: Rc<RefCell<Option<Rc<WatcherInner>>>> = Rc::new(RefCell::new(None));

        let slot_cb = Rc::clone(&slot);
        let closure = Closure::wrap(Box::new(
            move |records: js_sys::Array, observer: IntersectionObserver| {
                let Some(inner) = slot_cb.borrow().clone() else {
                    return;
                };
                let batch: Vec<Entry> = records
                    .iter()
                    .map(|v| v.unchecked_into::<IntersectionObserverEntry>())
                    .filter_map(|e| inner.lookup(&e.target()).map(|node| to_entry(node, &e)))
                    .collect();
                if batch.is_empty() {
                    return;
                }

                let done = inner.handler.borrow_mut()(&batch);
                for node in done {
                    if let Some(el) = inner.forget(node) {
                        observer.unobserve(&el);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        let inner = Rc::new(WatcherInner {
            observer,
            closure: RefCell::new(Some(closure)),
            targets,
            handler,
        });
        *slot.borrow_mut() = Some(Rc::clone(&inner));
        Ok(Self { inner })
    }

    /// Starts observing `el`, reporting it as `node`.
    pub fn watch(&self, node: NodeId, el: &Element) {
        {
            let mut targets = self.inner.targets.borrow_mut();
            if targets.iter().any(|(n, _)| *n == node) {
                return;
            }
            targets.push((node, el.clone()));
        }
        self.inner.observer.observe(el);
    }

    /// Stops observing `node`.
    pub fn unwatch(&self, node: NodeId) {
        if let Some(el) = self.inner.forget(node) {
            self.inner.observer.unobserve(&el);
        }
    }

    /// Number of elements still observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.targets.borrow().len()
    }

    /// Returns `true` if nothing is observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.inner.observer.disconnect();
        self.inner.targets.borrow_mut().clear();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Watcher")
            .field("targets", &self.len())
            .finish_non_exhaustive()
    }
}
