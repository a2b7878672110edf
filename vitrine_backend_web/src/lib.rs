// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for vitrine.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomSurface`]: slot table of live DOM elements implementing
//!   [`Surface`](vitrine_core::surface::Surface)
//! - [`Watcher`]: `IntersectionObserver` wrapper delivering core
//!   [`Entry`](vitrine_core::observe::Entry) batches
//! - [`listen`]: event listener registration
//! - [`ConsoleSink`]: trace sink writing to the browser console

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod console;
mod listener;
mod surface;
mod watcher;

pub use console::ConsoleSink;
pub use listener::listen;
pub use surface::DomSurface;
pub use vitrine_core::surface::Surface;
pub use watcher::Watcher;

use alloc::string::ToString as _;
use core::fmt;

use kurbo::Rect;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Failure to reach the browser globals a page needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindError {
    /// There is no `window` (not running on a page's main thread).
    NoWindow,
    /// The window has no document.
    NoDocument,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global window"),
            Self::NoDocument => f.write_str("window has no document"),
        }
    }
}

impl core::error::Error for BindError {}

impl From<BindError> for JsValue {
    fn from(e: BindError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

/// Returns the global window.
pub fn window() -> Result<Window, BindError> {
    web_sys::window().ok_or(BindError::NoWindow)
}

/// Returns the window's document.
pub fn document() -> Result<Document, BindError> {
    window()?.document().ok_or(BindError::NoDocument)
}

/// Returns the layout viewport as a rectangle at the origin, in CSS pixels.
#[must_use]
pub fn viewport_rect() -> Option<Rect> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Rect::new(0.0, 0.0, width, height))
}

/// Returns the current calendar year in local time.
#[must_use]
pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

/// Converts a DOM rectangle to a [`Rect`].
#[must_use]
pub fn to_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x, y, x + width, y + height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn dom_rect_maps_to_edges() {
        let r = to_rect(10.0, 20.0, 300.0, 40.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 310.0, 60.0));
        assert_eq!(r.height(), 40.0);
    }

    #[test]
    fn bind_error_messages() {
        assert_eq!(BindError::NoWindow.to_string(), "no global window");
        assert_eq!(BindError::NoDocument.to_string(), "window has no document");
    }
}
