// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output to the browser console.
//!
//! [`ConsoleSink`] writes one `console.debug` line per event, in the same
//! bracketed format as the native pretty printer.

use alloc::format;

use vitrine_core::trace::{
    AccordionEvent, BatchEvent, CarouselEvent, FilterEvent, RevealEvent, SelectEvent,
    StoryStepEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// Writes trace events with `console.debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

fn emit(line: &str) {
    web_sys::console::debug_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_batch(&mut self, e: &BatchEvent) {
        emit(&format!(
            "[batch] {} entries={} intersecting={}",
            e.group.as_str(),
            e.entries,
            e.intersecting
        ));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        emit(&format!("[reveal] {} delay={:?}", e.node, e.delay_ms));
    }

    fn on_select(&mut self, e: &SelectEvent) {
        emit(&format!(
            "[select] {} {} score={:.3} candidates={}",
            e.group.as_str(),
            e.node,
            e.score,
            e.candidates
        ));
    }

    fn on_story_step(&mut self, e: &StoryStepEvent) {
        emit(&format!(
            "[story] step={}/{} progress={}% displayed={}",
            e.step, e.total, e.progress_pct, e.displayed
        ));
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        emit(&format!(
            "[carousel] {} {} scroll_left={:.1}",
            e.track,
            e.action.as_str(),
            e.scroll_left
        ));
    }

    fn on_filter(&mut self, e: &FilterEvent) {
        emit(&format!("[filter] {} dimmed={}/{}", e.pill, e.dimmed, e.total));
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        emit(&format!("[accordion] opened={} closed={}", e.opened, e.closed));
    }
}
