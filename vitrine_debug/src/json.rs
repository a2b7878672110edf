// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON trace export.
//!
//! [`JsonSink`] keeps every event as a JSON object tagged with its `event`
//! name and a sequence number, and [`JsonSink::export`] writes them as a
//! single array.

use std::io::{self, Write};

use serde_json::{Value, json};

use vitrine_core::trace::{
    AccordionEvent, BatchEvent, CarouselEvent, FilterEvent, RevealEvent, SelectEvent,
    StoryStepEvent, TraceSink,
};

/// Collects trace events as JSON values.
#[derive(Clone, Debug, Default)]
pub struct JsonSink {
    events: Vec<Value>,
}

impl JsonSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events collected so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a pretty-printed JSON array.
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.events)?;
        writeln!(writer)
    }

    fn push(&mut self, event: &str, mut fields: Value) {
        if let Value::Object(map) = &mut fields {
            map.insert("event".into(), Value::from(event));
            map.insert("seq".into(), Value::from(self.events.len()));
        }
        self.events.push(fields);
    }
}

impl TraceSink for JsonSink {
    fn on_batch(&mut self, e: &BatchEvent) {
        self.push(
            "batch",
            json!({
                "group": e.group.as_str(),
                "entries": e.entries,
                "intersecting": e.intersecting,
            }),
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.push(
            "reveal",
            json!({
                "node": e.node.index(),
                "delay_ms": e.delay_ms,
            }),
        );
    }

    fn on_select(&mut self, e: &SelectEvent) {
        self.push(
            "select",
            json!({
                "group": e.group.as_str(),
                "node": e.node.index(),
                "score": e.score,
                "candidates": e.candidates,
            }),
        );
    }

    fn on_story_step(&mut self, e: &StoryStepEvent) {
        self.push(
            "story_step",
            json!({
                "step": e.step,
                "total": e.total,
                "progress_pct": e.progress_pct,
                "displayed": e.displayed,
            }),
        );
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        self.push(
            "carousel",
            json!({
                "track": e.track.index(),
                "action": e.action.as_str(),
                "scroll_left": e.scroll_left,
            }),
        );
    }

    fn on_filter(&mut self, e: &FilterEvent) {
        self.push(
            "filter",
            json!({
                "pill": e.pill.index(),
                "dimmed": e.dimmed,
                "total": e.total,
            }),
        );
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        self.push(
            "accordion",
            json!({
                "opened": e.opened.index(),
                "closed": e.closed,
            }),
        );
    }
}
