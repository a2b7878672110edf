// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use vitrine_core::trace::{
    AccordionEvent, BatchEvent, CarouselEvent, FilterEvent, RevealEvent, SelectEvent,
    StoryStepEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink, returning its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_batch(&mut self, e: &BatchEvent) {
        let _ = writeln!(
            self.writer,
            "[batch] {} entries={} intersecting={}",
            e.group.as_str(),
            e.entries,
            e.intersecting
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = match e.delay_ms {
            Some(ms) => writeln!(self.writer, "[reveal] {} delay={ms}ms", e.node),
            None => writeln!(self.writer, "[reveal] {}", e.node),
        };
    }

    fn on_select(&mut self, e: &SelectEvent) {
        let _ = writeln!(
            self.writer,
            "[select] {} {} score={:.3} candidates={}",
            e.group.as_str(),
            e.node,
            e.score,
            e.candidates
        );
    }

    fn on_story_step(&mut self, e: &StoryStepEvent) {
        let _ = writeln!(
            self.writer,
            "[story] step={}/{} progress={}% displayed={}",
            e.step, e.total, e.progress_pct, e.displayed
        );
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        let _ = writeln!(
            self.writer,
            "[carousel] {} {} scroll_left={:.1}",
            e.track,
            e.action.as_str(),
            e.scroll_left
        );
    }

    fn on_filter(&mut self, e: &FilterEvent) {
        let _ = writeln!(self.writer, "[filter] {} dimmed={}/{}", e.pill, e.dimmed, e.total);
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        let _ = writeln!(self.writer, "[accordion] opened={} closed={}", e.opened, e.closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::node::NodeId;
    use vitrine_core::trace::Group;

    #[test]
    fn pretty_print_select() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_select(&SelectEvent {
            group: Group::Timeline,
            node: NodeId(4),
            score: -5.0,
            candidates: 3,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[select] timeline #4"), "got: {output}");
        assert!(output.contains("score=-5.000"), "got: {output}");
        assert!(output.contains("candidates=3"), "got: {output}");
    }

    #[test]
    fn pretty_print_reveal_delay() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_reveal(&RevealEvent {
            node: NodeId(1),
            delay_ms: Some(120),
        });
        sink.on_reveal(&RevealEvent {
            node: NodeId(2),
            delay_ms: None,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[reveal] #1 delay=120ms\n[reveal] #2\n");
    }
}
