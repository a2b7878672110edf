// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for page behaviors.
//!
//! This module provides a [`TraceSink`] trait with one method per behavior
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::carousel::Direction;
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which visibility-driven behavior produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    /// One-shot reveal on scroll.
    Reveal,
    /// Narrative steps.
    Story,
    /// Section tabs.
    Tabs,
    /// Center-band timeline.
    Timeline,
}

impl Group {
    /// Short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Story => "story",
            Self::Tabs => "tabs",
            Self::Timeline => "timeline",
        }
    }
}

/// What a carousel interaction did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarouselAction {
    /// A button scrolled the track by one card.
    Step(Direction),
    /// A drag began.
    DragStart,
    /// A drag ended.
    DragEnd,
}

impl CarouselAction {
    /// Short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Step(Direction::Prev) => "step-prev",
            Self::Step(Direction::Next) => "step-next",
            Self::DragStart => "drag-start",
            Self::DragEnd => "drag-end",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a notification batch reaches a behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchEvent {
    /// Receiving behavior.
    pub group: Group,
    /// Entries in the batch.
    pub entries: usize,
    /// Entries that were intersecting.
    pub intersecting: usize,
}

/// Emitted when a node is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    /// The revealed node.
    pub node: NodeId,
    /// Transition delay applied, if any.
    pub delay_ms: Option<u32>,
}

/// Emitted when a selection strategy picks a winner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectEvent {
    /// Selecting behavior.
    pub group: Group,
    /// The winning node.
    pub node: NodeId,
    /// The winner's score.
    pub score: f64,
    /// Intersecting candidates in the batch.
    pub candidates: usize,
}

/// Emitted when the story scroller settles on a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoryStepEvent {
    /// Selected step number.
    pub step: u32,
    /// Total number of steps.
    pub total: u32,
    /// Progress in percent.
    pub progress_pct: f64,
    /// Whether the display was updated (all targets and a record present).
    pub displayed: bool,
}

/// Emitted on carousel interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselEvent {
    /// The track node.
    pub track: NodeId,
    /// What happened.
    pub action: CarouselAction,
    /// Track scroll offset after the action.
    pub scroll_left: f64,
}

/// Emitted when a filter pill is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterEvent {
    /// The selected pill.
    pub pill: NodeId,
    /// Cards dimmed after filtering.
    pub dimmed: usize,
    /// Total cards.
    pub total: usize,
}

/// Emitted when an accordion member opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccordionEvent {
    /// The member that opened.
    pub opened: NodeId,
    /// Siblings that were closed.
    pub closed: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from page behaviors.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a notification batch arrives.
    fn on_batch(&mut self, e: &BatchEvent) {
        _ = e;
    }

    /// Called when a node is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when a selection strategy picks a winner.
    fn on_select(&mut self, e: &SelectEvent) {
        _ = e;
    }

    /// Called when the story settles on a step.
    fn on_story_step(&mut self, e: &StoryStepEvent) {
        _ = e;
    }

    /// Called on carousel interaction.
    fn on_carousel(&mut self, e: &CarouselEvent) {
        _ = e;
    }

    /// Called when a filter is applied.
    fn on_filter(&mut self, e: &FilterEvent) {
        _ = e;
    }

    /// Called when an accordion member opens.
    fn on_accordion(&mut self, e: &AccordionEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Expands to one `Tracer` method that forwards to a `TraceSink` method.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $sink_fn:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$sink_fn(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`BatchEvent`].
        batch => on_batch(BatchEvent)
    );
    forward!(
        /// Emits a [`RevealEvent`].
        reveal => on_reveal(RevealEvent)
    );
    forward!(
        /// Emits a [`SelectEvent`].
        select => on_select(SelectEvent)
    );
    forward!(
        /// Emits a [`StoryStepEvent`].
        story_step => on_story_step(StoryStepEvent)
    );
    forward!(
        /// Emits a [`CarouselEvent`].
        carousel => on_carousel(CarouselEvent)
    );
    forward!(
        /// Emits a [`FilterEvent`].
        filter => on_filter(FilterEvent)
    );
    forward!(
        /// Emits an [`AccordionEvent`].
        accordion => on_accordion(AccordionEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_batch(&BatchEvent {
            group: Group::Story,
            entries: 2,
            intersecting: 1,
        });
        sink.on_reveal(&RevealEvent {
            node: NodeId(0),
            delay_ms: None,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.filter(&FilterEvent {
            pill: NodeId(1),
            dimmed: 0,
            total: 3,
        });
    }

    #[test]
    fn group_labels() {
        assert_eq!(Group::Timeline.as_str(), "timeline");
        assert_eq!(Group::Reveal.as_str(), "reveal");
        assert_eq!(CarouselAction::Step(Direction::Next).as_str(), "step-next");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            opened: Vec<NodeId>,
        }
        impl TraceSink for RecordingSink {
            fn on_accordion(&mut self, e: &AccordionEvent) {
                self.opened.push(e.opened);
            }
        }

        let mut sink = RecordingSink { opened: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.accordion(&AccordionEvent {
            opened: NodeId(7),
            closed: 2,
        });
        drop(tracer);
        assert_eq!(sink.opened, &[NodeId(7)]);
    }
}
