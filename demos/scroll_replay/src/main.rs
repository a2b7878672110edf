// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated scroll through a synthetic page that exercises every behavior.
//!
//! Lays out a four-section page, scrolls the viewport from top to bottom in
//! fixed steps and feeds each behavior the batches a [`Tracker`] computes,
//! then clicks through the carousel, filter pills and accordion. Events go to
//! both a [`PrettyPrintSink`] on stdout and a [`JsonSink`], which is exported
//! to `replay.json`.

use std::fs::File;
use std::io::{self, BufWriter};

use kurbo::Rect;

use vitrine_core::accordion::Accordion;
use vitrine_core::carousel::{Carousel, Direction};
use vitrine_core::config::PageConfig;
use vitrine_core::filter::{Card, FilterController, Pill};
use vitrine_core::footer::stamp_year;
use vitrine_core::node::NodeId;
use vitrine_core::observe::Root;
use vitrine_core::reveal::{RevealController, RevealTarget};
use vitrine_core::story::{Step, StoryDisplay, StoryScroller};
use vitrine_core::surface::{MemorySurface, Surface as _};
use vitrine_core::tabs::{Section, Tab, TabHighlighter};
use vitrine_core::timeline::TimelineHighlighter;
use vitrine_core::trace::{
    AccordionEvent, BatchEvent, CarouselEvent, FilterEvent, RevealEvent, SelectEvent,
    StoryStepEvent, TraceSink, Tracer,
};
use vitrine_core::tracker::Tracker;

use vitrine_debug::json::JsonSink;
use vitrine_debug::pretty::PrettyPrintSink;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1200.0, 800.0);
const PAGE_HEIGHT: f64 = 4800.0;
const SCROLL_STEP: f64 = 100.0;
const CARD_WIDTH: f64 = 300.0;

/// Sends every event to both sinks.
struct Fanout {
    pretty: PrettyPrintSink,
    json: JsonSink,
}

impl TraceSink for Fanout {
    fn on_batch(&mut self, e: &BatchEvent) {
        self.pretty.on_batch(e);
        self.json.on_batch(e);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.pretty.on_reveal(e);
        self.json.on_reveal(e);
    }

    fn on_select(&mut self, e: &SelectEvent) {
        self.pretty.on_select(e);
        self.json.on_select(e);
    }

    fn on_story_step(&mut self, e: &StoryStepEvent) {
        self.pretty.on_story_step(e);
        self.json.on_story_step(e);
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        self.pretty.on_carousel(e);
        self.json.on_carousel(e);
    }

    fn on_filter(&mut self, e: &FilterEvent) {
        self.pretty.on_filter(e);
        self.json.on_filter(e);
    }

    fn on_accordion(&mut self, e: &AccordionEvent) {
        self.pretty.on_accordion(e);
        self.json.on_accordion(e);
    }
}

/// Document-space rectangles of laid-out nodes.
#[derive(Default)]
struct Layout {
    rects: Vec<(NodeId, Rect)>,
}

impl Layout {
    fn place(&mut self, surface: &mut MemorySurface, y: f64, height: f64) -> NodeId {
        let node = surface.insert();
        self.rects
            .push((node, Rect::new(0.0, y, VIEWPORT.width(), y + height)));
        node
    }

    /// Rectangle of `node` in viewport coordinates at `scroll_y`.
    fn bounds(&self, node: NodeId, scroll_y: f64) -> Option<Rect> {
        self.rects
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, r)| *r - kurbo::Vec2::new(0.0, scroll_y))
    }
}

fn watching(options: vitrine_core::observe::WatchOptions, nodes: &[NodeId]) -> Tracker {
    let mut tracker = Tracker::new(options);
    for &node in nodes {
        tracker.observe(node);
    }
    tracker
}

fn main() -> io::Result<()> {
    let config = PageConfig::portfolio();
    let mut surface = MemorySurface::new();
    let mut layout = Layout::default();

    // -- page ----------------------------------------------------------------
    let sections: Vec<Section> = config
        .tabs
        .section_ids
        .iter()
        .zip([0.0, 1600.0, 2600.0, 4000.0])
        .zip([1600.0, 1000.0, 1400.0, 800.0])
        .map(|((&id, y), h)| Section {
            node: layout.place(&mut surface, y, h),
            id: id.into(),
        })
        .collect();
    let tabs: Vec<Tab> = sections
        .iter()
        .map(|s| Tab {
            node: surface.insert(),
            href: Some(format!("#{}", s.id)),
        })
        .collect();

    let headings: Vec<RevealTarget> = [100.0, 1700.0, 2700.0, 4100.0]
        .into_iter()
        .zip([None, Some(80), Some(120), None])
        .map(|(y, delay_ms)| RevealTarget {
            node: layout.place(&mut surface, y, 60.0),
            delay_ms,
        })
        .collect();

    let steps: Vec<Step> = (1..=5)
        .map(|n| Step {
            node: layout.place(&mut surface, 200.0 + f64::from(n) * 260.0, 220.0),
            number: Some(n),
        })
        .collect();
    let display = StoryDisplay {
        title: Some(surface.insert()),
        body: Some(surface.insert()),
        progress: Some(surface.insert()),
        status: Some(surface.insert()),
        hud_label: Some(surface.insert()),
        hud_bar: Some(surface.insert()),
    };

    let items: Vec<NodeId> = (0..8_u32)
        .map(|i| layout.place(&mut surface, 2800.0 + f64::from(i) * 140.0, 100.0))
        .collect();

    let track = surface.insert();
    if let Some(n) = surface.node_mut(track) {
        n.max_scroll_left = Some(1200.0);
    }
    let pills: Vec<Pill> = ["all", "design", "frontend", "backend"]
        .into_iter()
        .map(|f| Pill {
            node: surface.insert(),
            filter: Some(f.into()),
        })
        .collect();
    let cards: Vec<Card> = ["design frontend", "frontend", "backend", "design", "backend frontend"]
        .into_iter()
        .map(|tags| Card::new(surface.insert(), Some(tags)))
        .collect();
    let details: Vec<NodeId> = (0..3).map(|_| surface.insert()).collect();
    let year = surface.insert();

    // -- behaviors -----------------------------------------------------------
    let reveal_nodes: Vec<NodeId> = headings.iter().map(|t| t.node).collect();
    let step_nodes: Vec<NodeId> = steps.iter().map(|s| s.node).collect();
    let section_nodes: Vec<NodeId> = sections.iter().map(|s| s.node).collect();

    let mut reveal = RevealController::new(config.reveal, headings);
    let mut story = StoryScroller::new(config.story, steps, display);
    let mut tab_bar = TabHighlighter::new(config.tabs, sections, tabs);
    let mut timeline = TimelineHighlighter::new(config.timeline, items.clone(), Root::Viewport);
    let mut carousel = Carousel::new(config.carousel, track);
    let mut filter = FilterController::new(config.filter, pills, cards);
    let mut accordion = Accordion::new(details.clone());

    let mut reveal_tracker = watching(reveal.watch_options(), &reveal_nodes);
    let mut story_tracker = watching(story.watch_options(), &step_nodes);
    let mut tab_tracker = watching(tab_bar.watch_options(), &section_nodes);
    let mut timeline_tracker = watching(timeline.watch_options(), &items);

    // -- sinks ---------------------------------------------------------------
    let mut sink = Fanout {
        pretty: PrettyPrintSink::new(Box::new(io::stdout())),
        json: JsonSink::new(),
    };

    stamp_year(Some(year), 2026, &mut surface);
    timeline.start(&mut surface);

    // -- simulated scroll ----------------------------------------------------
    let mut scroll_y = 0.0;
    while scroll_y <= PAGE_HEIGHT - VIEWPORT.height() {
        let mut tracer = Tracer::new(&mut sink);
        let at = |node| layout.bounds(node, scroll_y);

        let batch = reveal_tracker.update(VIEWPORT, at);
        if !batch.is_empty() {
            for node in reveal.on_batch(&batch, &mut surface, &mut tracer) {
                reveal_tracker.unobserve(node);
            }
        }
        let batch = story_tracker.update(VIEWPORT, at);
        if !batch.is_empty() {
            story.on_batch(&batch, &mut surface, &mut tracer);
        }
        let batch = tab_tracker.update(VIEWPORT, at);
        if !batch.is_empty() {
            tab_bar.on_batch(&batch, &mut surface, &mut tracer);
        }
        let batch = timeline_tracker.update(VIEWPORT, at);
        if !batch.is_empty() {
            timeline.on_batch(&batch, VIEWPORT, &mut surface, &mut tracer);
        }

        scroll_y += SCROLL_STEP;
    }

    // -- interactions --------------------------------------------------------
    {
        let mut tracer = Tracer::new(&mut sink);
        carousel.scroll_by_card(Direction::Next, Some(CARD_WIDTH), &mut surface, &mut tracer);
        carousel.scroll_by_card(Direction::Next, None, &mut surface, &mut tracer);
        carousel.press(600.0, &mut surface, &mut tracer);
        carousel.drag_to(450.0, &mut surface);
        carousel.release(&mut surface, &mut tracer);
        carousel.scroll_by_card(Direction::Prev, Some(CARD_WIDTH), &mut surface, &mut tracer);

        let pill_nodes: Vec<NodeId> = filter.pills().iter().map(|p| p.node).collect();
        for &pill in pill_nodes.iter().skip(1).chain(pill_nodes.first()) {
            filter.select(pill, &mut surface, &mut tracer);
        }

        for &node in details.iter().chain(details.first()) {
            surface.set_open(node, true);
            accordion.on_toggle(node, true, &mut surface, &mut tracer);
        }
    }

    // -- export --------------------------------------------------------------
    let path = "replay.json";
    let mut writer = BufWriter::new(File::create(path)?);
    sink.json.export(&mut writer)?;

    println!(
        "story step={:?} tab={:?} timeline={:?} track scroll_left={} open={:?}",
        story.current_step(),
        tab_bar.current(),
        timeline.current(),
        surface.scroll_left(track),
        accordion.open(),
    );
    println!("Wrote {path} ({} events)", sink.json.events().len());
    Ok(())
}
