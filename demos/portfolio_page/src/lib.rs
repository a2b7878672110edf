// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showcase page behaviors.
//!
//! Wires every vitrine behavior against the markup in `index.html` using
//! [`PageConfig::portfolio`]. A behavior whose elements are missing from the
//! page is simply not mounted.
//!
//! Build with: `wasm-pack build --target web demos/portfolio_page`
//! Then serve `demos/portfolio_page/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use vitrine_backend_web::{ConsoleSink, DomSurface, Watcher, listen, viewport_rect};
use vitrine_core::accordion::Accordion;
use vitrine_core::carousel::{Carousel, Direction};
use vitrine_core::config::{
    AccordionConfig, CarouselConfig, FilterConfig, PageConfig, RevealConfig, StoryConfig,
    TabConfig, TimelineConfig,
};
use vitrine_core::filter::{Card, FilterController, Pill};
use vitrine_core::footer::stamp_year;
use vitrine_core::node::NodeId;
use vitrine_core::observe::Root;
use vitrine_core::reveal::{RevealController, RevealTarget, parse_delay};
use vitrine_core::story::{Step, StoryDisplay, StoryScroller, parse_step};
use vitrine_core::tabs::{Section, Tab, TabHighlighter};
use vitrine_core::timeline::TimelineHighlighter;
use vitrine_core::trace::Tracer;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlDetailsElement, MouseEvent, Window};

/// State every handler shares: the document and the trace sink.
struct Context {
    surface: DomSurface,
    sink: ConsoleSink,
}

impl Context {
    fn run<R>(&mut self, f: impl FnOnce(&mut DomSurface, &mut Tracer<'_>) -> R) -> R {
        let mut tracer = Tracer::new(&mut self.sink);
        f(&mut self.surface, &mut tracer)
    }
}

type Shared = Rc<RefCell<Context>>;

/// Entry point for the showcase page.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let config = PageConfig::portfolio();
    let window = vitrine_backend_web::window()?;
    let document = vitrine_backend_web::document()?;
    let cx: Shared = Rc::new(RefCell::new(Context {
        surface: DomSurface::new(document),
        sink: ConsoleSink,
    }));

    {
        let mut c = cx.borrow_mut();
        let slot = c.surface.by_id(config.year_id);
        stamp_year(slot, vitrine_backend_web::current_year(), &mut c.surface);
    }

    mount_reveal(&cx, config.reveal)?;
    mount_story(&cx, config.story)?;
    mount_carousel(&cx, &window, config.carousel)?;
    mount_filter(&cx, config.filter)?;
    mount_accordion(&cx, config.accordion)?;
    mount_tabs(&cx, config.tabs)?;
    mount_timeline(&cx, config.timeline)?;
    Ok(())
}

/// Observes every node in `nodes` and leaks the watcher.
fn watch_all(watcher: Watcher, surface: &DomSurface, nodes: &[NodeId]) {
    for &node in nodes {
        if let Some(el) = surface.element(node) {
            watcher.watch(node, el);
        }
    }
    core::mem::forget(watcher);
}

fn mount_reveal(cx: &Shared, config: RevealConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let nodes = c.surface.query_all(config.selector);
    if nodes.is_empty() {
        return Ok(());
    }
    let targets: Vec<RevealTarget> = nodes
        .iter()
        .map(|&node| RevealTarget {
            node,
            delay_ms: parse_delay(c.surface.attribute(node, config.delay_attribute).as_deref()),
        })
        .collect();
    let mut reveal = RevealController::new(config, targets);

    let cx_cb = Rc::clone(cx);
    let watcher = Watcher::new(&reveal.watch_options(), None, move |batch| {
        cx_cb
            .borrow_mut()
            .run(|surface, tracer| reveal.on_batch(batch, surface, tracer))
    })?;
    watch_all(watcher, &c.surface, &nodes);
    Ok(())
}

fn mount_story(cx: &Shared, config: StoryConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let nodes = c.surface.query_all(config.step_selector);
    if nodes.is_empty() {
        return Ok(());
    }
    let steps: Vec<Step> = nodes
        .iter()
        .map(|&node| Step {
            node,
            number: parse_step(c.surface.attribute(node, config.step_attribute).as_deref()),
        })
        .collect();
    let display = StoryDisplay {
        title: c.surface.by_id(config.title_id),
        body: c.surface.by_id(config.body_id),
        progress: c.surface.by_id(config.progress_id),
        status: c.surface.by_id(config.status_id),
        hud_label: c.surface.by_id(config.hud_label_id),
        hud_bar: c.surface.by_id(config.hud_bar_id),
    };
    let mut story = StoryScroller::new(config, steps, display);

    let cx_cb = Rc::clone(cx);
    let watcher = Watcher::new(&story.watch_options(), None, move |batch| {
        cx_cb
            .borrow_mut()
            .run(|surface, tracer| story.on_batch(batch, surface, tracer));
        Vec::new()
    })?;
    watch_all(watcher, &c.surface, &nodes);
    Ok(())
}

fn mount_tabs(cx: &Shared, config: TabConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let tab_nodes = c.surface.query_all(config.tab_selector);
    let tabs: Vec<Tab> = tab_nodes
        .iter()
        .map(|&node| Tab {
            node,
            href: c.surface.attribute(node, "href"),
        })
        .collect();
    let sections: Vec<Section> = config
        .section_ids
        .iter()
        .filter_map(|&id| {
            c.surface.by_id(id).map(|node| Section {
                node,
                id: id.into(),
            })
        })
        .collect();
    if sections.is_empty() {
        return Ok(());
    }
    let nodes: Vec<NodeId> = sections.iter().map(|s| s.node).collect();
    let mut tabs = TabHighlighter::new(config, sections, tabs);

    let cx_cb = Rc::clone(cx);
    let watcher = Watcher::new(&tabs.watch_options(), None, move |batch| {
        cx_cb
            .borrow_mut()
            .run(|surface, tracer| tabs.on_batch(batch, surface, tracer));
        Vec::new()
    })?;
    watch_all(watcher, &c.surface, &nodes);
    Ok(())
}

fn mount_timeline(cx: &Shared, config: TimelineConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let items = c.surface.query_all(config.item_selector);
    if items.is_empty() {
        return Ok(());
    }
    let scroller = c.surface.by_id(config.scroller_id);
    let root = scroller.map_or(Root::Viewport, Root::Element);
    let mut timeline = TimelineHighlighter::new(config, items.clone(), root);
    timeline.start(&mut c.surface);

    let root_el = scroller.and_then(|s| c.surface.element(s)).cloned();
    let cx_cb = Rc::clone(cx);
    let watcher = Watcher::new(&timeline.watch_options(), root_el.as_ref(), move |batch| {
        let mut c = cx_cb.borrow_mut();
        let root_rect = match scroller {
            Some(s) => c.surface.bounds(s),
            None => viewport_rect(),
        };
        if let Some(root_rect) = root_rect {
            c.run(|surface, tracer| timeline.on_batch(batch, root_rect, surface, tracer));
        }
        Vec::new()
    })?;
    watch_all(watcher, &c.surface, &items);
    Ok(())
}

fn mount_carousel(cx: &Shared, window: &Window, config: CarouselConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let Some(track) = c.surface.query(config.track_selector) else {
        return Ok(());
    };
    let Some(track_el) = c.surface.element(track).cloned() else {
        return Ok(());
    };
    let carousel = Rc::new(RefCell::new(Carousel::new(config, track)));

    for (selector, direction) in [
        (config.prev_selector, Direction::Prev),
        (config.next_selector, Direction::Next),
    ] {
        let Some(button) = c.surface.query(selector).and_then(|b| c.surface.element(b).cloned())
        else {
            continue;
        };
        let cx_cb = Rc::clone(cx);
        let car = Rc::clone(&carousel);
        listen(&button, "click", move |_event: Event| {
            let mut c = cx_cb.borrow_mut();
            let card = c.surface.query_within(track, config.card_selector);
            let width = card.and_then(|n| c.surface.width(n));
            c.run(|surface, tracer| {
                car.borrow_mut()
                    .scroll_by_card(direction, width, surface, tracer);
            });
        })?;
    }

    let cx_cb = Rc::clone(cx);
    let car = Rc::clone(&carousel);
    listen(&track_el, "pointerdown", move |event: Event| {
        let Some(e) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let x = f64::from(e.page_x());
        cx_cb
            .borrow_mut()
            .run(|surface, tracer| car.borrow_mut().press(x, surface, tracer));
    })?;

    let cx_cb = Rc::clone(cx);
    let car = Rc::clone(&carousel);
    listen(window, "pointermove", move |event: Event| {
        let mut car = car.borrow_mut();
        if !car.is_dragging() {
            return;
        }
        if let Some(e) = event.dyn_ref::<MouseEvent>() {
            car.drag_to(f64::from(e.page_x()), &mut cx_cb.borrow_mut().surface);
        }
    })?;

    for &kind in config.release_events {
        let cx_cb = Rc::clone(cx);
        let car = Rc::clone(&carousel);
        listen(window, kind, move |_event: Event| {
            cx_cb
                .borrow_mut()
                .run(|surface, tracer| car.borrow_mut().release(surface, tracer));
        })?;
    }
    Ok(())
}

fn mount_filter(cx: &Shared, config: FilterConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let pills: Vec<Pill> = c
        .surface
        .query_all(config.pill_selector)
        .into_iter()
        .map(|node| Pill {
            node,
            filter: c.surface.attribute(node, config.filter_attribute),
        })
        .collect();
    if pills.is_empty() {
        return Ok(());
    }
    let cards: Vec<Card> = c
        .surface
        .query_all(config.card_selector)
        .into_iter()
        .map(|node| Card::new(node, c.surface.attribute(node, config.tags_attribute).as_deref()))
        .collect();
    let pill_nodes: Vec<NodeId> = pills.iter().map(|p| p.node).collect();
    let filter = Rc::new(RefCell::new(FilterController::new(config, pills, cards)));

    for pill in pill_nodes {
        let Some(el) = c.surface.element(pill).cloned() else {
            continue;
        };
        let cx_cb = Rc::clone(cx);
        let filter = Rc::clone(&filter);
        listen(&el, "click", move |_event: Event| {
            cx_cb
                .borrow_mut()
                .run(|surface, tracer| filter.borrow_mut().select(pill, surface, tracer));
        })?;
    }
    Ok(())
}

fn mount_accordion(cx: &Shared, config: AccordionConfig) -> Result<(), JsValue> {
    let mut c = cx.borrow_mut();
    let members = c.surface.query_all(config.details_selector);
    if members.is_empty() {
        return Ok(());
    }
    let accordion = Rc::new(RefCell::new(Accordion::new(members.clone())));

    for node in members {
        let Some(el) = c.surface.element(node).cloned() else {
            continue;
        };
        let cx_cb = Rc::clone(cx);
        let accordion = Rc::clone(&accordion);
        listen(&el, "toggle", move |_event: Event| {
            let mut c = cx_cb.borrow_mut();
            let Some(open) = c
                .surface
                .element(node)
                .and_then(|el| el.dyn_ref::<HtmlDetailsElement>())
                .map(HtmlDetailsElement::open)
            else {
                return;
            };
            c.run(|surface, tracer| {
                accordion.borrow_mut().on_toggle(node, open, surface, tracer);
            });
        })?;
    }
    Ok(())
}
