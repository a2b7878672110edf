// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card carousel: button stepping and grab-to-scroll.
//!
//! Buttons scroll the track smoothly by one card width plus the gap. A drag
//! records the pointer position and scroll offset on press, then keeps
//! `scroll_left = start_scroll - (x - start_x)` while the press is held. The
//! release may happen anywhere. There is no momentum.

use crate::config::CarouselConfig;
use crate::node::NodeId;
use crate::surface::{ScrollBehavior, Surface};
use crate::trace::{CarouselAction, CarouselEvent, Tracer};

/// Scroll direction of a carousel button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the start of the track.
    Prev,
    /// Toward the end of the track.
    Next,
}

impl Direction {
    /// `-1.0` for [`Prev`](Self::Prev), `1.0` for [`Next`](Self::Next).
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Prev => -1.0,
            Self::Next => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    start_x: f64,
    start_scroll: f64,
}

/// Scrolls a card track.
#[derive(Clone, Debug)]
pub struct Carousel {
    config: CarouselConfig,
    track: NodeId,
    drag: Option<Drag>,
}

impl Carousel {
    /// Creates a carousel over `track`.
    #[must_use]
    pub fn new(config: CarouselConfig, track: NodeId) -> Self {
        Self {
            config,
            track,
            drag: None,
        }
    }

    /// The track node.
    #[must_use]
    pub fn track(&self) -> NodeId {
        self.track
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Distance one button press scrolls, given the first card's rendered
    /// width. A missing or non-positive width falls back to the configured
    /// card width.
    #[must_use]
    pub fn step(&self, card_width: Option<f64>) -> f64 {
        let width = card_width
            .filter(|w| *w > 0.0)
            .unwrap_or(self.config.fallback_card_width);
        width + self.config.gap
    }

    /// Smoothly scrolls one card in `direction`.
    pub fn scroll_by_card(
        &mut self,
        direction: Direction,
        card_width: Option<f64>,
        surface: &mut impl Surface,
        tracer: &mut Tracer<'_>,
    ) {
        let dx = direction.sign() * self.step(card_width);
        surface.scroll_by(self.track, dx, ScrollBehavior::Smooth);
        tracer.carousel(&CarouselEvent {
            track: self.track,
            action: CarouselAction::Step(direction),
            scroll_left: surface.scroll_left(self.track),
        });
    }

    /// Starts a drag at pointer position `x`.
    pub fn press(&mut self, x: f64, surface: &mut impl Surface, tracer: &mut Tracer<'_>) {
        let start_scroll = surface.scroll_left(self.track);
        self.drag = Some(Drag {
            start_x: x,
            start_scroll,
        });
        surface.set_class(self.track, self.config.dragging_class, true);
        tracer.carousel(&CarouselEvent {
            track: self.track,
            action: CarouselAction::DragStart,
            scroll_left: start_scroll,
        });
    }

    /// Follows the pointer to `x`. Does nothing unless a drag is in progress.
    pub fn drag_to(&mut self, x: f64, surface: &mut impl Surface) {
        if let Some(drag) = self.drag {
            surface.set_scroll_left(self.track, drag.start_scroll - (x - drag.start_x));
        }
    }

    /// Ends any drag in progress.
    pub fn release(&mut self, surface: &mut impl Surface, tracer: &mut Tracer<'_>) {
        let was_dragging = self.drag.take().is_some();
        surface.set_class(self.track, self.config.dragging_class, false);
        if was_dragging {
            tracer.carousel(&CarouselEvent {
                track: self.track,
                action: CarouselAction::DragEnd,
                scroll_left: surface.scroll_left(self.track),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::surface::MemorySurface;

    fn carousel() -> (MemorySurface, Carousel) {
        let mut surface = MemorySurface::new();
        let track = surface.insert();
        (surface, Carousel::new(PageConfig::portfolio().carousel, track))
    }

    #[test]
    fn next_scrolls_by_card_plus_gap() {
        let (mut surface, mut car) = carousel();
        let track = car.track();
        surface.set_scroll_left(track, 100.0);
        car.scroll_by_card(Direction::Next, Some(300.0), &mut surface, &mut Tracer::none());
        assert_eq!(surface.scroll_left(track), 414.0);
        assert_eq!(
            surface.node(track).unwrap().last_scroll,
            Some(ScrollBehavior::Smooth)
        );

        car.scroll_by_card(Direction::Prev, Some(300.0), &mut surface, &mut Tracer::none());
        assert_eq!(surface.scroll_left(track), 100.0);
    }

    #[test]
    fn missing_card_uses_fallback_width() {
        let (_, car) = carousel();
        assert_eq!(car.step(None), 334.0);
        assert_eq!(car.step(Some(0.0)), 334.0);
        assert_eq!(car.step(Some(250.0)), 264.0);
    }

    #[test]
    fn drag_is_grab_scrolling() {
        let (mut surface, mut car) = carousel();
        let track = car.track();
        let mut tracer = Tracer::none();
        surface.set_scroll_left(track, 500.0);

        car.press(200.0, &mut surface, &mut tracer);
        assert!(car.is_dragging());
        assert!(surface.has_class(track, "is-dragging"));

        car.drag_to(150.0, &mut surface);
        assert_eq!(surface.scroll_left(track), 550.0);
        car.drag_to(260.0, &mut surface);
        assert_eq!(surface.scroll_left(track), 440.0);

        car.release(&mut surface, &mut tracer);
        assert!(!car.is_dragging());
        assert!(!surface.has_class(track, "is-dragging"));

        // Moves after release are ignored.
        car.drag_to(0.0, &mut surface);
        assert_eq!(surface.scroll_left(track), 440.0);
    }

    #[test]
    fn cancel_then_release_ends_drag_once() {
        let (mut surface, mut car) = carousel();
        let track = car.track();
        let mut tracer = Tracer::none();
        surface.set_scroll_left(track, 300.0);

        car.press(100.0, &mut surface, &mut tracer);
        car.drag_to(80.0, &mut surface);
        // pointercancel, then a later pointerup from another gesture.
        car.release(&mut surface, &mut tracer);
        car.release(&mut surface, &mut tracer);

        assert!(!car.is_dragging());
        assert!(!surface.has_class(track, "is-dragging"));
        car.drag_to(500.0, &mut surface);
        assert_eq!(surface.scroll_left(track), 320.0);
    }
}
