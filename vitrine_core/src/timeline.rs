// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline highlighting by proximity to a center band.
//!
//! The watcher's root margin shrinks the root to a thin horizontal band, so
//! only items crossing that band are reported as intersecting. Among those,
//! the item whose vertical center is nearest the [`CenterLine`] wins. Before
//! any notification arrives the first item is active.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::{CenterLine, TimelineConfig};
use crate::node::NodeId;
use crate::observe::{Entry, Root, WatchOptions};
use crate::select::{NearestLine, Selection, TieBreak};
use crate::surface::Surface;
use crate::trace::{BatchEvent, Group, SelectEvent, Tracer};

/// Keeps exactly one timeline item active.
#[derive(Clone, Debug)]
pub struct TimelineHighlighter {
    config: TimelineConfig,
    items: Vec<NodeId>,
    root: Root,
    selection: Selection,
}

impl TimelineHighlighter {
    /// Creates a highlighter over `items`, measured against `root`.
    #[must_use]
    pub fn new(config: TimelineConfig, items: Vec<NodeId>, root: Root) -> Self {
        Self {
            config,
            items,
            root,
            selection: Selection::new(),
        }
    }

    /// Options the watcher for the items should use.
    #[must_use]
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions::viewport(&[0.0])
            .with_root(self.root)
            .with_margin(self.config.root_margin())
    }

    /// The items, in document order.
    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// The active item.
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.selection.current()
    }

    /// Marks the first item active. Does nothing when there are no items.
    pub fn start(&mut self, surface: &mut impl Surface) {
        if let Some(&first) = self.items.first() {
            self.activate(first, surface);
        }
    }

    /// The line candidates are measured against, for a root at `root_rect`.
    #[must_use]
    pub fn center_line(&self, root_rect: Rect) -> f64 {
        let area = match self.config.center_line {
            CenterLine::Band => self.config.root_margin().resolve(root_rect),
            CenterLine::Root => root_rect,
        };
        area.y0 + area.height() / 2.0
    }

    /// Handles a notification batch; `root_rect` is the root's current
    /// rectangle in the same coordinates as the entries' bounds.
    pub fn on_batch(
        &mut self,
        batch: &[Entry],
        root_rect: Rect,
        surface: &mut impl Surface,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.batch(&BatchEvent {
            group: Group::Timeline,
            entries: batch.len(),
            intersecting: batch.iter().filter(|e| e.is_intersecting).count(),
        });
        let line = NearestLine {
            y: self.center_line(root_rect),
        };
        let Some(pick) = self.selection.update(batch, &line, TieBreak::First) else {
            return;
        };
        tracer.select(&SelectEvent {
            group: Group::Timeline,
            node: pick.node,
            score: pick.score,
            candidates: pick.candidates,
        });
        self.activate(pick.node, surface);
    }

    fn activate(&mut self, node: NodeId, surface: &mut impl Surface) {
        self.selection.set(node);
        for &item in &self.items {
            surface.set_class(item, self.config.active_class, item == node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::surface::MemorySurface;
    use alloc::string::ToString as _;

    const ROOT: Rect = Rect::new(0.0, 0.0, 600.0, 1000.0);

    fn item(node: NodeId, center_y: f64, is_intersecting: bool) -> Entry {
        Entry {
            target: node,
            is_intersecting,
            ratio: if is_intersecting { 0.5 } else { 0.0 },
            bounds: Rect::new(0.0, center_y - 20.0, 600.0, center_y + 20.0),
        }
    }

    fn timeline(
        n: usize,
        center_line: CenterLine,
    ) -> (MemorySurface, Vec<NodeId>, TimelineHighlighter) {
        let mut surface = MemorySurface::new();
        let items: Vec<NodeId> = (0..n).map(|_| surface.insert()).collect();
        let mut cfg = PageConfig::portfolio().timeline;
        cfg.center_line = center_line;
        let hl = TimelineHighlighter::new(cfg, items.clone(), Root::Viewport);
        (surface, items, hl)
    }

    fn active(surface: &MemorySurface, items: &[NodeId]) -> Vec<NodeId> {
        items
            .iter()
            .copied()
            .filter(|&n| surface.has_class(n, "is-active"))
            .collect()
    }

    #[test]
    fn first_item_is_active_at_start() {
        let (mut surface, items, mut hl) = timeline(3, CenterLine::Root);
        hl.start(&mut surface);
        assert_eq!(active(&surface, &items), [items[0]]);

        let (mut empty_surface, _, mut empty) = timeline(0, CenterLine::Root);
        empty.start(&mut empty_surface);
        assert_eq!(empty.current(), None);
    }

    #[test]
    fn portfolio_measures_against_root_center() {
        let mut surface = MemorySurface::new();
        let items: Vec<NodeId> = (0..2).map(|_| surface.insert()).collect();
        let cfg = PageConfig::portfolio().timeline;
        assert_eq!(cfg.center_line, CenterLine::default());
        let mut hl = TimelineHighlighter::new(cfg, items.clone(), Root::Viewport);
        assert_eq!(hl.center_line(ROOT), 500.0);

        // Both items sit inside the 300..400 band; 395 is closer to 500.
        let batch = [item(items[0], 310.0, true), item(items[1], 395.0, true)];
        hl.on_batch(&batch, ROOT, &mut surface, &mut Tracer::none());
        assert_eq!(hl.current(), Some(items[1]));
    }

    #[test]
    fn nearest_to_root_center_wins_in_any_order() {
        let (mut surface, items, mut hl) = timeline(3, CenterLine::Root);
        hl.start(&mut surface);

        let forward = [
            item(items[0], 390.0, true),
            item(items[1], 480.0, true),
            item(items[2], 560.0, true),
        ];
        hl.on_batch(&forward, ROOT, &mut surface, &mut Tracer::none());
        assert_eq!(active(&surface, &items), [items[1]]);

        let (mut surface, items, mut hl) = timeline(3, CenterLine::Root);
        hl.start(&mut surface);
        let backward = [
            item(items[2], 560.0, true),
            item(items[0], 390.0, true),
            item(items[1], 480.0, true),
        ];
        hl.on_batch(&backward, ROOT, &mut surface, &mut Tracer::none());
        assert_eq!(active(&surface, &items), [items[1]]);
    }

    #[test]
    fn band_center_line_option() {
        let (mut surface, items, mut hl) = timeline(2, CenterLine::Band);
        // Band is 300..400, center line 350.
        assert_eq!(hl.center_line(ROOT), 350.0);
        let batch = [item(items[0], 310.0, true), item(items[1], 395.0, true)];
        hl.on_batch(&batch, ROOT, &mut surface, &mut Tracer::none());
        assert_eq!(hl.current(), Some(items[0]));
    }

    #[test]
    fn no_candidates_keeps_previous() {
        let (mut surface, items, mut hl) = timeline(3, CenterLine::Root);
        hl.start(&mut surface);
        let mut tracer = Tracer::none();
        hl.on_batch(
            &[item(items[2], 350.0, true)],
            ROOT,
            &mut surface,
            &mut tracer,
        );
        hl.on_batch(
            &[item(items[2], 800.0, false), item(items[1], 900.0, false)],
            ROOT,
            &mut surface,
            &mut tracer,
        );
        assert_eq!(active(&surface, &items), [items[2]]);
    }

    #[test]
    fn watch_options_carry_band_margin() {
        let (_, _, hl) = timeline(1, CenterLine::Root);
        let opts = hl.watch_options();
        assert_eq!(opts.root_margin.to_string(), "-30% 0px -60% 0px");
        assert_eq!(opts.thresholds, [0.0]);
        assert_eq!(opts.root, Root::Viewport);
    }
}
