// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side model of the intersection primitive.
//!
//! [`Tracker`] computes the same notifications a browser
//! `IntersectionObserver` would deliver, given the root rectangle and the
//! current rectangle of every watched node. A node is reported when its
//! threshold index or its intersecting flag differs from the last report;
//! the first update after [`observe`](Tracker::observe) always reports.
//!
//! The browser build never uses this type. It exists so behaviors can be
//! driven from synthetic layouts (tests, the replay demo).

use alloc::vec::Vec;

use kurbo::Rect;

use crate::node::NodeId;
use crate::observe::{Entry, WatchOptions};

#[derive(Clone, Copy, Debug)]
struct Tracked {
    node: NodeId,
    /// `(threshold_index, is_intersecting)` from the last report.
    last: Option<(usize, bool)>,
}

/// Computes visibility notifications for a set of nodes.
#[derive(Clone, Debug)]
pub struct Tracker {
    options: WatchOptions,
    targets: Vec<Tracked>,
}

impl Tracker {
    /// Creates a tracker that watches nothing yet.
    #[must_use]
    pub fn new(options: WatchOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    /// Returns the watch options.
    #[must_use]
    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Starts watching `node`. Watching a node twice is a no-op.
    pub fn observe(&mut self, node: NodeId) {
        if !self.is_observing(node) {
            self.targets.push(Tracked { node, last: None });
        }
    }

    /// Stops watching `node`.
    pub fn unobserve(&mut self, node: NodeId) {
        self.targets.retain(|t| t.node != node);
    }

    /// Returns `true` if `node` is being watched.
    #[must_use]
    pub fn is_observing(&self, node: NodeId) -> bool {
        self.targets.iter().any(|t| t.node == node)
    }

    /// Number of watched nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if nothing is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measures every watched node against `root` and returns the batch of
    /// changed entries, in observation order.
    ///
    /// `bounds` yields each node's current rectangle; nodes it has no
    /// rectangle for are skipped and keep their previous state.
    pub fn update(&mut self, root: Rect, bounds: impl Fn(NodeId) -> Option<Rect>) -> Vec<Entry> {
        let area = self.options.root_margin.resolve(root);
        let mut batch = Vec::new();
        for tracked in &mut self.targets {
            let Some(rect) = bounds(tracked.node) else {
                continue;
            };
            let (is_intersecting, ratio) = measure(rect, area);
            let state = (self.options.threshold_index(ratio), is_intersecting);
            if tracked.last != Some(state) {
                tracked.last = Some(state);
                batch.push(Entry {
                    target: tracked.node,
                    is_intersecting,
                    ratio,
                    bounds: rect,
                });
            }
        }
        batch
    }
}

/// Measures `target` against `area`, returning `(is_intersecting, ratio)`.
///
/// Edge-adjacent rectangles intersect with ratio 0. A zero-area target that
/// intersects has ratio 1. An inverted `area` (a margin larger than the root)
/// intersects nothing.
#[must_use]
pub fn measure(target: Rect, area: Rect) -> (bool, f64) {
    if area.x1 < area.x0 || area.y1 < area.y0 {
        return (false, 0.0);
    }
    let intersects = target.x0 <= area.x1
        && area.x0 <= target.x1
        && target.y0 <= area.y1
        && area.y0 <= target.y1;
    if !intersects {
        return (false, 0.0);
    }
    let target_area = target.area();
    if target_area <= 0.0 {
        return (true, 1.0);
    }
    let overlap = target.intersect(area).area();
    (true, (overlap / target_area).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::RootMargin;

    const VIEW: Rect = Rect::new(0.0, 0.0, 400.0, 1000.0);

    #[test]
    fn measure_ratio_and_adjacency() {
        let half = Rect::new(0.0, 900.0, 100.0, 1100.0);
        assert_eq!(measure(half, VIEW), (true, 0.5));

        let touching = Rect::new(0.0, 1000.0, 100.0, 1200.0);
        assert_eq!(measure(touching, VIEW), (true, 0.0));

        let below = Rect::new(0.0, 1001.0, 100.0, 1200.0);
        assert_eq!(measure(below, VIEW), (false, 0.0));

        let inverted = Rect::new(0.0, 500.0, 400.0, 400.0);
        assert_eq!(measure(half, inverted), (false, 0.0));
    }

    #[test]
    fn reports_only_on_crossings() {
        let mut tracker = Tracker::new(WatchOptions::viewport(&[0.35, 0.5, 0.65]));
        let node = NodeId(0);
        tracker.observe(node);

        // First update always reports, even when far away.
        let far = |_: NodeId| Some(Rect::new(0.0, 2000.0, 100.0, 2100.0));
        assert_eq!(tracker.update(VIEW, far).len(), 1);
        assert!(tracker.update(VIEW, far).is_empty(), "no change, no report");

        // 40% visible: crosses 0.35 and starts intersecting.
        let forty = |_: NodeId| Some(Rect::new(0.0, 960.0, 100.0, 1060.0));
        let batch = tracker.update(VIEW, forty);
        assert_eq!(batch.len(), 1);
        assert!(batch[0].is_intersecting);
        assert!((batch[0].ratio - 0.4).abs() < 1e-9);

        // 45% visible: same threshold bucket.
        let forty_five = |_: NodeId| Some(Rect::new(0.0, 955.0, 100.0, 1055.0));
        assert!(tracker.update(VIEW, forty_five).is_empty());

        // 70% visible: crosses 0.5 and 0.65 at once, one report.
        let seventy = |_: NodeId| Some(Rect::new(0.0, 930.0, 100.0, 1030.0));
        assert_eq!(tracker.update(VIEW, seventy).len(), 1);
    }

    #[test]
    fn band_margin_limits_intersection() {
        let options =
            WatchOptions::viewport(&[0.0]).with_margin(RootMargin::vertical_band(30.0, 60.0));
        let mut tracker = Tracker::new(options);
        tracker.observe(NodeId(1));
        tracker.observe(NodeId(2));

        let batch = tracker.update(VIEW, |n| {
            Some(match n.index() {
                1 => Rect::new(0.0, 320.0, 100.0, 380.0),
                _ => Rect::new(0.0, 500.0, 100.0, 560.0),
            })
        });
        assert_eq!(batch.len(), 2);
        assert!(batch[0].is_intersecting);
        assert!(!batch[1].is_intersecting);
    }

    #[test]
    fn unobserve_and_missing_bounds() {
        let mut tracker = Tracker::new(WatchOptions::viewport(&[0.0]));
        tracker.observe(NodeId(3));
        tracker.observe(NodeId(3));
        assert_eq!(tracker.len(), 1);

        assert!(tracker.update(VIEW, |_| None).is_empty());
        tracker.unobserve(NodeId(3));
        assert!(tracker.is_empty());
    }
}
