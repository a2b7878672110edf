// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal on scroll.
//!
//! A target is revealed the first time it is reported intersecting at or
//! above the configured ratio: its transition delay (if any) is applied as an
//! inline style, the reveal class is added, and the target is handed back to
//! the caller to stop watching. Revealed targets never change again.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::vec::Vec;

use crate::config::RevealConfig;
use crate::node::NodeId;
use crate::observe::{Entry, WatchOptions};
use crate::surface::Surface;
use crate::trace::{BatchEvent, Group, RevealEvent, Tracer};

/// A node awaiting reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTarget {
    /// The node.
    pub node: NodeId,
    /// Transition delay applied on reveal.
    pub delay_ms: Option<u32>,
}

/// Parses a delay attribute value. Missing, empty or non-numeric values mean
/// no delay.
#[must_use]
pub fn parse_delay(attr: Option<&str>) -> Option<u32> {
    attr?.trim().parse().ok()
}

/// Reveals targets once as they scroll into view.
#[derive(Clone, Debug)]
pub struct RevealController {
    config: RevealConfig,
    pending: Vec<RevealTarget>,
    revealed: BTreeSet<NodeId>,
}

impl RevealController {
    /// Creates a controller for the given targets.
    #[must_use]
    pub fn new(config: RevealConfig, targets: impl IntoIterator<Item = RevealTarget>) -> Self {
        Self {
            config,
            pending: targets.into_iter().collect(),
            revealed: BTreeSet::new(),
        }
    }

    /// Options the watcher for this controller should use.
    #[must_use]
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions::viewport(&[self.config.threshold])
    }

    /// Nodes not yet revealed.
    pub fn pending(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pending.iter().map(|t| t.node)
    }

    /// Returns `true` if `node` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    /// Handles a notification batch.
    ///
    /// Returns the nodes revealed by this batch; the caller should stop
    /// watching them.
    pub fn on_batch(
        &mut self,
        batch: &[Entry],
        surface: &mut impl Surface,
        tracer: &mut Tracer<'_>,
    ) -> Vec<NodeId> {
        tracer.batch(&BatchEvent {
            group: Group::Reveal,
            entries: batch.len(),
            intersecting: batch.iter().filter(|e| e.is_intersecting).count(),
        });

        let mut done = Vec::new();
        for entry in batch {
            if !entry.is_intersecting || entry.ratio < self.config.threshold {
                continue;
            }
            let Some(pos) = self.pending.iter().position(|t| t.node == entry.target) else {
                continue;
            };
            let target = self.pending.swap_remove(pos);
            if let Some(ms) = target.delay_ms {
                surface.set_style(target.node, "transition-delay", &format!("{ms}ms"));
            }
            surface.set_class(target.node, self.config.class, true);
            self.revealed.insert(target.node);
            tracer.reveal(&RevealEvent {
                node: target.node,
                delay_ms: target.delay_ms,
            });
            done.push(target.node);
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::surface::MemorySurface;
    use kurbo::Rect;

    fn entry(node: NodeId, is_intersecting: bool, ratio: f64) -> Entry {
        Entry {
            target: node,
            is_intersecting,
            ratio,
            bounds: Rect::ZERO,
        }
    }

    fn setup() -> (MemorySurface, NodeId, NodeId, RevealController) {
        let mut surface = MemorySurface::new();
        let a = surface.insert();
        let b = surface.insert();
        let ctl = RevealController::new(
            PageConfig::portfolio().reveal,
            [
                RevealTarget {
                    node: a,
                    delay_ms: Some(120),
                },
                RevealTarget {
                    node: b,
                    delay_ms: None,
                },
            ],
        );
        (surface, a, b, ctl)
    }

    #[test]
    fn delay_parsing() {
        assert_eq!(parse_delay(Some("120")), Some(120));
        assert_eq!(parse_delay(Some(" 80 ")), Some(80));
        assert_eq!(parse_delay(Some("")), None);
        assert_eq!(parse_delay(Some("soon")), None);
        assert_eq!(parse_delay(None), None);
    }

    #[test]
    fn reveals_once_with_delay() {
        let (mut surface, a, b, mut ctl) = setup();
        let mut tracer = Tracer::none();

        let done = ctl.on_batch(&[entry(a, true, 0.2)], &mut surface, &mut tracer);
        assert_eq!(done, [a]);
        assert!(surface.has_class(a, "is-in"));
        assert_eq!(surface.style(a, "transition-delay"), Some("120ms"));
        assert!(ctl.is_revealed(a));
        assert_eq!(ctl.pending().collect::<Vec<_>>(), [b]);

        // Leaving and re-entering never touches a revealed node again.
        assert!(ctl.on_batch(&[entry(a, false, 0.0)], &mut surface, &mut tracer).is_empty());
        assert!(ctl.on_batch(&[entry(a, true, 0.9)], &mut surface, &mut tracer).is_empty());
        assert!(surface.has_class(a, "is-in"));
    }

    #[test]
    fn below_threshold_does_not_reveal() {
        let (mut surface, _, b, mut ctl) = setup();
        let mut tracer = Tracer::none();

        assert!(ctl.on_batch(&[entry(b, true, 0.1)], &mut surface, &mut tracer).is_empty());
        assert!(!surface.has_class(b, "is-in"));

        ctl.on_batch(&[entry(b, true, 0.14)], &mut surface, &mut tracer);
        assert!(surface.has_class(b, "is-in"));
        assert_eq!(surface.style(b, "transition-delay"), None, "no delay attribute");
    }

    #[test]
    fn watch_options_use_threshold() {
        let (_, _, _, ctl) = setup();
        assert_eq!(ctl.watch_options().thresholds, [0.14]);
    }
}
