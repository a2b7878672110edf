// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking one winner from a notification batch.
//!
//! The story scroller, the tab highlighter and the timeline highlighter all
//! reduce a batch to a single node the same way and differ only in how a
//! candidate is scored:
//!
//! - [`MaxRatio`] prefers the most visible node.
//! - [`NearestLine`] prefers the node whose vertical center is closest to a
//!   horizontal line.
//!
//! Only intersecting entries are candidates. [`Selection`] keeps the last
//! winner so that a batch without candidates changes nothing.

use crate::node::NodeId;
use crate::observe::Entry;

/// Ranks a candidate entry. Higher scores win.
pub trait Score {
    /// Returns the score of `entry`.
    fn score(&self, entry: &Entry) -> f64;
}

impl<F: Fn(&Entry) -> f64> Score for F {
    fn score(&self, entry: &Entry) -> f64 {
        self(entry)
    }
}

/// Scores by visibility ratio.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxRatio;

impl Score for MaxRatio {
    fn score(&self, entry: &Entry) -> f64 {
        entry.ratio
    }
}

/// Scores by closeness of the entry's vertical center to `y`.
#[derive(Clone, Copy, Debug)]
pub struct NearestLine {
    /// The line, in the same coordinate space as [`Entry::bounds`].
    pub y: f64,
}

impl NearestLine {
    /// Distance from `entry`'s vertical center to the line.
    #[must_use]
    pub fn distance(&self, entry: &Entry) -> f64 {
        (entry.center_y() - self.y).abs()
    }
}

impl Score for NearestLine {
    fn score(&self, entry: &Entry) -> f64 {
        -self.distance(entry)
    }
}

/// Which candidate wins when several share the best score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The earliest in batch order.
    #[default]
    First,
    /// The latest in batch order.
    Last,
}

/// A winning entry and its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pick {
    /// The winning node.
    pub node: NodeId,
    /// Its score.
    pub score: f64,
    /// How many intersecting candidates the batch had.
    pub candidates: usize,
}

/// Returns the best intersecting entry of `batch`, or `None` if no entry is
/// intersecting.
#[must_use]
pub fn best(batch: &[Entry], scoring: &impl Score, tie: TieBreak) -> Option<Pick> {
    let mut winner: Option<Pick> = None;
    let mut candidates = 0;
    for entry in batch.iter().filter(|e| e.is_intersecting) {
        candidates += 1;
        let score = scoring.score(entry);
        let better = match winner {
            None => true,
            Some(w) => match tie {
                TieBreak::First => score > w.score,
                TieBreak::Last => score >= w.score,
            },
        };
        if better {
            winner = Some(Pick {
                node: entry.target,
                score,
                candidates: 0,
            });
        }
    }
    winner.map(|w| Pick { candidates, ..w })
}

/// The retained winner of a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<NodeId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The currently selected node.
    #[must_use]
    pub const fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Selects `node` unconditionally.
    pub fn set(&mut self, node: NodeId) {
        self.current = Some(node);
    }

    /// Picks the best entry of `batch` and makes it current.
    ///
    /// Returns the pick, or `None` (leaving the selection untouched) when the
    /// batch has no intersecting entry.
    pub fn update(&mut self, batch: &[Entry], scoring: &impl Score, tie: TieBreak) -> Option<Pick> {
        let pick = best(batch, scoring, tie)?;
        self.current = Some(pick.node);
        Some(pick)
    }
}
