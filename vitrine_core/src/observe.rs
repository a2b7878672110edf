// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-change notifications and watch options.
//!
//! An [`Entry`] is one notification: which node changed, whether it is
//! intersecting the (margin-adjusted) root, its visibility ratio, and its
//! bounding rectangle at the time of the change. Notifications arrive in
//! batches; every component consumes a batch as `&[Entry]`.
//!
//! [`WatchOptions`] describes what the underlying primitive watches for:
//! the [`Root`], a CSS-style [`RootMargin`], and the ratio thresholds whose
//! crossings produce notifications. In the browser these map one-to-one onto
//! `IntersectionObserverInit`; on the host [`Tracker`](crate::tracker::Tracker)
//! evaluates them directly.

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::Rect;

use crate::node::NodeId;

/// One visibility-change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry {
    /// The node whose visibility changed.
    pub target: NodeId,
    /// Whether the node intersects the margin-adjusted root.
    pub is_intersecting: bool,
    /// Fraction of the node's box inside the margin-adjusted root, in `[0, 1]`.
    pub ratio: f64,
    /// The node's bounding rectangle in root coordinates.
    pub bounds: Rect,
}

impl Entry {
    /// Vertical center of the node's bounding rectangle.
    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.bounds.y0 + self.bounds.height() / 2.0
    }
}

/// The region visibility is measured against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Root {
    /// The top-level viewport.
    #[default]
    Viewport,
    /// A scrollable ancestor element.
    Element(NodeId),
}

/// One component of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute offset in CSS pixels.
    Px(f64),
    /// Offset relative to the root's size along the same axis.
    Percent(f64),
}

impl Length {
    /// The zero length (`0px`).
    pub const ZERO: Self = Self::Px(0.0);

    /// Resolves to pixels given the root extent along this component's axis.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarginParseError::InvalidLength(s.to_string());
        if let Some(num) = s.strip_suffix('%') {
            num.parse().map(Self::Percent).map_err(|_| invalid())
        } else if let Some(num) = s.strip_suffix("px") {
            num.parse().map(Self::Px).map_err(|_| invalid())
        } else if s.parse::<f64>().is_ok_and(|v| v == 0.0) {
            // CSS allows a unitless zero.
            Ok(Self::ZERO)
        } else {
            Err(invalid())
        }
    }
}

/// Errors from parsing a [`RootMargin`] string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarginParseError {
    /// The input contained no components.
    Empty,
    /// More than four components were given.
    TooManyParts(usize),
    /// A component was neither a pixel nor a percentage length.
    InvalidLength(String),
}

impl fmt::Display for MarginParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("root margin is empty"),
            Self::TooManyParts(n) => write!(f, "root margin has {n} components, expected 1 to 4"),
            Self::InvalidLength(s) => write!(f, "invalid root margin component `{s}`"),
        }
    }
}

impl core::error::Error for MarginParseError {}

/// Grows (positive) or shrinks (negative) the root before intersection is
/// computed, using CSS `margin` shorthand order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Offset applied above the root.
    pub top: Length,
    /// Offset applied right of the root.
    pub right: Length,
    /// Offset applied below the root.
    pub bottom: Length,
    /// Offset applied left of the root.
    pub left: Length,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl RootMargin {
    /// No margin.
    pub const ZERO: Self = Self {
        top: Length::ZERO,
        right: Length::ZERO,
        bottom: Length::ZERO,
        left: Length::ZERO,
    };

    /// A margin that only shrinks the root vertically, by the given
    /// percentages of its height.
    #[must_use]
    pub const fn vertical_band(top_pct: f64, bottom_pct: f64) -> Self {
        Self {
            top: Length::Percent(-top_pct),
            right: Length::ZERO,
            bottom: Length::Percent(-bottom_pct),
            left: Length::ZERO,
        }
    }

    /// Applies the margin to `root`, returning the rectangle intersection is
    /// measured against.
    #[must_use]
    pub fn resolve(&self, root: Rect) -> Rect {
        let (w, h) = (root.width(), root.height());
        Rect::new(
            root.x0 - self.left.resolve(w),
            root.y0 - self.top.resolve(h),
            root.x1 + self.right.resolve(w),
            root.y1 + self.bottom.resolve(h),
        )
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Length>, _>>()?;
        let [top, right, bottom, left] = match parts.as_slice() {
            [] => return Err(MarginParseError::Empty),
            &[all] => [all; 4],
            &[v, h] => [v, h, v, h],
            &[t, h, b] => [t, h, b, h],
            &[t, r, b, l] => [t, r, b, l],
            more => return Err(MarginParseError::TooManyParts(more.len())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

/// What a visibility watcher observes.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchOptions {
    /// Region visibility is measured against.
    pub root: Root,
    /// Adjustment applied to the root before measuring.
    pub root_margin: RootMargin,
    /// Ratios whose crossings produce notifications, ascending.
    pub thresholds: Vec<f64>,
}

impl WatchOptions {
    /// Watches the viewport with the given thresholds and no margin.
    ///
    /// Thresholds are clamped to `[0, 1]` and sorted.
    #[must_use]
    pub fn viewport(thresholds: &[f64]) -> Self {
        let mut thresholds: Vec<f64> = thresholds.iter().map(|t| t.clamp(0.0, 1.0)).collect();
        thresholds.sort_by(f64::total_cmp);
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        Self {
            root: Root::Viewport,
            root_margin: RootMargin::ZERO,
            thresholds,
        }
    }

    /// Replaces the root.
    #[must_use]
    pub fn with_root(mut self, root: Root) -> Self {
        self.root = root;
        self
    }

    /// Replaces the root margin.
    #[must_use]
    pub fn with_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Number of thresholds at or below `ratio`.
    #[must_use]
    pub fn threshold_index(&self, ratio: f64) -> usize {
        self.thresholds.iter().take_while(|&&t| t <= ratio).count()
    }
}
