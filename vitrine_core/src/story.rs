// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven narrative.
//!
//! Each step element declares a step number. On every batch the most visible
//! intersecting step wins; every step element carrying that number gets the
//! active class. When all four display targets exist and the number maps to
//! a [`StepRecord`], the display shows the record's title and body, a
//! progress bar at `n / total` and a status line. The heads-up mirror is
//! updated alongside only when both of its elements exist.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::StoryConfig;
use crate::node::NodeId;
use crate::observe::{Entry, WatchOptions};
use crate::select::{MaxRatio, Selection, TieBreak};
use crate::surface::Surface;
use crate::trace::{BatchEvent, Group, SelectEvent, StoryStepEvent, Tracer};

/// Title and body shown for one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Headline.
    pub title: &'static str,
    /// Supporting text.
    pub body: &'static str,
}

impl StepRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(title: &'static str, body: &'static str) -> Self {
        Self { title, body }
    }
}

/// A step element and its declared number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// The element.
    pub node: NodeId,
    /// Declared step number, if it parsed.
    pub number: Option<u32>,
}

/// Parses a step-number attribute.
#[must_use]
pub fn parse_step(attr: Option<&str>) -> Option<u32> {
    attr?.trim().parse().ok()
}

/// Elements the story writes to. Any of them may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoryDisplay {
    /// Title text.
    pub title: Option<NodeId>,
    /// Body text.
    pub body: Option<NodeId>,
    /// Progress bar (width).
    pub progress: Option<NodeId>,
    /// Status text.
    pub status: Option<NodeId>,
    /// Heads-up label text.
    pub hud_label: Option<NodeId>,
    /// Heads-up bar (width).
    pub hud_bar: Option<NodeId>,
}

/// Text and widths rendered for a step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepView {
    /// Step number.
    pub step: u32,
    /// Headline.
    pub title: &'static str,
    /// Supporting text.
    pub body: &'static str,
    /// Progress in percent.
    pub progress_pct: f64,
    /// CSS width for the progress bars.
    pub width: String,
    /// Status line, e.g. `Step 3 of 5`.
    pub status: String,
    /// Heads-up label, e.g. `Step 3 / 5`.
    pub hud_label: String,
}

/// Updates the narrative display as steps scroll by.
#[derive(Clone, Debug)]
pub struct StoryScroller {
    config: StoryConfig,
    steps: Vec<Step>,
    display: StoryDisplay,
    selection: Selection,
}

impl StoryScroller {
    /// Creates a scroller over `steps` writing to `display`.
    #[must_use]
    pub fn new(config: StoryConfig, steps: Vec<Step>, display: StoryDisplay) -> Self {
        Self {
            config,
            steps,
            display,
            selection: Selection::new(),
        }
    }

    /// Options the watcher for the steps should use.
    #[must_use]
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions::viewport(self.config.thresholds)
    }

    /// The step elements, in document order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Total number of steps the progress is measured against.
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.config.records.len()).unwrap_or(u32::MAX)
    }

    /// The step number currently selected.
    #[must_use]
    pub fn current_step(&self) -> Option<u32> {
        let node = self.selection.current()?;
        self.number_of(node)
    }

    fn number_of(&self, node: NodeId) -> Option<u32> {
        self.steps.iter().find(|s| s.node == node)?.number
    }

    /// Renders step `n`, or `None` if no record exists for it.
    #[must_use]
    pub fn view(&self, n: u32) -> Option<StepView> {
        let index = usize::try_from(n.checked_sub(1)?).ok()?;
        let record = self.config.records.get(index)?;
        let total = self.total();
        let progress_pct = f64::from(n) * 100.0 / f64::from(total);
        Some(StepView {
            step: n,
            title: record.title,
            body: record.body,
            progress_pct,
            width: format!("{progress_pct}%"),
            status: format!("Step {n} of {total}"),
            hud_label: format!("Step {n} / {total}"),
        })
    }

    /// Handles a notification batch.
    pub fn on_batch(
        &mut self,
        batch: &[Entry],
        surface: &mut impl Surface,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.batch(&BatchEvent {
            group: Group::Story,
            entries: batch.len(),
            intersecting: batch.iter().filter(|e| e.is_intersecting).count(),
        });

        let Some(pick) = self.selection.update(batch, &MaxRatio, TieBreak::First) else {
            return;
        };
        tracer.select(&SelectEvent {
            group: Group::Story,
            node: pick.node,
            score: pick.score,
            candidates: pick.candidates,
        });

        let number = self.number_of(pick.node);
        for step in &self.steps {
            let active = number.is_some() && step.number == number;
            surface.set_class(step.node, self.config.active_class, active);
        }

        let Some(n) = number else {
            return;
        };
        let view = self.view(n);
        let displayed = self.render(view.as_ref(), surface);
        tracer.story_step(&StoryStepEvent {
            step: n,
            total: self.total(),
            progress_pct: view.map_or(0.0, |v| v.progress_pct),
            displayed,
        });
    }

    /// Writes `view` to the display. Returns `false` if nothing was written.
    fn render(&self, view: Option<&StepView>, surface: &mut impl Surface) -> bool {
        let d = self.display;
        let (Some(title), Some(body), Some(progress), Some(status), Some(view)) =
            (d.title, d.body, d.progress, d.status, view)
        else {
            return false;
        };
        surface.set_text(title, view.title);
        surface.set_text(body, view.body);
        surface.set_style(progress, "width", &view.width);
        surface.set_text(status, &view.status);

        if let (Some(label), Some(bar)) = (d.hud_label, d.hud_bar) {
            surface.set_text(label, &view.hud_label);
            surface.set_style(bar, "width", &view.width);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::surface::MemorySurface;
    use alloc::vec;
    use kurbo::Rect;

    struct Fixture {
        surface: MemorySurface,
        steps: Vec<NodeId>,
        display: StoryDisplay,
    }

    fn fixture(with_hud: bool) -> Fixture {
        let mut surface = MemorySurface::new();
        let steps = (0..5).map(|_| surface.insert()).collect();
        let display = StoryDisplay {
            title: Some(surface.insert()),
            body: Some(surface.insert()),
            progress: Some(surface.insert()),
            status: Some(surface.insert()),
            hud_label: with_hud.then(|| surface.insert()),
            hud_bar: with_hud.then(|| surface.insert()),
        };
        Fixture {
            surface,
            steps,
            display,
        }
    }

    fn scroller(f: &Fixture, display: StoryDisplay) -> StoryScroller {
        let steps = f
            .steps
            .iter()
            .zip(1..)
            .map(|(&node, n)| Step {
                node,
                number: Some(n),
            })
            .collect();
        StoryScroller::new(PageConfig::portfolio().story, steps, display)
    }

    fn entry(node: NodeId, is_intersecting: bool, ratio: f64) -> Entry {
        Entry {
            target: node,
            is_intersecting,
            ratio,
            bounds: Rect::ZERO,
        }
    }

    #[test]
    fn most_visible_step_drives_display() {
        let mut f = fixture(true);
        let mut story = scroller(&f, f.display);
        let batch = [entry(f.steps[1], true, 0.4), entry(f.steps[2], true, 0.6)];
        story.on_batch(&batch, &mut f.surface, &mut Tracer::none());

        assert_eq!(story.current_step(), Some(3));
        let d = f.display;
        assert_eq!(f.surface.style(d.progress.unwrap(), "width"), Some("60%"));
        assert_eq!(f.surface.text(d.status.unwrap()), Some("Step 3 of 5"));
        assert_eq!(
            f.surface.text(d.title.unwrap()),
            Some("Options & trade-offs proposed.")
        );
        assert_eq!(f.surface.text(d.hud_label.unwrap()), Some("Step 3 / 5"));
        assert_eq!(f.surface.style(d.hud_bar.unwrap(), "width"), Some("60%"));

        assert!(f.surface.has_class(f.steps[2], "is-active"));
        assert!(!f.surface.has_class(f.steps[1], "is-active"));
    }

    #[test]
    fn batch_without_intersection_keeps_step() {
        let mut f = fixture(false);
        let mut story = scroller(&f, f.display);
        let mut tracer = Tracer::none();
        story.on_batch(&[entry(f.steps[0], true, 0.5)], &mut f.surface, &mut tracer);
        story.on_batch(&[entry(f.steps[0], false, 0.0)], &mut f.surface, &mut tracer);

        assert_eq!(story.current_step(), Some(1));
        assert!(f.surface.has_class(f.steps[0], "is-active"));
        assert_eq!(f.surface.style(f.display.progress.unwrap(), "width"), Some("20%"));
    }

    #[test]
    fn missing_display_target_only_toggles_classes() {
        let mut f = fixture(true);
        let display = StoryDisplay {
            title: None,
            ..f.display
        };
        let mut story = scroller(&f, display);
        story.on_batch(&[entry(f.steps[4], true, 0.7)], &mut f.surface, &mut Tracer::none());

        assert!(f.surface.has_class(f.steps[4], "is-active"));
        assert_eq!(f.surface.text(f.display.status.unwrap()), None);
        assert_eq!(f.surface.text(f.display.hud_label.unwrap()), None);
    }

    #[test]
    fn unknown_step_number_has_no_record() {
        let mut f = fixture(false);
        let steps = vec![
            Step {
                node: f.steps[0],
                number: Some(9),
            },
            Step {
                node: f.steps[1],
                number: None,
            },
        ];
        let mut story = StoryScroller::new(PageConfig::portfolio().story, steps, f.display);
        story.on_batch(&[entry(f.steps[0], true, 0.5)], &mut f.surface, &mut Tracer::none());
        assert!(f.surface.has_class(f.steps[0], "is-active"));
        assert_eq!(f.surface.text(f.display.title.unwrap()), None);

        story.on_batch(&[entry(f.steps[1], true, 0.9)], &mut f.surface, &mut Tracer::none());
        assert!(!f.surface.has_class(f.steps[0], "is-active"));
        assert!(!f.surface.has_class(f.steps[1], "is-active"));
        assert_eq!(story.current_step(), None);
    }

    #[test]
    fn views_cover_every_record() {
        let f = fixture(false);
        let story = scroller(&f, f.display);
        let widths: Vec<String> = (1..=5).filter_map(|n| story.view(n)).map(|v| v.width).collect();
        assert_eq!(widths, ["20%", "40%", "60%", "80%", "100%"]);
        assert!(story.view(0).is_none());
        assert!(story.view(6).is_none());
        assert_eq!(parse_step(Some("4")), Some(4));
        assert_eq!(parse_step(Some("four")), None);
    }
}
