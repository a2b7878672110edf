// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior configuration.
//!
//! Each behavior has a plain `Copy` config with public fields: the
//! selectors and attributes the backend uses to find its elements, the class
//! names it toggles, and its numeric tuning. [`PageConfig::portfolio`] is the
//! preset matching the showcase page markup; start from it and override
//! fields as needed.

use crate::observe::RootMargin;
use crate::story::StepRecord;

/// Where the timeline's center line sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CenterLine {
    /// Middle of the unadjusted root.
    #[default]
    Root,
    /// Middle of the margin-adjusted root (the band itself).
    Band,
}

/// Configuration for [`RevealController`](crate::reveal::RevealController).
#[derive(Clone, Copy, Debug)]
pub struct RevealConfig {
    /// Selects reveal targets.
    pub selector: &'static str,
    /// Attribute holding an optional transition delay in milliseconds.
    pub delay_attribute: &'static str,
    /// Class added on reveal.
    pub class: &'static str,
    /// Minimum visibility ratio that triggers a reveal.
    pub threshold: f64,
}

/// Configuration for [`StoryScroller`](crate::story::StoryScroller).
#[derive(Clone, Copy, Debug)]
pub struct StoryConfig {
    /// Selects step elements.
    pub step_selector: &'static str,
    /// Attribute holding a step's number.
    pub step_attribute: &'static str,
    /// Class marking the selected step.
    pub active_class: &'static str,
    /// Ratio crossings that produce notifications.
    pub thresholds: &'static [f64],
    /// Content shown per step; step `n` maps to `records[n - 1]`.
    pub records: &'static [StepRecord],
    /// Id of the title element.
    pub title_id: &'static str,
    /// Id of the body element.
    pub body_id: &'static str,
    /// Id of the progress bar element.
    pub progress_id: &'static str,
    /// Id of the status text element.
    pub status_id: &'static str,
    /// Id of the heads-up label element.
    pub hud_label_id: &'static str,
    /// Id of the heads-up bar element.
    pub hud_bar_id: &'static str,
}

/// Configuration for [`TabHighlighter`](crate::tabs::TabHighlighter).
#[derive(Clone, Copy, Debug)]
pub struct TabConfig {
    /// Selects tab links.
    pub tab_selector: &'static str,
    /// Ids of the watched sections, in page order.
    pub section_ids: &'static [&'static str],
    /// Class marking the active tab.
    pub active_class: &'static str,
    /// Ratio crossings that produce notifications.
    pub thresholds: &'static [f64],
}

/// Configuration for [`TimelineHighlighter`](crate::timeline::TimelineHighlighter).
#[derive(Clone, Copy, Debug)]
pub struct TimelineConfig {
    /// Selects timeline items.
    pub item_selector: &'static str,
    /// Id of the optional scroll container used as root.
    pub scroller_id: &'static str,
    /// Class marking the active item.
    pub active_class: &'static str,
    /// Share of the root height excluded above the band, in percent.
    pub margin_top_pct: f64,
    /// Share of the root height excluded below the band, in percent.
    pub margin_bottom_pct: f64,
    /// Line candidates are measured against.
    pub center_line: CenterLine,
}

impl TimelineConfig {
    /// The root margin leaving only the band.
    #[must_use]
    pub const fn root_margin(&self) -> RootMargin {
        RootMargin::vertical_band(self.margin_top_pct, self.margin_bottom_pct)
    }
}

/// Configuration for [`Carousel`](crate::carousel::Carousel).
#[derive(Clone, Copy, Debug)]
pub struct CarouselConfig {
    /// Selects the scrolling track.
    pub track_selector: &'static str,
    /// Selects cards inside the track.
    pub card_selector: &'static str,
    /// Selects the "previous" button.
    pub prev_selector: &'static str,
    /// Selects the "next" button.
    pub next_selector: &'static str,
    /// Class present while dragging.
    pub dragging_class: &'static str,
    /// Pointer events that end a drag, cancellation included.
    pub release_events: &'static [&'static str],
    /// Card width used when no card can be measured.
    pub fallback_card_width: f64,
    /// Gap between cards.
    pub gap: f64,
}

/// Configuration for [`FilterController`](crate::filter::FilterController).
#[derive(Clone, Copy, Debug)]
pub struct FilterConfig {
    /// Selects filter pills.
    pub pill_selector: &'static str,
    /// Selects filterable cards.
    pub card_selector: &'static str,
    /// Attribute holding a pill's filter tag.
    pub filter_attribute: &'static str,
    /// Attribute holding a card's whitespace-separated tags.
    pub tags_attribute: &'static str,
    /// Class marking the selected pill.
    pub active_class: &'static str,
    /// Class marking non-matching cards.
    pub dim_class: &'static str,
    /// Filter tag that matches every card.
    pub all: &'static str,
}

/// Configuration for [`Accordion`](crate::accordion::Accordion).
#[derive(Clone, Copy, Debug)]
pub struct AccordionConfig {
    /// Selects the disclosure elements of the group.
    pub details_selector: &'static str,
}

/// Configuration for every behavior on a page.
#[derive(Clone, Copy, Debug)]
pub struct PageConfig {
    /// Reveal on scroll.
    pub reveal: RevealConfig,
    /// Narrative steps.
    pub story: StoryConfig,
    /// Section tabs.
    pub tabs: TabConfig,
    /// Center-band timeline.
    pub timeline: TimelineConfig,
    /// Card carousel.
    pub carousel: CarouselConfig,
    /// Tag filter.
    pub filter: FilterConfig,
    /// Single-open accordion.
    pub accordion: AccordionConfig,
    /// Id of the element showing the current year.
    pub year_id: &'static str,
}

/// Thresholds shared by the story and tab selectors.
pub const SELECTION_THRESHOLDS: &[f64] = &[0.35, 0.5, 0.65];

/// Step content of the showcase page.
pub const PORTFOLIO_STEPS: &[StepRecord] = &[
    StepRecord::new(
        "Planning got blocked.",
        "Migration estimates became unreliable due to missing/unclear mini components needed for headless implementations.",
    ),
    StepRecord::new(
        "Dependency risk detected.",
        "I identified that the number of missing mini components would compound delays and risk in our headless migration plan.",
    ),
    StepRecord::new(
        "Options & trade-offs proposed.",
        "Option 1: build missing mini components to keep design token integration. Option 2: go without (faster now, weaker DS alignment).",
    ),
    StepRecord::new(
        "Decision secured.",
        "In the technical decision meeting, I aligned stakeholders and drove the technical narrative to secure buy-in for ownership.",
    ),
    StepRecord::new(
        "Team retained + migration unblocked.",
        "During downsizing pressure, this decision improved delivery confidence and kept the team intact while unblocking execution.",
    ),
];

impl PageConfig {
    /// Preset for the showcase page markup.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            reveal: RevealConfig {
                selector: "[data-reveal]",
                delay_attribute: "data-reveal-delay",
                class: "is-in",
                threshold: 0.14,
            },
            story: StoryConfig {
                step_selector: ".step",
                step_attribute: "data-step",
                active_class: "is-active",
                thresholds: SELECTION_THRESHOLDS,
                records: PORTFOLIO_STEPS,
                title_id: "storyTitle",
                body_id: "storyBody",
                progress_id: "storyProgress",
                status_id: "storyStatus",
                hud_label_id: "hudLabel",
                hud_bar_id: "hudBar",
            },
            tabs: TabConfig {
                tab_selector: ".tabbar .tab",
                section_ids: &["case", "impact", "senior", "contact"],
                active_class: "is-active",
                thresholds: SELECTION_THRESHOLDS,
            },
            timeline: TimelineConfig {
                item_selector: ".timeline__list .t",
                scroller_id: "timelineScroller",
                active_class: "is-active",
                margin_top_pct: 30.0,
                margin_bottom_pct: 60.0,
                center_line: CenterLine::Root,
            },
            carousel: CarouselConfig {
                track_selector: ".track",
                card_selector: ".cardx",
                prev_selector: ".car-btn.prev",
                next_selector: ".car-btn.next",
                dragging_class: "is-dragging",
                release_events: &["pointerup", "pointercancel"],
                fallback_card_width: 320.0,
                gap: 14.0,
            },
            filter: FilterConfig {
                pill_selector: ".pill",
                card_selector: ".cardx",
                filter_attribute: "data-filter",
                tags_attribute: "data-tags",
                active_class: "is-active",
                dim_class: "is-dim",
                all: "all",
            },
            accordion: AccordionConfig {
                details_selector: ".accordion details",
            },
            year_id: "year",
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use kurbo::Rect;

    #[test]
    fn portfolio_timeline_band_is_ten_percent() {
        let cfg = PageConfig::portfolio();
        let band = cfg
            .timeline
            .root_margin()
            .resolve(Rect::new(0.0, 0.0, 100.0, 1000.0));
        assert_eq!(band.height(), 100.0);
        assert_eq!(cfg.timeline.root_margin().to_string(), "-30% 0px -60% 0px");
    }

    #[test]
    fn portfolio_drag_ends_on_cancel() {
        let cfg = PageConfig::portfolio().carousel;
        assert!(
            cfg.release_events.contains(&"pointerup"),
            "pointerup must end a drag"
        );
        assert!(
            cfg.release_events.contains(&"pointercancel"),
            "a cancelled touch pan must end a drag"
        );
    }

    #[test]
    fn portfolio_timeline_uses_root_center() {
        let cfg = PageConfig::portfolio();
        assert_eq!(cfg.timeline.center_line, CenterLine::Root);
        assert_eq!(CenterLine::default(), CenterLine::Root);
    }

    #[test]
    fn portfolio_has_five_steps() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.story.records.len(), 5);
        assert_eq!(cfg.story.records[2].title, "Options & trade-offs proposed.");
    }
}
