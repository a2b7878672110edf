// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation tabs following the most visible section.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::TabConfig;
use crate::node::NodeId;
use crate::observe::{Entry, WatchOptions};
use crate::select::{MaxRatio, Selection, TieBreak};
use crate::surface::Surface;
use crate::trace::{BatchEvent, Group, SelectEvent, Tracer};

/// A watched page section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// The section element.
    pub node: NodeId,
    /// Its element id, as targeted by tab fragments.
    pub id: String,
}

/// A navigation tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    /// The tab element.
    pub node: NodeId,
    /// Its `href`, if any.
    pub href: Option<String>,
}

impl Tab {
    /// Returns `true` if this tab links to the fragment `#{id}`.
    #[must_use]
    pub fn targets(&self, id: &str) -> bool {
        self.href
            .as_deref()
            .and_then(|h| h.strip_prefix('#'))
            .is_some_and(|frag| frag == id)
    }
}

/// Marks the tab of the most visible section active.
#[derive(Clone, Debug)]
pub struct TabHighlighter {
    config: TabConfig,
    sections: Vec<Section>,
    tabs: Vec<Tab>,
    selection: Selection,
}

impl TabHighlighter {
    /// Creates a highlighter over `sections` and `tabs`.
    #[must_use]
    pub fn new(config: TabConfig, sections: Vec<Section>, tabs: Vec<Tab>) -> Self {
        Self {
            config,
            sections,
            tabs,
            selection: Selection::new(),
        }
    }

    /// Options the watcher for the sections should use.
    #[must_use]
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions::viewport(self.config.thresholds)
    }

    /// The watched sections.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Id of the currently selected section.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        let node = self.selection.current()?;
        self.section_id(node)
    }

    fn section_id(&self, node: NodeId) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.node == node)
            .map(|s| s.id.as_str())
    }

    /// Handles a notification batch.
    pub fn on_batch(
        &mut self,
        batch: &[Entry],
        surface: &mut impl Surface,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.batch(&BatchEvent {
            group: Group::Tabs,
            entries: batch.len(),
            intersecting: batch.iter().filter(|e| e.is_intersecting).count(),
        });
        let Some(pick) = self.selection.update(batch, &MaxRatio, TieBreak::First) else {
            return;
        };
        tracer.select(&SelectEvent {
            group: Group::Tabs,
            node: pick.node,
            score: pick.score,
            candidates: pick.candidates,
        });

        let id = self.section_id(pick.node);
        for tab in &self.tabs {
            let active = id.is_some_and(|id| tab.targets(id));
            surface.set_class(tab.node, self.config.active_class, active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::surface::MemorySurface;
    use alloc::format;
    use alloc::string::ToString as _;
    use kurbo::Rect;

    fn entry(node: NodeId, is_intersecting: bool, ratio: f64) -> Entry {
        Entry {
            target: node,
            is_intersecting,
            ratio,
            bounds: Rect::ZERO,
        }
    }

    fn page() -> (MemorySurface, Vec<NodeId>, Vec<NodeId>, TabHighlighter) {
        let cfg = PageConfig::portfolio().tabs;
        let mut surface = MemorySurface::new();
        let mut sections = Vec::new();
        let mut tabs = Vec::new();
        for id in cfg.section_ids {
            sections.push(Section {
                node: surface.insert(),
                id: id.to_string(),
            });
            tabs.push(Tab {
                node: surface.insert(),
                href: Some(format!("#{id}")),
            });
        }
        let section_nodes = sections.iter().map(|s| s.node).collect();
        let tab_nodes = tabs.iter().map(|t| t.node).collect();
        (surface, section_nodes, tab_nodes, TabHighlighter::new(cfg, sections, tabs))
    }

    #[test]
    fn most_visible_section_activates_its_tab() {
        let (mut surface, sections, tabs, mut hl) = page();
        let batch = [entry(sections[0], true, 0.35), entry(sections[1], true, 0.65)];
        hl.on_batch(&batch, &mut surface, &mut Tracer::none());

        assert_eq!(hl.current(), Some("impact"));
        assert!(surface.has_class(tabs[1], "is-active"));
        assert!(!surface.has_class(tabs[0], "is-active"));
    }

    #[test]
    fn selection_moves_exclusively() {
        let (mut surface, sections, tabs, mut hl) = page();
        let mut tracer = Tracer::none();
        hl.on_batch(&[entry(sections[0], true, 0.5)], &mut surface, &mut tracer);
        hl.on_batch(&[entry(sections[3], true, 0.5)], &mut surface, &mut tracer);
        let active: Vec<bool> = tabs.iter().map(|&t| surface.has_class(t, "is-active")).collect();
        assert_eq!(active, [false, false, false, true]);

        // Nothing intersecting: keep the contact tab.
        hl.on_batch(&[entry(sections[3], false, 0.0)], &mut surface, &mut tracer);
        assert!(surface.has_class(tabs[3], "is-active"));
    }

    #[test]
    fn tab_fragment_matching() {
        let tab = Tab {
            node: NodeId(0),
            href: Some("#case".into()),
        };
        assert!(tab.targets("case"));
        assert!(!tab.targets("cases"));
        let plain = Tab {
            node: NodeId(1),
            href: Some("case".into()),
        };
        assert!(!plain.targets("case"));
        assert!(
            !Tab {
                node: NodeId(2),
                href: None
            }
            .targets("case")
        );
    }
}
