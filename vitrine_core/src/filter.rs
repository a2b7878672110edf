// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag filter that dims non-matching cards.

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use crate::config::FilterConfig;
use crate::node::NodeId;
use crate::surface::Surface;
use crate::trace::{FilterEvent, Tracer};

/// A filter control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pill {
    /// The pill element.
    pub node: NodeId,
    /// Its filter tag, if declared.
    pub filter: Option<String>,
}

/// A filterable card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// The card element.
    pub node: NodeId,
    /// Its tags.
    pub tags: BTreeSet<String>,
}

impl Card {
    /// Creates a card from a whitespace-separated tag attribute.
    #[must_use]
    pub fn new(node: NodeId, tags: Option<&str>) -> Self {
        Self {
            node,
            tags: tags
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Marks one pill active and dims cards that lack its tag.
#[derive(Clone, Debug)]
pub struct FilterController {
    config: FilterConfig,
    pills: Vec<Pill>,
    cards: Vec<Card>,
    active: Option<NodeId>,
}

impl FilterController {
    /// Creates a controller over `pills` and `cards`.
    #[must_use]
    pub fn new(config: FilterConfig, pills: Vec<Pill>, cards: Vec<Card>) -> Self {
        Self {
            config,
            pills,
            cards,
            active: None,
        }
    }

    /// The pills, in document order.
    #[must_use]
    pub fn pills(&self) -> &[Pill] {
        &self.pills
    }

    /// The selected pill.
    #[must_use]
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Whether a card is dimmed under `filter`.
    ///
    /// A pill without a filter tag matches nothing.
    #[must_use]
    pub fn dims(&self, card: &Card, filter: Option<&str>) -> bool {
        match filter {
            Some(f) if f == self.config.all => false,
            Some(f) => !card.tags.contains(f),
            None => true,
        }
    }

    /// Handles a click on `pill`. Unknown pills are ignored.
    pub fn select(&mut self, pill: NodeId, surface: &mut impl Surface, tracer: &mut Tracer<'_>) {
        let Some(selected) = self.pills.iter().find(|p| p.node == pill) else {
            return;
        };
        for p in &self.pills {
            surface.set_class(p.node, self.config.active_class, p.node == pill);
        }

        let filter = selected.filter.as_deref();
        let mut dimmed = 0;
        for card in &self.cards {
            let dim = self.dims(card, filter);
            dimmed += usize::from(dim);
            surface.set_class(card.node, self.config.dim_class, dim);
        }
        self.active = Some(pill);
        tracer.filter(&FilterEvent {
            pill,
            dimmed,
            total: self.cards.len(),
        });
    }
}
