// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-open disclosure group.

use alloc::vec::Vec;

use crate::node::NodeId;
use crate::surface::Surface;
use crate::trace::{AccordionEvent, Tracer};

/// Keeps at most one member of a disclosure group open.
#[derive(Clone, Debug, Default)]
pub struct Accordion {
    members: Vec<NodeId>,
    open: Option<NodeId>,
}

impl Accordion {
    /// Creates a group over `members`, all assumed closed.
    #[must_use]
    pub fn new(members: Vec<NodeId>) -> Self {
        Self {
            members,
            open: None,
        }
    }

    /// The members, in document order.
    #[must_use]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// The member last seen opening, if it is still open.
    #[must_use]
    pub fn open(&self) -> Option<NodeId> {
        self.open
    }

    /// Handles `node`'s open state changing to `open`.
    ///
    /// Opening a member closes every other member. Closing one leaves the
    /// rest untouched. Non-members are ignored.
    pub fn on_toggle(
        &mut self,
        node: NodeId,
        open: bool,
        surface: &mut impl Surface,
        tracer: &mut Tracer<'_>,
    ) {
        if !self.members.contains(&node) {
            return;
        }
        if !open {
            if self.open == Some(node) {
                self.open = None;
            }
            return;
        }

        let mut closed = 0;
        for &other in self.members.iter().filter(|&&m| m != node) {
            surface.set_open(other, false);
            closed += 1;
        }
        self.open = Some(node);
        tracer.accordion(&AccordionEvent {
            opened: node,
            closed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn group(n: usize) -> (MemorySurface, Vec<NodeId>, Accordion) {
        let mut surface = MemorySurface::new();
        let members: Vec<NodeId> = (0..n).map(|_| surface.insert()).collect();
        (surface, members.clone(), Accordion::new(members))
    }

    /// Mimics the host: the user flips one member, then the toggle event fires.
    fn user_sets(acc: &mut Accordion, surface: &mut MemorySurface, node: NodeId, open: bool) {
        surface.set_open(node, open);
        acc.on_toggle(node, open, surface, &mut Tracer::none());
    }

    #[test]
    fn opening_one_closes_the_other() {
        let (mut surface, m, mut acc) = group(2);
        let (a, b) = (m[0], m[1]);

        user_sets(&mut acc, &mut surface, a, true);
        user_sets(&mut acc, &mut surface, b, true);
        assert!(!surface.is_open(a));
        assert!(surface.is_open(b));

        user_sets(&mut acc, &mut surface, a, true);
        assert!(surface.is_open(a));
        assert!(!surface.is_open(b));
        assert_eq!(acc.open(), Some(a));
    }

    #[test]
    fn closing_does_not_reopen_others() {
        let (mut surface, m, mut acc) = group(3);
        user_sets(&mut acc, &mut surface, m[0], true);
        user_sets(&mut acc, &mut surface, m[1], true);
        user_sets(&mut acc, &mut surface, m[1], false);

        assert!(m.iter().all(|&n| !surface.is_open(n)));
        assert_eq!(acc.open(), None);
    }

    #[test]
    fn never_more_than_one_open() {
        let (mut surface, m, mut acc) = group(4);
        for &n in m.iter().chain(m.iter().rev()) {
            user_sets(&mut acc, &mut surface, n, true);
            let open = m.iter().filter(|&&x| surface.is_open(x)).count();
            assert_eq!(open, 1, "after opening {n}");
        }
    }

    #[test]
    fn non_member_is_ignored() {
        let (mut surface, m, mut acc) = group(2);
        let stranger = surface.insert();
        user_sets(&mut acc, &mut surface, m[0], true);
        user_sets(&mut acc, &mut surface, stranger, true);
        assert!(surface.is_open(m[0]));
        assert_eq!(acc.open(), Some(m[0]));
    }
}
