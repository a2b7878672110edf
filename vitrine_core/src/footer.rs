// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Footer copyright year.

use alloc::string::ToString as _;

use crate::node::NodeId;
use crate::surface::Surface;

/// Writes `year` into the footer year slot, if the page has one.
pub fn stamp_year(slot: Option<NodeId>, year: u32, surface: &mut impl Surface) {
    if let Some(node) = slot {
        surface.set_text(node, &year.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn year_is_written_when_slot_exists() {
        let mut surface = MemorySurface::new();
        let slot = surface.insert();
        stamp_year(Some(slot), 2026, &mut surface);
        assert_eq!(surface.text(slot), Some("2026"));
        stamp_year(None, 2027, &mut surface);
        assert_eq!(surface.text(slot), Some("2026"));
    }
}
