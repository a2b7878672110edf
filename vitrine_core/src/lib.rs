// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-driven behaviors for a single presentational page.
//!
//! `vitrine_core` holds the logic of every page behavior with no browser
//! dependency. It is `no_std` compatible (with `alloc`). Elements are
//! addressed by opaque [`NodeId`](node::NodeId) handles handed out by a
//! backend, and every mutation goes through the [`Surface`](surface::Surface)
//! trait, so the same code drives the live DOM and the in-memory test double.
//!
//! # Architecture
//!
//! ```text
//!   Backend (IntersectionObserver / Tracker)
//!       │
//!       ▼
//!   &[Entry] batch ──► component.on_batch() ──► select::best(score, tie)
//!                              │
//!                              ▼
//!                       Surface::set_class / set_text / set_style
//!
//!   Backend (click / pointer / toggle) ──► Carousel / FilterController / Accordion
//! ```
//!
//! **[`observe`]**: Visibility entries, roots, CSS root margins and watch
//! options.
//!
//! **[`tracker`]**: Host-side model of the intersection primitive, used by
//! tests and native replays.
//!
//! **[`select`]**: The one selection strategy shared by the story, tabs and
//! timeline, parameterized by a [`Score`](select::Score) and a
//! [`TieBreak`](select::TieBreak).
//!
//! **[`reveal`]**, **[`story`]**, **[`tabs`]**, **[`timeline`]**,
//! **[`carousel`]**, **[`filter`]**, **[`accordion`]**, **[`footer`]**: The
//! page behaviors. Each is built once with its nodes and owns its state.
//!
//! **[`config`]**: Selectors, classes and constants, with the
//! [`PageConfig::portfolio`](config::PageConfig::portfolio) preset.
//!
//! **[`surface`]**: The mutation seam and [`MemorySurface`](surface::MemorySurface).
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod accordion;
pub mod carousel;
pub mod config;
pub mod filter;
pub mod footer;
pub mod node;
pub mod observe;
pub mod reveal;
pub mod select;
pub mod story;
pub mod surface;
pub mod tabs;
pub mod timeline;
pub mod trace;
pub mod tracker;
