// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_chat_layout --heading-base-level=0

//! Understory Chat Layout: scroll-offset preservation for transcript lists.
//!
//! Chat logs, consoles, and agent transcripts grow at both ends: older
//! history is loaded above the visible window and new messages arrive below
//! it. When the list already fills its viewport, both kinds of insertion move
//! what the user is looking at unless the scroll offset is corrected. This
//! crate computes and applies that correction around a host's list updates.
//!
//! The core concepts are:
//!
//! - [`FlowLayoutEngine`] and [`ScrollViewport`]: the two host seams. The
//!   engine sizes and positions items; the viewport owns the scroll offset,
//!   frame, insets, and content height.
//! - [`VisibleRange`]: the top-most and bottom-most item indices intersecting
//!   the viewport, captured before an update is applied.
//! - [`plan_update`]: classifies each pending insertion as landing above the
//!   window ([`InsertionSide::Top`]) or at/below it
//!   ([`InsertionSide::Bottom`]), sums the inserted heights, and arms a
//!   [`Compensation`] only if the content would overflow the viewport.
//! - [`UpdatePlan::commit`]: after the update, jumps the offset down by the
//!   delta for top insertions (or re-anchors to a chosen item), or animates to
//!   the new bottom edge for bottom insertions.
//! - [`OffsetPreservingLayout`]: wraps any [`FlowLayoutEngine`] and drives the
//!   above from `will_update` / `did_update` lifecycle hooks.
//!
//! This crate deliberately does **not** render, virtualize, or lay out items
//! itself. Host frameworks are responsible for:
//!
//! - Running layout passes through [`OffsetPreservingLayout::layout_attributes_in`]
//!   so the wrapper sees which items are currently realized.
//! - Calling [`OffsetPreservingLayout::will_update`] with the pending batch
//!   while the viewport still reflects the old content.
//! - Calling [`OffsetPreservingLayout::did_update`] after the structural
//!   change has been applied.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Point, Rect, Size};
//! use understory_chat_layout::{
//!     CommitOutcome, Compensation, FlowLayoutEngine, ItemAttributes, ListChange,
//!     OffsetPreservingLayout, ScrollViewport,
//! };
//!
//! // Rows 64 units tall, stacked without spacing.
//! struct Rows(usize);
//!
//! impl FlowLayoutEngine for Rows {
//!     fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes> {
//!         (0..self.0)
//!             .filter_map(|i| self.attributes_for_item(i))
//!             .filter(|a| !a.frame.intersect(rect).is_zero_area())
//!             .collect()
//!     }
//!     fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes> {
//!         let y = index as f64 * 64.0;
//!         (index < self.0).then(|| ItemAttributes::new(index, Rect::new(0.0, y, 320.0, y + 64.0)))
//!     }
//!     fn line_spacing(&self) -> f64 {
//!         0.0
//!     }
//! }
//!
//! struct View {
//!     offset: Point,
//!     content_height: f64,
//! }
//!
//! impl ScrollViewport for View {
//!     fn content_offset(&self) -> Point { self.offset }
//!     fn frame_size(&self) -> Size { Size::new(320.0, 320.0) }
//!     fn content_insets(&self) -> Insets { Insets::ZERO }
//!     fn content_height(&self) -> f64 { self.content_height }
//!     fn set_offset_instant(&mut self, offset: Point) { self.offset = offset; }
//!     fn set_offset_animated(&mut self, offset: Point) { self.offset = offset; }
//!     fn begin_suppressed_animations(&mut self) {}
//!     fn commit_suppressed_animations(&mut self) {}
//! }
//!
//! // Ten rows, scrolled to the bottom so rows 5..=9 are visible.
//! let mut layout = OffsetPreservingLayout::new(Rows(10));
//! let mut view = View { offset: Point::new(0.0, 320.0), content_height: 640.0 };
//! layout.layout_attributes_in(Rect::new(0.0, 320.0, 320.0, 640.0));
//!
//! // Load one older message above the window.
//! let armed = layout.will_update(&mut view, &[ListChange::insert(0)]);
//! assert_eq!(armed, Compensation::Top { delta: 64.0 });
//!
//! layout.engine_mut().0 = 11;
//! view.content_height = 704.0;
//! let outcome = layout.did_update(&mut view);
//!
//! // The offset moved down by one row, so rows 5..=9 stay where they were.
//! assert_eq!(outcome, CommitOutcome::Instant { offset: Point::new(0.0, 384.0) });
//! ```
//!
//! All positions live in the host's content coordinate space (typically
//! logical pixels), with `y` growing downwards.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
mod layout;
mod plan;
mod types;
mod visible;

pub use host::{FlowLayoutEngine, ScrollViewport};
pub use layout::OffsetPreservingLayout;
pub use plan::{
    CommitOutcome, Compensation, InsertionSide, UpdatePlan, classify_insertion, plan_update,
};
pub use types::{ItemAttributes, ListChange, ViewportMetrics};
pub use visible::VisibleRange;
