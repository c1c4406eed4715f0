// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams: the flow-layout engine being wrapped and the scrolling viewport.

use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};

use crate::{ItemAttributes, ListChange};

/// A list layout engine that positions items in a vertical flow.
///
/// This is the engine [`OffsetPreservingLayout`](crate::OffsetPreservingLayout)
/// wraps. Implementations own sizing and positioning; the wrapper only reads
/// from them and forwards update notifications.
pub trait FlowLayoutEngine {
    /// Returns baseline attributes for every item whose frame lies in `rect`.
    fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes>;

    /// Returns attributes for the item at `index`, or `None` if the index is
    /// outside the current layout.
    fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes>;

    /// Vertical spacing inserted between consecutive items.
    fn line_spacing(&self) -> f64;

    /// Called with the pending batch before the structural update is applied.
    fn prepare_for_updates(&mut self, changes: &[ListChange]) {
        let _ = changes;
    }

    /// Called once the structural update has been applied.
    fn finalize_updates(&mut self) {}
}

/// The scrolling surface that displays the list.
pub trait ScrollViewport {
    /// Current scroll position in content coordinates.
    fn content_offset(&self) -> Point;

    /// Size of the viewport's frame.
    fn frame_size(&self) -> Size;

    /// Content insets; `y0` is the top inset and `y1` the bottom inset.
    fn content_insets(&self) -> Insets;

    /// Total height of laid out content.
    fn content_height(&self) -> f64;

    /// Moves the scroll position without animation.
    fn set_offset_instant(&mut self, offset: Point);

    /// Moves the scroll position with the host's scrolling animation.
    fn set_offset_animated(&mut self, offset: Point);

    /// Opens a scope in which implicit animations are suppressed.
    fn begin_suppressed_animations(&mut self);

    /// Closes the scope opened by
    /// [`begin_suppressed_animations`](Self::begin_suppressed_animations).
    fn commit_suppressed_animations(&mut self);
}

impl<E: FlowLayoutEngine + ?Sized> FlowLayoutEngine for &mut E {
    fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes> {
        (**self).layout_attributes_in(rect)
    }

    fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes> {
        (**self).attributes_for_item(index)
    }

    fn line_spacing(&self) -> f64 {
        (**self).line_spacing()
    }

    fn prepare_for_updates(&mut self, changes: &[ListChange]) {
        (**self).prepare_for_updates(changes);
    }

    fn finalize_updates(&mut self) {
        (**self).finalize_updates();
    }
}
