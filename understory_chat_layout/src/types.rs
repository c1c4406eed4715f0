// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain data exchanged with the host list.

use kurbo::{Insets, Point, Rect, Size};

use crate::ScrollViewport;

/// Layout attributes for one item: its position in the list plus its frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemAttributes {
    /// Position of the item in the flat, ordered item sequence.
    pub index: usize,
    /// Frame of the item in content coordinates.
    pub frame: Rect,
}

impl ItemAttributes {
    /// Creates attributes for `index` laid out at `frame`.
    #[must_use]
    pub const fn new(index: usize, frame: Rect) -> Self {
        Self { index, frame }
    }

    /// Returns the height of the item's frame.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.frame.height()
    }
}

/// One structural edit in a batch of pending list changes.
///
/// Indices are `None` when the host could not resolve them (its "not found"
/// sentinel). Insert and reload positions refer to the post-update item
/// order; remove positions refer to the pre-update order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListChange {
    /// An item will appear at `at`.
    Insert {
        /// Index after the update.
        at: Option<usize>,
    },
    /// The item at `at` will be removed.
    Remove {
        /// Index before the update.
        at: Option<usize>,
    },
    /// An item moves from `from` to `to`.
    Move {
        /// Index before the update.
        from: Option<usize>,
        /// Index after the update.
        to: Option<usize>,
    },
    /// The item at `at` is reloaded in place.
    Reload {
        /// Index after the update.
        at: Option<usize>,
    },
}

impl ListChange {
    /// Shorthand for an insertion at a resolved index.
    #[must_use]
    pub const fn insert(at: usize) -> Self {
        Self::Insert { at: Some(at) }
    }

    /// Shorthand for a removal at a resolved index.
    #[must_use]
    pub const fn remove(at: usize) -> Self {
        Self::Remove { at: Some(at) }
    }

    /// Returns the target index of an insertion, if this is one and it resolved.
    #[must_use]
    pub const fn inserted_index(&self) -> Option<usize> {
        match *self {
            Self::Insert { at } => at,
            _ => None,
        }
    }
}

/// Snapshot of a host viewport taken once per update cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportMetrics {
    /// Current scroll position.
    pub content_offset: Point,
    /// Size of the viewport's frame.
    pub frame_size: Size,
    /// Content insets. Only the vertical ones (`y0` top, `y1` bottom) matter here.
    pub insets: Insets,
    /// Total height of laid out content.
    pub content_height: f64,
}

impl ViewportMetrics {
    /// Reads the current metrics from a viewport.
    #[must_use]
    pub fn read<V: ScrollViewport + ?Sized>(viewport: &V) -> Self {
        Self {
            content_offset: viewport.content_offset(),
            frame_size: viewport.frame_size(),
            insets: viewport.content_insets(),
            content_height: viewport.content_height(),
        }
    }

    /// Frame height minus the top and bottom insets.
    #[must_use]
    pub fn effective_height(&self) -> f64 {
        self.frame_size.height - self.insets.y_value()
    }

    /// The visible window in content coordinates.
    ///
    /// The origin sits at the scroll offset; the height is the effective height.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.content_offset,
            Size::new(self.frame_size.width, self.effective_height()),
        )
    }

    /// Scroll offset that pins the bottom edge after `delta` more content.
    #[must_use]
    pub fn bottom_pinned_offset(&self, delta: f64) -> Point {
        Point::new(
            self.content_offset.x,
            self.content_height + delta - self.frame_size.height + self.insets.y1,
        )
    }
}
