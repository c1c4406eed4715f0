// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible index range captured from cached item frames.

use core::ops::RangeInclusive;

use kurbo::Rect;

use crate::ItemAttributes;

/// The top-most and bottom-most item indices intersecting the viewport.
///
/// An empty range stands for the unset sentinels: a top bound of `+∞` and a
/// bottom bound of `-∞`. The comparison helpers keep those semantics, so with
/// nothing visible every insertion lies "above" the window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleRange {
    bounds: Option<(usize, usize)>,
}

impl VisibleRange {
    /// A range with both bounds unset.
    pub const EMPTY: Self = Self { bounds: None };

    /// Creates a range covering `top..=bottom`.
    ///
    /// The bounds are swapped if given out of order.
    #[must_use]
    pub fn new(top: usize, bottom: usize) -> Self {
        Self {
            bounds: Some((top.min(bottom), top.max(bottom))),
        }
    }

    /// Scans `attributes` for frames overlapping `viewport` with positive area.
    ///
    /// Frames that only touch the viewport's edge do not count as visible.
    #[must_use]
    pub fn capture<'a, I>(viewport: Rect, attributes: I) -> Self
    where
        I: IntoIterator<Item = &'a ItemAttributes>,
    {
        let mut range = Self::EMPTY;
        for attrs in attributes {
            if !attrs.frame.intersect(viewport).is_zero_area() {
                range.include(attrs.index);
            }
        }
        tracing::trace!(?range, "captured visible range");
        range
    }

    /// Widens the range so it contains `index`.
    pub fn include(&mut self, index: usize) {
        self.bounds = Some(match self.bounds {
            Some((top, bottom)) => (top.min(index), bottom.max(index)),
            None => (index, index),
        });
    }

    /// Returns `true` if no item is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Top-most visible index, or `None` when unset.
    #[must_use]
    pub fn top(&self) -> Option<usize> {
        self.bounds.map(|(top, _)| top)
    }

    /// Bottom-most visible index, or `None` when unset.
    #[must_use]
    pub fn bottom(&self) -> Option<usize> {
        self.bounds.map(|(_, bottom)| bottom)
    }

    /// Returns the range as an inclusive index range, if any item is visible.
    #[must_use]
    pub fn as_range(&self) -> Option<RangeInclusive<usize>> {
        self.bounds.map(|(top, bottom)| top..=bottom)
    }

    /// Evaluates `top + pending > index`.
    ///
    /// `pending` is the size of the whole batch, so an insertion counts as
    /// above the window if any amount of shifting by the rest of the batch
    /// could place it at or above the current top item.
    #[must_use]
    pub fn is_above(&self, index: usize, pending: usize) -> bool {
        match self.bounds {
            Some((top, _)) => top.saturating_add(pending) > index,
            None => true,
        }
    }

    /// Evaluates `bottom <= index`.
    #[must_use]
    pub fn is_at_or_below(&self, index: usize) -> bool {
        match self.bounds {
            Some((_, bottom)) => bottom <= index,
            None => true,
        }
    }
}
