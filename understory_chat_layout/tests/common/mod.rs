// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fake host for chat layout integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the fake host."
)]

use std::collections::VecDeque;

use kurbo::{Insets, Point, Rect, Size};
use understory_chat_layout::{
    CommitOutcome, Compensation, FlowLayoutEngine, ItemAttributes, ListChange,
    OffsetPreservingLayout, ScrollViewport,
};

pub(crate) const WIDTH: f64 = 320.0;

/// A single column of items with per-item heights.
///
/// Insertions pick their heights from `incoming`, in order, when the batch is
/// prepared; that mirrors an engine that re-measures during update preparation.
#[derive(Debug, Default)]
pub(crate) struct Column {
    pub(crate) heights: Vec<f64>,
    pub(crate) spacing: f64,
    pub(crate) incoming: VecDeque<f64>,
    pub(crate) finalized: usize,
}

impl Column {
    pub(crate) fn uniform(len: usize, height: f64) -> Self {
        Self {
            heights: vec![height; len],
            ..Self::default()
        }
    }

    pub(crate) fn content_height(&self) -> f64 {
        let items: f64 = self.heights.iter().sum();
        let gaps = self.heights.len().saturating_sub(1) as f64 * self.spacing;
        items + gaps
    }

    fn top_of(&self, index: usize) -> f64 {
        self.heights[..index].iter().map(|h| h + self.spacing).sum()
    }
}

impl FlowLayoutEngine for Column {
    fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes> {
        (0..self.heights.len())
            .filter_map(|i| self.attributes_for_item(i))
            .filter(|a| !a.frame.intersect(rect).is_zero_area())
            .collect()
    }

    fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes> {
        let height = *self.heights.get(index)?;
        let y0 = self.top_of(index);
        Some(ItemAttributes::new(
            index,
            Rect::new(0.0, y0, WIDTH, y0 + height),
        ))
    }

    fn line_spacing(&self) -> f64 {
        self.spacing
    }

    fn prepare_for_updates(&mut self, changes: &[ListChange]) {
        for change in changes {
            match *change {
                ListChange::Remove { at: Some(at) } if at < self.heights.len() => {
                    self.heights.remove(at);
                }
                ListChange::Insert { at: Some(at) } if at <= self.heights.len() => {
                    let height = self.incoming.pop_front().unwrap_or(64.0);
                    self.heights.insert(at, height);
                }
                _ => {}
            }
        }
    }

    fn finalize_updates(&mut self) {
        self.finalized += 1;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Instant(Point),
    Animated(Point),
    BeginSuppressed,
    CommitSuppressed,
}

/// Viewport that records every mutation made through it.
#[derive(Debug)]
pub(crate) struct RecordingViewport {
    pub(crate) offset: Point,
    pub(crate) size: Size,
    pub(crate) insets: Insets,
    pub(crate) content_height: f64,
    pub(crate) calls: Vec<Call>,
}

impl RecordingViewport {
    pub(crate) fn new(offset_y: f64, height: f64, content_height: f64) -> Self {
        Self {
            offset: Point::new(0.0, offset_y),
            size: Size::new(WIDTH, height),
            insets: Insets::ZERO,
            content_height,
            calls: Vec::new(),
        }
    }

    pub(crate) fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.offset,
            Size::new(self.size.width, self.size.height - self.insets.y_value()),
        )
    }

    pub(crate) fn open_scopes(&self) -> isize {
        self.calls.iter().fold(0, |open, call| match call {
            Call::BeginSuppressed => open + 1,
            Call::CommitSuppressed => open - 1,
            _ => open,
        })
    }
}

impl ScrollViewport for RecordingViewport {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn frame_size(&self) -> Size {
        self.size
    }

    fn content_insets(&self) -> Insets {
        self.insets
    }

    fn content_height(&self) -> f64 {
        self.content_height
    }

    fn set_offset_instant(&mut self, offset: Point) {
        self.offset = offset;
        self.calls.push(Call::Instant(offset));
    }

    fn set_offset_animated(&mut self, offset: Point) {
        self.offset = offset;
        self.calls.push(Call::Animated(offset));
    }

    fn begin_suppressed_animations(&mut self) {
        self.calls.push(Call::BeginSuppressed);
    }

    fn commit_suppressed_animations(&mut self) {
        self.calls.push(Call::CommitSuppressed);
    }
}

/// A layout plus viewport driven through full update cycles.
#[derive(Debug)]
pub(crate) struct Host {
    pub(crate) layout: OffsetPreservingLayout<Column>,
    pub(crate) viewport: RecordingViewport,
}

impl Host {
    /// A list of `len` items of `height`, scrolled to `offset_y` in a viewport
    /// `viewport_height` tall.
    pub(crate) fn new(len: usize, height: f64, offset_y: f64, viewport_height: f64) -> Self {
        let column = Column::uniform(len, height);
        let content_height = column.content_height();
        Self {
            layout: OffsetPreservingLayout::new(column),
            viewport: RecordingViewport::new(offset_y, viewport_height, content_height),
        }
    }

    /// Runs a layout pass over the current viewport rectangle.
    pub(crate) fn layout_pass(&mut self) {
        let rect = self.viewport.visible_rect();
        self.layout.layout_attributes_in(rect);
    }

    /// Runs one update cycle: layout pass, `will_update`, structural change,
    /// `did_update`.
    pub(crate) fn cycle(&mut self, changes: &[ListChange]) -> (Compensation, CommitOutcome) {
        self.layout_pass();
        let armed = self.layout.will_update(&mut self.viewport, changes);
        self.viewport.content_height = self.layout.engine().content_height();
        let outcome = self.layout.did_update(&mut self.viewport);
        (armed, outcome)
    }
}
