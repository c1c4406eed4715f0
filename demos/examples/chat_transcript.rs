// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ten 64-unit messages in a phone-sized viewport: load older history above
//! the window, then receive a new message below it, and print how the scroll
//! offset is corrected each time.

use kurbo::{Insets, Point, Rect, Size};
use understory_chat_layout::{
    FlowLayoutEngine, ItemAttributes, ListChange, OffsetPreservingLayout, ScrollViewport,
};

const ROW_HEIGHT: f64 = 64.0;
const WIDTH: f64 = 375.0;

struct Messages {
    len: usize,
}

impl FlowLayoutEngine for Messages {
    fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes> {
        (0..self.len)
            .filter_map(|i| self.attributes_for_item(i))
            .filter(|a| !a.frame.intersect(rect).is_zero_area())
            .collect()
    }

    fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes> {
        let y0 = index as f64 * ROW_HEIGHT;
        (index < self.len)
            .then(|| ItemAttributes::new(index, Rect::new(0.0, y0, WIDTH, y0 + ROW_HEIGHT)))
    }

    fn line_spacing(&self) -> f64 {
        0.0
    }

    fn prepare_for_updates(&mut self, changes: &[ListChange]) {
        self.len += changes.iter().filter_map(ListChange::inserted_index).count();
    }
}

struct Screen {
    offset: Point,
    content_height: f64,
}

impl ScrollViewport for Screen {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn frame_size(&self) -> Size {
        Size::new(WIDTH, 400.0)
    }

    fn content_insets(&self) -> Insets {
        Insets::new(0.0, 44.0, 0.0, 34.0)
    }

    fn content_height(&self) -> f64 {
        self.content_height
    }

    fn set_offset_instant(&mut self, offset: Point) {
        println!("  jump to y = {}", offset.y);
        self.offset = offset;
    }

    fn set_offset_animated(&mut self, offset: Point) {
        println!("  animate to y = {}", offset.y);
        self.offset = offset;
    }

    fn begin_suppressed_animations(&mut self) {
        println!("  (implicit animations off)");
    }

    fn commit_suppressed_animations(&mut self) {
        println!("  (implicit animations on)");
    }
}

fn run(
    layout: &mut OffsetPreservingLayout<Messages>,
    screen: &mut Screen,
    label: &str,
    changes: &[ListChange],
) {
    println!("{label}");
    let visible = Rect::from_origin_size(screen.offset, Size::new(WIDTH, 322.0));
    layout.layout_attributes_in(visible);
    let armed = layout.will_update(screen, changes);
    println!("  armed: {armed:?}");
    screen.content_height = layout.engine().len as f64 * ROW_HEIGHT;
    let outcome = layout.did_update(screen);
    println!("  outcome: {outcome:?}");
}

fn main() {
    let mut layout = OffsetPreservingLayout::new(Messages { len: 10 });
    let mut screen = Screen {
        offset: Point::new(0.0, 640.0 - 400.0 + 34.0),
        content_height: 640.0,
    };

    run(
        &mut layout,
        &mut screen,
        "load two older messages",
        &[ListChange::insert(0), ListChange::insert(1)],
    );
    run(
        &mut layout,
        &mut screen,
        "receive a new message",
        &[ListChange::insert(12)],
    );

    layout.set_scroll_anchor(Some(3));
    run(
        &mut layout,
        &mut screen,
        "load three more, anchored to the previous first message",
        &[
            ListChange::insert(0),
            ListChange::insert(1),
            ListChange::insert(2),
        ],
    );
}
