// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lifecycle wrapper hosts drive around each list update.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::{
    CommitOutcome, Compensation, FlowLayoutEngine, ItemAttributes, ListChange, ScrollViewport,
    UpdatePlan, ViewportMetrics, VisibleRange, plan_update,
};

/// A flow layout wrapper that keeps visible content still while items are
/// inserted near either end of the list.
///
/// The wrapper presents the same queries as the engine it wraps and adds two
/// lifecycle hooks the host drives around every structural update:
///
/// - [`will_update`](Self::will_update) before the change is applied, with
///   the viewport still in its pre-update state;
/// - [`did_update`](Self::did_update) once the change has been applied.
///
/// If the host abandons an update between the two, it calls
/// [`abort_update`](Self::abort_update) so that a suppressed-animation scope
/// opened for the cycle is closed again.
#[derive(Debug)]
pub struct OffsetPreservingLayout<L> {
    engine: L,
    visible_attributes: Option<Vec<ItemAttributes>>,
    pending: Option<UpdatePlan>,
    scroll_anchor: Option<usize>,
}

impl<L: FlowLayoutEngine> OffsetPreservingLayout<L> {
    /// Wraps `engine`.
    #[must_use]
    pub fn new(engine: L) -> Self {
        Self {
            engine,
            visible_attributes: None,
            pending: None,
            scroll_anchor: None,
        }
    }

    /// Returns a shared reference to the wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &L {
        &self.engine
    }

    /// Returns a mutable reference to the wrapped engine.
    pub fn engine_mut(&mut self) -> &mut L {
        &mut self.engine
    }

    /// Unwraps the engine.
    #[must_use]
    pub fn into_inner(self) -> L {
        self.engine
    }

    /// Runs the engine's layout pass for `rect` and caches the result.
    ///
    /// The cached attributes are what the next [`will_update`](Self::will_update)
    /// classifies against. The returned attributes are the engine's, unchanged.
    pub fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes> {
        self.cache_layout_pass(rect)
    }

    /// Returns the engine's attributes for the item at `index`.
    pub fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes> {
        self.engine.attributes_for_item(index)
    }

    /// Item whose top edge is re-anchored on the next top insertion.
    #[must_use]
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    /// Sets the item to re-anchor on the next committed top insertion.
    ///
    /// The anchor is used once and then cleared.
    pub fn set_scroll_anchor(&mut self, anchor: Option<usize>) {
        self.scroll_anchor = anchor;
    }

    /// The plan waiting for [`did_update`](Self::did_update), if any.
    #[must_use]
    pub fn pending_plan(&self) -> Option<&UpdatePlan> {
        self.pending.as_ref()
    }

    /// Prepares compensation for a batch of pending changes.
    ///
    /// Captures the visible range from the attributes cached by the last
    /// layout pass and the viewport's current rectangle, forwards `changes` to
    /// the engine, then classifies them. Returns the armed compensation.
    ///
    /// Does nothing before the first layout pass.
    pub fn will_update<V>(&mut self, viewport: &mut V, changes: &[ListChange]) -> Compensation
    where
        V: ScrollViewport + ?Sized,
    {
        if let Some(stale) = self.pending.take() {
            stale.abort(viewport);
        }
        let Some(attributes) = self.visible_attributes.as_deref() else {
            return Compensation::None;
        };

        let metrics = ViewportMetrics::read(&*viewport);
        let visible = VisibleRange::capture(metrics.visible_rect(), attributes);

        self.engine.prepare_for_updates(changes);
        let mut plan = plan_update(changes, visible, &mut self.engine, &metrics);
        plan.begin(viewport);
        let compensation = plan.compensation();
        self.pending = Some(plan);
        compensation
    }

    /// Applies the compensation prepared by [`will_update`](Self::will_update).
    ///
    /// Lets the engine finalize first, so anchor positions reflect the
    /// updated layout.
    pub fn did_update<V>(&mut self, viewport: &mut V) -> CommitOutcome
    where
        V: ScrollViewport + ?Sized,
    {
        self.engine.finalize_updates();
        match self.pending.take() {
            Some(plan) => plan.commit(&mut self.scroll_anchor, &mut self.engine, viewport),
            None => CommitOutcome::None,
        }
    }

    /// Drops the pending plan, closing any scope it opened on `viewport`.
    pub fn abort_update<V>(&mut self, viewport: &mut V)
    where
        V: ScrollViewport + ?Sized,
    {
        if let Some(plan) = self.pending.take() {
            plan.abort(viewport);
        }
    }

    fn cache_layout_pass(&mut self, rect: Rect) -> Vec<ItemAttributes> {
        let attributes = self.engine.layout_attributes_in(rect);
        self.visible_attributes = Some(attributes.clone());
        attributes
    }

    /// Forgets the cached layout pass, as when the list is detached.
    ///
    /// A plan that still holds a suppression scope is kept so that
    /// [`abort_update`](Self::abort_update) or the next
    /// [`will_update`](Self::will_update) can close it.
    pub fn invalidate(&mut self) {
        self.visible_attributes = None;
        if self
            .pending
            .as_ref()
            .is_some_and(|plan| !plan.suppresses_animations())
        {
            self.pending = None;
        }
    }
}

impl<L: FlowLayoutEngine> FlowLayoutEngine for OffsetPreservingLayout<L> {
    fn layout_attributes_in(&mut self, rect: Rect) -> Vec<ItemAttributes> {
        self.cache_layout_pass(rect)
    }

    fn attributes_for_item(&mut self, index: usize) -> Option<ItemAttributes> {
        self.engine.attributes_for_item(index)
    }

    fn line_spacing(&self) -> f64 {
        self.engine.line_spacing()
    }

    fn prepare_for_updates(&mut self, changes: &[ListChange]) {
        self.engine.prepare_for_updates(changes);
    }

    fn finalize_updates(&mut self) {
        self.engine.finalize_updates();
    }
}
