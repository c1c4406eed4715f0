// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cycle planning and committing of scroll compensation.
//!
//! An update cycle is modeled as a single [`UpdatePlan`] value:
//!
//! 1) [`plan_update`] classifies the pending insertions against the visible
//!    range captured *before* the update and decides whether compensation is
//!    armed.
//! 2) [`UpdatePlan::begin`] opens the animation-suppression scope when a top
//!    compensation is armed.
//! 3) [`UpdatePlan::commit`] applies the offset once the host has applied the
//!    structural change, or [`UpdatePlan::abort`] closes the scope if the
//!    update is abandoned.
//!
//! Nothing in the plan outlives the cycle; only the caller's scroll anchor is
//! carried between cycles, and it is cleared when a top compensation uses it.

use kurbo::Point;

use crate::{FlowLayoutEngine, ListChange, ScrollViewport, ViewportMetrics, VisibleRange};

/// Where an insertion lands relative to the visible window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InsertionSide {
    /// Above the top-most visible item.
    Top,
    /// At or below the bottom-most visible item.
    Bottom,
}

/// Classifies an insertion at `index` in a batch of `pending` changes.
///
/// Top is checked first and uses the size of the whole batch as slack for
/// index shifting. Bottom applies only when top does not.
#[must_use]
pub fn classify_insertion(
    visible: VisibleRange,
    index: usize,
    pending: usize,
) -> Option<InsertionSide> {
    if visible.is_above(index, pending) {
        Some(InsertionSide::Top)
    } else if visible.is_at_or_below(index) {
        Some(InsertionSide::Bottom)
    } else {
        None
    }
}

/// Compensation armed for an update cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Compensation {
    /// The list has slack space or nothing qualified; the engine's default
    /// positioning stands.
    #[default]
    None,
    /// Items were inserted above the window; shift the offset down by `delta`
    /// without animation.
    Top {
        /// Accumulated height of the inserted items, spacing included.
        delta: f64,
    },
    /// Items were appended below the window; animate to the new bottom edge.
    Bottom {
        /// Accumulated height of the inserted items, spacing included.
        delta: f64,
    },
}

impl Compensation {
    /// Returns `true` unless this is [`Compensation::None`].
    #[must_use]
    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Offset change applied when a plan is committed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CommitOutcome {
    /// The scroll offset was left alone.
    #[default]
    None,
    /// The offset jumped to `offset` without animation.
    Instant {
        /// New scroll offset.
        offset: Point,
    },
    /// The offset is animating to `offset`.
    Animated {
        /// Target scroll offset.
        offset: Point,
    },
}

/// The state of one update cycle, from classification to commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdatePlan {
    visible: VisibleRange,
    content_height: f64,
    delta: f64,
    classified_top: bool,
    classified_bottom: bool,
    compensation: Compensation,
    animations_suppressed: bool,
}

/// Classifies `changes` and decides whether compensation is armed.
///
/// `visible` must be captured from the pre-update layout; `metrics` is the
/// pre-update viewport. Each insertion classified as top or bottom adds the
/// height reported by `engine` plus its line spacing to the delta. An
/// insertion without attributes is skipped: it neither counts as top or
/// bottom nor adds to the delta. Compensation is armed only when
/// `content_height + delta` exceeds the effective viewport height.
pub fn plan_update<E>(
    changes: &[ListChange],
    visible: VisibleRange,
    engine: &mut E,
    metrics: &ViewportMetrics,
) -> UpdatePlan
where
    E: FlowLayoutEngine + ?Sized,
{
    let mut plan = UpdatePlan {
        visible,
        content_height: metrics.content_height,
        ..UpdatePlan::default()
    };
    let pending = changes.len();
    let spacing = engine.line_spacing();

    for change in changes {
        let Some(index) = change.inserted_index() else {
            continue;
        };
        let Some(side) = classify_insertion(visible, index, pending) else {
            continue;
        };
        // An insertion the engine cannot size is not classified at all.
        let Some(attrs) = engine.attributes_for_item(index) else {
            continue;
        };
        tracing::trace!(index, ?side, "classified insertion");
        plan.delta += attrs.height() + spacing;
        match side {
            InsertionSide::Top => plan.classified_top = true,
            InsertionSide::Bottom => plan.classified_bottom = true,
        }
    }

    if (plan.classified_top || plan.classified_bottom)
        && metrics.content_height + plan.delta > metrics.effective_height()
    {
        plan.compensation = if plan.classified_top {
            Compensation::Top { delta: plan.delta }
        } else {
            Compensation::Bottom { delta: plan.delta }
        };
        tracing::debug!(compensation = ?plan.compensation, "armed scroll compensation");
    }
    plan
}

impl UpdatePlan {
    /// The visible range the plan was classified against.
    #[must_use]
    pub fn visible(&self) -> VisibleRange {
        self.visible
    }

    /// Content height before the update.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Sum of heights plus spacing over every classified insertion.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns `true` if any insertion was classified as top.
    #[must_use]
    pub fn classified_top(&self) -> bool {
        self.classified_top
    }

    /// Returns `true` if any insertion was classified as bottom.
    #[must_use]
    pub fn classified_bottom(&self) -> bool {
        self.classified_bottom
    }

    /// The armed compensation.
    #[must_use]
    pub fn compensation(&self) -> Compensation {
        self.compensation
    }

    /// Returns `true` while this plan holds an open suppression scope.
    #[must_use]
    pub fn suppresses_animations(&self) -> bool {
        self.animations_suppressed
    }

    /// Opens the animation-suppression scope if a top compensation is armed.
    ///
    /// Calling this more than once opens at most one scope.
    pub fn begin<V: ScrollViewport + ?Sized>(&mut self, viewport: &mut V) {
        if matches!(self.compensation, Compensation::Top { .. }) && !self.animations_suppressed {
            viewport.begin_suppressed_animations();
            self.animations_suppressed = true;
        }
    }

    /// Applies the armed compensation after the structural update.
    ///
    /// For a top compensation, `anchor` is taken: if the engine reports a
    /// frame for it, that frame's top edge replaces the accumulated delta.
    /// The anchor is left untouched on every other path.
    ///
    /// A bottom compensation pins to the content height seen at planning
    /// time plus the delta, using the viewport's frame and bottom inset as
    /// they are at commit time.
    pub fn commit<E, V>(
        mut self,
        anchor: &mut Option<usize>,
        engine: &mut E,
        viewport: &mut V,
    ) -> CommitOutcome
    where
        E: FlowLayoutEngine + ?Sized,
        V: ScrollViewport + ?Sized,
    {
        let outcome = match self.compensation {
            Compensation::Top { mut delta } => {
                if let Some(attrs) = anchor.take().and_then(|a| engine.attributes_for_item(a)) {
                    delta = attrs.frame.y0;
                }
                let current = viewport.content_offset();
                let offset = Point::new(current.x, current.y + delta);
                viewport.set_offset_instant(offset);
                CommitOutcome::Instant { offset }
            }
            Compensation::Bottom { delta } => {
                let metrics = ViewportMetrics {
                    content_height: self.content_height,
                    ..ViewportMetrics::read(&*viewport)
                };
                let offset = metrics.bottom_pinned_offset(delta);
                viewport.set_offset_animated(offset);
                CommitOutcome::Animated { offset }
            }
            Compensation::None => CommitOutcome::None,
        };
        self.close_scope(viewport);
        if outcome != CommitOutcome::None {
            tracing::debug!(?outcome, "committed scroll compensation");
        }
        outcome
    }

    /// Abandons the plan, closing any suppression scope it opened.
    pub fn abort<V: ScrollViewport + ?Sized>(mut self, viewport: &mut V) {
        self.close_scope(viewport);
    }

    fn close_scope<V: ScrollViewport + ?Sized>(&mut self, viewport: &mut V) {
        if self.animations_suppressed {
            viewport.commit_suppressed_animations();
            self.animations_suppressed = false;
        }
    }
}
