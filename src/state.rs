//! Application state and the events that drive it.
//!
//! All interaction funnels through `AppState::dispatch`: the range selector
//! commit, the metric dropdown, marker clicks and container resizes. Each
//! event runs to completion before the next one is handled.

use crate::config::DEFAULT_METRIC;
use crate::detail::{self, DisplayFields};
use crate::engine::{diff_markers, recompute, Dimensions, MarkerDiff, RenderPlan};
use crate::{Metric, Record, RecordStore, YearRange};
use log::{debug, info, warn};
use std::rc::Rc;
use yew::Reducible;

/// What the user has currently chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub year_range: YearRange,
    pub metric: Metric,
    pub highlighted_year: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisEvent {
    /// Range selector released on a new interval.
    RangeCommitted(YearRange),
    MetricChanged(Metric),
    MarkerClicked(u16),
    /// Container width changed; selection is untouched.
    Resized(Dimensions),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    store: RecordStore,
    selection: Selection,
    /// Set by a marker click, consumed by the next range or metric recompute.
    clicked_since_recompute: bool,
    dimensions: Dimensions,
    plan: RenderPlan,
    last_diff: MarkerDiff,
}

impl AppState {
    /// Full year range, default metric, latest year highlighted.
    pub fn new(store: RecordStore, dimensions: Dimensions) -> Self {
        let year_range = store.year_bounds();
        let plan = recompute(store.records(), year_range, DEFAULT_METRIC, dimensions, None);
        let last_diff = diff_markers(&[], &plan.markers);
        AppState {
            selection: Selection {
                year_range,
                metric: DEFAULT_METRIC,
                highlighted_year: plan.highlighted,
            },
            store,
            clicked_since_recompute: false,
            dimensions,
            plan,
            last_diff,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// Reconciliation between the previous plan and the current one.
    pub fn last_diff(&self) -> &MarkerDiff {
        &self.last_diff
    }

    pub fn highlighted_record(&self) -> Option<&Record> {
        self.selection
            .highlighted_year
            .and_then(|year| self.store.get(year))
    }

    /// Panel contents; `None` clears the panel (empty range).
    pub fn detail(&self) -> Option<DisplayFields> {
        self.highlighted_record().map(detail::render)
    }

    pub fn dispatch(&mut self, event: VisEvent) {
        match event {
            VisEvent::RangeCommitted(range) => {
                let bounds = self.store.year_bounds();
                self.selection.year_range = match range.intersect(bounds) {
                    Some(clamped) => {
                        if clamped != range {
                            debug!("Clamped range {} to {}", range, clamped);
                        }
                        clamped
                    }
                    None => {
                        debug!("Range {} lies outside {}", range, bounds);
                        range
                    }
                };
                self.recompute_from_selection();
            }
            VisEvent::MetricChanged(metric) => {
                self.selection.metric = metric;
                self.recompute_from_selection();
            }
            VisEvent::MarkerClicked(year) => {
                if self.plan.set_highlight(year) {
                    info!("Marker {} selected", year);
                    self.selection.highlighted_year = Some(year);
                    self.clicked_since_recompute = true;
                    self.last_diff = diff_markers(&self.plan.markers, &self.plan.markers);
                } else {
                    warn!("Ignoring click on {}: not in the current view", year);
                }
            }
            VisEvent::Resized(dimensions) => {
                if dimensions == self.dimensions {
                    return;
                }
                self.dimensions = dimensions;
                self.apply(self.selection.highlighted_year);
            }
        }
    }

    fn recompute_from_selection(&mut self) {
        let preserve = if self.clicked_since_recompute {
            self.selection.highlighted_year
        } else {
            None
        };
        self.apply(preserve);
        self.clicked_since_recompute = false;
    }

    fn apply(&mut self, preserve: Option<u16>) {
        let next = recompute(
            self.store.records(),
            self.selection.year_range,
            self.selection.metric,
            self.dimensions,
            preserve,
        );
        self.last_diff = diff_markers(&self.plan.markers, &next.markers);
        debug!(
            "Markers: {} entered, {} updated, {} exited",
            self.last_diff.entered.len(),
            self.last_diff.updated.len(),
            self.last_diff.exited.len()
        );
        self.selection.highlighted_year = next.highlighted;
        self.plan = next;
    }
}

impl Reducible for AppState {
    type Action = VisEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.dispatch(action);
        Rc::new(next)
    }
}
