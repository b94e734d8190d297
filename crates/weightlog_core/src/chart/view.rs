//! Chart screen state machine.
//!
//! # Responsibility
//! - Hold the current `{kind, anchor}` pair and hand out load requests for
//!   every state change.
//! - Map completed fetches to terminal display states, discarding results
//!   that a newer request has superseded.
//!
//! # Invariants
//! - Every handled event bumps the load generation; at most one generation
//!   is current at a time (latest wins).
//! - A completion whose generation is not current returns `None` and leaves
//!   no trace on screen state.
//! - Fetch failures are terminal for that load; there is no automatic
//!   retry.

use crate::chart::aggregate::{aggregate, axis_range, AxisRange, ChartSeries};
use crate::chart::period::{NavDirection, Period, PeriodBounds, PeriodKind};
use crate::model::entry::WeightEntry;
use chrono::NaiveDate;
use log::{info, warn};
use std::fmt::Display;

/// Inputs the display surface can send to the chart screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    /// Exclusive mode selection; always re-anchors to today.
    SelectKind(PeriodKind),
    /// Prev/next navigation by one unit of the current kind.
    Navigate(NavDirection),
    /// Re-fetch the current period (after an entry add/delete).
    Refresh,
}

/// A load the storage collaborator should perform on behalf of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub kind: PeriodKind,
    pub bounds: PeriodBounds,
}

/// Everything the display surface needs to render a loaded chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub series: ChartSeries,
    /// `None` means the axis falls back to automatic scaling.
    pub axis: Option<AxisRange>,
    pub period_label: String,
}

/// Terminal display states for one completed load.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartDisplay {
    /// The period holds no plottable entries.
    NoData,
    /// The fetch failed; nothing is shown and nothing retries.
    Failed,
    Ready(ChartView),
}

/// State machine driving the period chart screen.
///
/// Fully re-derives its output on every event; there is no incremental
/// update path and no hidden state beyond `{kind, anchor, generation}`.
#[derive(Debug)]
pub struct ChartController {
    period: Period,
    generation: u64,
}

impl ChartController {
    /// Creates a controller showing the period of `kind` containing
    /// `today`. Call `request_load` to obtain the initial fetch.
    pub fn new(kind: PeriodKind, today: NaiveDate) -> Self {
        Self {
            period: Period::starting(kind, today),
            generation: 0,
        }
    }

    /// The period currently displayed.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Applies one screen event and returns the superseding load request.
    ///
    /// `today` re-anchors the period on mode selection; navigation and
    /// refresh ignore it.
    pub fn handle(&mut self, event: ChartEvent, today: NaiveDate) -> LoadRequest {
        match event {
            ChartEvent::SelectKind(kind) => {
                self.period = Period::starting(kind, today);
            }
            ChartEvent::Navigate(direction) => {
                self.period = self.period.shifted(direction);
            }
            ChartEvent::Refresh => {}
        }
        self.request_load()
    }

    /// Issues a fresh load request for the current period, superseding any
    /// request still in flight.
    pub fn request_load(&mut self) -> LoadRequest {
        self.generation += 1;
        let bounds = self.period.bounds();
        info!(
            "event=chart_load module=chart status=start kind={:?} start={} end={} generation={}",
            self.period.kind, bounds.start, bounds.end, self.generation
        );
        LoadRequest {
            generation: self.generation,
            kind: self.period.kind,
            bounds,
        }
    }

    /// Folds a completed fetch into a display state.
    ///
    /// Returns `None` when the request was superseded while in flight; the
    /// stale result must not be rendered.
    pub fn complete<E: Display>(
        &self,
        request: &LoadRequest,
        fetched: Result<Vec<WeightEntry>, E>,
    ) -> Option<ChartDisplay> {
        if request.generation != self.generation {
            info!(
                "event=chart_load module=chart status=discarded generation={} current={}",
                request.generation, self.generation
            );
            return None;
        }

        let entries = match fetched {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "event=chart_load module=chart status=error generation={} error={err}",
                    request.generation
                );
                return Some(ChartDisplay::Failed);
            }
        };

        let series = aggregate(
            request.kind,
            &entries,
            request.bounds.start,
            request.bounds.end,
        );
        if series.is_empty() {
            return Some(ChartDisplay::NoData);
        }

        let axis = axis_range(&series.points);
        Some(ChartDisplay::Ready(ChartView {
            series,
            axis,
            period_label: request.bounds.label.clone(),
        }))
    }
}
