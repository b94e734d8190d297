//! Chart use-case service.
//!
//! # Responsibility
//! - Execute chart load requests against entry storage and fold the result
//!   back through the screen state machine.
//!
//! # Invariants
//! - Fetches use the inclusive period bounds, date ascending, exactly as
//!   the aggregation contract expects.
//! - Completion goes through `ChartController::complete`, so stale-request
//!   discarding applies on this path too.

use crate::chart::view::{ChartController, ChartDisplay, ChartEvent, LoadRequest};
use crate::model::account::AccountId;
use crate::repo::entry_repo::{EntryListQuery, EntryRepository};
use chrono::NaiveDate;

/// Use-case service binding entry storage to the chart state machine.
pub struct ChartService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> ChartService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Executes one load request and folds the outcome into the controller.
    ///
    /// Returns `None` when a newer request superseded this one before
    /// completion.
    pub fn load(
        &self,
        account: AccountId,
        controller: &ChartController,
        request: &LoadRequest,
    ) -> Option<ChartDisplay> {
        let fetched = self.repo.list_entries(
            account,
            &EntryListQuery::date_range(request.bounds.start, request.bounds.end),
        );
        controller.complete(request, fetched)
    }

    /// Handles one screen event end-to-end on the synchronous path.
    ///
    /// The fetch completes before any further event can supersede it, so
    /// the completion is always current.
    pub fn dispatch(
        &self,
        account: AccountId,
        controller: &mut ChartController,
        event: ChartEvent,
        today: NaiveDate,
    ) -> ChartDisplay {
        let request = controller.handle(event, today);
        match self.load(account, controller, &request) {
            Some(display) => display,
            // A synchronous load completes before any superseding event.
            None => ChartDisplay::NoData,
        }
    }
}
