//! Weight entry use-case service.
//!
//! # Responsibility
//! - Provide stable add/list/delete entry points for core callers.
//! - Normalize form input (trimmed notes, blank-as-absent) before the
//!   repository validates and persists.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Service layer remains storage-agnostic.

use crate::model::account::AccountId;
use crate::model::entry::{EntryId, Mood, WeightEntry};
use crate::repo::entry_repo::{EntryListQuery, EntryRepository, RepoResult};
use crate::service::demo_data::{generate_demo_entries, DemoDataPlan};
use chrono::NaiveDate;
use rand::Rng;

/// Request model for recording one day's entry from form input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntryRequest {
    pub date: NaiveDate,
    pub weight_lbs: f64,
    /// Raw note text; blank after trim is stored as absent.
    pub notes: Option<String>,
    pub sleep_hours: Option<f64>,
    pub steps: Option<u32>,
    pub calories: Option<u32>,
    pub mood: Option<Mood>,
}

impl NewEntryRequest {
    /// A bare weight-only request for the given day.
    pub fn new(date: NaiveDate, weight_lbs: f64) -> Self {
        Self {
            date,
            weight_lbs,
            notes: None,
            sleep_hours: None,
            steps: None,
            calories: None,
            mood: None,
        }
    }

    fn into_entry(self) -> WeightEntry {
        let mut entry = WeightEntry::new(self.date, self.weight_lbs);
        entry.notes = self
            .notes
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        entry.sleep_hours = self.sleep_hours;
        entry.steps = self.steps;
        entry.calories = self.calories;
        entry.mood = self.mood;
        entry
    }
}

/// Use-case service wrapper for account-scoped entry operations.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records one entry from normalized form input.
    ///
    /// Returns the created stable entry ID; validation errors surface
    /// unchanged from the repository.
    pub fn add_entry(&self, account: AccountId, request: NewEntryRequest) -> RepoResult<EntryId> {
        self.repo.create_entry(account, &request.into_entry())
    }

    /// Gets one entry by stable ID.
    pub fn get_entry(&self, account: AccountId, id: EntryId) -> RepoResult<Option<WeightEntry>> {
        self.repo.get_entry(account, id)
    }

    /// Lists entries newest-first for the history screen.
    pub fn list_recent(
        &self,
        account: AccountId,
        limit: Option<u32>,
    ) -> RepoResult<Vec<WeightEntry>> {
        let query = EntryListQuery {
            newest_first: true,
            limit,
            ..EntryListQuery::default()
        };
        self.repo.list_entries(account, &query)
    }

    /// Lists entries for an inclusive date range, oldest first, as the
    /// chart fetch contract requires.
    pub fn list_range(
        &self,
        account: AccountId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<WeightEntry>> {
        self.repo
            .list_entries(account, &EntryListQuery::date_range(from, to))
    }

    /// Deletes one entry by stable ID. Returns `NotFound` when the account
    /// holds no such entry.
    pub fn delete_entry(&self, account: AccountId, id: EntryId) -> RepoResult<()> {
        self.repo.delete_entry(account, id)
    }

    /// Generates and batch-inserts simulated entries for demos and empty
    /// databases. Returns the inserted count.
    pub fn seed_demo_data(
        &self,
        account: AccountId,
        plan: &DemoDataPlan,
        rng: &mut impl Rng,
    ) -> RepoResult<usize> {
        let entries = generate_demo_entries(plan, rng);
        self.repo.create_entries(account, &entries)
    }
}
