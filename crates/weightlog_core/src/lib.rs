//! Core domain logic for weightlog.
//! This crate is the single source of truth for business invariants.

pub mod chart;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use chart::aggregate::{aggregate, axis_range, AxisRange, ChartPoint, ChartSeries};
pub use chart::period::{NavDirection, Period, PeriodBounds, PeriodKind};
pub use chart::view::{ChartController, ChartDisplay, ChartEvent, ChartView, LoadRequest};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId};
pub use model::entry::{EntryId, EntryValidationError, Mood, WeightEntry};
pub use repo::account_repo::{AccountRecord, AccountRepository, SqliteAccountRepository};
pub use repo::entry_repo::{
    EntryListQuery, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::account_service::{AccountService, AccountServiceError};
pub use service::chart_service::ChartService;
pub use service::demo_data::{generate_demo_entries, DemoDataPlan};
pub use service::entry_service::{EntryService, NewEntryRequest};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
