//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for UI integration: envelope structs with
//!   `ok` + `message`, never thrown errors.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD` strings; ids as UUID strings.

use chrono::{Datelike, Local, NaiveDate};
use uuid::Uuid;
use weightlog_core::db::open_db;
use weightlog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AccountId, AccountService, ChartController, ChartDisplay, ChartEvent, DemoDataPlan,
    EntryService, Mood, NewEntryRequest, PeriodKind, SqliteAccountRepository,
    SqliteEntryRepository, WeightEntry,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const LIST_DEFAULT_LIMIT: u32 = 30;
const LIST_LIMIT_MAX: u32 = 366;
const DB_FILE_NAME: &str = "weightlog.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Response envelope for account sign-up/sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Account ID in string form when `ok`.
    pub account_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl AccountActionResponse {
    fn success(message: impl Into<String>, account_id: String) -> Self {
        Self {
            ok: true,
            account_id: Some(account_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            account_id: None,
            message: message.into(),
        }
    }
}

/// Registers a new account.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn account_sign_up(username: String, password: String) -> AccountActionResponse {
    match with_account_service(|service| service.sign_up(&username, &password)) {
        Ok(account) => {
            AccountActionResponse::success("Account created.", account.uuid.to_string())
        }
        Err(err) => AccountActionResponse::failure(format!("account_sign_up failed: {err}")),
    }
}

/// Verifies credentials and returns the account ID used to scope entry
/// calls.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn account_sign_in(username: String, password: String) -> AccountActionResponse {
    match with_account_service(|service| service.sign_in(&username, &password)) {
        Ok(account) => AccountActionResponse::success("Signed in.", account.uuid.to_string()),
        Err(err) => AccountActionResponse::failure(format!("account_sign_in failed: {err}")),
    }
}

/// Generic action response envelope for entry commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional created entry ID.
    pub entry_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry_id: Option<String>) -> Self {
        Self {
            ok: true,
            entry_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// Records one daily entry.
///
/// Input semantics:
/// - `date`: `YYYY-MM-DD`.
/// - `mood`: one of `happy|neutral|motivated|tired|relaxed` when present.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add(
    account_id: String,
    date: String,
    weight_lbs: f64,
    notes: Option<String>,
    sleep_hours: Option<f64>,
    steps: Option<u32>,
    calories: Option<u32>,
    mood: Option<String>,
) -> EntryActionResponse {
    let account = match parse_account_id(&account_id) {
        Ok(account) => account,
        Err(message) => return EntryActionResponse::failure(message),
    };
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => return EntryActionResponse::failure(message),
    };
    let mood = match mood.as_deref().map(parse_mood).transpose() {
        Ok(mood) => mood,
        Err(message) => return EntryActionResponse::failure(message),
    };

    let request = NewEntryRequest {
        date,
        weight_lbs,
        notes,
        sleep_hours,
        steps,
        calories,
        mood,
    };

    match with_entry_service(|service| service.add_entry(account, request)) {
        Ok(entry_id) => EntryActionResponse::success("Entry saved.", Some(entry_id.to_string())),
        Err(err) => EntryActionResponse::failure(format!("entry_add failed: {err}")),
    }
}

/// List item returned by [`entry_list`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListItem {
    /// Stable entry ID in string form.
    pub entry_id: String,
    /// Entry date as `YYYY-MM-DD`.
    pub date: String,
    pub weight_lbs: f64,
    pub notes: Option<String>,
    pub sleep_hours: Option<f64>,
    pub steps: Option<u32>,
    pub calories: Option<u32>,
    /// Lowercase mood name when recorded.
    pub mood: Option<String>,
}

/// Response envelope for the entry history list.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListResponse {
    /// Items sorted newest-first.
    pub items: Vec<EntryListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
    /// Effective applied list limit.
    pub applied_limit: u32,
}

/// Lists entries newest-first for the history screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns deterministic envelope with applied limit.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list(account_id: String, limit: Option<u32>) -> EntryListResponse {
    let applied_limit = normalize_list_limit(limit);
    let account = match parse_account_id(&account_id) {
        Ok(account) => account,
        Err(message) => {
            return EntryListResponse {
                items: Vec::new(),
                message,
                applied_limit,
            }
        }
    };

    match with_entry_service(|service| service.list_recent(account, Some(applied_limit))) {
        Ok(entries) => {
            let items = entries.iter().map(to_entry_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No entries recorded yet.".to_string()
            } else {
                format!("Loaded {} entries.", items.len())
            };
            EntryListResponse {
                items,
                message,
                applied_limit,
            }
        }
        Err(err) => EntryListResponse {
            items: Vec::new(),
            message: format!("entry_list failed: {err}"),
            applied_limit,
        },
    }
}

/// Deletes one entry by stable ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(account_id: String, entry_id: String) -> EntryActionResponse {
    let account = match parse_account_id(&account_id) {
        Ok(account) => account,
        Err(message) => return EntryActionResponse::failure(message),
    };
    let entry_id = match Uuid::parse_str(entry_id.trim()) {
        Ok(id) => id,
        Err(_) => return EntryActionResponse::failure(format!("invalid entry id `{entry_id}`")),
    };

    match with_entry_service(|service| service.delete_entry(account, entry_id)) {
        Ok(()) => EntryActionResponse::success("Entry deleted.", None),
        Err(err) => EntryActionResponse::failure(format!("entry_delete failed: {err}")),
    }
}

/// Chart payload for the display surface.
///
/// `point_indices`/`point_values` are parallel arrays; `labels` holds one
/// string per X-axis slot. `axis_min`/`axis_max` absent means automatic
/// scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLoadResponse {
    pub ok: bool,
    /// True when the period holds no plottable entries.
    pub no_data: bool,
    pub period_label: String,
    pub labels: Vec<String>,
    pub point_indices: Vec<u32>,
    pub point_values: Vec<f64>,
    pub axis_min: Option<f64>,
    pub axis_max: Option<f64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ChartLoadResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            no_data: false,
            period_label: String::new(),
            labels: Vec::new(),
            point_indices: Vec::new(),
            point_values: Vec::new(),
            axis_min: None,
            axis_max: None,
            message: message.into(),
        }
    }
}

/// Loads the chart for one period.
///
/// Input semantics:
/// - `kind`: one of `week|month|year`.
/// - `anchor_date`: `YYYY-MM-DD`; today when absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn chart_load(
    account_id: String,
    kind: String,
    anchor_date: Option<String>,
) -> ChartLoadResponse {
    let account = match parse_account_id(&account_id) {
        Ok(account) => account,
        Err(message) => return ChartLoadResponse::failure(message),
    };
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(message) => return ChartLoadResponse::failure(message),
    };
    let anchor = match anchor_date {
        Some(raw) => match parse_date(&raw) {
            Ok(date) => date,
            Err(message) => return ChartLoadResponse::failure(message),
        },
        None => Local::now().date_naive(),
    };

    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return ChartLoadResponse::failure(format!("chart DB open failed: {err}")),
    };
    let repo = match SqliteEntryRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => return ChartLoadResponse::failure(format!("chart repo init failed: {err}")),
    };
    let service = weightlog_core::ChartService::new(repo);

    let mut controller = ChartController::new(kind, anchor);
    let request = controller.handle(ChartEvent::Refresh, anchor);
    let period_label = request.bounds.label.clone();

    match service.load(account, &controller, &request) {
        Some(ChartDisplay::Ready(view)) => ChartLoadResponse {
            ok: true,
            no_data: false,
            period_label: view.period_label,
            labels: view.series.labels,
            point_indices: view
                .series
                .points
                .iter()
                .map(|point| point.x_index as u32)
                .collect(),
            point_values: view.series.points.iter().map(|point| point.value).collect(),
            axis_min: view.axis.map(|axis| axis.min),
            axis_max: view.axis.map(|axis| axis.max),
            message: "Chart loaded.".to_string(),
        },
        Some(ChartDisplay::NoData) => ChartLoadResponse {
            ok: true,
            no_data: true,
            period_label,
            labels: Vec::new(),
            point_indices: Vec::new(),
            point_values: Vec::new(),
            axis_min: None,
            axis_max: None,
            message: "No weight data available for this period.".to_string(),
        },
        Some(ChartDisplay::Failed) | None => {
            ChartLoadResponse::failure("Failed to load data.".to_string())
        }
    }
}

/// Generates and stores a year of simulated entries for the account.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn demo_seed(account_id: String, year: Option<i32>) -> EntryActionResponse {
    let account = match parse_account_id(&account_id) {
        Ok(account) => account,
        Err(message) => return EntryActionResponse::failure(message),
    };
    let year = year.unwrap_or_else(|| Local::now().date_naive().year());

    let plan = DemoDataPlan::calendar_year(year);
    let mut rng = rand::thread_rng();
    match with_entry_service(|service| service.seed_demo_data(account, &plan, &mut rng)) {
        Ok(count) => {
            EntryActionResponse::success(format!("Generated {count} demo entries."), None)
        }
        Err(err) => EntryActionResponse::failure(format!("demo_seed failed: {err}")),
    }
}

fn to_entry_list_item(entry: &WeightEntry) -> EntryListItem {
    EntryListItem {
        entry_id: entry.uuid.to_string(),
        date: entry.date.format("%Y-%m-%d").to_string(),
        weight_lbs: entry.weight_lbs,
        notes: entry.notes.clone(),
        sleep_hours: entry.sleep_hours,
        steps: entry.steps,
        calories: entry.calories,
        mood: entry.mood.map(|mood| mood.to_string()),
    }
}

fn normalize_list_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => LIST_DEFAULT_LIMIT,
        Some(value) if value > LIST_LIMIT_MAX => LIST_LIMIT_MAX,
        Some(value) => value,
        None => LIST_DEFAULT_LIMIT,
    }
}

fn parse_account_id(raw: &str) -> Result<AccountId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid account id `{raw}`"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{raw}`; expected YYYY-MM-DD"))
}

fn parse_kind(raw: &str) -> Result<PeriodKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "week" => Ok(PeriodKind::Week),
        "month" => Ok(PeriodKind::Month),
        "year" => Ok(PeriodKind::Year),
        other => Err(format!("invalid period kind `{other}`; expected week|month|year")),
    }
}

fn parse_mood(raw: &str) -> Result<Mood, String> {
    Mood::parse_db(raw.trim().to_ascii_lowercase().as_str())
        .ok_or_else(|| format!("invalid mood `{raw}`"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("WEIGHTLOG_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_entry_service<T>(
    f: impl FnOnce(&EntryService<SqliteEntryRepository<'_>>) -> weightlog_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let repo = SqliteEntryRepository::try_new(&conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let service = EntryService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn with_account_service<T>(
    f: impl FnOnce(
        &AccountService<SqliteAccountRepository<'_>>,
    ) -> Result<T, weightlog_core::AccountServiceError>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("account DB open failed: {err}"))?;
    let repo = SqliteAccountRepository::try_new(&conn)
        .map_err(|err| format!("account repo init failed: {err}"))?;
    let service = AccountService::new(repo);
    f(&service).map_err(|err| err.to_string())
}
