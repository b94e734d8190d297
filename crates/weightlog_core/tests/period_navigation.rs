use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use weightlog_core::db::open_db_in_memory;
use weightlog_core::{
    AccountId, AccountRepository, ChartController, ChartDisplay, ChartEvent, ChartService,
    DemoDataPlan, EntryListQuery, EntryRepository, EntryService, NavDirection, NewEntryRequest,
    PeriodKind, RepoError, RepoResult, SqliteAccountRepository, SqliteEntryRepository,
    WeightEntry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (rusqlite::Connection, AccountId) {
    let conn = open_db_in_memory().unwrap();
    let account = {
        let accounts = SqliteAccountRepository::try_new(&conn).unwrap();
        accounts.create_account("tester", "hash").unwrap()
    };
    (conn, account)
}

#[test]
fn dispatch_renders_week_then_navigates_to_empty_previous_week() {
    let (conn, account) = setup();
    {
        let repo = SqliteEntryRepository::try_new(&conn).unwrap();
        repo.create_entry(account, &WeightEntry::new(date(2024, 1, 1), 180.0))
            .unwrap();
        repo.create_entry(account, &WeightEntry::new(date(2024, 1, 3), 178.0))
            .unwrap();
    }

    let service = ChartService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let today = date(2024, 1, 3);
    let mut controller = ChartController::new(PeriodKind::Week, today);

    let display = service.dispatch(account, &mut controller, ChartEvent::Refresh, today);
    let ChartDisplay::Ready(view) = display else {
        panic!("expected ready display");
    };
    assert_eq!(view.period_label, "Jan 01 - Jan 07, 2024");
    assert_eq!(view.series.labels.len(), 7);
    assert_eq!(view.series.points.len(), 2);
    let axis = view.axis.unwrap();
    assert_eq!(axis.min, 173.0);
    assert_eq!(axis.max, 185.0);

    // The prior week holds nothing.
    let display = service.dispatch(
        account,
        &mut controller,
        ChartEvent::Navigate(NavDirection::Previous),
        today,
    );
    assert_eq!(display, ChartDisplay::NoData);
    assert_eq!(controller.period().anchor, date(2023, 12, 27));
}

#[test]
fn selecting_a_mode_re_anchors_to_today_and_recomputes() {
    let (conn, account) = setup();
    {
        let repo = SqliteEntryRepository::try_new(&conn).unwrap();
        repo.create_entry(account, &WeightEntry::new(date(2024, 6, 10), 172.0))
            .unwrap();
    }

    let service = ChartService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let today = date(2024, 6, 12);
    let mut controller = ChartController::new(PeriodKind::Week, today);

    // Wander far away, then switch modes: the anchor must snap back.
    for _ in 0..5 {
        service.dispatch(
            account,
            &mut controller,
            ChartEvent::Navigate(NavDirection::Previous),
            today,
        );
    }
    let display = service.dispatch(
        account,
        &mut controller,
        ChartEvent::SelectKind(PeriodKind::Year),
        today,
    );

    assert_eq!(controller.period().anchor, today);
    let ChartDisplay::Ready(view) = display else {
        panic!("expected ready display");
    };
    assert_eq!(view.period_label, "2024");
    assert_eq!(view.series.labels.len(), 12);
    assert_eq!(view.series.points.len(), 1);
    assert_eq!(view.series.points[0].x_index, 5);
}

#[test]
fn refresh_after_delete_reflects_the_mutation() {
    let (conn, account) = setup();
    let entry = WeightEntry::new(date(2024, 1, 2), 180.0);
    {
        let repo = SqliteEntryRepository::try_new(&conn).unwrap();
        repo.create_entry(account, &entry).unwrap();
    }

    let service = ChartService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let today = date(2024, 1, 2);
    let mut controller = ChartController::new(PeriodKind::Week, today);

    let before = service.dispatch(account, &mut controller, ChartEvent::Refresh, today);
    assert!(matches!(before, ChartDisplay::Ready(_)));

    {
        let repo = SqliteEntryRepository::try_new(&conn).unwrap();
        repo.delete_entry(account, entry.uuid).unwrap();
    }

    let after = service.dispatch(account, &mut controller, ChartEvent::Refresh, today);
    assert_eq!(after, ChartDisplay::NoData);
}

struct FailingRepo;

impl EntryRepository for FailingRepo {
    fn create_entry(&self, _: AccountId, _: &WeightEntry) -> RepoResult<uuid::Uuid> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }

    fn create_entries(&self, _: AccountId, _: &[WeightEntry]) -> RepoResult<usize> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }

    fn get_entry(&self, _: AccountId, _: uuid::Uuid) -> RepoResult<Option<WeightEntry>> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }

    fn list_entries(&self, _: AccountId, _: &EntryListQuery) -> RepoResult<Vec<WeightEntry>> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }

    fn delete_entry(&self, _: AccountId, _: uuid::Uuid) -> RepoResult<()> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }
}

#[test]
fn fetch_failure_surfaces_failed_display_state() {
    let service = ChartService::new(FailingRepo);
    let today = date(2024, 1, 3);
    let mut controller = ChartController::new(PeriodKind::Month, today);

    let display = service.dispatch(
        account_id(),
        &mut controller,
        ChartEvent::Refresh,
        today,
    );
    assert_eq!(display, ChartDisplay::Failed);
}

fn account_id() -> AccountId {
    uuid::Uuid::from_u128(1)
}

#[test]
fn seeded_demo_year_charts_all_twelve_months() {
    let (conn, account) = setup();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let mut rng = StdRng::seed_from_u64(11);
    let plan = DemoDataPlan::calendar_year(2024);
    let inserted = service.seed_demo_data(account, &plan, &mut rng).unwrap();
    assert_eq!(inserted, 366);

    let chart = ChartService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let today = date(2024, 7, 15);
    let mut controller = ChartController::new(PeriodKind::Year, today);
    let display = chart.dispatch(account, &mut controller, ChartEvent::Refresh, today);

    let ChartDisplay::Ready(view) = display else {
        panic!("expected ready display");
    };
    assert_eq!(view.series.labels.len(), 12);
    assert_eq!(view.series.points.len(), 12);
    // The plan trends downward overall.
    assert!(view.series.points[11].value < view.series.points[0].value);
    assert!(view.axis.is_some());
}

#[test]
fn entry_service_add_normalizes_blank_notes() {
    let (conn, account) = setup();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let mut request = NewEntryRequest::new(date(2024, 1, 2), 180.0);
    request.notes = Some("   ".to_string());
    let id = service.add_entry(account, request).unwrap();

    let loaded = service.get_entry(account, id).unwrap().unwrap();
    assert!(loaded.notes.is_none());
    assert_eq!(loaded.date.month(), 1);
}
