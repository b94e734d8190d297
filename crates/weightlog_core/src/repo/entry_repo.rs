//! Weight entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable, account-scoped CRUD APIs over `weight_entries` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `WeightEntry::validate()` before SQL mutations.
//! - A persisted row whose date text cannot be parsed is skipped with a warn
//!   log; aggregation over the remaining rows continues. Any other malformed
//!   persisted value is a hard `InvalidData` error.
//! - Range listing is inclusive on both bounds and orders by date with a
//!   stable uuid tiebreak.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::account::AccountId;
use crate::model::entry::{EntryId, EntryValidationError, Mood, WeightEntry};
use chrono::NaiveDate;
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DATE_DB_FORMAT: &str = "%Y-%m-%d";

const ENTRY_SELECT_SQL: &str = "SELECT
    uuid,
    entry_date,
    weight_lbs,
    notes,
    sleep_hours,
    steps,
    calories,
    mood
FROM weight_entries";

const REQUIRED_ENTRY_COLUMNS: &[&str] = &[
    "uuid",
    "account_uuid",
    "entry_date",
    "weight_lbs",
    "notes",
    "sleep_hours",
    "steps",
    "calories",
    "mood",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    UsernameTaken(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::UsernameTaken(name) => write!(f, "username already taken: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table missing: `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column missing: `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing entries.
///
/// `from`/`to` bound the entry date inclusively; `None` leaves the side
/// open. Default order is date ascending (chart fetch); the list screen sets
/// `newest_first`.
#[derive(Debug, Clone, Default)]
pub struct EntryListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub newest_first: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl EntryListQuery {
    /// Inclusive date-range query in ascending order, as the chart fetch
    /// contract requires.
    pub fn date_range(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }
}

/// Repository interface for account-scoped weight entry operations.
pub trait EntryRepository {
    fn create_entry(&self, account: AccountId, entry: &WeightEntry) -> RepoResult<EntryId>;
    /// Inserts all entries in one transaction; returns the inserted count.
    fn create_entries(&self, account: AccountId, entries: &[WeightEntry]) -> RepoResult<usize>;
    fn get_entry(&self, account: AccountId, id: EntryId) -> RepoResult<Option<WeightEntry>>;
    fn list_entries(
        &self,
        account: AccountId,
        query: &EntryListQuery,
    ) -> RepoResult<Vec<WeightEntry>>;
    fn delete_entry(&self, account: AccountId, id: EntryId) -> RepoResult<()>;
}

/// SQLite-backed weight entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, account: AccountId, entry: &WeightEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO weight_entries (
                uuid,
                account_uuid,
                entry_date,
                weight_lbs,
                notes,
                sleep_hours,
                steps,
                calories,
                mood
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                entry.uuid.to_string(),
                account.to_string(),
                date_to_db(entry.date),
                entry.weight_lbs,
                entry.notes.as_deref(),
                entry.sleep_hours,
                entry.steps.map(i64::from),
                entry.calories.map(i64::from),
                entry.mood.map(Mood::as_db_str),
            ],
        )?;

        Ok(entry.uuid)
    }

    fn create_entries(&self, account: AccountId, entries: &[WeightEntry]) -> RepoResult<usize> {
        for entry in entries {
            entry.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO weight_entries (
                    uuid,
                    account_uuid,
                    entry_date,
                    weight_lbs,
                    notes,
                    sleep_hours,
                    steps,
                    calories,
                    mood
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.uuid.to_string(),
                    account.to_string(),
                    date_to_db(entry.date),
                    entry.weight_lbs,
                    entry.notes.as_deref(),
                    entry.sleep_hours,
                    entry.steps.map(i64::from),
                    entry.calories.map(i64::from),
                    entry.mood.map(Mood::as_db_str),
                ])?;
            }
        }
        tx.commit()?;

        Ok(entries.len())
    }

    fn get_entry(&self, account: AccountId, id: EntryId) -> RepoResult<Option<WeightEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE uuid = ?1
               AND account_uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), account.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_entry_row(row);
        }

        Ok(None)
    }

    fn list_entries(
        &self,
        account: AccountId,
        query: &EntryListQuery,
    ) -> RepoResult<Vec<WeightEntry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} WHERE account_uuid = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(account.to_string())];

        if let Some(from) = query.from {
            sql.push_str(" AND entry_date >= ?");
            bind_values.push(Value::Text(date_to_db(from)));
        }

        if let Some(to) = query.to {
            sql.push_str(" AND entry_date <= ?");
            bind_values.push(Value::Text(date_to_db(to)));
        }

        if query.newest_first {
            sql.push_str(" ORDER BY entry_date DESC, uuid ASC");
        } else {
            sql.push_str(" ORDER BY entry_date ASC, uuid ASC");
        }

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            if let Some(entry) = parse_entry_row(row)? {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    fn delete_entry(&self, account: AccountId, id: EntryId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM weight_entries
             WHERE uuid = ?1
               AND account_uuid = ?2;",
            params![id.to_string(), account.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Decodes one `weight_entries` row.
///
/// Returns `Ok(None)` when the persisted date text does not parse: the row
/// is skipped so one corrupt record cannot take down a whole period load.
fn parse_entry_row(row: &Row<'_>) -> RepoResult<Option<WeightEntry>> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in weight_entries.uuid"
        ))
    })?;

    let date_text: String = row.get("entry_date")?;
    let Ok(date) = NaiveDate::parse_from_str(&date_text, DATE_DB_FORMAT) else {
        warn!(
            "event=entry_row_skipped module=repo status=warn reason=bad_date uuid={uuid} raw_date={date_text}"
        );
        return Ok(None);
    };

    let mood = match row.get::<_, Option<String>>("mood")? {
        Some(value) => Some(Mood::parse_db(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid mood `{value}` in weight_entries.mood"))
        })?),
        None => None,
    };

    let entry = WeightEntry {
        uuid,
        date,
        weight_lbs: row.get("weight_lbs")?,
        notes: row.get("notes")?,
        sleep_hours: row.get("sleep_hours")?,
        steps: read_optional_u32(row, "steps")?,
        calories: read_optional_u32(row, "calories")?,
        mood,
    };
    entry.validate()?;
    Ok(Some(entry))
}

fn read_optional_u32(row: &Row<'_>, column: &'static str) -> RepoResult<Option<u32>> {
    match row.get::<_, Option<i64>>(column)? {
        Some(value) => {
            let converted = u32::try_from(value).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid value `{value}` in weight_entries.{column}"
                ))
            })?;
            Ok(Some(converted))
        }
        None => Ok(None),
    }
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_DB_FORMAT).to_string()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    ensure_table(conn, "weight_entries")?;
    for column in REQUIRED_ENTRY_COLUMNS {
        ensure_column(conn, "weight_entries", *column)?;
    }

    Ok(())
}

pub(crate) fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::MissingRequiredTable(table));
    }
    Ok(())
}

pub(crate) fn ensure_column(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
) -> RepoResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(());
        }
    }
    Err(RepoError::MissingRequiredColumn { table, column })
}
