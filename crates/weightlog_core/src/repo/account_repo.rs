//! Account repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist account identities and credential hashes.
//! - Surface unique-username violations as a semantic error.
//!
//! # Invariants
//! - `password_hash` never leaves the repository/service boundary as part of
//!   a public `Account` projection.
//! - Usernames are compared exactly as stored (trimming happens in the
//!   service layer before persistence).

use crate::model::account::{Account, AccountId};
use crate::repo::entry_repo::{ensure_column, ensure_table, RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, Row};
use uuid::Uuid;

const ACCOUNT_SELECT_SQL: &str = "SELECT
    uuid,
    username,
    password_hash
FROM accounts";

/// Internal read model carrying the credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub uuid: AccountId,
    pub username: String,
    pub password_hash: String,
}

impl AccountRecord {
    /// Strips the credential hash for UI-safe hand-off.
    pub fn to_account(&self) -> Account {
        Account {
            uuid: self.uuid,
            username: self.username.clone(),
        }
    }
}

/// Repository interface for account persistence.
pub trait AccountRepository {
    fn create_account(&self, username: &str, password_hash: &str) -> RepoResult<AccountId>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<AccountRecord>>;
    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "accounts")?;
        for column in ["uuid", "username", "password_hash"] {
            ensure_column(conn, "accounts", column)?;
        }
        Ok(Self { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_account(&self, username: &str, password_hash: &str) -> RepoResult<AccountId> {
        let id = Uuid::new_v4();
        let inserted = self.conn.execute(
            "INSERT INTO accounts (uuid, username, password_hash)
             VALUES (?1, ?2, ?3);",
            params![id.to_string(), username, password_hash],
        );

        match inserted {
            Ok(_) => Ok(id),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::UsernameTaken(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<AccountRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE username = ?1;"))?;

        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?.to_account()));
        }

        Ok(None)
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<AccountRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in accounts.uuid"))
    })?;

    Ok(AccountRecord {
        uuid,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
    })
}
