//! Account use-case service: sign-up and sign-in.
//!
//! # Responsibility
//! - Validate credential input (trimmed, non-blank).
//! - Hash passwords before persistence and verify them on sign-in.
//!
//! # Invariants
//! - Plaintext passwords never reach the repository layer.
//! - Sign-in failure does not reveal whether the username exists.
//! - No session or token state is kept; callers hold the returned
//!   `Account` for scoping.

use crate::model::account::Account;
use crate::repo::account_repo::AccountRepository;
use crate::repo::entry_repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from account sign-up/sign-in use-cases.
#[derive(Debug)]
pub enum AccountServiceError {
    /// Username is blank after trim.
    BlankUsername,
    /// Password is blank.
    BlankPassword,
    /// Username is already registered.
    UsernameTaken(String),
    /// Unknown username or wrong password; deliberately indistinct.
    InvalidCredentials,
    /// Password hashing/verification backend failure.
    Credential(bcrypt::BcryptError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AccountServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::BlankPassword => write!(f, "password must not be blank"),
            Self::UsernameTaken(name) => write!(f, "username already taken: `{name}`"),
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::Credential(err) => write!(f, "credential processing failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Credential(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UsernameTaken(name) => Self::UsernameTaken(name),
            other => Self::Repo(other),
        }
    }
}

impl From<bcrypt::BcryptError> for AccountServiceError {
    fn from(value: bcrypt::BcryptError) -> Self {
        Self::Credential(value)
    }
}

/// Account service facade over repository implementations.
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new account and returns its public projection.
    pub fn sign_up(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AccountServiceError> {
        let username = normalize_username(username)?;
        if password.is_empty() {
            return Err(AccountServiceError::BlankPassword);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        let account_id = self.repo.create_account(username, &password_hash)?;
        info!("event=account_created module=account status=ok account_id={account_id}");

        Ok(Account {
            uuid: account_id,
            username: username.to_string(),
        })
    }

    /// Verifies credentials and returns the matching account.
    ///
    /// Unknown usernames and wrong passwords both map to
    /// `InvalidCredentials`.
    pub fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AccountServiceError> {
        let username = normalize_username(username)?;
        if password.is_empty() {
            return Err(AccountServiceError::BlankPassword);
        }

        let Some(record) = self.repo.find_by_username(username)? else {
            return Err(AccountServiceError::InvalidCredentials);
        };

        if !bcrypt::verify(password, &record.password_hash)? {
            return Err(AccountServiceError::InvalidCredentials);
        }

        info!(
            "event=account_sign_in module=account status=ok account_id={}",
            record.uuid
        );
        Ok(record.to_account())
    }
}

fn normalize_username(username: &str) -> Result<&str, AccountServiceError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(AccountServiceError::BlankUsername);
    }
    Ok(trimmed)
}
