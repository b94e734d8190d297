//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `WeightEntry::validate()` before
//!   persistence.
//! - Every entry operation is scoped by `AccountId`; one account can never
//!   observe another account's rows.
//! - Repository APIs return semantic errors (`NotFound`, `UsernameTaken`) in
//!   addition to DB transport errors.

pub mod account_repo;
pub mod entry_repo;
