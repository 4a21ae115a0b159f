// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded community database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user id → serialized StoredUser
//! - `user_emails`: exact email → user id (uniqueness index)
//! - `posts`: post id → serialized StoredPost
//! - `sequences`: sequence name → last issued id

use std::path::Path;

use redb::{
    backends::InMemoryBackend, Database, ReadableDatabase, ReadableTable, ReadableTableMetadata,
    TableDefinition, WriteTransaction,
};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: user id → serialized StoredUser (JSON bytes).
pub(crate) const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Index: email (case-sensitive, as stored) → user id.
pub(crate) const USER_EMAILS: TableDefinition<&str, u64> = TableDefinition::new("user_emails");

/// Primary table: post id → serialized StoredPost (JSON bytes).
pub(crate) const POSTS: TableDefinition<u64, &[u8]> = TableDefinition::new("posts");

/// Id generators: sequence name → last id handed out.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

pub(crate) const USER_SEQUENCE: &str = "users";
pub(crate) const POST_SEQUENCE: &str = "posts";

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("permission denied: user {user_id} cannot modify {resource}")]
    PermissionDenied { user_id: u64, resource: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// CommunityDatabase
// =============================================================================

/// Embedded ACID store for users and posts.
pub struct CommunityDatabase {
    db: Database,
}

impl CommunityDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;
        Self::with_tables(db)
    }

    /// Volatile database, used by tests and throwaway instances.
    pub fn in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::with_tables(db)
    }

    /// Pre-create all tables so later read transactions don't fail.
    fn with_tables(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USER_EMAILS)?;
            let _ = write_txn.open_table(POSTS)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    pub(crate) fn begin_read(&self) -> StoreResult<redb::ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    pub(crate) fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Readiness probe: open a read transaction and touch the primary tables.
    pub fn check(&self) -> StoreResult<()> {
        let read_txn = self.begin_read()?;
        read_txn.open_table(USERS)?.len()?;
        read_txn.open_table(POSTS)?.len()?;
        Ok(())
    }
}

/// Hand out the next id of a sequence inside an open write transaction.
///
/// Ids start at 1 and are never reused, even after deletes.
pub(crate) fn next_id(write_txn: &WriteTransaction, sequence: &str) -> StoreResult<u64> {
    let mut table = write_txn.open_table(SEQUENCES)?;
    let last = table.get(sequence)?.map(|v| v.value()).unwrap_or(0);
    let next = last + 1;
    table.insert(sequence, next)?;
    Ok(next)
}
