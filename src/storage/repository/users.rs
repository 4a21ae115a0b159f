// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository (credential store).
//!
//! Users are keyed by a sequence-assigned id. A separate `user_emails` index
//! maps the exact, case-sensitive email to that id and enforces uniqueness.

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use crate::storage::database::{
    next_id, CommunityDatabase, StoreError, StoreResult, USERS, USER_EMAILS, USER_SEQUENCE,
};

pub type UserId = u64;

/// User record as persisted. The digest never leaves the auth layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    pub id: UserId,
    pub email: String,
    /// bcrypt digest (includes its own salt and cost)
    pub password_hash: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a user; id and timestamp are assigned here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a CommunityDatabase,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a CommunityDatabase) -> Self {
        Self { db }
    }

    /// Get a user by id.
    pub fn get(&self, user_id: UserId) -> StoreResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        let user = match table.get(user_id)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        Ok(user)
    }

    /// Look up a user by exact email.
    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(USER_EMAILS)?;
        let Some(user_id) = emails.get(email)?.map(|v| v.value()) else {
            return Ok(None);
        };

        let users = read_txn.open_table(USERS)?;
        let user = match users.get(user_id)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        Ok(user)
    }

    /// Whether an email is already registered.
    pub fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(USER_EMAILS)?;
        let exists = emails.get(email)?.is_some();
        Ok(exists)
    }

    /// Persist a new user.
    ///
    /// The uniqueness check and the insert share one write transaction, so two
    /// concurrent signups with the same email cannot both succeed.
    pub fn create(&self, new_user: NewUser) -> StoreResult<StoredUser> {
        let write_txn = self.db.begin_write()?;
        let user = {
            let mut emails = write_txn.open_table(USER_EMAILS)?;
            if emails.get(new_user.email.as_str())?.is_some() {
                return Err(StoreError::AlreadyExists(format!("User {}", new_user.email)));
            }

            let user = StoredUser {
                id: next_id(&write_txn, USER_SEQUENCE)?,
                email: new_user.email,
                password_hash: new_user.password_hash,
                nickname: new_user.nickname,
                created_at: Utc::now(),
            };

            let json = serde_json::to_vec(&user)?;
            let mut users = write_txn.open_table(USERS)?;
            users.insert(user.id, json.as_slice())?;
            emails.insert(user.email.as_str(), user.id)?;
            user
        };
        write_txn.commit()?;
        Ok(user)
    }
}
