// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post repository.
//!
//! Posts are keyed by a sequence-assigned id, so iterating the table backwards
//! yields newest-first order without a secondary index. Mutations read the
//! post, check ownership and write it back inside one write transaction.

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;
use crate::storage::database::{
    next_id, CommunityDatabase, StoreError, StoreResult, POSTS, POST_SEQUENCE, USERS,
};
use crate::storage::ownership::{OwnedResource, OwnershipEnforcer};

use super::users::UserId;

pub type PostId = u64;

/// Hard cap on the number of posts a single listing returns.
pub const MAX_LIST_LIMIT: usize = 50;

/// Post stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredPost {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Set once at creation from the authenticated caller; never changes.
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for StoredPost {
    fn owner_id(&self) -> UserId {
        self.author_id
    }

    fn resource_label(&self) -> String {
        format!("post {}", self.id)
    }
}

/// Partial update. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Repository for post operations.
pub struct PostRepository<'a> {
    db: &'a CommunityDatabase,
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a CommunityDatabase) -> Self {
        Self { db }
    }

    /// Get a post by id.
    pub fn get(&self, post_id: PostId) -> StoreResult<StoredPost> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;
        let post = match table.get(post_id)? {
            Some(value) => serde_json::from_slice(value.value())?,
            None => return Err(StoreError::NotFound(format!("Post {post_id}"))),
        };
        Ok(post)
    }

    /// Newest posts first (descending id), at most [`MAX_LIST_LIMIT`].
    pub fn list_recent(&self, limit: usize) -> StoreResult<Vec<StoredPost>> {
        let limit = limit.min(MAX_LIST_LIMIT);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;

        let mut posts = Vec::with_capacity(limit);
        for entry in table.iter()?.rev().take(limit) {
            let (_, value) = entry?;
            posts.push(serde_json::from_slice(value.value())?);
        }
        Ok(posts)
    }

    /// Create a post authored by `author`.
    ///
    /// The author must still exist when the transaction runs.
    pub fn create(
        &self,
        author: &AuthenticatedUser,
        title: String,
        content: String,
    ) -> StoreResult<StoredPost> {
        let write_txn = self.db.begin_write()?;
        let post = {
            let users = write_txn.open_table(USERS)?;
            if users.get(author.id)?.is_none() {
                return Err(StoreError::NotFound(format!("User {}", author.id)));
            }

            let now = Utc::now();
            let post = StoredPost {
                id: next_id(&write_txn, POST_SEQUENCE)?,
                title,
                content,
                author_id: author.id,
                created_at: now,
                updated_at: now,
            };

            let json = serde_json::to_vec(&post)?;
            let mut posts = write_txn.open_table(POSTS)?;
            posts.insert(post.id, json.as_slice())?;
            post
        };
        write_txn.commit()?;
        Ok(post)
    }

    /// Apply `changes` to a post owned by `author` and refresh `updated_at`.
    pub fn update_by_author(
        &self,
        post_id: PostId,
        author: &AuthenticatedUser,
        changes: PostChanges,
    ) -> StoreResult<StoredPost> {
        let write_txn = self.db.begin_write()?;
        let post = {
            let mut table = write_txn.open_table(POSTS)?;

            let existing_bytes = {
                let existing = table
                    .get(post_id)?
                    .ok_or_else(|| StoreError::NotFound(format!("Post {post_id}")))?;
                existing.value().to_vec()
            };

            let mut post: StoredPost = serde_json::from_slice(&existing_bytes)?;
            post.verify_ownership(author)?;

            if let Some(title) = changes.title {
                post.title = title;
            }
            if let Some(content) = changes.content {
                post.content = content;
            }
            post.updated_at = Utc::now();

            let json = serde_json::to_vec(&post)?;
            table.insert(post_id, json.as_slice())?;
            post
        };
        write_txn.commit()?;
        Ok(post)
    }

    /// Permanently remove a post owned by `author`.
    pub fn delete_by_author(&self, post_id: PostId, author: &AuthenticatedUser) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(POSTS)?;

            let existing_bytes = {
                let existing = table
                    .get(post_id)?
                    .ok_or_else(|| StoreError::NotFound(format!("Post {post_id}")))?;
                existing.value().to_vec()
            };

            let post: StoredPost = serde_json::from_slice(&existing_bytes)?;
            post.verify_ownership(author)?;

            table.remove(post_id)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
