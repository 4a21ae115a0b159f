// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for users and posts in a single embedded redb file.
//!
//! ## Layout
//!
//! ```text
//! users        id    -> StoredUser (JSON)
//! user_emails  email -> id
//! posts        id    -> StoredPost (JSON)
//! sequences    name  -> last id
//! ```
//!
//! Every repository call runs in its own redb transaction. Read-check-write
//! sequences (email uniqueness, post ownership) never span two transactions.

pub mod database;
pub mod ownership;
pub mod repository;

pub use database::{CommunityDatabase, StoreError, StoreResult};
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use repository::{
    NewUser, PostChanges, PostId, PostRepository, StoredPost, StoredUser, UserId, UserRepository,
    MAX_LIST_LIMIT,
};
