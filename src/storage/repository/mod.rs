// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the community database.

pub mod posts;
pub mod users;

pub use posts::{PostChanges, PostId, PostRepository, StoredPost, MAX_LIST_LIMIT};
pub use users::{NewUser, StoredUser, UserId, UserRepository};
