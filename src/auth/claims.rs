// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{StoredUser, UserId};

/// Claims carried by a session token.
///
/// `sub` is the decimal user id. It is a string, as registered JWT claims
/// require, and is parsed back into a [`UserId`] on verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// The calling user, freshly loaded from the credential store.
///
/// This is the primary type used throughout the application to represent
/// the user making a request. It never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for AuthenticatedUser {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            created_at: user.created_at,
        }
    }
}
