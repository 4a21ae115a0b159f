// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password digests (bcrypt).
//!
//! Both operations run on tokio's blocking pool, never on a runtime worker.

use super::AuthError;

/// Hash a password with a fresh random salt at the given cost.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::InternalError(format!("hashing task failed: {e}")))?
        .map_err(|e| AuthError::InternalError(format!("password hashing failed: {e}")))
}

/// Check a password against a stored digest.
pub async fn verify_password(password: String, digest: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest))
        .await
        .map_err(|e| AuthError::InternalError(format!("verification task failed: {e}")))?
        .map_err(|e| AuthError::InternalError(format!("password verification failed: {e}")))
}
