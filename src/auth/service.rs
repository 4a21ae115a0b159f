// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signup and login.

use crate::config::AuthSettings;
use crate::storage::{CommunityDatabase, NewUser, UserRepository};

use super::password::{hash_password, verify_password};
use super::{AuthError, AuthenticatedUser, TokenCodec};

/// Orchestrates the credential store, password digests and token issuance.
pub struct AuthService<'a> {
    db: &'a CommunityDatabase,
    tokens: &'a TokenCodec,
    settings: &'a AuthSettings,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a CommunityDatabase,
        tokens: &'a TokenCodec,
        settings: &'a AuthSettings,
    ) -> Self {
        Self {
            db,
            tokens,
            settings,
        }
    }

    /// Register a new user.
    ///
    /// Inputs are expected to be validated already. The email is compared
    /// exactly as given (case-sensitive).
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let users = UserRepository::new(self.db);

        // Skip the expensive hash for an obvious duplicate. The insert below
        // re-checks inside its transaction.
        if users.email_exists(email)? {
            tracing::info!("Signup rejected: email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = hash_password(password.to_string(), self.settings.bcrypt_cost).await?;

        let user = users.create(NewUser {
            email: email.to_string(),
            password_hash,
            nickname: nickname.to_string(),
        })?;

        tracing::info!(user_id = user.id, "User signed up");
        Ok(user.into())
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email)? else {
            tracing::warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok(token)
    }
}
