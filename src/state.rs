// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::auth::{AuthService, TokenCodec};
use crate::config::AuthSettings;
use crate::storage::CommunityDatabase;

/// Shared, read-only application state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<CommunityDatabase>,
    pub tokens: Arc<TokenCodec>,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(db: CommunityDatabase, auth: AuthSettings) -> Self {
        Self {
            db: Arc::new(db),
            tokens: Arc::new(TokenCodec::new(&auth)),
            auth: Arc::new(auth),
        }
    }

    /// Authentication service borrowing this state.
    pub fn auth_service(&self) -> AuthService<'_> {
        AuthService::new(&self.db, &self.tokens, &self.auth)
    }
}
