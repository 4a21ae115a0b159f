// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{resolve_identity, AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Reads `Authorization: Bearer <token>` and resolves it against the
/// credential store. A missing header, another scheme, or an empty credential
/// all count as no token presented (`Unauthenticated`).
///
/// # Example
///
/// ```rust,ignore
/// async fn create_post(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<PostResponse>, ApiError> {
///     // user.id is the author
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);

        let user = resolve_identity(&state.db, &state.tokens, token).map_err(|e| {
            tracing::debug!(error_code = e.error_code(), "Rejected bearer token");
            e
        })?;

        Ok(Auth(user))
    }
}

/// Extract the credential of a `Bearer` authorization header.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credential) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let credential = credential.trim();
    if credential.is_empty() {
        None
    } else {
        Some(credential)
    }
}
