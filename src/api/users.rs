// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Current user endpoint.

use axum::Json;

use crate::{auth::Auth, models::UserResponse};

/// Get the profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token"),
    )
)]
pub async fn me(Auth(user): Auth) -> Json<UserResponse> {
    Json(user.into())
}
