// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signup and login endpoints.

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{LoginRequest, SignupRequest, TokenResponse, UserResponse},
    state::AppState,
    validation::{validate_email, validate_nickname, validate_password},
};

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_nickname(&request.nickname)?;

    let user = state
        .auth_service()
        .signup(&request.email, &request.password, &request.nickname)
        .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let token = state
        .auth_service()
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(TokenResponse::bearer(token)))
}
