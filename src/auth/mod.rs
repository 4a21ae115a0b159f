// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Password-based accounts with stateless bearer sessions.
//!
//! ## Auth Flow
//!
//! 1. `POST /auth/signup` stores the email, nickname and a bcrypt digest
//! 2. `POST /auth/login` checks the digest and returns a signed JWT
//!    (`sub` = user id, `exp` = now + configured TTL)
//! 3. Clients send `Authorization: Bearer <token>`
//! 4. The `Auth` extractor verifies the token and reloads the user
//!
//! ## Security
//!
//! - Login failures never reveal whether the email exists
//! - Tokens cannot be revoked early; deleting the user makes them unusable
//! - The signing secret and algorithm are fixed at startup

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod resolver;
pub mod service;
pub mod token;

pub use claims::{AuthenticatedUser, SessionClaims};
pub use error::AuthError;
pub use extractor::{bearer_token, Auth};
pub use resolver::resolve_identity;
pub use service::AuthService;
pub use token::TokenCodec;
