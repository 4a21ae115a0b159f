// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Community Server - Users, Sessions and Posts
//!
//! A small community backend: users sign up and log in with bcrypt-hashed
//! passwords, receive signed time-limited bearer tokens, and manage text posts
//! that only their author may change.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, password hashing, identity resolution
//! - `storage` - Embedded redb database and repositories
//! - `validation` - Request field checks

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod validation;
