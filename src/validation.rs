// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Boundary validation for request fields.
//!
//! Lengths are counted in characters, not bytes.

use std::ops::RangeInclusive;

pub const EMAIL_MAX_CHARS: usize = 255;
pub const PASSWORD_CHARS: RangeInclusive<usize> = 4..=72;
pub const NICKNAME_CHARS: RangeInclusive<usize> = 1..=50;
pub const TITLE_CHARS: RangeInclusive<usize> = 1..=200;

/// A request field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    range: RangeInclusive<usize>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if range.contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!(
                "must be between {} and {} characters (got {len})",
                range.start(),
                range.end()
            ),
        ))
    }
}

/// Basic email shape: `local@domain.tld`, no whitespace, one `@`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new("email", "must be a valid email address");

    if email.is_empty() || email.chars().count() > EMAIL_MAX_CHARS {
        return Err(invalid());
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_length("password", password, PASSWORD_CHARS)
}

pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    check_length("nickname", nickname, NICKNAME_CHARS)
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_length("title", title, TITLE_CHARS)
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        Err(ValidationError::new("content", "must not be empty"))
    } else {
        Ok(())
    }
}
