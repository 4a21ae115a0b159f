// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity resolution: presented token → current user record.

use crate::storage::{CommunityDatabase, UserRepository};

use super::{AuthError, AuthenticatedUser, TokenCodec};

/// Resolve the calling user from an optional bearer token.
///
/// The user is looked up on every call, so a deleted account stops resolving
/// immediately even though its tokens remain cryptographically valid. That
/// case is reported as `UserNotFound` (401), never as 403/410.
pub fn resolve_identity(
    db: &CommunityDatabase,
    tokens: &TokenCodec,
    presented: Option<&str>,
) -> Result<AuthenticatedUser, AuthError> {
    let token = presented.ok_or(AuthError::Unauthenticated)?;
    let user_id = tokens.verify(token)?;

    UserRepository::new(db)
        .get(user_id)?
        .map(AuthenticatedUser::from)
        .ok_or(AuthError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use crate::storage::NewUser;
    use chrono::{Duration, Utc};

    fn setup() -> (CommunityDatabase, TokenCodec) {
        let db = CommunityDatabase::in_memory().unwrap();
        let tokens = TokenCodec::new(&AuthSettings::default());
        (db, tokens)
    }

    fn add_user(db: &CommunityDatabase, email: &str) -> u64 {
        UserRepository::new(db)
            .create(NewUser {
                email: email.to_string(),
                password_hash: "digest".to_string(),
                nickname: "Al".to_string(),
            })
            .unwrap()
            .id
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        let (db, tokens) = setup();
        let result = resolve_identity(&db, &tokens, None);
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn resolves_current_user_record() {
        let (db, tokens) = setup();
        let id = add_user(&db, "a@x.com");
        let token = tokens.issue(id).unwrap();

        let user = resolve_identity(&db, &tokens, Some(&token)).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.nickname, "Al");
    }

    #[test]
    fn propagates_codec_failures() {
        let (db, tokens) = setup();
        let id = add_user(&db, "a@x.com");

        let garbage = resolve_identity(&db, &tokens, Some("garbage"));
        assert!(matches!(garbage, Err(AuthError::InvalidToken)));

        let expired = tokens
            .issue_at(id, Utc::now() - Duration::hours(2), Duration::hours(1))
            .unwrap();
        let result = resolve_identity(&db, &tokens, Some(&expired));
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn valid_token_for_unknown_user_is_user_not_found() {
        let (db, tokens) = setup();
        let token = tokens.issue(99).unwrap();

        let result = resolve_identity(&db, &tokens, Some(&token));
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}
