// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token codec.
//!
//! Tokens are HMAC-signed JWTs carrying `{sub, iat, exp}`. Nothing is stored
//! server-side: a token is valid while its signature checks out and the
//! current instant is strictly before `exp`. Changing the secret invalidates
//! every outstanding token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::SessionClaims;
use super::AuthError;
use crate::config::AuthSettings;
use crate::storage::UserId;

/// Issues and verifies session tokens with a process-wide secret.
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(settings: &AuthSettings) -> Self {
        let secret = settings.jwt_secret.as_bytes();
        Self {
            algorithm: settings.jwt_algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: settings.token_ttl,
        }
    }

    /// Issue a token for `user_id` valid for the configured TTL from now.
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now(), self.ttl)
    }

    /// Issue a token as if at `issued_at`, valid for `ttl`.
    ///
    /// `exp` is rounded up to the next whole second so the token stays valid
    /// for any instant strictly before `issued_at + ttl`.
    pub fn issue_at(
        &self,
        user_id: UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::InternalError("token expiry out of range".to_string()))?;
        let mut exp = expires_at.timestamp();
        if expires_at.timestamp_subsec_nanos() > 0 {
            exp += 1;
        }

        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(format!("token encoding failed: {e}")))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        // exp is checked by hand against `now`: `now >= exp` is expired.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        claims.sub.parse::<UserId>().map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::TimeZone;

    fn settings(secret: &str) -> AuthSettings {
        AuthSettings {
            jwt_secret: secret.to_string(),
            ..AuthSettings::default()
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn round_trip_before_expiry() {
        let codec = TokenCodec::new(&settings("secret"));
        let token = codec.issue(42).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), 42);
    }

    #[test]
    fn valid_until_last_instant_before_expiry() {
        let codec = TokenCodec::new(&settings("secret"));
        let issued = at(1_700_000_000);
        let token = codec.issue_at(7, issued, Duration::minutes(60)).unwrap();

        let last_second = issued + Duration::minutes(60) - Duration::seconds(1);
        assert_eq!(codec.verify_at(&token, last_second).unwrap(), 7);
    }

    #[test]
    fn expired_at_and_after_encoded_expiry() {
        let codec = TokenCodec::new(&settings("secret"));
        let issued = at(1_700_000_000);
        let token = codec.issue_at(7, issued, Duration::minutes(60)).unwrap();
        let expiry = issued + Duration::minutes(60);

        assert!(matches!(codec.verify_at(&token, expiry), Err(AuthError::TokenExpired)));
        assert!(matches!(
            codec.verify_at(&token, expiry + Duration::days(1)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn fractional_expiry_rounds_up() {
        let codec = TokenCodec::new(&settings("secret"));
        let issued = at(1_700_000_000) + Duration::milliseconds(500);
        let token = codec.issue_at(3, issued, Duration::seconds(10)).unwrap();

        // True expiry is xx10.5; xx10.2 is strictly before it.
        let just_before = at(1_700_000_010) + Duration::milliseconds(200);
        assert_eq!(codec.verify_at(&token, just_before).unwrap(), 3);
        assert!(matches!(
            codec.verify_at(&token, at(1_700_000_011)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issuer = TokenCodec::new(&settings("secret-a"));
        let verifier = TokenCodec::new(&settings("secret-b"));
        let token = issuer.issue(1).unwrap();

        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn rejects_token_with_other_algorithm() {
        let hs512 = TokenCodec::new(&AuthSettings {
            jwt_algorithm: Algorithm::HS512,
            ..settings("secret")
        });
        let hs256 = TokenCodec::new(&settings("secret"));
        let token = hs512.issue(1).unwrap();

        assert!(matches!(hs256.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn rejects_malformed_tokens() {
        let codec = TokenCodec::new(&settings("secret"));
        for token in ["", "not-a-jwt", "a.b.c", "a.b"] {
            assert!(
                matches!(codec.verify(token), Err(AuthError::InvalidToken)),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_tampered_payload() {
        let codec = TokenCodec::new(&settings("secret"));
        let token = codec.issue(1).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = format!(r#"{{"sub":"2","iat":0,"exp":{}}}"#, i64::MAX / 2);
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged_claims.as_bytes()),
            parts[2]
        );

        assert!(matches!(codec.verify(&forged), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn rejects_non_numeric_subject() {
        let settings = settings("secret");
        let codec = TokenCodec::new(&settings);
        let claims = SessionClaims {
            sub: "user_123".to_string(),
            iat: 0,
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn rejects_token_without_expiry() {
        #[derive(serde::Serialize)]
        struct NoExp {
            sub: String,
        }

        let settings = settings("secret");
        let codec = TokenCodec::new(&settings);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExp { sub: "1".into() },
            &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn unrepresentable_expiry_is_internal_error() {
        let codec = TokenCodec::new(&settings("secret"));
        let result = codec.issue_at(1, Utc::now(), Duration::days(365 * 1_000_000));
        assert!(matches!(result, Err(AuthError::InternalError(_))));
    }
}
